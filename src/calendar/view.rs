//! View state and the derived calendar cells.

use chrono::NaiveDate;

use super::assignment::{cell_id, client_names, items_for_date, ScheduleEntry};
use super::grid::{generate_grid, is_same_month, navigate};
use crate::models::schedule::ScheduledItem;
use crate::models::ui::ViewGranularity;

/// Client-local state of the release calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub reference_date: NaiveDate,
    pub granularity: ViewGranularity,
    pub selected_date: Option<NaiveDate>,
    /// `None` shows every client.
    pub owner_filter: Option<String>,
}

impl ViewState {
    /// Fresh state focused on `today`, which is also selected.
    pub fn new(today: NaiveDate, granularity: ViewGranularity) -> Self {
        Self {
            reference_date: today,
            granularity,
            selected_date: Some(today),
            owner_filter: None,
        }
    }

    pub fn next(&mut self) {
        self.reference_date = navigate(self.reference_date, self.granularity, 1);
    }

    pub fn previous(&mut self) {
        self.reference_date = navigate(self.reference_date, self.granularity, -1);
    }

    pub fn set_granularity(&mut self, granularity: ViewGranularity) {
        self.granularity = granularity;
    }

    pub fn select(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    /// Set the owner filter; blank names reset it to all clients.
    pub fn set_owner_filter(&mut self, owner: Option<&str>) {
        self.owner_filter = owner
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }

    pub fn owner_filter(&self) -> Option<&str> {
        self.owner_filter.as_deref()
    }

    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        generate_grid(self.reference_date, self.granularity)
    }
}

/// A single rendered day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    pub in_focus_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub entries: Vec<ScheduleEntry<'a>>,
}

impl<'a> CalendarCell<'a> {
    pub fn id(&self) -> String {
        cell_id(self.date)
    }

    /// Month views dim cells that only pad the grid.
    pub fn is_padding(&self, granularity: ViewGranularity) -> bool {
        granularity == ViewGranularity::Month && !self.in_focus_month
    }
}

/// Build every visible cell for `state` from the item list.
pub fn build_cells<'a>(
    state: &ViewState,
    items: &'a [ScheduledItem],
    today: NaiveDate,
) -> Vec<CalendarCell<'a>> {
    let owner = state.owner_filter();
    let cells: Vec<CalendarCell<'a>> = state
        .visible_dates()
        .into_iter()
        .map(|date| CalendarCell {
            date,
            in_focus_month: is_same_month(date, state.reference_date),
            is_today: date == today,
            is_selected: state.selected_date == Some(date),
            entries: items_for_date(date, items, owner),
        })
        .collect();

    log::debug!(
        "Built {} {} cells around {} ({} items, filter {:?})",
        cells.len(),
        state.granularity,
        state.reference_date,
        items.len(),
        owner
    );

    cells
}

/// Entries for the detail panel of the selected day.
pub fn selected_entries<'a>(state: &ViewState, items: &'a [ScheduledItem]) -> Vec<ScheduleEntry<'a>> {
    state
        .selected_date
        .map(|date| items_for_date(date, items, state.owner_filter()))
        .unwrap_or_default()
}

/// Client names available to the owner filter.
pub fn owner_options(items: &[ScheduledItem]) -> Vec<String> {
    client_names(items)
}
