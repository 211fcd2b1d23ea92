//! Assignment of scheduled items to calendar days.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::schedule::{Category, ReleaseAxis, ScheduledItem};
use crate::utils::date::{format_day_key, DayKey};

/// One item placed on one day along one release axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry<'a> {
    pub item: &'a ScheduledItem,
    pub axis: ReleaseAxis,
}

impl<'a> ScheduleEntry<'a> {
    pub fn date(&self) -> Option<NaiveDate> {
        self.item.date_for(self.axis)
    }

    /// Payload identifying this entry in drag operations: `<item id>:<axis>`.
    pub fn drag_id(&self) -> String {
        format!("{}:{}", self.item.id, Category::from(self.axis))
    }

    pub fn is_movable(&self) -> bool {
        !self.item.is_external()
    }
}

/// Whether `item` passes the owner filter. `None` means all clients.
pub fn matches_owner(item: &ScheduledItem, owner_filter: Option<&str>) -> bool {
    match owner_filter {
        None => true,
        Some(owner) => item.client.as_deref() == Some(owner),
    }
}

/// Entries scheduled on the day of `date`, in source order.
///
/// An item contributes one entry per axis whose date falls on that day, test
/// before production.
pub fn items_for_date<'a>(
    date: impl DayKey,
    items: &'a [ScheduledItem],
    owner_filter: Option<&str>,
) -> Vec<ScheduleEntry<'a>> {
    let target = date.day_key();

    items
        .iter()
        .filter(|item| matches_owner(item, owner_filter))
        .flat_map(|item| {
            ReleaseAxis::ALL
                .into_iter()
                .filter(move |axis| item.date_for(*axis) == Some(target))
                .map(move |axis| ScheduleEntry { item, axis })
        })
        .collect()
}

/// Distinct client names across `items`, sorted, for the owner filter picker.
pub fn client_names(items: &[ScheduledItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.client.as_deref())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Cell identifier used as the drop target for a day.
pub fn cell_id(date: impl DayKey) -> String {
    format_day_key(date)
}
