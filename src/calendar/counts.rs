//! Release totals shown in the calendar header.

use chrono::NaiveDate;
use serde::Serialize;

use super::grid::is_same_month;
use super::view::CalendarCell;
use crate::models::schedule::ReleaseAxis;
use crate::models::ui::ViewGranularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryCounts {
    pub production: usize,
    pub test: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.production + self.test
    }

    fn add(&mut self, axis: ReleaseAxis) {
        match axis {
            ReleaseAxis::Test => self.test += 1,
            ReleaseAxis::Production => self.production += 1,
        }
    }
}

/// Count entries per axis. Month views skip the padding cells outside
/// `focus_month`; week views count every cell.
pub fn count_by_category(
    cells: &[CalendarCell<'_>],
    focus_month: NaiveDate,
    granularity: ViewGranularity,
) -> CategoryCounts {
    cells
        .iter()
        .filter(|cell| granularity == ViewGranularity::Week || is_same_month(cell.date, focus_month))
        .flat_map(|cell| cell.entries.iter())
        .fold(CategoryCounts::default(), |mut counts, entry| {
            counts.add(entry.axis);
            counts
        })
}
