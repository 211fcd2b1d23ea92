// Date utility functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Format used for day keys and calendar cell identifiers.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Anything that can be pinned to a calendar day.
///
/// Instants resolve to the viewer's local calendar date whatever offset they
/// carry, so a release entered at 00:30 local time stays on that day instead
/// of drifting to the previous UTC day.
pub trait DayKey {
    fn day_key(&self) -> NaiveDate;
}

impl DayKey for NaiveDate {
    fn day_key(&self) -> NaiveDate {
        *self
    }
}

impl DayKey for NaiveDateTime {
    fn day_key(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> DayKey for DateTime<Tz> {
    fn day_key(&self) -> NaiveDate {
        self.with_timezone(&Local).date_naive()
    }
}

impl<T: DayKey + ?Sized> DayKey for &T {
    fn day_key(&self) -> NaiveDate {
        (**self).day_key()
    }
}

pub fn format_day_key(date: impl DayKey) -> String {
    date.day_key().format(DAY_KEY_FORMAT).to_string()
}

/// Parse a day key. Accepts plain `YYYY-MM-DD` and timestamps whose date part
/// comes before a `T` separator.
pub fn parse_day_key(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DAY_KEY_FORMAT).ok()
}

pub fn is_same_day(date1: impl DayKey, date2: impl DayKey) -> bool {
    date1.day_key() == date2.day_key()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
