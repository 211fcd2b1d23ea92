//! Calendar grid generation.
//!
//! Grids always start on a Monday. Week grids hold the seven days of the
//! reference date's ISO week; month grids hold the whole month padded on both
//! sides to complete rows of seven.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::ui::ViewGranularity;

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .map(|next| (next - first).num_days() as u32)
        // Only reachable at the very end of chrono's supported range.
        .unwrap_or(31)
}

/// Ordered dates visible for `reference` at the given granularity.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use release_calendar::calendar::grid::generate_grid;
/// use release_calendar::models::ui::ViewGranularity;
///
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let week = generate_grid(friday, ViewGranularity::Week);
/// assert_eq!(week.first(), NaiveDate::from_ymd_opt(2024, 3, 11).as_ref());
/// assert_eq!(week.len(), 7);
/// ```
pub fn generate_grid(reference: NaiveDate, granularity: ViewGranularity) -> Vec<NaiveDate> {
    match granularity {
        ViewGranularity::Week => week_grid(reference),
        ViewGranularity::Month => month_grid(reference),
    }
}

fn week_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    week_start(reference).iter_days().take(7).collect()
}

fn month_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(reference);
    let prefix_days = first.weekday().num_days_from_monday() as usize;
    let covered = prefix_days + days_in_month(reference) as usize;
    let total = covered.div_ceil(7) * 7;

    week_start(first).iter_days().take(total).collect()
}

/// Reference date one page forward (`steps > 0`) or backward (`steps < 0`).
///
/// Month steps keep the day of month, clamped to the length of the target
/// month (31 January moves to 29 February in a leap year).
pub fn navigate(reference: NaiveDate, granularity: ViewGranularity, steps: i32) -> NaiveDate {
    match granularity {
        ViewGranularity::Week => reference + Duration::weeks(steps as i64),
        ViewGranularity::Month => {
            let months = Months::new(steps.unsigned_abs());
            let moved = if steps >= 0 {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            };
            moved.unwrap_or(reference)
        }
    }
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_grid_for_friday() {
        let grid = generate_grid(day(2024, 3, 15), ViewGranularity::Week);
        let expected: Vec<NaiveDate> = (11..=17).map(|d| day(2024, 3, d)).collect();
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_week_grid_for_sunday_goes_back_to_monday() {
        let grid = generate_grid(day(2024, 3, 17), ViewGranularity::Week);
        assert_eq!(grid[0], day(2024, 3, 11));
        assert_eq!(grid[6], day(2024, 3, 17));
    }

    #[test]
    fn test_week_grid_across_year_boundary() {
        let grid = generate_grid(day(2025, 1, 1), ViewGranularity::Week);
        assert_eq!(grid[0], day(2024, 12, 30));
        assert_eq!(grid[6], day(2025, 1, 5));
    }

    #[test]
    fn test_month_grid_march_2024() {
        let grid = generate_grid(day(2024, 3, 15), ViewGranularity::Month);
        assert_eq!(grid.len(), 35);
        assert_eq!(&grid[..4], &[day(2024, 2, 26), day(2024, 2, 27), day(2024, 2, 28), day(2024, 2, 29)]);
        assert_eq!(grid[4], day(2024, 3, 1));
        assert_eq!(grid[34], day(2024, 3, 31));
    }

    #[test]
    fn test_month_grid_starting_on_monday_has_no_prefix() {
        // April 2024 starts on a Monday.
        let grid = generate_grid(day(2024, 4, 10), ViewGranularity::Month);
        assert_eq!(grid[0], day(2024, 4, 1));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[34], day(2024, 5, 5));
    }

    #[test]
    fn test_month_grid_without_suffix() {
        // February 2021: starts Monday, 28 days, exactly four rows.
        let grid = generate_grid(day(2021, 2, 1), ViewGranularity::Month);
        assert_eq!(grid.len(), 28);
        assert_eq!(grid[0], day(2021, 2, 1));
        assert_eq!(grid[27], day(2021, 2, 28));
    }

    #[test]
    fn test_month_grid_six_rows() {
        // September 2024 starts on a Sunday and spans six rows.
        let grid = generate_grid(day(2024, 9, 1), ViewGranularity::Month);
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0], day(2024, 8, 26));
        assert_eq!(grid[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_month_grid_spanning_year_change() {
        let grid = generate_grid(day(2024, 12, 20), ViewGranularity::Month);
        assert_eq!(grid[0], day(2024, 11, 25));
        assert_eq!(*grid.last().unwrap(), day(2025, 1, 5));
    }

    #[test_case(2024, 2, 29; "leap february")]
    #[test_case(2023, 2, 28; "common february")]
    #[test_case(2024, 4, 30; "thirty day month")]
    #[test_case(2024, 12, 31; "december")]
    fn test_days_in_month(year: i32, month: u32, expected: u32) {
        assert_eq!(days_in_month(day(year, month, 10)), expected);
    }

    #[test]
    fn test_navigate_week() {
        assert_eq!(navigate(day(2024, 3, 15), ViewGranularity::Week, 1), day(2024, 3, 22));
        assert_eq!(navigate(day(2024, 3, 15), ViewGranularity::Week, -2), day(2024, 3, 1));
    }

    #[test]
    fn test_navigate_month_clamps_day() {
        assert_eq!(navigate(day(2024, 1, 31), ViewGranularity::Month, 1), day(2024, 2, 29));
        assert_eq!(navigate(day(2024, 3, 31), ViewGranularity::Month, -1), day(2024, 2, 29));
        assert_eq!(navigate(day(2024, 12, 15), ViewGranularity::Month, 1), day(2025, 1, 15));
    }

    #[test]
    fn test_is_same_month() {
        assert!(is_same_month(day(2024, 3, 1), day(2024, 3, 31)));
        assert!(!is_same_month(day(2024, 3, 1), day(2023, 3, 1)));
    }
}
