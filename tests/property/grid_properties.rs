// Property-based tests for calendar grid generation and day assignment

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use release_calendar::calendar::grid::{days_in_month, is_same_month};
use release_calendar::calendar::{generate_grid, items_for_date, navigate};
use release_calendar::models::schedule::{ReleaseAxis, ScheduledItem};
use release_calendar::models::ui::ViewGranularity;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990..2100i32, 1..=12u32, 1..=31u32).prop_map(|(y, m, d)| {
        (0..4)
            .find_map(|back| NaiveDate::from_ymd_opt(y, m, d - back))
            .unwrap()
    })
}

proptest! {
    /// Week grids are seven consecutive days starting on Monday and contain
    /// the reference date.
    #[test]
    fn prop_week_grid_is_monday_first(date in any_date()) {
        let grid = generate_grid(date, ViewGranularity::Week);

        prop_assert_eq!(grid.len(), 7);
        prop_assert_eq!(grid[0].weekday(), Weekday::Mon);
        prop_assert!(grid.contains(&date));
        for pair in grid.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    /// Month grids cover whole weeks, start on Monday, and contain every day
    /// of the month exactly once.
    #[test]
    fn prop_month_grid_covers_month(date in any_date()) {
        let grid = generate_grid(date, ViewGranularity::Month);

        prop_assert_eq!(grid.len() % 7, 0);
        prop_assert_eq!(grid[0].weekday(), Weekday::Mon);

        let in_month: Vec<&NaiveDate> = grid.iter().filter(|d| is_same_month(**d, date)).collect();
        prop_assert_eq!(in_month.len() as u32, days_in_month(date));
        prop_assert_eq!(in_month[0].day(), 1);

        // Trailing padding never spills into a full extra week.
        prop_assert!(is_same_month(grid[grid.len() - 7], date));
    }

    /// Stepping forward then back returns to the same week.
    #[test]
    fn prop_week_navigation_is_reversible(date in any_date(), steps in -20..20i32) {
        let there = navigate(date, ViewGranularity::Week, steps);
        let back = navigate(there, ViewGranularity::Week, -steps);
        prop_assert_eq!(back, date);
    }

    /// Month navigation always lands in the target month.
    #[test]
    fn prop_month_navigation_lands_in_month(date in any_date(), steps in -24..24i32) {
        let there = navigate(date, ViewGranularity::Month, steps);
        let months = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
        prop_assert_eq!(months(there) - months(date), steps);
    }

    /// Assignment is a pure function of its inputs.
    #[test]
    fn prop_items_for_date_is_idempotent(date in any_date(), offset in 0..5i64) {
        let items = vec![
            ScheduledItem::new("a", "A").with_date(ReleaseAxis::Test, date),
            ScheduledItem::new("b", "B")
                .with_client("Acme")
                .with_date(ReleaseAxis::Production, date + chrono::Duration::days(offset)),
        ];

        let first = items_for_date(date, &items, None);
        let second = items_for_date(date, &items, None);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|entry| entry.date() == Some(date)));
    }

    /// An item dated D on an axis appears at D under that axis.
    #[test]
    fn prop_dated_item_appears_on_its_day(date in any_date()) {
        let items = vec![fixtures::items::test_release("t1", date)];
        let entries = items_for_date(date, &items, None);

        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(entries[0].axis, ReleaseAxis::Test);
        prop_assert_eq!(entries[0].drag_id(), "t1:TEST");
    }
}

#[test]
fn test_known_month_layouts() {
    use fixtures::day;

    assert_eq!(generate_grid(day(2024, 3, 15), ViewGranularity::Month).len(), 35);
    assert_eq!(generate_grid(day(2021, 2, 1), ViewGranularity::Month).len(), 28);
    assert_eq!(generate_grid(day(2024, 9, 1), ViewGranularity::Month).len(), 42);
    assert_eq!(
        generate_grid(fixtures::dates::leap_day_2024(), ViewGranularity::Month)[0],
        day(2024, 1, 29)
    );
}
