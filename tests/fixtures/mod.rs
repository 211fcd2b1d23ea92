// Test fixtures - reusable test data
// Shared by the integration, property and unit test binaries

#![allow(dead_code)]

use chrono::NaiveDate;
use release_calendar::models::schedule::{ItemSource, ReleaseAxis, ScheduledItem};
use release_calendar::models::ticket::Ticket;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Friday in the middle of March 2024
    pub fn mid_march_2024() -> NaiveDate {
        day(2024, 3, 15)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        day(2024, 2, 29)
    }
}

/// Sample calendar items
pub mod items {
    use super::*;

    pub fn test_release(id: &str, date: NaiveDate) -> ScheduledItem {
        ScheduledItem::new(id, format!("Ticket {}", id)).with_date(ReleaseAxis::Test, date)
    }

    pub fn production_release(id: &str, client: &str, date: NaiveDate) -> ScheduledItem {
        ScheduledItem::new(id, format!("Ticket {}", id))
            .with_client(client)
            .with_date(ReleaseAxis::Production, date)
    }

    pub fn external(id: &str, axis: ReleaseAxis, date: NaiveDate) -> ScheduledItem {
        let mut item = ScheduledItem::new(format!("{}:{}", id, axis), "Partner release")
            .with_client("ESSELUNGA")
            .with_date(axis, date);
        item.source = ItemSource::External;
        item
    }

    /// A mixed March 2024 schedule.
    pub fn march_schedule() -> Vec<ScheduledItem> {
        vec![
            test_release("t1", day(2024, 3, 12)),
            production_release("t2", "Acme", day(2024, 3, 12)),
            ScheduledItem::new("t3", "Both axes")
                .with_client("Coop")
                .with_date(ReleaseAxis::Test, day(2024, 2, 28))
                .with_date(ReleaseAxis::Production, day(2024, 3, 20)),
            external("ev1", ReleaseAxis::Test, day(2024, 3, 14)),
        ]
    }
}

/// Sample tickets
pub mod tickets {
    use super::*;

    pub fn scheduled(id: &str, test: Option<NaiveDate>, production: Option<NaiveDate>) -> Ticket {
        let mut ticket = Ticket::new(format!("Ticket {}", id)).unwrap();
        ticket.id = Some(id.to_string());
        ticket.test_release = test;
        ticket.production_release = production;
        ticket
    }
}
