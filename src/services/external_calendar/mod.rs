// External calendar module
// Read-only partner release feed merged into the internal calendar

pub mod fetcher;
pub mod mapping;

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Local, Months};

use crate::models::schedule::ScheduledItem;
use crate::models::settings::ExternalCalendarConfig;

pub use fetcher::HttpEventFetcher;
pub use mapping::{ExternalClient, ExternalEvent};

/// Anything that can list partner events starting at or after `time_min`.
#[cfg_attr(test, mockall::automock)]
pub trait ExternalEventSource {
    fn fetch_events(&self, time_min: DateTime<Local>) -> Result<Vec<ExternalEvent>>;
}

/// Start of the trailing window the feed is asked for.
pub fn window_start(now: DateTime<Local>, window_months: u32) -> DateTime<Local> {
    now.checked_sub_months(Months::new(window_months))
        .unwrap_or(now)
}

/// Fetch and normalize partner events.
///
/// Never fails: any fetch or decoding problem is logged and yields an empty
/// list so the internal calendar still renders.
pub fn load_external_items(
    source: &dyn ExternalEventSource,
    config: &ExternalCalendarConfig,
    now: DateTime<Local>,
) -> Vec<ScheduledItem> {
    let time_min = window_start(now, config.window_months);

    match source.fetch_events(time_min) {
        Ok(events) => {
            let items = mapping::to_scheduled_items(&events, &config.partner_client, time_min.date_naive());
            log::debug!(
                "External calendar returned {} events, {} kept",
                events.len(),
                items.len()
            );
            items
        }
        Err(err) => {
            log::warn!("External calendar unavailable: {:#}", err);
            Vec::new()
        }
    }
}

/// Internal items first in their order, then external items in feed order
/// with duplicate ids dropped.
pub fn merge_external_events(
    internal: Vec<ScheduledItem>,
    external: Vec<ScheduledItem>,
) -> Vec<ScheduledItem> {
    let mut seen: HashSet<String> = internal.iter().map(|item| item.id.clone()).collect();
    let mut merged = internal;

    for item in external {
        if seen.insert(item.id.clone()) {
            merged.push(item);
        } else {
            log::debug!("Dropping duplicate external item {}", item.id);
        }
    }

    merged
}
