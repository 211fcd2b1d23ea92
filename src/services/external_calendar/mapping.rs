use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::schedule::{ItemSource, ReleaseAxis, ScheduledItem};
use crate::utils::date::parse_day_key;

pub const UNTITLED_EVENT: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalClient {
    pub nome: String,
}

/// One event as served by the partner calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalEvent {
    pub id: String,
    #[serde(default)]
    pub titolo: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub data: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "isExternal", default)]
    pub is_external: bool,
    #[serde(default)]
    pub clienti: Option<ExternalClient>,
}

impl ExternalEvent {
    pub fn axis(&self) -> Option<ReleaseAxis> {
        ReleaseAxis::parse(&self.event_type)
    }

    pub fn day(&self) -> Option<NaiveDate> {
        parse_day_key(&self.data)
    }
}

/// Decode a feed body. Anything other than a JSON array of events is an error.
pub fn parse_events(body: &[u8]) -> serde_json::Result<Vec<ExternalEvent>> {
    serde_json::from_slice(body)
}

/// Turn a feed event into a read-only calendar item.
///
/// Events with an unknown type, an unreadable date, or a date before
/// `window_start` are skipped.
pub fn to_scheduled_item(
    event: &ExternalEvent,
    partner_client: &str,
    window_start: NaiveDate,
) -> Option<ScheduledItem> {
    let Some(axis) = event.axis() else {
        log::warn!(
            "Skipping external event {} with unknown type {:?}",
            event.id,
            event.event_type
        );
        return None;
    };

    let Some(date) = event.day() else {
        log::warn!(
            "Skipping external event {} with unreadable date {:?}",
            event.id,
            event.data
        );
        return None;
    };

    if date < window_start {
        return None;
    }

    let title = event
        .titolo
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_EVENT);

    let mut item = ScheduledItem::new(format!("{}:{}", event.id, axis), title)
        .with_client(partner_client)
        .with_date(axis, date);
    item.source = ItemSource::External;
    Some(item)
}

pub fn to_scheduled_items(
    events: &[ExternalEvent],
    partner_client: &str,
    window_start: NaiveDate,
) -> Vec<ScheduledItem> {
    events
        .iter()
        .filter_map(|event| to_scheduled_item(event, partner_client, window_start))
        .collect()
}
