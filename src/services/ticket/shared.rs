use std::error::Error as StdError;

use chrono::{DateTime, Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{self, Result, Row};

use crate::models::schedule::ReleaseAxis;
use crate::models::ticket::{Priority, Ticket};
use crate::utils::date::{format_day_key, parse_day_key};

pub(crate) const TICKET_COLUMNS: &str = "id, title, description, client_name, status, priority,
    assignee, sprint, test_release_date, production_release_date, last_contact_at,
    tag_number, application, activity_type, created_at, updated_at";

pub(crate) fn release_column(axis: ReleaseAxis) -> &'static str {
    match axis {
        ReleaseAxis::Test => "test_release_date",
        ReleaseAxis::Production => "production_release_date",
    }
}

pub(crate) fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|day| format_day_key(day))
}

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    let source: Box<dyn StdError + Send + Sync> = message.into();
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, source)
}

fn date_from_sql(index: usize, value: Option<String>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_day_key(&text)
            .map(Some)
            .ok_or_else(|| conversion_error(index, format!("Invalid release date: {}", text))),
    }
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn optional_datetime(value: Option<String>) -> Result<Option<DateTime<Local>>> {
    value.map(to_local_datetime).transpose()
}

pub(crate) fn map_ticket_row(row: &Row<'_>) -> Result<Ticket> {
    let priority = row
        .get::<_, String>(5)?
        .parse::<Priority>()
        .map_err(|e| conversion_error(5, e))?;

    Ok(Ticket {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        client: row.get(3)?,
        status: row.get(4)?,
        priority,
        assignee: row.get(6)?,
        sprint: row.get(7)?,
        test_release: date_from_sql(8, row.get(8)?)?,
        production_release: date_from_sql(9, row.get(9)?)?,
        last_contact_at: optional_datetime(row.get(10)?)?,
        tag_number: row.get(11)?,
        application: row.get(12)?,
        activity_type: row.get(13)?,
        created_at: optional_datetime(row.get(14)?)?,
        updated_at: optional_datetime(row.get(15)?)?,
    })
}
