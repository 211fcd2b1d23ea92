use chrono::NaiveDate;

use super::TicketService;
use crate::calendar::drag::{ReleaseWriter, WriteError};
use crate::models::schedule::ReleaseAxis;
use crate::services::database::Database;

impl<'a> ReleaseWriter for TicketService<'a> {
    fn write_release_date(
        &self,
        item_id: &str,
        axis: ReleaseAxis,
        date: NaiveDate,
    ) -> Result<(), WriteError> {
        match self.write_release_column(item_id, axis, Some(date)) {
            Ok(0) => Err(WriteError::NotFound(item_id.to_string())),
            Ok(_) => Ok(()),
            Err(err) => Err(WriteError::Storage(format!("{:#}", err))),
        }
    }
}

/// Release writer that opens its own connection for every write, so it can
/// run on a worker thread.
#[derive(Debug, Clone)]
pub struct SqliteReleaseWriter {
    db_path: String,
}

impl SqliteReleaseWriter {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl ReleaseWriter for SqliteReleaseWriter {
    fn write_release_date(
        &self,
        item_id: &str,
        axis: ReleaseAxis,
        date: NaiveDate,
    ) -> Result<(), WriteError> {
        let db = Database::new(&self.db_path)
            .map_err(|err| WriteError::Storage(format!("{:#}", err)))?;
        TicketService::new(db.connection()).write_release_date(item_id, axis, date)
    }
}
