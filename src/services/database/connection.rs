use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Writers on other connections may hold the lock this long before we give up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The ticket store's SQLite connection and the path it was opened from.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Open (or create) the database at `path` with foreign keys on and a
    /// busy timeout for concurrent release writers.
    ///
    /// # Examples
    /// ```
    /// use release_calendar::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// db.initialize_schema().unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open ticket database at {}", path))?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set busy timeout")?;
        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Opens the database and makes sure the schema is current.
    pub fn open_initialized(path: &str) -> Result<Self> {
        let db = Self::new(path)?;
        db.initialize_schema()?;
        Ok(db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Path the database was opened from, for reopening on worker threads.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create the tickets table and bring older files up to date.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}
