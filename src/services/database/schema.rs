use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_tickets_table(conn)?;
    run_ticket_migrations(conn)?;
    create_ticket_indexes(conn)?;
    Ok(())
}

fn create_tickets_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tickets (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            client_name TEXT,
            status TEXT NOT NULL DEFAULT 'Open',
            priority TEXT NOT NULL DEFAULT 'Medium',
            assignee TEXT,
            test_release_date TEXT,
            production_release_date TEXT,
            last_contact_at TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create tickets table")?;

    Ok(())
}

/// Columns added after the first release of the store.
fn run_ticket_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "tickets",
        "sprint",
        "ALTER TABLE tickets ADD COLUMN sprint TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "tickets",
        "tag_number",
        "ALTER TABLE tickets ADD COLUMN tag_number TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "tickets",
        "application",
        "ALTER TABLE tickets ADD COLUMN application TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "tickets",
        "activity_type",
        "ALTER TABLE tickets ADD COLUMN activity_type TEXT",
    )?;

    Ok(())
}

fn create_ticket_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tickets_release_dates
         ON tickets (test_release_date, production_release_date)",
        [],
    )
    .context("Failed to create release date index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tickets_sprint ON tickets (sprint)",
        [],
    )
    .context("Failed to create sprint index")?;

    Ok(())
}
