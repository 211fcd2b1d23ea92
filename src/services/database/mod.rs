// Database service module
// SQLite connection and schema management for the ticket store

mod connection;
pub mod migrations;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("tickets.db");
        let db_path_str = db_path.to_str().unwrap();

        let db = Database::new(db_path_str).unwrap();
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
        assert_eq!(db.path(), db_path_str);
    }

    #[test]
    fn test_initialize_schema_is_repeatable() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.initialize_schema().is_ok());
        assert!(db.initialize_schema().is_ok(), "Second run should be a no-op");
    }

    #[test]
    fn test_tickets_table_exists() {
        let db = Database::open_initialized(":memory:").unwrap();

        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='tickets'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 1, "Tickets table should exist");
    }

    #[test]
    fn test_migrated_columns_present() {
        let db = Database::open_initialized(":memory:").unwrap();
        let conn = db.connection();

        for column in ["sprint", "tag_number", "application", "activity_type"] {
            assert!(
                migrations::column_exists(conn, "tickets", column).unwrap(),
                "column {column} should exist"
            );
        }
        assert!(!migrations::column_exists(conn, "tickets", "missing").unwrap());
    }

    #[test]
    fn test_migration_upgrades_old_table() {
        let db = Database::new(":memory:").unwrap();
        db.connection()
            .execute(
                "CREATE TABLE tickets (
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
            .unwrap();

        db.initialize_schema().unwrap();
        assert!(migrations::column_exists(db.connection(), "tickets", "sprint").unwrap());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new(":memory:").unwrap();

        let enabled: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(enabled, 1, "Foreign keys should be enabled");
    }
}
