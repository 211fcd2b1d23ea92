// Ticket service module
// CRUD, queries and release-date writes for the ticket store

mod crud;
mod queries;
mod shared;
mod writer;

use rusqlite::Connection;

pub use writer::SqliteReleaseWriter;

/// Service for managing tickets in the database.
pub struct TicketService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> TicketService<'a> {
    /// Create a new ticket service with a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::drag::{ReleaseWriter, WriteError};
    use crate::models::board::{STATUS_COMPLETED, STATUS_IN_PROGRESS};
    use crate::models::schedule::ReleaseAxis;
    use crate::models::ticket::{Priority, Ticket};
    use crate::services::database::Database;
    use chrono::{Local, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        Database::open_initialized(":memory:").unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ticket(title: &str) -> Ticket {
        Ticket::new(title).unwrap()
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Login fails")).unwrap();

        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[test]
    fn test_create_keeps_explicit_id() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut t = ticket("Explicit");
        t.id = Some("T-1".to_string());
        let created = service.create(t).unwrap();

        assert_eq!(created.id.as_deref(), Some("T-1"));
        assert!(service.get("T-1").unwrap().is_some());
    }

    #[test]
    fn test_create_rejects_invalid_ticket() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut t = ticket("Valid at first");
        t.title = "   ".to_string();

        assert!(service.create(t).is_err());
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_drops_unsupported_extension_fields() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut t = ticket("Extension");
        t.client = Some("Acme".to_string());
        t.tag_number = Some("TAG-9".to_string());
        let created = service.create(t).unwrap();

        let stored = service.get(created.id.as_deref().unwrap()).unwrap().unwrap();
        assert_eq!(stored.tag_number, None);
    }

    #[test]
    fn test_get_round_trips_fields() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let t = Ticket::builder()
            .title("Release checkout")
            .client("Esselunga Spa")
            .priority(Priority::High)
            .sprint("S12")
            .test_release(day(2024, 3, 15))
            .production_release(day(2024, 3, 22))
            .tag_number("TAG-1")
            .application("Checkout")
            .build()
            .unwrap();
        let created = service.create(t).unwrap();
        let id = created.id.clone().unwrap();

        let stored = service.get(&id).unwrap().unwrap();
        assert_eq!(stored.title, "Release checkout");
        assert_eq!(stored.client.as_deref(), Some("Esselunga Spa"));
        assert_eq!(stored.priority, Priority::High);
        assert_eq!(stored.sprint.as_deref(), Some("S12"));
        assert_eq!(stored.test_release, Some(day(2024, 3, 15)));
        assert_eq!(stored.production_release, Some(day(2024, 3, 22)));
        assert_eq!(stored.tag_number.as_deref(), Some("TAG-1"));
        assert_eq!(stored.application.as_deref(), Some("Checkout"));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        assert!(service.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_update_ticket() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut created = service.create(ticket("Before")).unwrap();
        created.title = "After".to_string();
        created.assignee = Some("Giulia".to_string());
        service.update(&created).unwrap();

        let stored = service.get(created.id.as_deref().unwrap()).unwrap().unwrap();
        assert_eq!(stored.title, "After");
        assert_eq!(stored.assignee.as_deref(), Some("Giulia"));
    }

    #[test]
    fn test_update_requires_id_and_existing_row() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut t = ticket("No id");
        assert!(service.update(&t).is_err());

        t.id = Some("ghost".to_string());
        let err = service.update(&t).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_delete_ticket() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Delete me")).unwrap();
        let id = created.id.unwrap();

        service.delete(&id).unwrap();
        assert!(service.get(&id).unwrap().is_none());
        assert!(service.delete(&id).is_err());
    }

    #[test]
    fn test_set_release_date_and_clear() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Schedule")).unwrap();
        let id = created.id.unwrap();

        service
            .set_release_date(&id, ReleaseAxis::Production, Some(day(2024, 5, 2)))
            .unwrap();
        let stored = service.get(&id).unwrap().unwrap();
        assert_eq!(stored.production_release, Some(day(2024, 5, 2)));
        assert_eq!(stored.test_release, None);

        service.set_release_date(&id, ReleaseAxis::Production, None).unwrap();
        let stored = service.get(&id).unwrap().unwrap();
        assert_eq!(stored.production_release, None);
    }

    #[test]
    fn test_set_release_date_unknown_ticket() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        assert!(service
            .set_release_date("ghost", ReleaseAxis::Test, Some(day(2024, 1, 1)))
            .is_err());
    }

    #[test]
    fn test_set_status_stamps_contact_time() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Status")).unwrap();
        let id = created.id.unwrap();
        let now = Local.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();

        service.set_status(&id, STATUS_IN_PROGRESS, now).unwrap();

        let stored = service.get(&id).unwrap().unwrap();
        assert_eq!(stored.status, STATUS_IN_PROGRESS);
        assert_eq!(stored.last_contact_at, Some(now));
    }

    #[test]
    fn test_set_status_rejects_unknown_status() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Status")).unwrap();
        let err = service
            .set_status(created.id.as_deref().unwrap(), "Exploded", Local::now())
            .unwrap_err();
        assert!(err.to_string().contains("Unknown ticket status"));
    }

    #[test]
    fn test_list_scheduled_only_returns_dated_tickets() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        service.create(ticket("Unscheduled")).unwrap();
        let mut dated = ticket("Dated");
        dated.test_release = Some(day(2024, 3, 4));
        service.create(dated).unwrap();

        let scheduled = service.list_scheduled().unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].title, "Dated");

        let items = service.scheduled_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].test_date, Some(day(2024, 3, 4)));
        assert!(!items[0].is_external());
    }

    #[test]
    fn test_list_by_sprint() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut a = ticket("A");
        a.sprint = Some("S1".to_string());
        let mut b = ticket("B");
        b.sprint = Some("S2".to_string());
        service.create(a).unwrap();
        service.create(b).unwrap();

        let s1 = service.list_by_sprint("S1").unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].title, "A");
    }

    #[test]
    fn test_search_matches_title_and_client() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let mut a = ticket("Payment gateway");
        a.client = Some("Coop".to_string());
        let b = ticket("Printer jam");
        service.create(a).unwrap();
        service.create(b).unwrap();

        assert_eq!(service.search("PAYMENT").unwrap().len(), 1);
        assert_eq!(service.search("coop").unwrap().len(), 1);
        assert!(service.search("  ").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        service.create(ticket("Rollout to 50 stores")).unwrap();
        service.create(ticket("Discount 20% off")).unwrap();

        assert!(service.search("50%").unwrap().is_empty());
        assert!(service.search("_").unwrap().is_empty());

        let hits = service.search("20%").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Discount 20% off");
    }

    #[test]
    fn test_list_clients_distinct_sorted() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        for (title, client) in [("1", "beta"), ("2", "Alpha"), ("3", "beta")] {
            let mut t = ticket(title);
            t.client = Some(client.to_string());
            service.create(t).unwrap();
        }
        service.create(ticket("no client")).unwrap();

        assert_eq!(service.list_clients().unwrap(), vec!["Alpha", "beta"]);
    }

    #[test]
    fn test_list_by_last_contact_puts_never_contacted_first() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let contacted = service.create(ticket("Contacted")).unwrap();
        service.create(ticket("Silent")).unwrap();
        service
            .touch_contact(contacted.id.as_deref().unwrap(), Local::now())
            .unwrap();

        let ordered = service.list_by_last_contact().unwrap();
        assert_eq!(ordered[0].title, "Silent");
        assert_eq!(ordered[1].title, "Contacted");
    }

    #[test]
    fn test_release_writer_updates_date() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let created = service.create(ticket("Drag")).unwrap();
        let id = created.id.unwrap();

        service
            .write_release_date(&id, ReleaseAxis::Test, day(2024, 4, 1))
            .unwrap();
        assert_eq!(
            service.get(&id).unwrap().unwrap().test_release,
            Some(day(2024, 4, 1))
        );
    }

    #[test]
    fn test_release_writer_reports_missing_ticket() {
        let db = setup_test_db();
        let service = TicketService::new(db.connection());

        let result = service.write_release_date("ghost", ReleaseAxis::Test, day(2024, 4, 1));
        assert_eq!(result, Err(WriteError::NotFound("ghost".to_string())));
    }

    #[test]
    fn test_sqlite_release_writer_opens_own_connection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tickets.db");
        let path = path.to_str().unwrap();

        let db = Database::open_initialized(path).unwrap();
        let service = TicketService::new(db.connection());
        let created = service.create(ticket("Threaded")).unwrap();
        let id = created.id.unwrap();

        let writer = SqliteReleaseWriter::new(path);
        writer
            .write_release_date(&id, ReleaseAxis::Production, day(2024, 6, 3))
            .unwrap();

        let stored = service.get(&id).unwrap().unwrap();
        assert_eq!(stored.production_release, Some(day(2024, 6, 3)));
        assert_eq!(stored.status, crate::models::board::STATUS_OPEN);
        assert_ne!(stored.status, STATUS_COMPLETED);
    }
}
