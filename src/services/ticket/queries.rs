use super::shared::{map_ticket_row, TICKET_COLUMNS};
use super::TicketService;
use crate::models::schedule::ScheduledItem;
use crate::models::ticket::Ticket;
use anyhow::{Context, Result};
use rusqlite::{self, Params};

impl<'a> TicketService<'a> {
    fn query_tickets<P: Params>(&self, filter: &str, params: P) -> Result<Vec<Ticket>> {
        let sql = format!("SELECT {} FROM tickets {}", TICKET_COLUMNS, filter);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to prepare ticket query")?;

        let tickets = stmt
            .query_map(params, map_ticket_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to load tickets")?;

        Ok(tickets)
    }

    /// Every ticket, most recently created first.
    pub fn list_all(&self) -> Result<Vec<Ticket>> {
        self.query_tickets("ORDER BY created_at DESC, id ASC", [])
    }

    /// Tickets with at least one release date, in creation order.
    pub fn list_scheduled(&self) -> Result<Vec<Ticket>> {
        self.query_tickets(
            "WHERE test_release_date IS NOT NULL OR production_release_date IS NOT NULL
             ORDER BY created_at ASC, id ASC",
            [],
        )
    }

    /// Calendar items for every scheduled ticket.
    pub fn scheduled_items(&self) -> Result<Vec<ScheduledItem>> {
        let items = self
            .list_scheduled()?
            .iter()
            .map(Ticket::to_scheduled_item)
            .collect();
        Ok(items)
    }

    pub fn list_by_sprint(&self, sprint: &str) -> Result<Vec<Ticket>> {
        self.query_tickets("WHERE sprint = ?1 ORDER BY created_at DESC, id ASC", [sprint])
    }

    /// Tickets ordered by last contact, never-contacted first.
    pub fn list_by_last_contact(&self) -> Result<Vec<Ticket>> {
        self.query_tickets(
            "ORDER BY last_contact_at IS NOT NULL, last_contact_at ASC, id ASC",
            [],
        )
    }

    /// Case-insensitive search over title and client name.
    pub fn search(&self, query: &str) -> Result<Vec<Ticket>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        // instr keeps `%` and `_` literal.
        let needle = query.trim().to_lowercase();
        self.query_tickets(
            "WHERE instr(LOWER(title), ?1) > 0 OR instr(LOWER(COALESCE(client_name, '')), ?1) > 0
             ORDER BY created_at DESC, id ASC",
            [&needle],
        )
    }

    /// Distinct client names, sorted case-insensitively.
    pub fn list_clients(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT client_name FROM tickets
                 WHERE client_name IS NOT NULL AND TRIM(client_name) != ''
                 ORDER BY client_name COLLATE NOCASE ASC",
            )
            .context("Failed to prepare client list query")?;

        let clients = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to load client names")?;

        Ok(clients)
    }
}
