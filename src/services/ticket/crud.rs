use super::shared::{date_to_sql, map_ticket_row, release_column, TICKET_COLUMNS};
use super::TicketService;
use crate::models::schedule::ReleaseAxis;
use crate::models::ticket::Ticket;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{self, params};
use uuid::Uuid;

impl<'a> TicketService<'a> {
    /// Create a new ticket in the database.
    ///
    /// Assigns an id when the ticket has none and drops extension fields the
    /// client does not support.
    pub fn create(&self, mut ticket: Ticket) -> Result<Ticket> {
        let dropped = ticket.strip_unsupported_extensions();
        if !dropped.is_empty() {
            log::debug!(
                "Dropped {:?} for client {:?} on new ticket",
                dropped,
                ticket.client
            );
        }
        ticket.validate().map_err(|e| anyhow!(e))?;

        let id = ticket
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Local::now();

        self.conn
            .execute(
                &format!(
                    "INSERT INTO tickets ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                    TICKET_COLUMNS
                ),
                params![
                    id,
                    ticket.title,
                    ticket.description,
                    ticket.client,
                    ticket.status,
                    ticket.priority.as_str(),
                    ticket.assignee,
                    ticket.sprint,
                    date_to_sql(ticket.test_release),
                    date_to_sql(ticket.production_release),
                    ticket.last_contact_at.map(|dt| dt.to_rfc3339()),
                    ticket.tag_number,
                    ticket.application,
                    ticket.activity_type,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert ticket")?;

        log::info!("Created ticket {} ({})", id, ticket.title);

        ticket.id = Some(id);
        ticket.created_at = Some(now);
        ticket.updated_at = Some(now);

        Ok(ticket)
    }

    /// Retrieve a ticket by ID.
    pub fn get(&self, id: &str) -> Result<Option<Ticket>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM tickets WHERE id = ?1", TICKET_COLUMNS),
            [id],
            map_ticket_row,
        );

        match result {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err).context("Failed to fetch ticket by id"),
        }
    }

    /// Update an existing ticket.
    pub fn update(&self, ticket: &Ticket) -> Result<()> {
        let id = ticket
            .id
            .as_deref()
            .ok_or_else(|| anyhow!("Ticket ID is required for update"))?;
        ticket.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE tickets SET
                    title = ?1, description = ?2, client_name = ?3, status = ?4,
                    priority = ?5, assignee = ?6, sprint = ?7,
                    test_release_date = ?8, production_release_date = ?9,
                    last_contact_at = ?10, tag_number = ?11, application = ?12,
                    activity_type = ?13, updated_at = ?14
                 WHERE id = ?15",
                params![
                    ticket.title,
                    ticket.description,
                    ticket.client,
                    ticket.status,
                    ticket.priority.as_str(),
                    ticket.assignee,
                    ticket.sprint,
                    date_to_sql(ticket.test_release),
                    date_to_sql(ticket.production_release),
                    ticket.last_contact_at.map(|dt| dt.to_rfc3339()),
                    ticket.tag_number,
                    ticket.application,
                    ticket.activity_type,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update ticket")?;

        if rows_affected == 0 {
            return Err(anyhow!("Ticket with id {} not found", id));
        }

        Ok(())
    }

    /// Delete a ticket by ID.
    pub fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM tickets WHERE id = ?1", [id])
            .context("Failed to delete ticket")?;

        if rows_affected == 0 {
            return Err(anyhow!("Ticket with id {} not found", id));
        }

        log::info!("Deleted ticket {}", id);
        Ok(())
    }

    /// Set (or clear) one release date. Returns the number of rows touched.
    pub(crate) fn write_release_column(
        &self,
        id: &str,
        axis: ReleaseAxis,
        date: Option<NaiveDate>,
    ) -> Result<usize> {
        let sql = format!(
            "UPDATE tickets SET {} = ?1, updated_at = ?2 WHERE id = ?3",
            release_column(axis)
        );

        self.conn
            .execute(
                &sql,
                params![date_to_sql(date), Local::now().to_rfc3339(), id],
            )
            .with_context(|| format!("Failed to update {} release date of ticket {}", axis, id))
    }

    /// Persist a release date chosen on the calendar.
    pub fn set_release_date(&self, id: &str, axis: ReleaseAxis, date: Option<NaiveDate>) -> Result<()> {
        if self.write_release_column(id, axis, date)? == 0 {
            return Err(anyhow!("Ticket with id {} not found", id));
        }

        log::info!("Ticket {} {} release set to {:?}", id, axis, date);
        Ok(())
    }

    /// Move a ticket to another status, stamping the contact time.
    pub fn set_status(&self, id: &str, status: &str, now: DateTime<Local>) -> Result<()> {
        if !crate::models::board::is_known_status(status) {
            return Err(anyhow!("Unknown ticket status: {}", status));
        }

        let rows_affected = self
            .conn
            .execute(
                "UPDATE tickets SET status = ?1, last_contact_at = ?2, updated_at = ?3 WHERE id = ?4",
                params![status, now.to_rfc3339(), Local::now().to_rfc3339(), id],
            )
            .context("Failed to update ticket status")?;

        if rows_affected == 0 {
            return Err(anyhow!("Ticket with id {} not found", id));
        }

        log::info!("Ticket {} moved to status {}", id, status);
        Ok(())
    }

    /// Record contact with the client without changing anything else.
    pub fn touch_contact(&self, id: &str, now: DateTime<Local>) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE tickets SET last_contact_at = ?1, updated_at = ?2 WHERE id = ?3",
                params![now.to_rfc3339(), Local::now().to_rfc3339(), id],
            )
            .context("Failed to update ticket contact time")?;

        if rows_affected == 0 {
            return Err(anyhow!("Ticket with id {} not found", id));
        }

        Ok(())
    }
}
