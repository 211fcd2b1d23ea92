use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::Local;
use release_calendar::models::board::column_by_id;
use release_calendar::models::ticket::{Priority, Ticket};
use release_calendar::services::ticket::TicketService;

use super::{parse_date, AppContext};

/// Fields accepted by `ticket add`.
#[derive(Debug, Default)]
pub struct NewTicket {
    pub title: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub status: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub sprint: Option<String>,
    pub test_release: Option<String>,
    pub production_release: Option<String>,
    pub tag_number: Option<String>,
    pub application: Option<String>,
    pub activity_type: Option<String>,
}

impl NewTicket {
    fn into_ticket(self) -> Result<Ticket> {
        let mut builder = Ticket::builder().title(self.title);

        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(client) = self.client {
            builder = builder.client(client);
        }
        if let Some(status) = self.status {
            builder = builder.status(status);
        }
        if let Some(priority) = self.priority {
            builder = builder.priority(priority);
        }
        if let Some(assignee) = self.assignee {
            builder = builder.assignee(assignee);
        }
        if let Some(sprint) = self.sprint {
            builder = builder.sprint(sprint);
        }
        if let Some(date) = self.test_release.as_deref() {
            builder = builder.test_release(parse_date(date)?);
        }
        if let Some(date) = self.production_release.as_deref() {
            builder = builder.production_release(parse_date(date)?);
        }
        if let Some(tag_number) = self.tag_number {
            builder = builder.tag_number(tag_number);
        }
        if let Some(application) = self.application {
            builder = builder.application(application);
        }
        if let Some(activity_type) = self.activity_type {
            builder = builder.activity_type(activity_type);
        }

        builder.build().map_err(|e| anyhow!(e))
    }
}

pub fn add(ctx: &AppContext, new_ticket: NewTicket) -> Result<()> {
    let db = ctx.open_database()?;
    add_with(&TicketService::new(db.connection()), new_ticket, &mut std::io::stdout())
}

pub fn list(ctx: &AppContext) -> Result<()> {
    let db = ctx.open_database()?;
    let tickets = TicketService::new(db.connection()).list_all()?;
    write_list(&tickets, &mut std::io::stdout())
}

pub fn show(ctx: &AppContext, id: &str) -> Result<()> {
    let db = ctx.open_database()?;
    let ticket = TicketService::new(db.connection())
        .get(id)?
        .ok_or_else(|| anyhow!("Ticket {} not found", id))?;
    write_details(&ticket, &mut std::io::stdout())
}

/// Board column ids (`todo`, `progress`, `done`) stand for the column's
/// first status, as when a card is dropped on that column.
pub(crate) fn resolve_status(status: &str) -> &str {
    match column_by_id(status) {
        Some(column) => column.target_status(),
        None => status,
    }
}

pub fn set_status(ctx: &AppContext, id: &str, status: &str) -> Result<()> {
    let status = resolve_status(status);
    let db = ctx.open_database()?;
    TicketService::new(db.connection()).set_status(id, status, Local::now())?;
    println!("Ticket {} is now {}", id, status);
    Ok(())
}

pub fn ping(ctx: &AppContext, id: &str) -> Result<()> {
    let db = ctx.open_database()?;
    TicketService::new(db.connection()).touch_contact(id, Local::now())?;
    println!("Recorded contact for ticket {}", id);
    Ok(())
}

pub fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let db = ctx.open_database()?;
    TicketService::new(db.connection()).delete(id)?;
    println!("Deleted ticket {}", id);
    Ok(())
}

pub fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let db = ctx.open_database()?;
    let tickets = TicketService::new(db.connection()).search(query)?;
    write_list(&tickets, &mut std::io::stdout())
}

pub(crate) fn add_with<W: Write>(service: &TicketService<'_>, new_ticket: NewTicket, out: &mut W) -> Result<()> {
    let created = service.create(new_ticket.into_ticket()?)?;
    writeln!(
        out,
        "Created ticket {}",
        created.id.as_deref().unwrap_or_default()
    )?;
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

pub(crate) fn write_list<W: Write>(tickets: &[Ticket], out: &mut W) -> Result<()> {
    if tickets.is_empty() {
        writeln!(out, "No tickets")?;
        return Ok(());
    }

    for ticket in tickets {
        writeln!(
            out,
            "{:<36}  {:<28}  {:<8}  {:<20}  {}",
            ticket.id.as_deref().unwrap_or_default(),
            ticket.status,
            ticket.priority,
            or_dash(ticket.client.as_deref()),
            ticket.title
        )?;
    }
    Ok(())
}

pub(crate) fn write_details<W: Write>(ticket: &Ticket, out: &mut W) -> Result<()> {
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());

    writeln!(out, "{}", ticket.title)?;
    writeln!(out, "---")?;
    writeln!(out, "{:<22} {}", "Id:", ticket.id.as_deref().unwrap_or_default())?;
    writeln!(out, "{:<22} {}", "Client:", or_dash(ticket.client.as_deref()))?;
    writeln!(out, "{:<22} {}", "Status:", ticket.status)?;
    writeln!(out, "{:<22} {}", "Priority:", ticket.priority)?;
    writeln!(out, "{:<22} {}", "Assignee:", or_dash(ticket.assignee.as_deref()))?;
    writeln!(out, "{:<22} {}", "Sprint:", or_dash(ticket.sprint.as_deref()))?;
    writeln!(out, "{:<22} {}", "Test release:", date(ticket.test_release))?;
    writeln!(out, "{:<22} {}", "Production release:", date(ticket.production_release))?;
    writeln!(
        out,
        "{:<22} {}",
        "Last contact:",
        ticket
            .last_contact_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string())
    )?;

    for field in release_calendar::models::client::extension_fields_for(ticket.client.as_deref()) {
        writeln!(
            out,
            "{:<22} {}",
            format!("{}:", field.label()),
            or_dash(ticket.extension_value(*field))
        )?;
    }

    if let Some(description) = ticket.description.as_deref() {
        writeln!(out, "---")?;
        writeln!(out, "{}", description)?;
    }

    Ok(())
}
