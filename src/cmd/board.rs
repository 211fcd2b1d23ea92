use std::io::Write;

use anyhow::Result;
use release_calendar::models::board::group_by_column;
use release_calendar::models::ticket::Ticket;
use release_calendar::services::ticket::TicketService;

use super::AppContext;

pub fn run(ctx: &AppContext, sprint: Option<&str>) -> Result<()> {
    let db = ctx.open_database()?;
    let service = TicketService::new(db.connection());
    let tickets = match sprint {
        Some(sprint) => service.list_by_sprint(sprint)?,
        None => service.list_all()?,
    };

    write_board(&tickets, &mut std::io::stdout())
}

pub(crate) fn write_board<W: Write>(tickets: &[Ticket], out: &mut W) -> Result<()> {
    for (column, cards) in group_by_column(tickets, |t| t.status.as_str()) {
        writeln!(out, "== {} ({}) ==", column.label, cards.len())?;
        for ticket in cards {
            writeln!(
                out,
                "  {} [{}] {} ({})",
                ticket.id.as_deref().unwrap_or_default(),
                ticket.status,
                ticket.title,
                ticket.to_scheduled_item().client_label()
            )?;
        }
    }
    Ok(())
}
