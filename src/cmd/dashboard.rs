use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Local};
use release_calendar::dashboard::{DashboardSummary, DashboardWindows};
use release_calendar::models::ticket::Ticket;
use release_calendar::services::ticket::TicketService;

use super::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let db = ctx.open_database()?;
    let tickets = TicketService::new(db.connection()).list_all()?;
    let windows = DashboardWindows::from(&ctx.config);

    write_dashboard(&tickets, Local::now(), windows, &mut std::io::stdout())
}

pub(crate) fn write_dashboard<W: Write>(
    tickets: &[Ticket],
    now: DateTime<Local>,
    windows: DashboardWindows,
    out: &mut W,
) -> Result<()> {
    let summary = DashboardSummary::build(tickets, now, windows);

    writeln!(
        out,
        "Tickets: {}  Open: {}  Urgent: {}  Completed: {}",
        summary.stats.total,
        summary.stats.open(),
        summary.stats.urgent,
        summary.stats.completed
    )?;

    writeln!(out, "---")?;
    writeln!(out, "Releases (last {} days)", windows.recent_release_days)?;
    if summary.recent_releases.is_empty() {
        writeln!(out, "  none")?;
    }
    for ticket in &summary.recent_releases {
        let item = ticket.to_scheduled_item();
        let dates: Vec<String> = [
            ticket.test_release.map(|d| format!("TEST {}", d)),
            ticket.production_release.map(|d| format!("PRODUCTION {}", d)),
        ]
        .into_iter()
        .flatten()
        .collect();
        writeln!(out, "  {} ({}) {}", ticket.title, item.client_label(), dates.join(", "))?;
    }

    writeln!(out, "---")?;
    writeln!(out, "Contact alerts (over {} days)", windows.contact_alert_days)?;
    if summary.contact_alerts.is_empty() {
        writeln!(out, "  none")?;
    }
    for ticket in &summary.contact_alerts {
        let last = ticket
            .last_contact_at
            .map(|dt| format!("last contact {}", dt.format("%Y-%m-%d")))
            .unwrap_or_else(|| "never contacted".to_string());
        writeln!(out, "  {} [{}] {}", ticket.title, ticket.status, last)?;
    }

    Ok(())
}
