// Dashboard module
// Weekly release digest and contact alerts over the ticket list

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

use crate::models::settings::AppConfig;
use crate::models::ticket::{Priority, Ticket};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub urgent: usize,
    pub completed: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        Self {
            total: tickets.len(),
            urgent: tickets
                .iter()
                .filter(|t| t.priority == Priority::Urgent)
                .count(),
            completed: tickets.iter().filter(|t| t.is_completed()).count(),
        }
    }

    pub fn open(&self) -> usize {
        self.total - self.completed
    }
}

/// Windows used by [`DashboardSummary::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindows {
    pub recent_release_days: i64,
    pub contact_alert_days: i64,
}

impl Default for DashboardWindows {
    fn default() -> Self {
        Self {
            recent_release_days: 7,
            contact_alert_days: 15,
        }
    }
}

impl From<&AppConfig> for DashboardWindows {
    fn from(config: &AppConfig) -> Self {
        Self {
            recent_release_days: config.recent_release_days,
            contact_alert_days: config.contact_alert_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    pub recent_releases: Vec<&'a Ticket>,
    pub contact_alerts: Vec<&'a Ticket>,
    pub stats: TicketStats,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(tickets: &'a [Ticket], now: DateTime<Local>, windows: DashboardWindows) -> Self {
        let recent_cutoff = days_before(now, windows.recent_release_days)
            .map(|cutoff| cutoff.date_naive())
            .unwrap_or(NaiveDate::MIN);
        let contact_cutoff = days_before(now, windows.contact_alert_days);

        let recent_releases = tickets
            .iter()
            .filter(|t| is_recent_release(t, recent_cutoff))
            .collect();

        let contact_alerts = tickets
            .iter()
            .filter(|t| needs_contact(t, contact_cutoff))
            .collect();

        Self {
            recent_releases,
            contact_alerts,
            stats: TicketStats::from_tickets(tickets),
        }
    }
}

/// `now` minus `days`, or `None` when that falls outside the representable range.
fn days_before(now: DateTime<Local>, days: i64) -> Option<DateTime<Local>> {
    TimeDelta::try_days(days).and_then(|window| now.checked_sub_signed(window))
}

/// Either release date falls on or after `cutoff`.
fn is_recent_release(ticket: &Ticket, cutoff: NaiveDate) -> bool {
    [ticket.test_release, ticket.production_release]
        .into_iter()
        .flatten()
        .any(|date| date >= cutoff)
}

/// Open tickets never contacted, or last contacted before `cutoff`.
/// Without a cutoff only never-contacted tickets qualify.
fn needs_contact(ticket: &Ticket, cutoff: Option<DateTime<Local>>) -> bool {
    if ticket.is_completed() {
        return false;
    }

    match ticket.last_contact_at {
        None => true,
        Some(contacted) => cutoff.is_some_and(|cutoff| contacted < cutoff),
    }
}
