// Ticket module
// Operational ticket model with per-client extension fields

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::board::{self, STATUS_OPEN};
use crate::models::client::{self, ExtensionField};
use crate::models::schedule::{ItemSource, ReleaseAxis, ScheduledItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "bassa" => Ok(Priority::Low),
            "medium" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            "urgent" | "urgente" => Ok(Priority::Urgent),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Operational ticket tracked by the team.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub status: String,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub sprint: Option<String>,
    pub test_release: Option<NaiveDate>,
    pub production_release: Option<NaiveDate>,
    pub last_contact_at: Option<DateTime<Local>>,
    pub tag_number: Option<String>,
    pub application: Option<String>,
    pub activity_type: Option<String>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Ticket {
    /// Create a new open ticket.
    ///
    /// # Examples
    /// ```
    /// use release_calendar::models::ticket::Ticket;
    ///
    /// let ticket = Ticket::new("Checkout timeout").unwrap();
    /// assert_eq!(ticket.status, "Open");
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, String> {
        let ticket = Self {
            id: None,
            title: title.into(),
            description: None,
            client: None,
            status: STATUS_OPEN.to_string(),
            priority: Priority::default(),
            assignee: None,
            sprint: None,
            test_release: None,
            production_release: None,
            last_contact_at: None,
            tag_number: None,
            application: None,
            activity_type: None,
            created_at: None,
            updated_at: None,
        };
        ticket.validate()?;
        Ok(ticket)
    }

    pub fn builder() -> TicketBuilder {
        TicketBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Ticket title cannot be empty".to_string());
        }

        if !board::is_known_status(&self.status) {
            return Err(format!("Unknown ticket status: {}", self.status));
        }

        for field in self.filled_extension_fields() {
            if !client::supports_field(self.client.as_deref(), field) {
                return Err(format!(
                    "{} is not available for client {}",
                    field.label(),
                    self.client.as_deref().unwrap_or("(none)")
                ));
            }
        }

        Ok(())
    }

    pub fn release_date(&self, axis: ReleaseAxis) -> Option<NaiveDate> {
        match axis {
            ReleaseAxis::Test => self.test_release,
            ReleaseAxis::Production => self.production_release,
        }
    }

    pub fn set_release_date(&mut self, axis: ReleaseAxis, date: Option<NaiveDate>) {
        match axis {
            ReleaseAxis::Test => self.test_release = date,
            ReleaseAxis::Production => self.production_release = date,
        }
    }

    pub fn extension_value(&self, field: ExtensionField) -> Option<&str> {
        match field {
            ExtensionField::TagNumber => self.tag_number.as_deref(),
            ExtensionField::Application => self.application.as_deref(),
            ExtensionField::ActivityType => self.activity_type.as_deref(),
        }
    }

    fn filled_extension_fields(&self) -> Vec<ExtensionField> {
        [
            ExtensionField::TagNumber,
            ExtensionField::Application,
            ExtensionField::ActivityType,
        ]
        .into_iter()
        .filter(|field| {
            self.extension_value(*field)
                .is_some_and(|value| !value.trim().is_empty())
        })
        .collect()
    }

    /// Clear extension fields the ticket's client does not support.
    /// Returns the fields that were dropped.
    pub fn strip_unsupported_extensions(&mut self) -> Vec<ExtensionField> {
        let dropped: Vec<ExtensionField> = self
            .filled_extension_fields()
            .into_iter()
            .filter(|field| !client::supports_field(self.client.as_deref(), *field))
            .collect();

        for field in &dropped {
            match field {
                ExtensionField::TagNumber => self.tag_number = None,
                ExtensionField::Application => self.application = None,
                ExtensionField::ActivityType => self.activity_type = None,
            }
        }

        dropped
    }

    pub fn is_completed(&self) -> bool {
        board::is_completed(&self.status)
    }

    /// Calendar view of this ticket.
    pub fn to_scheduled_item(&self) -> ScheduledItem {
        ScheduledItem {
            id: self.id.clone().unwrap_or_default(),
            title: self.title.clone(),
            client: self.client.clone(),
            source: ItemSource::Internal,
            test_date: self.test_release,
            production_date: self.production_release,
            status: Some(self.status.clone()),
            tag: self.tag_number.clone(),
        }
    }
}

/// Builder for tickets with optional fields
pub struct TicketBuilder {
    title: Option<String>,
    description: Option<String>,
    client: Option<String>,
    status: Option<String>,
    priority: Priority,
    assignee: Option<String>,
    sprint: Option<String>,
    test_release: Option<NaiveDate>,
    production_release: Option<NaiveDate>,
    tag_number: Option<String>,
    application: Option<String>,
    activity_type: Option<String>,
}

impl TicketBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            client: None,
            status: None,
            priority: Priority::default(),
            assignee: None,
            sprint: None,
            test_release: None,
            production_release: None,
            tag_number: None,
            application: None,
            activity_type: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn sprint(mut self, sprint: impl Into<String>) -> Self {
        self.sprint = Some(sprint.into());
        self
    }

    pub fn test_release(mut self, date: NaiveDate) -> Self {
        self.test_release = Some(date);
        self
    }

    pub fn production_release(mut self, date: NaiveDate) -> Self {
        self.production_release = Some(date);
        self
    }

    pub fn tag_number(mut self, tag_number: impl Into<String>) -> Self {
        self.tag_number = Some(tag_number.into());
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    pub fn activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.activity_type = Some(activity_type.into());
        self
    }

    pub fn build(self) -> Result<Ticket, String> {
        let title = self.title.ok_or("Ticket title is required")?;

        let ticket = Ticket {
            id: None,
            title,
            description: self.description,
            client: self.client,
            status: self.status.unwrap_or_else(|| STATUS_OPEN.to_string()),
            priority: self.priority,
            assignee: self.assignee,
            sprint: self.sprint,
            test_release: self.test_release,
            production_release: self.production_release,
            last_contact_at: None,
            tag_number: self.tag_number,
            application: self.application,
            activity_type: self.activity_type,
            created_at: None,
            updated_at: None,
        };

        ticket.validate()?;
        Ok(ticket)
    }
}

impl Default for TicketBuilder {
    fn default() -> Self {
        Self::new()
    }
}
