// Schedule module
// Items placed on the release calendar and the axes they can be placed on

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label shown for items that have no owning client.
pub const NO_CLIENT_LABEL: &str = "N/A";

/// One of the two independent release schedules an item can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReleaseAxis {
    /// Release into the test (acceptance) environment
    Test,
    /// Release into production
    Production,
}

impl ReleaseAxis {
    pub const ALL: [ReleaseAxis; 2] = [ReleaseAxis::Test, ReleaseAxis::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseAxis::Test => "TEST",
            ReleaseAxis::Production => "PRODUCTION",
        }
    }

    /// Parse an axis tag, accepting the legacy `COLLAUDO` / `PROD` spellings.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "TEST" | "COLLAUDO" => Some(ReleaseAxis::Test),
            "PRODUCTION" | "PROD" => Some(ReleaseAxis::Production),
            _ => None,
        }
    }
}

impl fmt::Display for ReleaseAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag carried by a calendar entry in drag payloads.
///
/// `Test` and `Production` map onto [`ReleaseAxis`]; `External` marks entries of
/// the external-only calendar, which can never be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Test,
    Production,
    External,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Test => "TEST",
            Category::Production => "PRODUCTION",
            Category::External => "EXTERNAL",
        }
    }

    pub fn axis(&self) -> Option<ReleaseAxis> {
        match self {
            Category::Test => Some(ReleaseAxis::Test),
            Category::Production => Some(ReleaseAxis::Production),
            Category::External => None,
        }
    }
}

impl From<ReleaseAxis> for Category {
    fn from(axis: ReleaseAxis) -> Self {
        match axis {
            ReleaseAxis::Test => Category::Test,
            ReleaseAxis::Production => Category::Production,
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("EXTERNAL") {
            return Ok(Category::External);
        }
        ReleaseAxis::parse(s)
            .map(Category::from)
            .ok_or_else(|| format!("Unknown release category: {}", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a scheduled item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    #[default]
    Internal,
    External,
}

/// An item that can be placed on the release calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    pub client: Option<String>,
    pub source: ItemSource,
    pub test_date: Option<NaiveDate>,
    pub production_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub tag: Option<String>,
}

impl ScheduledItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            client: None,
            source: ItemSource::Internal,
            test_date: None,
            production_date: None,
            status: None,
            tag: None,
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn with_date(mut self, axis: ReleaseAxis, date: NaiveDate) -> Self {
        self.set_date(axis, Some(date));
        self
    }

    pub fn date_for(&self, axis: ReleaseAxis) -> Option<NaiveDate> {
        match axis {
            ReleaseAxis::Test => self.test_date,
            ReleaseAxis::Production => self.production_date,
        }
    }

    pub fn set_date(&mut self, axis: ReleaseAxis, date: Option<NaiveDate>) {
        match axis {
            ReleaseAxis::Test => self.test_date = date,
            ReleaseAxis::Production => self.production_date = date,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.test_date.is_some() || self.production_date.is_some()
    }

    pub fn is_external(&self) -> bool {
        self.source == ItemSource::External
    }

    /// Client name for display; falls back to a placeholder when missing.
    pub fn client_label(&self) -> &str {
        self.client
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(NO_CLIENT_LABEL)
    }
}
