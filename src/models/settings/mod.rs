// Settings module
// Application configuration stored as TOML

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ui::ViewGranularity;

pub const DEFAULT_PARTNER_CLIENT: &str = "ESSELUNGA";

/// Upper bound for the dashboard windows, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; when unset the data directory default is used.
    pub database_path: Option<PathBuf>,
    pub default_view: ViewGranularity,
    /// Window for the dashboard's "recent releases" list.
    pub recent_release_days: i64,
    /// Tickets without contact for longer than this raise an alert.
    pub contact_alert_days: i64,
    pub external_calendar: ExternalCalendarConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_view: ViewGranularity::Week,
            recent_release_days: 7,
            contact_alert_days: 15,
            external_calendar: ExternalCalendarConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.recent_release_days) {
            return Err(format!(
                "recent_release_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            ));
        }

        if !(1..=MAX_WINDOW_DAYS).contains(&self.contact_alert_days) {
            return Err(format!(
                "contact_alert_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            ));
        }

        self.external_calendar.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalCalendarConfig {
    /// Feed URL; the external calendar is disabled when unset.
    pub endpoint: Option<String>,
    /// Client every external event is attributed to.
    pub partner_client: String,
    pub timeout_secs: u64,
    /// Only events starting within this many trailing months are requested.
    pub window_months: u32,
    pub max_response_bytes: usize,
}

impl Default for ExternalCalendarConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            partner_client: DEFAULT_PARTNER_CLIENT.to_string(),
            timeout_secs: 20,
            window_months: 1,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ExternalCalendarConfig {
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.endpoint {
            let trimmed = endpoint.trim();
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err("External calendar endpoint must be an HTTP(S) URL".to_string());
            }
        }

        if self.partner_client.trim().is_empty() {
            return Err("Partner client name cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("External calendar timeout must be greater than 0".to_string());
        }

        if self.window_months == 0 {
            return Err("External calendar window must be at least one month".to_string());
        }

        if self.max_response_bytes == 0 {
            return Err("max_response_bytes must be greater than 0".to_string());
        }

        Ok(())
    }
}
