pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod move_release;
pub mod ticket;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use release_calendar::models::settings::AppConfig;
use release_calendar::services::database::Database;
use release_calendar::services::settings::ConfigService;
use release_calendar::utils::date::parse_day_key;

/// Resolved configuration shared by every subcommand.
pub struct AppContext {
    pub config: AppConfig,
    pub database_path: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, database_path: Option<&Path>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::new(path),
            None => ConfigService::for_user(),
        };

        // Errors in an explicit --config are fatal; a broken per-user file is not.
        let config = if config_path.is_some() {
            service.load()?
        } else {
            service.load_or_default()
        };

        let database_path = database_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ConfigService::resolve_database_path(&config));

        log::debug!(
            "Using config {} and database {}",
            service.path().display(),
            database_path.display()
        );

        Ok(Self {
            config,
            database_path,
        })
    }

    pub fn database_path_str(&self) -> Result<&str> {
        self.database_path
            .to_str()
            .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", self.database_path.display()))
    }

    /// Open the ticket database, creating its directory and schema on first use.
    pub fn open_database(&self) -> Result<Database> {
        if let Some(parent) = self.database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }

        Database::open_initialized(self.database_path_str()?)
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    parse_day_key(value).ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", value))
}
