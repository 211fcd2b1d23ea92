// UI models module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much of the calendar is visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewGranularity {
    #[default]
    Week,
    Month,
}

impl ViewGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewGranularity::Week => "week",
            ViewGranularity::Month => "month",
        }
    }
}

impl FromStr for ViewGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(ViewGranularity::Week),
            "month" | "m" => Ok(ViewGranularity::Month),
            other => Err(format!("Unknown view: {} (expected week or month)", other)),
        }
    }
}

impl fmt::Display for ViewGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
