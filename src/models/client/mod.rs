// Client module
// Declarative table of client-specific ticket fields

use serde::{Deserialize, Serialize};

/// Optional ticket fields that only some clients use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionField {
    TagNumber,
    Application,
    ActivityType,
}

impl ExtensionField {
    pub fn label(&self) -> &'static str {
        match self {
            ExtensionField::TagNumber => "Tag number",
            ExtensionField::Application => "Application",
            ExtensionField::ActivityType => "Activity type",
        }
    }
}

/// Capabilities attached to every client whose name contains `name_contains`
/// (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientProfile {
    pub name_contains: &'static str,
    pub extension_fields: &'static [ExtensionField],
}

impl ClientProfile {
    pub fn matches(&self, client_name: &str) -> bool {
        client_name
            .to_lowercase()
            .contains(&self.name_contains.to_lowercase())
    }
}

pub const CLIENT_PROFILES: &[ClientProfile] = &[ClientProfile {
    name_contains: "esselunga",
    extension_fields: &[
        ExtensionField::TagNumber,
        ExtensionField::Application,
        ExtensionField::ActivityType,
    ],
}];

/// Look up the profile for a client, if it has one.
pub fn profile_for(client_name: &str) -> Option<&'static ClientProfile> {
    CLIENT_PROFILES
        .iter()
        .find(|profile| profile.matches(client_name))
}

/// Extension fields enabled for a client. Unknown or missing clients get none.
pub fn extension_fields_for(client_name: Option<&str>) -> &'static [ExtensionField] {
    client_name
        .and_then(profile_for)
        .map(|profile| profile.extension_fields)
        .unwrap_or(&[])
}

pub fn supports_field(client_name: Option<&str>, field: ExtensionField) -> bool {
    extension_fields_for(client_name).contains(&field)
}
