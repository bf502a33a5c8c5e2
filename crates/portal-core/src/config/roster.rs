//! External roster service configuration.
//!
//! The roster is a spreadsheet exposed through a values API: column A
//! holds client names, column B their passwords. The first row is a
//! header and is skipped by the client.

use serde::{Deserialize, Serialize};

/// Roster service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Base URL of the values API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Spreadsheet identifier.
    pub sheet_id: String,
    /// API key. Unset means roster lookups fail with a configuration error.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Range holding name + password columns.
    #[serde(default = "default_credentials_range")]
    pub credentials_range: String,
    /// Range holding only the name column (used for listings).
    #[serde(default = "default_names_range")]
    pub names_range: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

fn default_credentials_range() -> String {
    "A:B".to_string()
}

fn default_names_range() -> String {
    "A:A".to_string()
}

fn default_timeout() -> u64 {
    10
}
