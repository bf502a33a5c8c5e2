//! Contact-form webhook configuration.

use serde::{Deserialize, Serialize};

/// Contact webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactConfig {
    /// Webhook URL submissions are forwarded to. Empty disables forwarding.
    #[serde(default)]
    pub webhook_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    10
}
