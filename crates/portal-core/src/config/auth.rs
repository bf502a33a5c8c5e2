//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and admin credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign tokens.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// The admin login email.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// The admin password. Unset means admin login is disabled and
    /// attempts fail with a configuration error.
    #[serde(default)]
    pub admin_password: Option<String>,
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    24 * 7
}

fn default_admin_email() -> String {
    "admin@torogil.com".to_string()
}
