//! User entity model.
//!
//! Local user rows anchor ids and role bindings. Client rows are
//! reconciled on every login against the external roster; the roster
//! remains the source of truth for client credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A local user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name: the admin email, or the client's roster name.
    pub username: String,
    /// Account email (derived for clients).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
}
