//! Role binding entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::AppRole;

/// A (user, role) binding.
///
/// One row per (user, role) pair. Client bindings additionally carry the
/// client name that scopes all folder and file queries for that session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleBinding {
    /// Unique binding identifier.
    pub id: Uuid,
    /// The bound user.
    pub user_id: Uuid,
    /// The granted role.
    pub role: AppRole,
    /// The bound client name (client role only).
    pub client_name: Option<String>,
    /// When the binding was created.
    pub created_at: DateTime<Utc>,
}
