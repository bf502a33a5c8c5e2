//! Role-binding repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::user::{AppRole, RoleBinding};

/// Repository for the role-binding store.
#[derive(Debug, Clone)]
pub struct RoleBindingRepository {
    pool: PgPool,
}

impl RoleBindingRepository {
    /// Create a new role-binding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the binding for a (user, role) pair.
    pub async fn find(&self, user_id: Uuid, role: AppRole) -> AppResult<Option<RoleBinding>> {
        sqlx::query_as::<_, RoleBinding>(
            "SELECT * FROM user_roles WHERE user_id = $1 AND role = $2",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role binding", e))
    }

    /// Ensure a (user, role) binding row exists, creating it if missing.
    ///
    /// Idempotent: a second call for the same pair leaves the existing
    /// row untouched.
    pub async fn ensure(
        &self,
        user_id: Uuid,
        role: AppRole,
        client_name: Option<&str>,
    ) -> AppResult<RoleBinding> {
        if let Some(existing) = self.find(user_id, role).await? {
            return Ok(existing);
        }

        sqlx::query_as::<_, RoleBinding>(
            "INSERT INTO user_roles (user_id, role, client_name) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, role) DO UPDATE SET role = EXCLUDED.role \
             RETURNING *",
        )
        .bind(user_id)
        .bind(role)
        .bind(client_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to ensure role binding", e))
    }
}
