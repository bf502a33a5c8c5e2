//! Request context carrying the authenticated principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_entity::user::AppRole;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token by the API layer and passed into
/// service methods so that every operation knows *who* is acting and
/// which client's data they may touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: AppRole,
    /// The bound client name (client role only).
    pub client_name: Option<String>,
    /// The username (convenience field from JWT claims).
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        role: AppRole,
        client_name: Option<String>,
        username: String,
    ) -> Self {
        Self {
            user_id,
            role,
            client_name,
            username,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, AppRole::Admin)
    }

    /// Errors unless the current user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin role required"))
        }
    }

    /// Resolves which client's data this request operates on.
    ///
    /// A client session is always scoped to its own bound name; any
    /// `requested` parameter is ignored. An admin must name the target
    /// client explicitly.
    pub fn scope_client(&self, requested: Option<&str>) -> Result<String, AppError> {
        match self.role {
            AppRole::Client => self
                .client_name
                .clone()
                .ok_or_else(|| AppError::authorization("Client session has no bound client")),
            AppRole::Admin => {
                let name = requested.map(str::trim).unwrap_or_default();
                if name.is_empty() {
                    return Err(AppError::validation("Client name is required"));
                }
                Ok(name.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_ctx(bound: &str) -> RequestContext {
        RequestContext::new(
            Uuid::new_v4(),
            AppRole::Client,
            Some(bound.to_string()),
            bound.to_string(),
        )
    }

    fn admin_ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), AppRole::Admin, None, "admin".to_string())
    }

    #[test]
    fn test_client_scope_ignores_requested_name() {
        let ctx = client_ctx("Acme C.A.");
        assert_eq!(ctx.scope_client(Some("Otra Empresa")).unwrap(), "Acme C.A.");
        assert_eq!(ctx.scope_client(None).unwrap(), "Acme C.A.");
    }

    #[test]
    fn test_client_without_binding_is_rejected() {
        let mut ctx = client_ctx("Acme C.A.");
        ctx.client_name = None;
        assert!(ctx.scope_client(Some("Acme C.A.")).is_err());
    }

    #[test]
    fn test_admin_must_name_target_client() {
        let ctx = admin_ctx();
        assert_eq!(ctx.scope_client(Some("Acme C.A.")).unwrap(), "Acme C.A.");
        assert!(ctx.scope_client(None).is_err());
        assert!(ctx.scope_client(Some("   ")).is_err());
    }

    #[test]
    fn test_require_admin() {
        assert!(admin_ctx().require_admin().is_ok());
        assert!(client_ctx("Acme").require_admin().is_err());
    }
}
