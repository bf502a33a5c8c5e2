//! Admin-facing client directory listing.

use std::sync::Arc;

use portal_auth::roster::RosterClient;
use portal_core::error::AppError;

use crate::context::RequestContext;

/// Lists the firm's clients from the roster. Admin only.
#[derive(Debug, Clone)]
pub struct ClientDirectoryService {
    roster: Arc<RosterClient>,
}

impl ClientDirectoryService {
    /// Creates a new client directory service.
    pub fn new(roster: Arc<RosterClient>) -> Self {
        Self { roster }
    }

    /// Returns every client name on the roster.
    pub async fn list_clients(&self, ctx: &RequestContext) -> Result<Vec<String>, AppError> {
        ctx.require_admin()?;
        self.roster.fetch_names().await
    }
}
