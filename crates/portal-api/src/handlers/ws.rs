//! WebSocket change feed.
//!
//! Streams change events to authenticated connections. Admins see every
//! client's events; a client connection only sees its own. Consumers
//! refetch the folder tree on any event.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::error::ApiError;
use portal_entity::user::AppRole;
use portal_service::context::RequestContext;

use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode_access_token(&query.token)?;
    let ctx = RequestContext::new(
        claims.user_id(),
        claims.role,
        claims.client_name,
        claims.username,
    );

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, ctx, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut events = state.notifier.subscribe();

    info!(user_id = %ctx.user_id, role = ?ctx.role, "WebSocket connection established");

    let forward_ctx = ctx.clone();
    let outbound_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !event_visible(&forward_ctx, &event.client_name) {
                        continue;
                    }
                    let payload = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "Failed to serialize change event");
                            continue;
                        }
                    };
                    if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                // Lagged receivers miss events; the consumer refetches
                // on the next one anyway.
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "WebSocket receiver lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain inbound until the peer closes; the feed is one-way.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(user_id = %ctx.user_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    info!(user_id = %ctx.user_id, "WebSocket connection closed");
}

/// Whether a connection may see events for the given client.
fn event_visible(ctx: &RequestContext, event_client: &str) -> bool {
    match ctx.role {
        AppRole::Admin => true,
        AppRole::Client => ctx.client_name.as_deref() == Some(event_client),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_admin_sees_all_events() {
        let ctx = RequestContext::new(Uuid::new_v4(), AppRole::Admin, None, "admin".into());
        assert!(event_visible(&ctx, "Acme C.A."));
        assert!(event_visible(&ctx, "Otra Empresa"));
    }

    #[test]
    fn test_client_sees_only_own_events() {
        let ctx = RequestContext::new(
            Uuid::new_v4(),
            AppRole::Client,
            Some("Acme C.A.".into()),
            "Acme C.A.".into(),
        );
        assert!(event_visible(&ctx, "Acme C.A."));
        assert!(!event_visible(&ctx, "Otra Empresa"));
    }
}
