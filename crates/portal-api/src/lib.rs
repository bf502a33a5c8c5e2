//! # portal-api
//!
//! HTTP API layer for the client document portal built on Axum.
//!
//! Provides the REST endpoints, WebSocket change feed, middleware,
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
