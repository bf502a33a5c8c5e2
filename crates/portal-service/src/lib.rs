//! # portal-service
//!
//! Business logic for the client document portal. Services orchestrate
//! the repositories, blob storage, auth primitives, and external HTTP
//! clients; handlers in `portal-api` stay thin.

pub mod auth;
pub mod client;
pub mod contact;
pub mod context;
pub mod file;
pub mod folder;
pub mod notify;

pub use context::RequestContext;
pub use notify::ChangeNotifier;
