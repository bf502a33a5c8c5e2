//! Contact form forwarding.

pub mod service;

pub use service::{ContactRequest, ContactService};
