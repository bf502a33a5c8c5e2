//! Authentication services: login, refresh.

pub mod service;

pub use service::{AuthService, LoginResponse};
