//! # portal-core
//!
//! Core crate for the STG client document portal. Contains configuration
//! schemas, the blob storage trait, change events, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
