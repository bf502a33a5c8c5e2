//! HTTP request handlers.

pub mod auth;
pub mod client;
pub mod contact;
pub mod file;
pub mod folder;
pub mod health;
pub mod ws;
