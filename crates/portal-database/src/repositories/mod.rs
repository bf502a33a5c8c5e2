//! Repository implementations.

pub mod file;
pub mod folder;
pub mod role;
pub mod user;
