//! # portal-auth
//!
//! Authentication building blocks: JWT encode/decode, Argon2 password
//! hashing, and the client against the external roster service.

pub mod jwt;
pub mod password;
pub mod roster;

pub use password::PasswordHasher;
pub use roster::{ClientCredential, RosterClient};
