//! # portal-database
//!
//! PostgreSQL connection management, migrations, and repositories for
//! the STG client portal.

pub mod connection;
pub mod migration;
pub mod repositories;
