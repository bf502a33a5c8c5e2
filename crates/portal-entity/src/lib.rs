//! # portal-entity
//!
//! Domain entity models for the STG client document portal: client
//! folders and files, users, role bindings, and contact submissions.

pub mod contact;
pub mod file;
pub mod folder;
pub mod user;
