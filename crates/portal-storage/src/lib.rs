//! # portal-storage
//!
//! Blob storage backends for client documents, behind the
//! [`portal_core::traits::BlobStorage`] trait, plus blob-key
//! construction.

pub mod key;
pub mod manager;
pub mod providers;

pub use key::build_blob_key;
pub use manager::init_storage;
