//! Client directory service.

pub mod service;

pub use service::ClientDirectoryService;
