//! Folder services: default-structure provisioning, tree building, CRUD.

pub mod provision;
pub mod service;
pub mod tree;

pub use provision::{FolderSpec, Provisioner, RootKind};
pub use service::FolderService;
pub use tree::build_tree;
