//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{
    CreateFolder, Folder, FolderType, MONTH_NAMES, ROOT_ADMINISTRACION, ROOT_CONTABILIDAD,
    month_order,
};
pub use tree::{FolderNode, FolderTree};
