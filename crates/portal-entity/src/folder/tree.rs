//! Folder tree structures for hierarchical display.
//!
//! Trees are immutable snapshots assembled from flat folder and file
//! rows; each build produces a fresh structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::ClientFile;
use crate::folder::FolderType;

/// A node in a client's folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub folder_name: String,
    /// Structural role.
    pub folder_type: FolderType,
    /// Whether the folder was system-provisioned.
    pub is_default: bool,
    /// Files attached directly to this folder, newest first.
    pub files: Vec<ClientFile>,
    /// Child folder nodes, in display order.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Total number of folders in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(FolderNode::subtree_size)
            .sum::<usize>()
    }
}

/// A client's complete folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The owning client.
    pub client_name: String,
    /// Root-level nodes, in display order.
    pub roots: Vec<FolderNode>,
    /// Files not attached to any folder, newest first.
    pub unfiled: Vec<ClientFile>,
}

impl FolderTree {
    /// Create an empty tree for a client.
    pub fn empty(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            roots: Vec::new(),
            unfiled: Vec::new(),
        }
    }

    /// Total number of folders in the tree.
    pub fn total_folders(&self) -> usize {
        self.roots.iter().map(FolderNode::subtree_size).sum()
    }
}
