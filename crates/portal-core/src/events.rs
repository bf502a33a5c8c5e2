//! Change events published after folder/file mutations.
//!
//! Consumers subscribe through the WebSocket change feed and are expected
//! to refetch the affected client's tree on any event. The payload is
//! deliberately coarse: it says *what kind* of thing changed for *which*
//! client, not which rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of record changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A folder was created.
    FolderCreated,
    /// A folder (and, by cascade, its subtree) was deleted.
    FolderDeleted,
    /// A file was uploaded.
    FileUploaded,
    /// A file was deleted.
    FileDeleted,
}

/// A change notification scoped to a single client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The client whose folders/files changed.
    pub client_name: String,
    /// What changed.
    pub kind: ChangeKind,
    /// The id of the affected record.
    pub entity_id: Uuid,
}

impl ChangeEvent {
    /// Create a new change event.
    pub fn new(client_name: impl Into<String>, kind: ChangeKind, entity_id: Uuid) -> Self {
        Self {
            client_name: client_name.into(),
            kind,
            entity_id,
        }
    }
}
