//! Client file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A document uploaded for a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientFile {
    /// Unique file identifier.
    pub id: Uuid,
    /// The owning client.
    pub client_name: String,
    /// Original file name (including extension).
    pub file_name: String,
    /// Blob storage key where the content lives.
    pub file_path: String,
    /// File size in bytes, when known.
    pub file_size: Option<i64>,
    /// The folder containing this file (null means unfiled).
    pub folder_id: Option<Uuid>,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// The uploader's user id, when available.
    pub user_id: Option<Uuid>,
}

impl ClientFile {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientFile {
    /// The owning client.
    pub client_name: String,
    /// Original file name.
    pub file_name: String,
    /// Blob storage key.
    pub file_path: String,
    /// File size in bytes.
    pub file_size: Option<i64>,
    /// Target folder (None for unfiled).
    pub folder_id: Option<Uuid>,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// Uploader's user id.
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ClientFile {
        ClientFile {
            id: Uuid::new_v4(),
            client_name: "Acme".into(),
            file_name: name.into(),
            file_path: format!("Acme/{name}"),
            file_size: Some(42),
            folder_id: None,
            uploaded_at: Utc::now(),
            uploaded_by: "admin".into(),
            user_id: None,
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(file("balance.PDF").extension().as_deref(), Some("pdf"));
        assert_eq!(file("archive.tar.gz").extension().as_deref(), Some("gz"));
        assert_eq!(file("README").extension(), None);
    }
}
