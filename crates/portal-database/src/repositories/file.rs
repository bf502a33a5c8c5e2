//! Client file repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::file::{ClientFile, CreateClientFile};

/// Store operations for client file records.
///
/// The sqlx-backed [`FileRepository`] is the production implementation;
/// services depend on the trait so tests can substitute in-memory stores.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClientFile>>;

    /// List every file belonging to a client, newest first.
    async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<ClientFile>>;

    /// List a client's files inside one folder, newest first.
    async fn find_by_folder(&self, client_name: &str, folder_id: Uuid)
    -> AppResult<Vec<ClientFile>>;

    /// List a client's unfiled files (no folder), newest first.
    async fn find_unfiled(&self, client_name: &str) -> AppResult<Vec<ClientFile>>;

    /// Insert a new file record.
    async fn create(&self, data: &CreateClientFile) -> AppResult<ClientFile>;

    /// Delete a file record. Returns false if the row was already gone.
    async fn delete(&self, file_id: Uuid) -> AppResult<bool>;
}

/// Repository for client file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClientFile>> {
        sqlx::query_as::<_, ClientFile>("SELECT * FROM client_files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<ClientFile>> {
        sqlx::query_as::<_, ClientFile>(
            "SELECT * FROM client_files WHERE client_name = $1 ORDER BY uploaded_at DESC",
        )
        .bind(client_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_by_folder(
        &self,
        client_name: &str,
        folder_id: Uuid,
    ) -> AppResult<Vec<ClientFile>> {
        sqlx::query_as::<_, ClientFile>(
            "SELECT * FROM client_files \
             WHERE client_name = $1 AND folder_id = $2 \
             ORDER BY uploaded_at DESC",
        )
        .bind(client_name)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder files", e))
    }

    async fn find_unfiled(&self, client_name: &str) -> AppResult<Vec<ClientFile>> {
        sqlx::query_as::<_, ClientFile>(
            "SELECT * FROM client_files \
             WHERE client_name = $1 AND folder_id IS NULL \
             ORDER BY uploaded_at DESC",
        )
        .bind(client_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unfiled files", e))
    }

    async fn create(&self, data: &CreateClientFile) -> AppResult<ClientFile> {
        sqlx::query_as::<_, ClientFile>(
            "INSERT INTO client_files \
             (client_name, file_name, file_path, file_size, folder_id, uploaded_by, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.client_name)
        .bind(&data.file_name)
        .bind(&data.file_path)
        .bind(data.file_size)
        .bind(data.folder_id)
        .bind(&data.uploaded_by)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))
    }

    async fn delete(&self, file_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM client_files WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file record", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
