//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::folder::{CreateFolder, Folder, FolderType};

/// Store operations for client folders.
///
/// The sqlx-backed [`FolderRepository`] is the production implementation;
/// services depend on the trait so tests can substitute in-memory stores.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// List every folder belonging to a client.
    async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<Folder>>;

    /// Count a client's folders.
    async fn count_by_client(&self, client_name: &str) -> AppResult<u64>;

    /// Find a root-level folder by exact name.
    async fn find_root_by_name(
        &self,
        client_name: &str,
        folder_name: &str,
    ) -> AppResult<Option<Folder>>;

    /// List the year folders directly under a root folder.
    async fn find_year_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Create a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Delete a folder, cascading to descendants and attached files.
    async fn delete(&self, folder_id: Uuid) -> AppResult<bool>;
}

/// Repository for client folder CRUD and hierarchy queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM client_folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM client_folders WHERE client_name = $1 ORDER BY created_at ASC",
        )
        .bind(client_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn count_by_client(&self, client_name: &str) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM client_folders WHERE client_name = $1")
                .bind(client_name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count folders", e)
                })?;
        Ok(count as u64)
    }

    async fn find_root_by_name(
        &self,
        client_name: &str,
        folder_name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM client_folders \
             WHERE client_name = $1 AND folder_name = $2 AND parent_id IS NULL \
             LIMIT 1",
        )
        .bind(client_name)
        .bind(folder_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    async fn find_year_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM client_folders \
             WHERE parent_id = $1 AND folder_type = $2 \
             ORDER BY folder_name DESC",
        )
        .bind(parent_id)
        .bind(FolderType::Year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list year folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO client_folders (client_name, folder_name, parent_id, folder_type, is_default) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.client_name)
        .bind(&data.folder_name)
        .bind(data.parent_id)
        .bind(data.folder_type)
        .bind(data.is_default)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// The schema cascades to descendant folders and any files attached
    /// to them.
    async fn delete(&self, folder_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM client_folders WHERE id = $1")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
