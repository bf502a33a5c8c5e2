//! File operations against blob storage and the record store.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::events::{ChangeEvent, ChangeKind};
use portal_core::traits::storage::BlobStorage;
use portal_database::repositories::file::FileStore;
use portal_database::repositories::folder::FolderStore;
use portal_entity::file::{ClientFile, CreateClientFile};
use portal_storage::key::build_blob_key;

use crate::context::RequestContext;
use crate::notify::ChangeNotifier;

/// Manages document upload, download, listing, and deletion.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<dyn FileStore>,
    folder_repo: Arc<dyn FolderStore>,
    storage: Arc<dyn BlobStorage>,
    notifier: ChangeNotifier,
    max_upload_size: u64,
}

/// Request to upload a document.
#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    /// Target client (admins only; ignored for client sessions).
    pub client_name: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// Target folder (None files the document as unfiled).
    pub folder_id: Option<Uuid>,
    /// The document content.
    pub data: Bytes,
}

/// A downloaded document: metadata plus its content.
#[derive(Debug, Clone)]
pub struct FileDownload {
    /// The file record.
    pub file: ClientFile,
    /// The blob content.
    pub data: Bytes,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<dyn FileStore>,
        folder_repo: Arc<dyn FolderStore>,
        storage: Arc<dyn BlobStorage>,
        notifier: ChangeNotifier,
        max_upload_size: u64,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            notifier,
            max_upload_size,
        }
    }

    /// Lists a client's files, optionally restricted to one folder.
    ///
    /// `unfiled` selects only files with no folder; it is mutually
    /// exclusive with `folder_id`.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        client_name: Option<&str>,
        folder_id: Option<Uuid>,
        unfiled: bool,
    ) -> Result<Vec<ClientFile>, AppError> {
        let client = ctx.scope_client(client_name)?;

        if unfiled {
            if folder_id.is_some() {
                return Err(AppError::validation(
                    "Cannot filter by folder and unfiled at once",
                ));
            }
            return self.file_repo.find_unfiled(&client).await;
        }

        match folder_id {
            Some(folder) => self.file_repo.find_by_folder(&client, folder).await,
            None => self.file_repo.find_by_client(&client).await,
        }
    }

    /// Uploads a document: writes the blob, then inserts the record.
    ///
    /// If the record insert fails after the blob write, the blob is left
    /// orphaned in storage; this is logged and not compensated.
    pub async fn upload_file(
        &self,
        ctx: &RequestContext,
        req: UploadFileRequest,
    ) -> Result<ClientFile, AppError> {
        let client = ctx.scope_client(req.client_name.as_deref())?;

        let file_name = req.file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if req.data.is_empty() {
            return Err(AppError::validation("File content cannot be empty"));
        }
        if req.data.len() as u64 > self.max_upload_size {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_upload_size
            )));
        }

        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
            if folder.client_name != client {
                return Err(AppError::validation(
                    "Target folder belongs to a different client",
                ));
            }
        }

        let uploaded_at = Utc::now();
        let key = build_blob_key(&client, req.folder_id, uploaded_at, file_name);
        let size = req.data.len() as i64;

        self.storage.write(&key, req.data).await?;

        let record = self
            .file_repo
            .create(&CreateClientFile {
                client_name: client.clone(),
                file_name: file_name.to_string(),
                file_path: key.clone(),
                file_size: Some(size),
                folder_id: req.folder_id,
                uploaded_by: ctx.username.clone(),
                user_id: Some(ctx.user_id),
            })
            .await
            .inspect_err(|_| {
                warn!(key = %key, "File record insert failed after blob write; blob orphaned");
            })?;

        info!(
            user_id = %ctx.user_id,
            client = %client,
            file_id = %record.id,
            size,
            "File uploaded"
        );

        self.notifier
            .publish(ChangeEvent::new(client, ChangeKind::FileUploaded, record.id));

        Ok(record)
    }

    /// Downloads a document's content along with its record.
    pub async fn download_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<FileDownload, AppError> {
        let file = self.find_scoped(ctx, file_id).await?;
        let data = self.storage.read_bytes(&file.file_path).await?;
        Ok(FileDownload { file, data })
    }

    /// Deletes a document: the blob goes first, and a blob removal
    /// failure aborts before the record is touched.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.find_scoped(ctx, file_id).await?;

        self.storage.delete(&file.file_path).await?;

        let deleted = self.file_repo.delete(file_id).await?;
        if !deleted {
            return Err(AppError::not_found("File not found"));
        }

        info!(
            user_id = %ctx.user_id,
            client = %file.client_name,
            file_id = %file_id,
            "File deleted"
        );

        self.notifier.publish(ChangeEvent::new(
            file.client_name,
            ChangeKind::FileDeleted,
            file_id,
        ));

        Ok(())
    }

    /// Looks up a file and verifies the requester may touch it.
    async fn find_scoped(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<ClientFile, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let client = ctx.scope_client(Some(&file.client_name))?;
        if file.client_name != client {
            return Err(AppError::not_found("File not found"));
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portal_core::error::ErrorKind;
    use portal_core::result::AppResult;
    use portal_core::traits::storage::ByteStream;
    use portal_entity::folder::{CreateFolder, Folder};
    use portal_entity::user::AppRole;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct MemoryFileStore {
        rows: Mutex<Vec<ClientFile>>,
    }

    impl MemoryFileStore {
        fn with_rows(rows: Vec<ClientFile>) -> Self {
            Self {
                rows: Mutex::new(rows),
            }
        }

        fn contains(&self, id: Uuid) -> bool {
            self.rows.lock().unwrap().iter().any(|f| f.id == id)
        }

        fn is_empty(&self) -> bool {
            self.rows.lock().unwrap().is_empty()
        }
    }

    #[async_trait]
    impl FileStore for MemoryFileStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClientFile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id)
                .cloned())
        }

        async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<ClientFile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.client_name == client_name)
                .cloned()
                .collect())
        }

        async fn find_by_folder(
            &self,
            client_name: &str,
            folder_id: Uuid,
        ) -> AppResult<Vec<ClientFile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.client_name == client_name && f.folder_id == Some(folder_id))
                .cloned()
                .collect())
        }

        async fn find_unfiled(&self, client_name: &str) -> AppResult<Vec<ClientFile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.client_name == client_name && f.folder_id.is_none())
                .cloned()
                .collect())
        }

        async fn create(&self, data: &CreateClientFile) -> AppResult<ClientFile> {
            let file = ClientFile {
                id: Uuid::new_v4(),
                client_name: data.client_name.clone(),
                file_name: data.file_name.clone(),
                file_path: data.file_path.clone(),
                file_size: data.file_size,
                folder_id: data.folder_id,
                uploaded_at: Utc::now(),
                uploaded_by: data.uploaded_by.clone(),
                user_id: data.user_id,
            };
            self.rows.lock().unwrap().push(file.clone());
            Ok(file)
        }

        async fn delete(&self, file_id: Uuid) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|f| f.id != file_id);
            Ok(rows.len() != before)
        }
    }

    #[derive(Debug)]
    struct NullFolderStore;

    #[async_trait]
    impl FolderStore for NullFolderStore {
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Folder>> {
            Ok(None)
        }
        async fn find_by_client(&self, _client_name: &str) -> AppResult<Vec<Folder>> {
            Ok(Vec::new())
        }
        async fn count_by_client(&self, _client_name: &str) -> AppResult<u64> {
            Ok(0)
        }
        async fn find_root_by_name(
            &self,
            _client_name: &str,
            _folder_name: &str,
        ) -> AppResult<Option<Folder>> {
            Ok(None)
        }
        async fn find_year_children(&self, _parent_id: Uuid) -> AppResult<Vec<Folder>> {
            Ok(Vec::new())
        }
        async fn create(&self, _data: &CreateFolder) -> AppResult<Folder> {
            Err(AppError::internal("not supported"))
        }
        async fn delete(&self, _folder_id: Uuid) -> AppResult<bool> {
            Ok(false)
        }
    }

    /// Storage whose delete always fails; everything else succeeds.
    #[derive(Debug)]
    struct BrokenDeleteStorage;

    #[async_trait]
    impl BlobStorage for BrokenDeleteStorage {
        fn provider_type(&self) -> &str {
            "memory"
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
        async fn read(&self, key: &str) -> AppResult<ByteStream> {
            Err(AppError::not_found(format!("Blob not found: {key}")))
        }
        async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
            Err(AppError::not_found(format!("Blob not found: {key}")))
        }
        async fn write(&self, _key: &str, _data: Bytes) -> AppResult<()> {
            Ok(())
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::storage("disk unplugged"))
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(true)
        }
    }

    /// Storage where every operation succeeds.
    #[derive(Debug)]
    struct AcceptAllStorage;

    #[async_trait]
    impl BlobStorage for AcceptAllStorage {
        fn provider_type(&self) -> &str {
            "memory"
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
        async fn read(&self, key: &str) -> AppResult<ByteStream> {
            Err(AppError::not_found(format!("Blob not found: {key}")))
        }
        async fn read_bytes(&self, _key: &str) -> AppResult<Bytes> {
            Ok(Bytes::new())
        }
        async fn write(&self, _key: &str, _data: Bytes) -> AppResult<()> {
            Ok(())
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn client_ctx(bound: &str) -> RequestContext {
        RequestContext::new(
            Uuid::new_v4(),
            AppRole::Client,
            Some(bound.to_string()),
            bound.to_string(),
        )
    }

    fn record(client: &str) -> ClientFile {
        ClientFile {
            id: Uuid::new_v4(),
            client_name: client.to_string(),
            file_name: "balance.pdf".to_string(),
            file_path: format!("{client}/123_balance.pdf"),
            file_size: Some(10),
            folder_id: None,
            uploaded_at: Utc::now(),
            uploaded_by: client.to_string(),
            user_id: None,
        }
    }

    fn service(files: Arc<MemoryFileStore>, storage: Arc<dyn BlobStorage>) -> FileService {
        FileService::new(
            files,
            Arc::new(NullFolderStore),
            storage,
            ChangeNotifier::new(),
            1024,
        )
    }

    #[tokio::test]
    async fn test_blob_delete_failure_keeps_record() {
        let file = record("Acme C.A.");
        let files = Arc::new(MemoryFileStore::with_rows(vec![file.clone()]));
        let svc = service(Arc::clone(&files), Arc::new(BrokenDeleteStorage));

        let err = svc
            .delete_file(&client_ctx("Acme C.A."), file.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Storage);
        // The blob goes first; a failed removal leaves the record intact.
        assert!(files.contains(file.id));
    }

    #[tokio::test]
    async fn test_delete_removes_record_after_blob() {
        let file = record("Acme C.A.");
        let files = Arc::new(MemoryFileStore::with_rows(vec![file.clone()]));
        let svc = service(Arc::clone(&files), Arc::new(AcceptAllStorage));

        svc.delete_file(&client_ctx("Acme C.A."), file.id)
            .await
            .unwrap();

        assert!(!files.contains(file.id));
    }

    #[tokio::test]
    async fn test_delete_other_clients_file_is_not_found() {
        let file = record("Otra Empresa");
        let files = Arc::new(MemoryFileStore::with_rows(vec![file.clone()]));
        let svc = service(Arc::clone(&files), Arc::new(AcceptAllStorage));

        let err = svc
            .delete_file(&client_ctx("Acme C.A."), file.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(files.contains(file.id));
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_content() {
        let files = Arc::new(MemoryFileStore::default());
        let svc = service(Arc::clone(&files), Arc::new(AcceptAllStorage));

        let err = svc
            .upload_file(
                &client_ctx("Acme C.A."),
                UploadFileRequest {
                    client_name: None,
                    file_name: "grande.pdf".to_string(),
                    folder_id: None,
                    data: Bytes::from(vec![0u8; 2048]),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(files.is_empty());
    }
}
