//! Folder operations: listing, tree assembly, create, delete, add-year.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::events::{ChangeEvent, ChangeKind};
use portal_database::repositories::file::FileStore;
use portal_database::repositories::folder::FolderStore;
use portal_entity::folder::tree::FolderTree;
use portal_entity::folder::{CreateFolder, Folder, FolderType};

use crate::context::RequestContext;
use crate::folder::provision::{Provisioner, RootKind};
use crate::folder::tree::build_tree;
use crate::notify::ChangeNotifier;

/// Manages client folder operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<dyn FolderStore>,
    file_repo: Arc<dyn FileStore>,
    provisioner: Provisioner,
    notifier: ChangeNotifier,
}

/// Request to create a new custom folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Target client (admins only; ignored for client sessions).
    pub client_name: Option<String>,
    /// Folder name.
    pub folder_name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

/// Request to provision a new year subtree under a default root.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddYearRequest {
    /// Target client.
    pub client_name: Option<String>,
    /// The year to provision (folder names derive from it).
    pub year: i32,
    /// Which root: "admin" or "contab".
    pub root: String,
    /// Whether to delete the root's previous year folders.
    #[serde(default)]
    pub delete_previous: bool,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<dyn FolderStore>,
        file_repo: Arc<dyn FileStore>,
        notifier: ChangeNotifier,
    ) -> Self {
        let provisioner = Provisioner::new(Arc::clone(&folder_repo));
        Self {
            folder_repo,
            file_repo,
            provisioner,
            notifier,
        }
    }

    /// Lists a client's folders as flat rows, provisioning the baseline
    /// structure first if the client has none.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        client_name: Option<&str>,
    ) -> Result<Vec<Folder>, AppError> {
        let client = ctx.scope_client(client_name)?;
        self.provisioner
            .ensure_baseline(&client, Utc::now().year())
            .await?;
        self.folder_repo.find_by_client(&client).await
    }

    /// Builds a client's folder tree with files attached, provisioning
    /// the baseline structure first if the client has none.
    pub async fn get_tree(
        &self,
        ctx: &RequestContext,
        client_name: Option<&str>,
    ) -> Result<FolderTree, AppError> {
        let client = ctx.scope_client(client_name)?;
        self.provisioner
            .ensure_baseline(&client, Utc::now().year())
            .await?;

        let folders = self.folder_repo.find_by_client(&client).await?;
        let files = self.file_repo.find_by_client(&client).await?;
        Ok(build_tree(&client, folders, files))
    }

    /// Creates a custom folder.
    ///
    /// The parent, when given, must exist and belong to the same client.
    /// Duplicate names among siblings are allowed.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        let client = ctx.scope_client(req.client_name.as_deref())?;

        let name = req.folder_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent_id) = req.parent_id {
            let parent = self
                .folder_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
            if parent.client_name != client {
                return Err(AppError::validation(
                    "Parent folder belongs to a different client",
                ));
            }
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                client_name: client.clone(),
                folder_name: name.to_string(),
                parent_id: req.parent_id,
                folder_type: FolderType::Custom,
                is_default: false,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            client = %client,
            folder_id = %folder.id,
            name = %folder.folder_name,
            "Folder created"
        );

        self.notifier
            .publish(ChangeEvent::new(client, ChangeKind::FolderCreated, folder.id));

        Ok(folder)
    }

    /// Deletes a folder. The schema cascades to descendant folders and
    /// their file records; blobs of cascaded files stay in storage.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        // A client may only touch its own folders.
        let client = ctx.scope_client(Some(&folder.client_name))?;
        if folder.client_name != client {
            return Err(AppError::not_found("Folder not found"));
        }

        let deleted = self.folder_repo.delete(folder_id).await?;
        if !deleted {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(
            user_id = %ctx.user_id,
            client = %folder.client_name,
            folder_id = %folder_id,
            "Folder deleted"
        );

        self.notifier.publish(ChangeEvent::new(
            folder.client_name,
            ChangeKind::FolderDeleted,
            folder_id,
        ));

        Ok(())
    }

    /// Provisions a new year subtree under one of the default roots.
    /// Admin only.
    pub async fn add_year(
        &self,
        ctx: &RequestContext,
        req: AddYearRequest,
    ) -> Result<Folder, AppError> {
        ctx.require_admin()?;
        let client = ctx.scope_client(req.client_name.as_deref())?;
        let kind: RootKind = req.root.parse()?;

        let year_folder = self
            .provisioner
            .add_year(&client, req.year, kind, req.delete_previous)
            .await?;

        // Year provisioning touches many rows; one coarse event suffices.
        self.notifier.publish(ChangeEvent::new(
            client,
            ChangeKind::FolderCreated,
            year_folder.id,
        ));

        Ok(year_folder)
    }
}
