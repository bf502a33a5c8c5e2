//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use portal_auth::jwt::decoder::JwtDecoder;
use portal_core::config::AppConfig;
use portal_core::traits::storage::BlobStorage;

use portal_service::auth::service::AuthService;
use portal_service::client::service::ClientDirectoryService;
use portal_service::contact::service::ContactService;
use portal_service::file::service::FileService;
use portal_service::folder::service::FolderService;
use portal_service::notify::ChangeNotifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Blob storage provider.
    pub storage: Arc<dyn BlobStorage>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Change event broadcast hub.
    pub notifier: ChangeNotifier,

    /// Auth service.
    pub auth_service: Arc<AuthService>,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Client directory service.
    pub client_service: Arc<ClientDirectoryService>,
    /// Contact forwarding service.
    pub contact_service: Arc<ContactService>,
}
