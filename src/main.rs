//! Portal server — document exchange backend for Servicios Toro Gil.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use portal_core::config::AppConfig;
use portal_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("PORTAL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting portal server v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = portal_database::connection::create_pool(&config.database).await?;
    portal_database::migration::run_migrations(&db_pool).await?;

    // ── Blob storage ─────────────────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing blob storage");
    let storage = portal_storage::manager::init_storage(&config.storage).await?;

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(portal_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let role_repo = Arc::new(
        portal_database::repositories::role::RoleBindingRepository::new(db_pool.clone()),
    );
    let folder_repo: Arc<dyn portal_database::repositories::folder::FolderStore> = Arc::new(
        portal_database::repositories::folder::FolderRepository::new(db_pool.clone()),
    );
    let file_repo: Arc<dyn portal_database::repositories::file::FileStore> = Arc::new(
        portal_database::repositories::file::FileRepository::new(db_pool.clone()),
    );

    // ── External clients & auth primitives ───────────────────────
    let roster = Arc::new(portal_auth::roster::RosterClient::new(&config.roster)?);
    let jwt_decoder = Arc::new(portal_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let notifier = portal_service::notify::ChangeNotifier::new();

    let auth_service = Arc::new(portal_service::auth::service::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&roster),
        &config.auth,
    ));
    let folder_service = Arc::new(portal_service::folder::service::FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        notifier.clone(),
    ));
    let file_service = Arc::new(portal_service::file::service::FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&storage),
        notifier.clone(),
        config.storage.max_upload_size_bytes,
    ));
    let client_service = Arc::new(portal_service::client::service::ClientDirectoryService::new(
        Arc::clone(&roster),
    ));
    let contact_service = Arc::new(portal_service::contact::service::ContactService::new(
        &config.contact,
    )?);

    // ── Router & listener ────────────────────────────────────────
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let state = portal_api::state::AppState {
        config: Arc::new(config),
        db_pool,
        storage,
        jwt_decoder,
        notifier,
        auth_service,
        folder_service,
        file_service,
        client_service,
        contact_service,
    };

    let router = portal_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    tracing::info!(addr = %bind_addr, "Portal server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Portal server stopped");
    Ok(())
}

/// Resolves when a shutdown signal is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
