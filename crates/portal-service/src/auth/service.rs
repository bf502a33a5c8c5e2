//! Login and token refresh.
//!
//! Two login paths share one endpoint: the fixed admin credential pair
//! from configuration, and client credentials validated against the
//! external roster. Client accounts are reconciled on login: the local
//! user row is created on first sight and its password hash is
//! refreshed whenever the roster password changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use portal_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use portal_auth::password::PasswordHasher;
use portal_auth::roster::RosterClient;
use portal_core::config::auth::AuthConfig;
use portal_core::error::AppError;
use portal_database::repositories::role::RoleBindingRepository;
use portal_database::repositories::user::UserRepository;
use portal_entity::user::{AppRole, CreateUser, User};

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResponse {
    /// Access and refresh tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// The authenticated role.
    pub role: AppRole,
    /// The bound client name (client role only).
    pub client_name: Option<String>,
    /// The username.
    pub username: String,
}

/// Handles login and token refresh.
#[derive(Debug)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleBindingRepository>,
    roster: Arc<RosterClient>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    admin_email: String,
    admin_password: Option<String>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleBindingRepository>,
        roster: Arc<RosterClient>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            roster,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    /// Authenticates a username/password pair and issues tokens.
    ///
    /// The admin email routes to the fixed-credential path; anything
    /// else is treated as a client name and checked against the roster.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        if username == self.admin_email {
            self.login_admin(password).await
        } else {
            self.login_client(username, password).await
        }
    }

    /// Issues a fresh access token from a valid refresh token.
    pub fn refresh(&self, refresh_token: &str) -> Result<(String, DateTime<Utc>), AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        self.encoder.generate_access_token(
            claims.sub,
            claims.role,
            claims.client_name.as_deref(),
            &claims.username,
        )
    }

    async fn login_admin(&self, password: &str) -> Result<LoginResponse, AppError> {
        let expected = self
            .admin_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::configuration("Admin password is not configured"))?;

        if password != expected {
            return Err(AppError::authentication("Invalid credentials"));
        }

        let user = self
            .find_or_create_user(&self.admin_email, &self.admin_email, password)
            .await?;
        self.role_repo.ensure(user.id, AppRole::Admin, None).await?;

        let tokens =
            self.encoder
                .generate_token_pair(user.id, AppRole::Admin, None, &user.username)?;

        info!(user_id = %user.id, "Admin logged in");

        Ok(LoginResponse {
            tokens,
            role: AppRole::Admin,
            client_name: None,
            username: user.username,
        })
    }

    async fn login_client(
        &self,
        client_name: &str,
        password: &str,
    ) -> Result<LoginResponse, AppError> {
        let credential = self
            .roster
            .find_credential(client_name)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

        if credential.password != password {
            return Err(AppError::authentication("Invalid credentials"));
        }

        let email = derive_client_email(&credential.name);
        let user = self
            .find_or_create_user(&credential.name, &email, password)
            .await?;

        // Reconciliation-on-login: the roster is the source of truth,
        // so a changed roster password replaces the stored hash.
        if !self.hasher.verify(password, &user.password_hash)? {
            let new_hash = self.hasher.hash(password)?;
            self.user_repo.update_password_hash(user.id, &new_hash).await?;
        }

        self.role_repo
            .ensure(user.id, AppRole::Client, Some(&credential.name))
            .await?;

        let tokens = self.encoder.generate_token_pair(
            user.id,
            AppRole::Client,
            Some(&credential.name),
            &user.username,
        )?;

        info!(user_id = %user.id, client = %credential.name, "Client logged in");

        Ok(LoginResponse {
            tokens,
            role: AppRole::Client,
            client_name: Some(credential.name),
            username: user.username,
        })
    }

    async fn find_or_create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if let Some(user) = self.user_repo.find_by_username(username).await? {
            return Ok(user);
        }

        let password_hash = self.hasher.hash(password)?;
        self.user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
    }
}

/// Derives a stable synthetic email address from a client name.
///
/// Client accounts have no real mailbox; the address only has to be
/// unique and well-formed.
fn derive_client_email(client_name: &str) -> String {
    let local: String = client_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let local = if local.is_empty() {
        "cliente".to_string()
    } else {
        local
    };
    format!("{local}@clientes.torogil.com")
}
