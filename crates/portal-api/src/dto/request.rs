//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username: the admin email or a client name.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Target client (admins only).
    pub client_name: Option<String>,
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub folder_name: String,
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
}

/// Add-year request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddYearRequest {
    /// Target client.
    pub client_name: Option<String>,
    /// The year to provision.
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    /// Which root: "admin" or "contab".
    #[validate(length(min = 1))]
    pub root: String,
    /// Whether to delete the root's previous year folders.
    #[serde(default)]
    pub delete_previous: bool,
}

/// Contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormRequest {
    /// Sender name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Sender phone number.
    #[serde(default)]
    pub phone: String,
    /// Sender email.
    #[validate(email)]
    pub email: String,
    /// The service the sender is asking about.
    #[serde(default)]
    pub service_type: String,
    /// Free-form details.
    #[serde(default)]
    pub details: String,
}

/// Query parameters scoping a request to one client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientQuery {
    /// Target client (admins only; ignored for client sessions).
    pub client_name: Option<String>,
}

/// Query parameters for file listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListQuery {
    /// Target client (admins only).
    pub client_name: Option<String>,
    /// Restrict to one folder.
    pub folder_id: Option<Uuid>,
    /// Restrict to files with no folder.
    #[serde(default)]
    pub unfiled: bool,
}
