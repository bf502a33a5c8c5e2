//! Client folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Display name of the administrative root folder.
pub const ROOT_ADMINISTRACION: &str = "Administración";

/// Display name of the accounting root folder.
pub const ROOT_CONTABILIDAD: &str = "Contabilidad";

/// Spanish month names in calendar order, as used for month folders.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Calendar position of a month folder name (Enero = 1 … Diciembre = 12).
///
/// Unknown names return 99 so they sort after every real month.
pub fn month_order(name: &str) -> u8 {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u8 + 1)
        .unwrap_or(99)
}

/// The structural role of a folder within a client's hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "folder_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    /// Top-level folder (Administración or Contabilidad).
    Root,
    /// Fiscal year folder, child of a root.
    Year,
    /// Sub-area folder (e.g., Faov, Estado Financiero), child of a year.
    Category,
    /// Calendar month folder, child of a category.
    Month,
    /// A user-created folder.
    Custom,
}

impl FolderType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Year => "year",
            Self::Category => "category",
            Self::Month => "month",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FolderType {
    type Err = portal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "year" => Ok(Self::Year),
            "category" => Ok(Self::Category),
            "month" => Ok(Self::Month),
            "custom" => Ok(Self::Custom),
            _ => Err(portal_core::AppError::validation(format!(
                "Invalid folder type: '{s}'. Expected one of: root, year, category, month, custom"
            ))),
        }
    }
}

/// A folder in a client's document hierarchy.
///
/// Folders form a forest per client: `parent_id` of `None` means
/// root-level. A non-null parent must belong to the same client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The owning client (string key, not a foreign entity).
    pub client_name: String,
    /// Display label. Not unique among siblings.
    pub folder_name: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<Uuid>,
    /// Structural role of this folder.
    pub folder_type: FolderType,
    /// True for system-provisioned folders, false for user-created ones.
    pub is_default: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The owning client.
    pub client_name: String,
    /// Display label.
    pub folder_name: String,
    /// Parent folder (None for root-level).
    pub parent_id: Option<Uuid>,
    /// Structural role.
    pub folder_type: FolderType,
    /// Whether this folder was provisioned by the system.
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_order_calendar_positions() {
        assert_eq!(month_order("Enero"), 1);
        assert_eq!(month_order("Junio"), 6);
        assert_eq!(month_order("Diciembre"), 12);
    }

    #[test]
    fn test_month_order_unknown_sorts_last() {
        assert_eq!(month_order("Brumaire"), 99);
        assert_eq!(month_order(""), 99);
        // Matching is exact: no case folding.
        assert_eq!(month_order("enero"), 99);
    }

    #[test]
    fn test_folder_type_from_str() {
        assert_eq!("year".parse::<FolderType>().unwrap(), FolderType::Year);
        assert_eq!("CUSTOM".parse::<FolderType>().unwrap(), FolderType::Custom);
        assert!("directory".parse::<FolderType>().is_err());
    }
}
