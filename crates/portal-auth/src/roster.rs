//! Client against the external client roster spreadsheet.
//!
//! The roster is the source of truth for which clients may log in. It is
//! consumed read-only over the Sheets values API: one range holding
//! `name, password` rows for credential checks, and a single-column range
//! for the admin-facing client directory.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use portal_core::config::roster::RosterConfig;
use portal_core::error::AppError;

/// One roster row: a client name and its portal password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredential {
    pub name: String,
    pub password: String,
}

/// Shape of the values API response: a range plus a row-major value grid.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Read-only HTTP client for the roster spreadsheet.
#[derive(Debug, Clone)]
pub struct RosterClient {
    http: reqwest::Client,
    base_url: String,
    sheet_id: String,
    api_key: String,
    credentials_range: String,
    names_range: String,
}

impl RosterClient {
    /// Builds a roster client from configuration.
    ///
    /// Fails with a configuration error when no API key is set, so that a
    /// misconfigured deployment is caught at startup rather than at first
    /// login.
    pub fn new(config: &RosterConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::configuration("Roster API key is not configured"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::with_source(
                portal_core::error::ErrorKind::Internal,
                "Failed to build roster HTTP client",
                e,
            ))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sheet_id: config.sheet_id.clone(),
            api_key,
            credentials_range: config.credentials_range.clone(),
            names_range: config.names_range.clone(),
        })
    }

    /// Fetches all client credentials from the roster.
    ///
    /// The first row is a header and is skipped. Rows with a blank name or
    /// fewer than two columns are dropped; all cells are trimmed.
    pub async fn fetch_credentials(&self) -> Result<Vec<ClientCredential>, AppError> {
        let rows = self.fetch_range(&self.credentials_range).await?;
        let credentials = parse_credential_rows(rows);
        debug!(count = credentials.len(), "Fetched roster credentials");
        Ok(credentials)
    }

    /// Fetches the client directory: every non-blank name, header skipped.
    pub async fn fetch_names(&self) -> Result<Vec<String>, AppError> {
        let rows = self.fetch_range(&self.names_range).await?;
        let names = parse_name_rows(rows);
        debug!(count = names.len(), "Fetched roster names");
        Ok(names)
    }

    /// Looks up a single client's credential by exact (trimmed) name.
    pub async fn find_credential(&self, name: &str) -> Result<Option<ClientCredential>, AppError> {
        let wanted = name.trim();
        let credentials = self.fetch_credentials().await?;
        Ok(credentials.into_iter().find(|c| c.name == wanted))
    }

    async fn fetch_range(&self, range: &str) -> Result<Vec<Vec<String>>, AppError> {
        let url = format!("{}/{}/values/{}", self.base_url, self.sheet_id, range);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::with_source(
                portal_core::error::ErrorKind::ExternalService,
                "Roster request failed",
                e,
            ))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Roster service returned status {}",
                response.status()
            )));
        }

        let body: ValuesResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                portal_core::error::ErrorKind::ExternalService,
                "Failed to parse roster response",
                e,
            )
        })?;

        Ok(body.values)
    }
}

/// Turns a raw `name, password` grid into credentials, skipping the header
/// row and dropping blank or incomplete rows.
fn parse_credential_rows(rows: Vec<Vec<String>>) -> Vec<ClientCredential> {
    rows.into_iter()
        .skip(1)
        .filter_map(|row| {
            let name = row.first().map(|s| s.trim().to_string())?;
            let password = row.get(1).map(|s| s.trim().to_string())?;
            if name.is_empty() || password.is_empty() {
                return None;
            }
            Some(ClientCredential { name, password })
        })
        .collect()
}

/// Turns a single-column grid into trimmed names, skipping the header row.
fn parse_name_rows(rows: Vec<Vec<String>>) -> Vec<String> {
    rows.into_iter()
        .skip(1)
        .filter_map(|row| {
            let name = row.first().map(|s| s.trim().to_string())?;
            if name.is_empty() { None } else { Some(name) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_row_is_skipped() {
        let creds = parse_credential_rows(rows(&[
            &["Cliente", "Clave"],
            &["Acme C.A.", "secret1"],
        ]));
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].name, "Acme C.A.");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let creds = parse_credential_rows(rows(&[
            &["Cliente", "Clave"],
            &["  Acme C.A.  ", " secret1 "],
        ]));
        assert_eq!(creds[0].name, "Acme C.A.");
        assert_eq!(creds[0].password, "secret1");
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let creds = parse_credential_rows(rows(&[
            &["Cliente", "Clave"],
            &["Solo nombre"],
            &["", "sin nombre"],
            &["Completo", "clave"],
        ]));
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].name, "Completo");
    }

    #[test]
    fn test_name_rows_drop_blanks() {
        let names = parse_name_rows(rows(&[
            &["Cliente"],
            &["Acme C.A."],
            &["  "],
            &["Otro S.A."],
        ]));
        assert_eq!(names, vec!["Acme C.A.", "Otro S.A."]);
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let config = RosterConfig {
            base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            sheet_id: "sheet".to_string(),
            api_key: None,
            credentials_range: "A:B".to_string(),
            names_range: "A:A".to_string(),
            timeout_seconds: 10,
        };
        assert!(RosterClient::new(&config).is_err());
    }
}
