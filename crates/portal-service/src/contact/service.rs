//! Forwards contact-form submissions to the configured webhook.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use portal_core::config::contact::ContactConfig;
use portal_core::error::{AppError, ErrorKind};
use portal_entity::contact::ContactSubmission;

/// Fields accepted from the public contact form.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service_type: String,
    pub details: String,
}

/// Accepts contact-form submissions and forwards them out-of-band.
#[derive(Debug, Clone)]
pub struct ContactService {
    http: reqwest::Client,
    webhook_url: String,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(config: &ContactConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    "Failed to build contact HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            webhook_url: config.webhook_url.clone(),
        })
    }

    /// Stamps and forwards a submission on a background task.
    ///
    /// Fire-and-forget: the caller always gets an accepted result; a
    /// webhook failure is only logged.
    pub fn submit(&self, req: ContactRequest) -> Result<ContactSubmission, AppError> {
        if req.name.trim().is_empty() || req.email.trim().is_empty() {
            return Err(AppError::validation("Name and email are required"));
        }

        let submission = ContactSubmission {
            name: req.name,
            phone: req.phone,
            email: req.email,
            service_type: req.service_type,
            details: req.details,
            submitted_at: Utc::now(),
        };

        if self.webhook_url.is_empty() {
            warn!("Contact webhook URL not configured; submission dropped");
            return Ok(submission);
        }

        let http = self.http.clone();
        let url = self.webhook_url.clone();
        let payload = submission.clone();

        tokio::spawn(async move {
            match http.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    info!(sender = %payload.email, "Contact submission forwarded");
                }
                Ok(response) => {
                    warn!(
                        status = %response.status(),
                        "Contact webhook rejected submission"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "Contact webhook request failed");
                }
            }
        });

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ContactService {
        ContactService::new(&ContactConfig {
            webhook_url: String::new(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_submission_is_stamped() {
        let before = Utc::now();
        let submission = service()
            .submit(ContactRequest {
                name: "Ana".into(),
                phone: "0412-0000000".into(),
                email: "ana@example.com".into(),
                service_type: "Contabilidad".into(),
                details: "Consulta".into(),
            })
            .unwrap();
        assert!(submission.submitted_at >= before);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let result = service().submit(ContactRequest {
            name: "  ".into(),
            phone: String::new(),
            email: "ana@example.com".into(),
            service_type: String::new(),
            details: String::new(),
        });
        assert!(result.is_err());
    }
}
