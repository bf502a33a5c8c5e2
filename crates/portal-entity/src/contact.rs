//! Contact-form submission model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact-form submission forwarded to the notification webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Sender name.
    pub name: String,
    /// Sender phone number.
    pub phone: String,
    /// Sender email.
    pub email: String,
    /// The service the sender is asking about.
    pub service_type: String,
    /// Free-form details.
    pub details: String,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}
