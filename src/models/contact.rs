//! Contact form models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for the contact form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A stored contact message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// Acknowledgement returned after a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: String,
    pub message: String,
}
