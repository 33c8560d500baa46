//! Contact form validation and storage.

use std::collections::BTreeMap;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{ContactForm, ContactSubmission};

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

/// Repository for contact messages.
#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and store a contact message.
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactSubmission, AppError> {
        validate_contact_form(form)?;

        let submission = ContactSubmission {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
            received_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, message, received_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.message)
        .bind(submission.received_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::info!("Stored contact message {}", submission.id);
        Ok(submission)
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Validate every field, collecting one message per bad field.
pub fn validate_contact_form(form: &ContactForm) -> Result<(), AppError> {
    let mut fields = BTreeMap::new();

    let name = form.name.trim();
    if name.is_empty() {
        fields.insert("name".to_string(), "Name is required".to_string());
    } else if name.chars().count() < MIN_NAME_CHARS {
        fields.insert(
            "name".to_string(),
            format!("Name must be at least {} characters", MIN_NAME_CHARS),
        );
    }

    let email = form.email.trim();
    if email.is_empty() {
        fields.insert("email".to_string(), "Email is required".to_string());
    } else if !is_valid_email(email) {
        fields.insert("email".to_string(), "Email is invalid".to_string());
    }

    let message = form.message.trim();
    if message.is_empty() {
        fields.insert("message".to_string(), "Message is required".to_string());
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        fields.insert(
            "message".to_string(),
            format!("Message must be at least {} characters", MIN_MESSAGE_CHARS),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidForm {
            message: "Contact form is invalid".to_string(),
            fields,
        })
    }
}
