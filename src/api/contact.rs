//! Contact form endpoint.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{ContactForm, ContactReceipt};
use crate::AppState;

/// POST /api/contact - Validate and store a contact message.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> ApiResult<ContactReceipt> {
    let submission = state.contact.submit(&form).await?;

    success(ContactReceipt {
        id: submission.id,
        message: "Thanks for reaching out! We'll get back to you soon.".to_string(),
    })
}
