//! HTTP handlers for the contact form.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::services::contact::ContactMessage;
use crate::services::ContactService;

use super::dto::{ContactRequest, ContactResponse};

#[derive(Clone)]
pub struct ContactState {
    pub contact: Arc<ContactService>,
}

/// POST /api/contact
///
/// The delivery is awaited: a 200 means the message reached the admin inbox.
pub async fn submit_contact(
    State(state): State<ContactState>,
    Json(req): Json<ContactRequest>,
) -> Response {
    let message = ContactMessage {
        name: req.name,
        email: req.email,
        subject: req.subject,
        message: req.message,
    };

    match state.contact.submit(message).await {
        Ok(()) => Json(ContactResponse { success: true }).into_response(),
        Err(err) => error_response(err),
    }
}
