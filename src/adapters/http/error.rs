//! Shared error envelope and status mapping for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{DomainError, ErrorCode};

/// Every failing endpoint answers `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Map a domain error onto an HTTP response. Store and gateway failures stay
/// generic on the wire; their detail lives in the log and the health surface.
pub fn error_response(error: DomainError) -> Response {
    let status = match error.code() {
        ErrorCode::Validation | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Authentication => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DependencyUnavailable
        | ErrorCode::GatewayRejected
        | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = error_response(DomainError::validation("Missing field"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_400() {
        let response = error_response(DomainError::conflict("Duplicate email"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authentication_maps_to_401() {
        let response = error_response(DomainError::bad_credentials());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = error_response(DomainError::not_found("Order not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_unavailable_maps_to_500() {
        let response = error_response(DomainError::store_unavailable());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
