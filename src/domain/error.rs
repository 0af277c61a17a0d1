//! Error types shared across the service layer.

use std::fmt;

/// Error categories, mapped once to HTTP statuses at the adapter edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing or malformed input (400)
    Validation,
    /// Missing, invalid or expired credentials (401)
    Authentication,
    /// Caller lacks the required role (403)
    Forbidden,
    /// Requested record does not exist (404)
    NotFound,
    /// Duplicate record, e.g. an already-registered email (400)
    Conflict,
    /// The document store could not be reached (500; detail only on /api/health)
    DependencyUnavailable,
    /// The payment gateway rejected the token request (500, reason passed through)
    GatewayRejected,
    /// Anything else (500)
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::Authentication => "AUTHENTICATION",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DependencyUnavailable => "DEPENDENCY_UNAVAILABLE",
            ErrorCode::GatewayRejected => "GATEWAY_REJECTED",
            ErrorCode::Internal => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

/// Standard service-layer error with a code and a caller-safe message.
#[derive(Debug, Clone)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// The single message used for every credential failure, so the login
    /// endpoint cannot be used to enumerate registered emails.
    pub fn bad_credentials() -> Self {
        Self::new(ErrorCode::Authentication, "Invalid email or password")
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Authentication, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Store unreachable. The caller-visible message stays generic; the
    /// underlying detail is retained by the connection manager for the
    /// health surface.
    pub fn store_unavailable() -> Self {
        Self::new(ErrorCode::DependencyUnavailable, "Service unavailable")
    }

    pub fn gateway_rejected(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::GatewayRejected, reason)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DomainError::not_found("Record not found"),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::conflict("Record already exists")
            }
            _ => {
                tracing::error!(error = %err, "Database operation failed");
                DomainError::new(ErrorCode::Internal, "Database operation failed")
            }
        }
    }
}
