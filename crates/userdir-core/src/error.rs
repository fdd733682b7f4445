//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use thiserror::Error;

/// The unique user attribute that collided with an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictField {
    /// Another user already owns the username.
    Username,
    /// Another user already owns the email address.
    Email,
}

impl ConflictField {
    /// Returns the column name backing this field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }

    /// Returns the client-facing message for this conflict.
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::Username => "Username already exists!",
            Self::Email => "Email already exists!",
        }
    }
}

impl Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Unified error type for the user directory.
///
/// Domain variants carry the exact client-facing detail; infrastructure
/// variants carry a diagnostic message that is logged but never returned
/// to the caller verbatim.
#[derive(Error, Debug)]
pub enum UserDirError {
    // ============ Domain Errors ============
    /// No user row exists for the requested id.
    #[error("User with id {id} not found!")]
    NotFound { id: i64 },

    /// Username or email already taken by another user.
    #[error("{}", .0.detail())]
    Conflict(ConflictField),

    /// Request failed schema validation.
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UserDirError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 400,
            Self::Validation(_) => 422,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(ConflictField::Username) => "USERNAME_CONFLICT",
            Self::Conflict(ConflictField::Email) => "EMAIL_CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message safe to show to API clients.
    #[must_use]
    pub fn client_detail(&self) -> String {
        if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Returns true for errors caused by the server rather than the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Creates a not found error for a user id.
    #[must_use]
    pub const fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Creates a conflict error for the given field.
    #[must_use]
    pub const fn conflict(field: ConflictField) -> Self {
        Self::Conflict(field)
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

/// Maps a unique-constraint violation message onto the column it names.
///
/// SQLite reports `UNIQUE constraint failed: users.username`; other engines
/// mention the index or column name, so a substring match covers them too.
#[must_use]
pub fn conflict_field_from_message(message: &str) -> Option<ConflictField> {
    if message.contains("username") {
        Some(ConflictField::Username)
    } else if message.contains("email") {
        Some(ConflictField::Email)
    } else {
        None
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for UserDirError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if let Some(field) = conflict_field_from_message(db_err.message()) {
                    return Self::Conflict(field);
                }
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for UserDirError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body returned by the API.
///
/// Serializes as `{"detail": "..."}`; field errors are only present for
/// validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Human-readable error message
    pub detail: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates an error response carrying only a detail message.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: None,
        }
    }

    /// Creates a new error response from a `UserDirError`.
    #[must_use]
    pub fn from_error(error: &UserDirError) -> Self {
        Self::new(error.client_detail())
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl From<&UserDirError> for ErrorResponse {
    fn from(error: &UserDirError) -> Self {
        Self::from_error(error)
    }
}
