//! Typed error handling
//!
//! Expected failures (a rejected form, a store call that failed) are not errors at
//! the action level: actions turn them into an [`ActionOutcome`](super::state::ActionOutcome)
//! the form can render. The types here cover what is left:
//!
//! - [`StoreError`]: returned by [`InvoiceStore`](super::service::InvoiceStore) implementations
//! - [`AuthError`]: returned by [`Authenticator`](super::auth::Authenticator) implementations
//! - [`InvoiceError`]: what an action or handler propagates when it cannot produce an outcome
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.authenticate(None, &form).await {
//!     Ok(Some(code)) => show_inline_error(code),
//!     Ok(None) => {} // signed in
//!     Err(InvoiceError::Auth(e)) => eprintln!("auth provider failed: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the crate
#[derive(Debug)]
pub enum InvoiceError {
    /// Request body rejected before any action ran
    Validation(ValidationError),

    /// Persistent store failure surfaced as an error rather than a form message
    Store(StoreError),

    /// Authentication collaborator failure that is not a credentials mismatch
    Auth(AuthError),

    /// An action refused to run
    Action(ActionError),
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceError::Validation(e) => write!(f, "{}", e),
            InvoiceError::Store(e) => write!(f, "{}", e),
            InvoiceError::Auth(e) => write!(f, "{}", e),
            InvoiceError::Action(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvoiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoiceError::Validation(e) => Some(e),
            InvoiceError::Store(e) => Some(e),
            InvoiceError::Auth(e) => Some(e),
            InvoiceError::Action(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl InvoiceError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceError::Action(e) => e.status_code(),
        }
    }

    /// Stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::Validation(_) => "VALIDATION_ERROR",
            InvoiceError::Store(_) => "STORE_ERROR",
            InvoiceError::Auth(_) => "AUTH_ERROR",
            InvoiceError::Action(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    ///
    /// Store and auth details stay in the logs; the client only sees the category.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            InvoiceError::Store(_) => "Database Error".to_string(),
            InvoiceError::Auth(_) => "Authentication failed".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
///
/// Field-level problems are not errors: actions report them in their outcome.
#[derive(Debug)]
pub enum ValidationError {
    /// The request body could not be read as form data
    InvalidForm { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidForm { message } => {
                write!(f, "Invalid form data: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for InvoiceError {
    fn from(err: ValidationError) -> Self {
        InvoiceError::Validation(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failure reported by a persistent store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn query(backend: &str, message: impl fmt::Display) -> Self {
        StoreError::Query {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<StoreError> for InvoiceError {
    fn from(err: StoreError) -> Self {
        InvoiceError::Store(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Failure reported by the authentication collaborator
///
/// The message is what callers inspect: a message containing
/// [`CREDENTIALS_SIGNIN`](super::auth::CREDENTIALS_SIGNIN) means the credentials
/// were rejected.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

/// Category of an [`AuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Credentials were missing, malformed or wrong
    CredentialsSignin,
    /// The provider is misconfigured (unknown strategy, missing setup)
    Configuration,
    /// The provider could not be reached or failed internally
    Provider,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::CredentialsSignin => f.write_str("CredentialsSignin"),
            AuthErrorKind::Configuration => f.write_str("Configuration"),
            AuthErrorKind::Provider => f.write_str("ProviderError"),
        }
    }
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn credentials_signin() -> Self {
        Self::new(AuthErrorKind::CredentialsSignin, "Invalid credentials.")
    }
}

impl From<AuthError> for InvoiceError {
    fn from(err: AuthError) -> Self {
        InvoiceError::Auth(err)
    }
}

// =============================================================================
// Action Errors
// =============================================================================

/// An action that aborts instead of producing an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Deleting invoices is switched off (`invoices.delete_enabled = false`)
    DeleteDisabled,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::DeleteDisabled => f.write_str("Failed to Delete Invoice"),
        }
    }
}

impl std::error::Error for ActionError {}

impl ActionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::DeleteDisabled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::DeleteDisabled => "DELETE_FAILED",
        }
    }
}

impl From<ActionError> for InvoiceError {
    fn from(err: ActionError) -> Self {
        InvoiceError::Action(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A specialized Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;
