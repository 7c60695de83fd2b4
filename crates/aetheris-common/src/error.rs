//! Error types for aetheris services.

use thiserror::Error;

/// Result type alias using AetherisError.
pub type AetherisResult<T> = Result<T, AetherisError>;

/// Primary error type for dashboard operations.
#[derive(Debug, Error)]
pub enum AetherisError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid argument for '{param}': {message}")]
    InvalidArgument { param: String, message: String },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {0} has no usable bands")]
    NoDeclaredBands(String),

    // === Upstream Errors ===
    /// A remote STAC/WTSS call failed. The remote status and body are
    /// carried through so the caller can surface them verbatim.
    #[error("Upstream request failed with status {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Upstream request failed: {0}")]
    UpstreamTransport(String),

    // === Data Errors ===
    /// A valid request that simply returned no data. Distinct from an
    /// error state in the UI.
    #[error("No data: {0}")]
    Empty(String),

    // === Client-side Guard ===
    /// A user action blocked before any request is issued (e.g. selecting
    /// more than six panels for comparison).
    #[error("{0}")]
    GuardViolation(String),

    // === Storage Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AetherisError {
    /// Convenience constructor for invalid-argument errors.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        AetherisError::InvalidArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Upstream failures pass the remote status through unchanged.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AetherisError::MissingParameter(_)
            | AetherisError::InvalidArgument { .. }
            | AetherisError::ProductNotFound(_)
            | AetherisError::NoDeclaredBands(_)
            | AetherisError::GuardViolation(_) => 400,

            AetherisError::Upstream { status, .. } => *status,
            AetherisError::UpstreamTransport(_) => 502,

            AetherisError::Empty(_) => 404,

            AetherisError::DatabaseError(_) | AetherisError::InternalError(_) => 500,
        }
    }

    /// Whether this error reflects bad caller input rather than a failure.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            AetherisError::MissingParameter(_)
                | AetherisError::InvalidArgument { .. }
                | AetherisError::GuardViolation(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for AetherisError {
    fn from(err: std::io::Error) -> Self {
        AetherisError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AetherisError {
    fn from(err: serde_json::Error) -> Self {
        AetherisError::InternalError(format!("JSON error: {}", err))
    }
}
