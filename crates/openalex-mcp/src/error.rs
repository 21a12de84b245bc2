//! Error types for the OpenAlex MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error (including exhausted retries)
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by OpenAlex (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400/403 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if the upstream reported a missing resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Input validation failed; raised before any upstream call
    #[error("Validation error: {message}")]
    Validation {
        /// Parameter that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The identifier does not resolve to a work
    #[error("Work not found: {id}")]
    NotFound {
        /// Identifier as supplied by the caller
        id: String,
    },

    /// The work exists but the requested sub-resource does not
    #[error("{resource} not available for work {id}")]
    NotAvailable {
        /// Name of the missing sub-resource
        resource: String,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// Error from the upstream API client
    #[error("Upstream error: {0}")]
    Upstream(#[from] ClientError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a not available error.
    #[must_use]
    pub fn not_available(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotAvailable { resource: resource.into(), id: id.into() }
    }

    /// Map an upstream error for a single-work lookup, turning 404 into `NotFound`.
    #[must_use]
    pub fn from_lookup(err: ClientError, id: &str) -> Self {
        if err.is_not_found() { Self::not_found(id) } else { Self::Upstream(err) }
    }

    /// Short machine-readable error kind, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::NotAvailable { .. } => "not_available",
            Self::Upstream(_) => "upstream",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Upstream(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by OpenAlex API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::NotFound { id } => {
                format!("Work not found: {id}. Please check the identifier is correct.")
            }
            _ => self.to_string(),
        }
    }
}

/// Error payload returned to the caller in place of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable error message
    pub error: String,
}

impl From<&ToolError> for ErrorEnvelope {
    fn from(err: &ToolError) -> Self {
        Self { error: err.to_user_message() }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
