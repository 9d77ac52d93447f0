//! Error types for txweb-core
//!
//! Every failure is scoped to the request that caused it. The `Display`
//! text of an error is what the dashboard shows to the user, so
//! `Upstream` renders the server-provided message verbatim.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Upstream answered with a non-2xx status
    UpstreamError,
    /// Request never produced a response
    NetworkError,
    /// Response body could not be decoded
    InvalidFormat,
    /// Transaction not found
    TransactionNotFound,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UpstreamError => write!(f, "UPSTREAM_ERROR"),
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Upstream HTTP status, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            status: None,
            suggestions: vec![],
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - the request failed but retrying may help
    Warning,
    /// Error - the request failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for txweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Request failed: {message}")]
    Network { message: String },

    #[error("Invalid response: {message}")]
    InvalidFormat { message: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Upstream { .. } => ErrorCode::UpstreamError,
            CoreError::Network { .. } => ErrorCode::NetworkError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Upstream { status, .. } if *status >= 500 => ErrorSeverity::Error,
            CoreError::Upstream { .. } => ErrorSeverity::Warning,
            CoreError::Network { .. } => ErrorSeverity::Warning,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
        }
    }

    /// Whether a repeated attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Network { .. } => true,
            CoreError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Upstream { status, .. } => {
                details = details.with_status(*status);
                if *status == 401 || *status == 403 {
                    details = details.with_suggestion(
                        "Check the api.token value in your config file.".to_string()
                    );
                }
            }
            CoreError::Network { .. } => {
                details = details.with_suggestion(
                    "Check that api.base_url is reachable from the server.".to_string()
                );
            }
            CoreError::InvalidFormat { .. } => {
                details = details.with_suggestion(
                    "The upstream API returned an unexpected payload shape.".to_string()
                );
            }
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the transaction ID is correct.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
