//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback text when a failure carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Main error type for LedgerLink
///
/// The variants split into two families. `Operation` and
/// `UnsupportedOperation` are structured, user-facing errors raised before any
/// request leaves the process; they survive an abort unmodified. Everything
/// else describes a transport or API failure and is wrapped into `Api` when a
/// run aborts.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum LedgerLinkError {
    /// Operator-facing configuration problem (credentials, parameters).
    #[error("{message}")]
    Operation { message: String },

    /// The requested operation is not in the resource's operation table.
    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation { resource: String, operation: String },

    /// Non-2xx response, or the generic wrapper applied on abort.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    /// The transport could not produce any response at all.
    #[error("{0}")]
    Network(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerLinkError {
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation { message: message.into() }
    }

    pub fn unsupported(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation { resource: resource.into(), operation: operation.into() }
    }

    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Api { message: message.into(), status }
    }

    /// Bare message suitable for an `{error}` record.
    ///
    /// Blank messages collapse to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn message(&self) -> String {
        let message = match self {
            Self::Operation { message } | Self::Api { message, .. } => message.clone(),
            Self::Network(message) => message.clone(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// HTTP status attached to API failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// True for the structured errors that are re-raised untouched.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Operation { .. } | Self::UnsupportedOperation { .. })
    }

    /// True when the error signals a misconfigured node rather than a runtime
    /// failure. These are surfaced even under continue-on-fail.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// Consolidate into the single error a host sees when an item aborts.
    pub fn into_abort(self) -> Self {
        if self.is_user_facing() {
            return self;
        }
        let status = self.status();
        Self::Api { message: self.message(), status }
    }
}

/// Result type alias for LedgerLink operations
pub type Result<T> = std::result::Result<T, LedgerLinkError>;
