//! Unified error system for aliasdash
//!
//! One error type covers the three failure classes the dashboard distinguishes:
//! transport failures, non-success HTTP statuses, and inputs rejected before a
//! request is sent. All of them end up as a user-visible notification.

use serde::{Deserialize, Serialize};

/// Unified error type for all aliasdash operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DashError {
    /// Input rejected before any request was sent
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Resource not found locally (e.g. alias not in the displayed list)
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Network or transport failure
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Server-provided `error` field, or the status reason
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl DashError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors raised before any request left the client.
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// Message suitable for a notification body.
    ///
    /// Validation messages are shown verbatim; everything else, server
    /// rejections included, collapses into a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid { message } => message.clone(),
            _ => RETRY_HINT.to_string(),
        }
    }

    /// Like [`user_message`](Self::user_message), but a server rejection
    /// shows the server's own text.
    pub fn server_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            _ => self.user_message(),
        }
    }
}

/// Generic notification body for failed actions.
pub const RETRY_HINT: &str = "Sorry for the inconvenience! Could you refresh the page & retry please?";

/// Standard Result type for aliasdash operations
pub type Result<T> = std::result::Result<T, DashError>;

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<crate::effects::StorageError> for DashError {
    fn from(err: crate::effects::StorageError) -> Self {
        Self::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_text_only_through_server_message() {
        let err = DashError::http(400, "prefix already taken");
        assert_eq!(err.server_message(), "prefix already taken");
        assert_eq!(err.user_message(), RETRY_HINT);
        assert_eq!(err.to_string(), "HTTP 400: prefix already taken");

        let invalid = DashError::invalid("empty");
        assert_eq!(invalid.user_message(), "empty");
        assert_eq!(invalid.server_message(), "empty");
        assert_eq!(DashError::network("refused").server_message(), RETRY_HINT);
    }

    #[test]
    fn test_transport_errors_get_generic_message() {
        let err = DashError::network("connection refused");
        assert!(err.user_message().starts_with("Sorry for the inconvenience"));
        assert!(!err.is_preflight());
        assert!(DashError::invalid("empty").is_preflight());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(DashError::from(io), DashError::NotFound { .. }));
    }
}
