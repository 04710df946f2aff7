//! Error types for the HRMS client core.

use serde_json::Value;
use thiserror::Error;

/// A shared error type for the entire HRMS client core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum HrmsError {
    /// Login reached the backend but produced no usable credential,
    /// or the credentials were rejected.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A backend request failed: either a non-2xx response (with status and
    /// the parsed error body) or a network-level failure (no status).
    #[error("Transport error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
        body: Value,
    },

    /// Durable client-side storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HrmsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates a Transport error for a non-2xx response.
    pub fn transport(status: u16, message: impl Into<String>, body: Value) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
            body,
        }
    }

    /// Creates a Transport error for a network-level failure (no HTTP status).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
            body: Value::Null,
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a Storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the HTTP status for a non-2xx transport error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the parsed error body for a transport error, if any.
    pub fn error_body(&self) -> Option<&Value> {
        match self {
            Self::Transport { body, .. } if !body.is_null() => Some(body),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HrmsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HrmsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HrmsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HrmsError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HrmsError>`.
pub type Result<T> = std::result::Result<T, HrmsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transport_error_carries_status_and_body() {
        let err = HrmsError::transport(401, "Unauthorized", json!({"error": "bad credentials"}));
        assert!(err.is_transport());
        assert_eq!(err.http_status(), Some(401));
        assert_eq!(err.error_body(), Some(&json!({"error": "bad credentials"})));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = HrmsError::network("connection refused");
        assert!(err.is_transport());
        assert_eq!(err.http_status(), None);
        assert!(err.error_body().is_none());
    }

    #[test]
    fn test_authentication_predicate() {
        let err = HrmsError::authentication("no access token received");
        assert!(err.is_authentication());
        assert!(!err.is_transport());
    }
}
