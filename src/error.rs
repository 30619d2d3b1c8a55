//! Error types for the inventory client.

use std::fmt;

/// Result type for inventory client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the inventory client.
///
/// A business rejection from the backend (for example "not enough stock") is
/// NOT represented here. Those come back as a normal
/// [`TransactionResult`](crate::model::TransactionResult) with
/// `success == false`, so callers can tell "refused" apart from "broken".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument violates a precondition.
    ///
    /// Raised before any network activity:
    /// - an empty required string (user id, case name, component)
    /// - a quantity that is zero, negative or not an integer
    ///
    /// **Recovery:** Correct the input and call again.
    Validation(String),

    /// The backend answered with a non-success HTTP status.
    ///
    /// Not retried. `status_text` is the canonical reason phrase.
    Transport {
        /// HTTP status code
        status: u16,
        /// Reason phrase for the status
        status_text: String,
    },

    /// The response body could not be parsed into the expected structure.
    ///
    /// Indicates the backend broke its response contract.
    Decode(String),

    /// The request never produced a response.
    ///
    /// Common causes:
    /// - Connection refused
    /// - DNS resolution failure
    /// - Connection reset mid-request
    Network(String),

    /// The request body could not be encoded as JSON.
    Serialization(String),

    /// Configuration is missing or invalid.
    ///
    /// Returned when:
    /// - No endpoint URL was configured and a request is attempted
    /// - The configured cache TTL is zero
    /// - Environment values could not be parsed
    Config(String),
}

impl Error {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// True for errors raised before any I/O took place.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::Transport {
                status,
                status_text,
            } => write!(f, "Request failed: {} {}", status, status_text),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Io => Error::Network(e.to_string()),
            _ => Error::Decode(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Error::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            Error::Network(e.to_string())
        }
    }
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::validation("userId is required");
        assert_eq!(err.to_string(), "Validation error: userId is required");
    }

    #[test]
    fn test_transport_error_display() {
        let err = Error::Transport {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed: 503 Service Unavailable");
    }

    #[test]
    fn test_error_from_json_syntax() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_error_from_json_shape_mismatch() {
        let json_err = serde_json::from_str::<Vec<String>>(r#"{"a":1}"#).unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::validation("x").is_validation());
        assert!(!Error::Decode("x".into()).is_validation());
    }
}
