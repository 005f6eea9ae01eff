//! Unified error type for the registry client stack.

use thiserror::Error;

/// Unified error type for Sisyphus.
///
/// The typed client surface returns these so callers can tell a missing
/// record apart from a transport failure or a response that did not match
/// the expected wire shape.
#[derive(Error, Debug)]
pub enum SisyphusError {
    // ============ Domain Errors ============
    /// Invalid input (argument count, argument shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller is not allowed to perform a mutating call
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ============ Remote Call Errors ============
    /// Transport failure (network error, endpoint unreachable)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote program rejected the call
    #[error("Remote call failed: {method} - {message}")]
    Remote { method: String, message: String },

    /// The remote result did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SisyphusError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Remote { .. } => "REMOTE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a remote call error for `method`.
    #[must_use]
    pub fn remote<M: Into<String>, T: Into<String>>(method: M, message: T) -> Self {
        Self::Remote {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    ///
    /// The client itself never retries; this is for callers that want to.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for SisyphusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SisyphusError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(
            SisyphusError::Unauthorized("no signer".to_string()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(SisyphusError::Transport("down".to_string()).error_code(), "TRANSPORT_ERROR");
        assert_eq!(SisyphusError::remote("get_user", "trap").error_code(), "REMOTE_ERROR");
        assert_eq!(SisyphusError::decode("shape").error_code(), "DECODE_ERROR");
        assert_eq!(SisyphusError::internal("oops").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            SisyphusError::Configuration("missing".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_retriable_errors() {
        assert!(SisyphusError::Transport("connection reset".to_string()).is_retriable());
        assert!(!SisyphusError::decode("missing field").is_retriable());
        assert!(!SisyphusError::remote("create_user", "rejected").is_retriable());
        assert!(!SisyphusError::Unauthorized("no signer".to_string()).is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = SisyphusError::remote("delete_user", "host trap");
        assert_eq!(err.to_string(), "Remote call failed: delete_user - host trap");

        let err = SisyphusError::decode("get_user returned an unexpected shape");
        assert_eq!(err.to_string(), "Decode error: get_user returned an unexpected shape");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = SisyphusError::from(json_err);
        assert!(matches!(err, SisyphusError::Decode(_)));
    }
}
