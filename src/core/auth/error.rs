//! Error types for the session layer

/// Token store failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Token storage is not available")]
    Unavailable,

    #[error("Failed to write token: {0}")]
    WriteFailed(String),
}

/// Session layer error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The identity service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The identity service answered with a non-2xx status
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The stored token was refused by the identity service
    #[error("Invalid or expired token")]
    InvalidToken,

    /// A success response was missing expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request body could not be encoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A newer session transition happened while this call was in flight
    #[error("Superseded by a newer session change")]
    Superseded,
}

impl AuthError {
    /// Message supplied by the identity service, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Human-readable message, falling back to `fallback` when the server gave none
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = AuthError::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert_eq!(err.user_message("fallback"), "Invalid credentials");
    }

    #[test]
    fn test_fallback_message() {
        let blank = AuthError::Rejected {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.server_message(), None);
        assert_eq!(blank.user_message("Try again"), "Try again");

        let network = AuthError::Network("connection refused".to_string());
        assert_eq!(network.user_message("Try again"), "Try again");
    }

    #[test]
    fn test_storage_conversion() {
        let err: AuthError = StorageError::Unavailable.into();
        assert_eq!(err, AuthError::Storage(StorageError::Unavailable));
        assert_eq!(err.to_string(), "Token storage is not available");
    }
}
