//! Error taxonomy for backend calls.
//!
//! Local validation failures never reach this layer as requests; they are
//! carried in [`ConsoleError::Invalid`] by the workflows that validate first.

use serde::Deserialize;
use store::FormErrors;

/// A failed backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with an error status. `message` comes from the
    /// response body when it has one.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response whose body is not what the endpoint promises.
    #[error("Unexpected response: {0}")]
    Unexpected(String),

    #[error("You are not signed in")]
    NotSignedIn,
}

impl ApiError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        ApiError::Backend {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error of a workflow that validates its input before calling the backend.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// `{ "error": { "status": 400, "name": "...", "message": "..." } }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Build an [`ApiError`] from an error response body.
///
/// Falls back to `fallback` (normally the HTTP reason phrase) when the body
/// is empty, not JSON, or carries no message.
pub(crate) fn backend_error(status: u16, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if fallback.is_empty() {
                format!("Request failed with status {status}")
            } else {
                fallback.to_string()
            }
        });
    ApiError::backend(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_error_body() {
        let body = r#"{"data":null,"error":{"status":400,"name":"ValidationError","message":"Invalid identifier or password"}}"#;
        let err = backend_error(400, body, "Bad Request");
        assert_eq!(err.to_string(), "Invalid identifier or password");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        assert_eq!(
            backend_error(502, "<html>bad gateway</html>", "Bad Gateway").to_string(),
            "Bad Gateway"
        );
        assert_eq!(
            backend_error(500, r#"{"error":{"message":""}}"#, "").to_string(),
            "Request failed with status 500"
        );
    }

    #[test]
    fn test_console_error_is_transparent() {
        let err: ConsoleError = ApiError::NotSignedIn.into();
        assert_eq!(err.to_string(), "You are not signed in");
    }
}
