//! Error Types
//!
//! Every fallible client operation resolves to an [`ApiError`].

use thiserror::Error;

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-side errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, ...)
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Missing or rejected bearer token
    #[error("not signed in")]
    Unauthorized,

    /// A required form field is missing
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Whether a read may be retried once.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Transport("reset".into()).is_transient());
        assert!(ApiError::Status { status: 503, body: String::new() }.is_transient());
        assert!(!ApiError::Status { status: 404, body: String::new() }.is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
        assert!(!ApiError::Validation("Name is required".into()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status { status: 422, body: "bad".into() };
        assert_eq!(err.to_string(), "server returned 422: bad");
    }
}
