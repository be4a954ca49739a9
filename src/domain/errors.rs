//! Error taxonomy for the employee-service client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client core.
///
/// The enum is `Clone` so that a failed single-flight cache population can
/// hand the same error to every waiting reader. Transport faults therefore
/// carry the rendered reqwest message rather than the source error itself.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Upstream returned 404 for a single-record lookup.
    #[error("Employee with id: {0} not found")]
    NotFound(String),

    /// Upstream returned 429, or the retry budget was exhausted.
    #[error("{message}")]
    RateLimited {
        /// Human-readable description of the rate-limit condition.
        message: String,
        /// The last underlying failure when the retry budget ran out.
        #[source]
        source: Option<Box<ApiError>>,
    },

    /// Any other 4xx status from the upstream.
    #[error("Client error occurred: {0}")]
    Client(u16),

    /// A 5xx status, an envelope with `status == ERROR`, or a body that
    /// could not be decoded as the expected envelope shape.
    #[error("{0}")]
    Server(String),

    /// Connection or timeout failure below the HTTP level.
    #[error("Transport fault: {0}")]
    Transport(String),

    /// An aggregate was requested over an empty collection.
    #[error("no employees in the collection")]
    EmptyCollection,
}

/// Result alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// The rate-limit error produced for an HTTP 429.
    pub fn rate_limited() -> Self {
        ApiError::RateLimited {
            message: "Your request limit has been reached. Please try again in some time."
                .to_string(),
            source: None,
        }
    }

    /// Classify a non-success HTTP status.
    ///
    /// The 404-on-lookup case is handled by the caller before this runs,
    /// since the same status resolves differently depending on call context.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::rate_limited()
        } else if status.is_client_error() {
            ApiError::Client(status.as_u16())
        } else {
            ApiError::Server(format!("Server error occurred: {}", status.as_u16()))
        }
    }

    /// Classify a reqwest-level failure (connection refused, timeout).
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("request timed out: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    /// Returns true if the retry policy may re-issue the failed call.
    ///
    /// Only rate-limit errors are retryable; everything else indicates a
    /// malformed request or a broken upstream and propagates immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_429() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("request limit"));
    }

    #[test]
    fn test_classify_client_error_embeds_status() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Client error occurred: 400");
    }

    #[test]
    fn test_classify_server_error_embeds_status() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Server error occurred: 502");
    }

    #[test]
    fn test_not_found_embeds_id() {
        let err = ApiError::NotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Employee with id: abc-123 not found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_exhaustion_preserves_cause() {
        use std::error::Error as _;

        let err = ApiError::RateLimited {
            message: "Retry budget exhausted after 3 retries".to_string(),
            source: Some(Box::new(ApiError::rate_limited())),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("exhausted"));
    }

    #[test]
    fn test_only_rate_limited_is_retryable() {
        assert!(!ApiError::Server("boom".to_string()).is_retryable());
        assert!(!ApiError::Transport("refused".to_string()).is_retryable());
        assert!(!ApiError::Client(403).is_retryable());
        assert!(!ApiError::EmptyCollection.is_retryable());
    }
}
