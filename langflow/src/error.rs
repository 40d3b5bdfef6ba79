//! Error types for the LangFlow client.

use thiserror::Error;

/// Result type alias for LangFlow operations.
pub type Result<T> = std::result::Result<T, LangFlowError>;

/// Errors that can occur when talking to a LangFlow backend.
#[derive(Debug, Error)]
pub enum LangFlowError {
    /// Configuration error (missing application token, invalid settings).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input contract violation by the caller (e.g. a zero retry budget).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Network error (connection failed, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status returned by the flow endpoint.
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize the response payload.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LangFlowError {
    /// Whether another attempt against the backend could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LangFlowError::Network(_) => true,
            LangFlowError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LangFlowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LangFlowError::Network(format!("Request timeout: {err}"))
        } else if err.is_connect() {
            LangFlowError::Network(format!("Connection failed: {err}"))
        } else {
            LangFlowError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LangFlowError {
    fn from(err: serde_json::Error) -> Self {
        LangFlowError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_retryable() {
        assert!(LangFlowError::Network("connection reset".into()).is_retryable());
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        for status in [429, 500, 503] {
            let err = LangFlowError::Api {
                status,
                message: "busy".into(),
            };
            assert!(err.is_retryable(), "status {status} should be retryable");
        }
    }

    #[test]
    fn caller_errors_are_not_retryable() {
        assert!(!LangFlowError::InvalidArgument("repeat = 0".into()).is_retryable());
        assert!(
            !LangFlowError::Api {
                status: 400,
                message: "bad flow id".into(),
            }
            .is_retryable()
        );
    }
}
