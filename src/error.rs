use thiserror::Error;

use crate::jmap::protocol::SetError;

/// Single error kind propagated by every operation in this crate.
///
/// "Not found" is deliberately absent: lookup misses are `Option::None`
/// and the calling command decides the exit code.
#[derive(Debug, Error)]
pub enum JmapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    /// The server replaced a method response with an `error` invocation.
    #[error("JMAP method error: {0}")]
    Api(String),

    /// The server reported the create/update was not applied.
    #[error("{operation} rejected by server: {detail}")]
    MutationRejected { operation: String, detail: String },

    /// Response shape matched neither the success nor the rejection
    /// contract. Contract mismatch, not a business-logic failure.
    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JmapError {
    /// Builds a `MutationRejected` from the server's structured set error.
    pub fn rejected(operation: &str, error: Option<&SetError>) -> Self {
        let detail = match error {
            Some(e) => e.to_string(),
            None => "no error detail supplied".to_string(),
        };
        JmapError::MutationRejected {
            operation: operation.to_string(),
            detail,
        }
    }
}

impl From<reqwest::Error> for JmapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            JmapError::Connection(err.to_string())
        } else {
            JmapError::Api(err.to_string())
        }
    }
}
