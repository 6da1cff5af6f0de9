//! Model-call error types.

use thiserror::Error;

/// Why a chat call produced no reply.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The server answered, but not with a success status, or the
    /// connection broke mid-request.
    #[error("model server request failed: {0}")]
    RequestFailed(String),

    /// Reply body was not JSON.
    #[error("model reply was not JSON: {0}")]
    ParseError(String),

    /// No reply within the per-request budget, in milliseconds.
    #[error("model did not answer within {0}ms")]
    Timeout(u64),

    /// No backend configured, or the server could not be reached.
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Every attempt failed; `last` is the final attempt's failure.
    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// Failure of the final attempt.
        #[source]
        last: Box<LlmError>,
    },

    /// Unusable provider settings.
    #[error("invalid model configuration: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Classify a transport failure of one attempt made with `timeout_ms`.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout_ms)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }

    /// A non-success HTTP reply.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            LlmError::RequestFailed(format!("HTTP {status}"))
        } else {
            LlmError::RequestFailed(format!("HTTP {status}: {body}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_the_body_when_present() {
        let err = LlmError::from_status(reqwest::StatusCode::NOT_FOUND, " model 'x' not found \n");
        assert_eq!(
            err.to_string(),
            "model server request failed: HTTP 404 Not Found: model 'x' not found"
        );
        let err = LlmError::from_status(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "model server request failed: HTTP 502 Bad Gateway");
    }

    #[test]
    fn exhausted_retries_report_the_last_failure() {
        let err = LlmError::RetriesExhausted {
            attempts: 3,
            last: Box::new(LlmError::Timeout(120_000)),
        };
        assert_eq!(err.to_string(), "gave up after 3 attempts: model did not answer within 120000ms");
        assert!(std::error::Error::source(&err).is_some());
    }
}
