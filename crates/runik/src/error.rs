//! Error types for the runik client.
//!
//! Every network call collapses into exactly one of the variants below.
//! Backend outcomes are classified by the response status and body; failures
//! always carry the raw payload so callers can branch on cause without
//! string matching.

use thiserror::Error;

/// The unified error type for runik operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, protocol). These
    /// propagate from the HTTP layer and are never reclassified.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The configuration failed validation at root-resource construction.
    /// Carries every issue found, not just the first.
    #[error("invalid configuration: {}", issues.join("; "))]
    InvalidConfiguration { issues: Vec<String> },

    /// A pre-flight input check failed; no request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The backend answered with a structured error `code` field. This can
    /// happen under a success status; classification is by field, not by
    /// status alone.
    #[error("backend rejected request [{code}]")]
    BackendRejected {
        code: String,
        body: serde_json::Value,
    },

    /// The response status did not match the operation's documented success
    /// status and no structured code was present.
    #[error("backend failure: HTTP {status}")]
    BackendFailure {
        status: u16,
        body: serde_json::Value,
    },

    /// A success-shaped response was missing a field the contract requires
    /// (`id`, `token`, or the sessions array shape).
    #[error("unexpected response body")]
    UnexpectedResponse { body: serde_json::Value },
}

impl Error {
    /// Returns the backend error code, if this is a rejection.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            Error::BackendRejected { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns the HTTP status, if this is a status-mismatch failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BackendFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Input validation errors raised before any network I/O.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid endpoint URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Invalid project name.
    #[error("invalid project name '{value}': {reason}")]
    ProjectName { value: String, reason: String },

    /// Invalid avatar payload.
    #[error("invalid avatar payload: {reason}")]
    Avatar { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_joins_issues() {
        let err = Error::InvalidConfiguration {
            issues: vec!["endpoint is required".into(), "key is required".into()],
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: endpoint is required; key is required"
        );
    }

    #[test]
    fn backend_code_accessor() {
        let err = Error::BackendRejected {
            code: "EmailTaken".into(),
            body: serde_json::json!({"code": "EmailTaken"}),
        };
        assert_eq!(err.backend_code(), Some("EmailTaken"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn status_accessor() {
        let err = Error::BackendFailure {
            status: 403,
            body: serde_json::Value::Null,
        };
        assert_eq!(err.status(), Some(403));
    }
}
