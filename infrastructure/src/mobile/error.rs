//! Error types for the mobile service adapter.

use neptun_application::QueryError;
use neptun_domain::RemoteErrorKind;
use thiserror::Error;

/// Result type alias for mobile service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors raised while talking to the mobile service.
///
/// These convert losslessly into the caller-facing
/// [`QueryError`] taxonomy; the raw response body is preserved for
/// diagnostics when a body was read but could not be parsed.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response body as JSON: {error}\nraw body: {raw}")]
    MalformedBody { error: String, raw: String },

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("response payload missing field {0:?}")]
    MissingField(String),

    #[error("remote service error ({kind}): {message}")]
    Remote {
        kind: RemoteErrorKind,
        message: String,
    },
}

impl From<ServiceError> for QueryError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Remote { kind, message } => QueryError::Remote { kind, message },
            ServiceError::MalformedBody { error, raw } => QueryError::Transport {
                message: format!("failed to parse response body as JSON: {error}"),
                raw_body: Some(raw),
            },
            other => QueryError::Transport {
                message: other.to_string(),
                raw_body: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_keeps_its_kind_across_conversion() {
        let err = ServiceError::Remote {
            kind: RemoteErrorKind::InvalidSession,
            message: "session expired".to_string(),
        };
        let query: QueryError = err.into();
        assert_eq!(query.remote_kind(), Some(RemoteErrorKind::InvalidSession));
    }

    #[test]
    fn malformed_body_carries_the_raw_body() {
        let err = ServiceError::MalformedBody {
            error: "expected value at line 1".to_string(),
            raw: "<html>gateway timeout</html>".to_string(),
        };
        match QueryError::from(err) {
            QueryError::Transport { raw_body, .. } => {
                assert_eq!(raw_body.as_deref(), Some("<html>gateway timeout</html>"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
