//! Page source port
//!
//! Defines the interface a cursor pulls pages through, and the error
//! taxonomy every query surfaces to callers.

use async_trait::async_trait;
use neptun_domain::RemoteErrorKind;
use thiserror::Error;

/// Errors surfaced by queries and cursors.
///
/// Nothing here is retried automatically; every failure propagates to
/// the immediate caller. A cursor whose page fetch failed keeps its
/// already-loaded pages and stays usable for a retry.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Network failure, or a response body that was not the expected
    /// JSON. `raw_body` carries the offending body when one was read.
    #[error("transport failed: {message}")]
    Transport {
        message: String,
        raw_body: Option<String>,
    },

    /// The service answered with a nonzero `ExceptionsEnum`.
    #[error("remote service error ({kind}): {message}")]
    Remote {
        kind: RemoteErrorKind,
        message: String,
    },

    /// Invalid combination of query arguments; raised before any
    /// network call.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A recognized request this client does not support yet. Distinct
    /// from [`QueryError::Argument`] so callers can tell "valid but
    /// unsupported" from "invalid".
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl QueryError {
    pub fn argument(message: impl Into<String>) -> Self {
        QueryError::Argument(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        QueryError::NotImplemented(message.into())
    }

    /// The remote failure category, when this is a remote error.
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            QueryError::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// One page of a remote listing.
#[derive(Debug, Clone)]
pub struct FetchedPage<T> {
    /// Items of this page, in server order.
    pub items: Vec<T>,
    /// Total row count the server reported alongside this page.
    pub total: u64,
}

/// Port for fetching pages of one remote listing.
///
/// Implementations live in the infrastructure layer and issue one
/// envelope call per page. Page numbers are 1-based, matching the
/// `CurrentPage` field the service expects; the cursor owns the
/// numbering and callers never pass page numbers themselves.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, page_number: u32) -> Result<FetchedPage<T>, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_kind_is_extractable() {
        let err = QueryError::Remote {
            kind: RemoteErrorKind::InvalidSession,
            message: String::new(),
        };
        assert_eq!(err.remote_kind(), Some(RemoteErrorKind::InvalidSession));
        assert!(QueryError::argument("bad").remote_kind().is_none());
    }

    #[test]
    fn argument_and_not_implemented_are_distinct() {
        let arg = QueryError::argument("unexpected term kind");
        let not_impl = QueryError::not_implemented("taken-subject listing");
        assert!(matches!(arg, QueryError::Argument(_)));
        assert!(matches!(not_impl, QueryError::NotImplemented(_)));
    }
}
