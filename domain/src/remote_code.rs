//! Symbolic decoding of the remote `ExceptionsEnum` status field.

use thiserror::Error;

/// Failure category reported by the remote service.
///
/// The service encodes failures as a small integer in the
/// `ExceptionsEnum` field of every response envelope. The table is
/// positional and fixed; code 0 means success and never maps to a kind.
/// Codes beyond the table decode to [`RemoteErrorKind::Unrecognized`],
/// preserving the raw value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    #[error("user not found")]
    UserNotFound,

    #[error("password expired")]
    PasswordExpired,

    #[error("unhandled exception")]
    UnhandledException,

    #[error("service timeout")]
    ServiceTimeout,

    #[error("developer generated")]
    DeveloperGenerated,

    #[error("server full")]
    ServerFull,

    #[error("service not found")]
    ServiceNotFound,

    #[error("invalid session")]
    InvalidSession,

    #[error("wrong version, server is newer")]
    WrongVersionHigher,

    #[error("wrong version, server is older")]
    WrongVersionLower,

    #[error("no network connection")]
    NoNetworkConnection,

    #[error("GDPR privacy statement not accepted")]
    GdprStatementNotAccepted,

    #[error("unrecognized error code {0}")]
    Unrecognized(i64),
}

impl RemoteErrorKind {
    /// Decode a nonzero `ExceptionsEnum` value.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => RemoteErrorKind::UserNotFound,
            2 => RemoteErrorKind::PasswordExpired,
            3 => RemoteErrorKind::UnhandledException,
            4 => RemoteErrorKind::ServiceTimeout,
            5 => RemoteErrorKind::DeveloperGenerated,
            6 => RemoteErrorKind::ServerFull,
            7 => RemoteErrorKind::ServiceNotFound,
            8 => RemoteErrorKind::InvalidSession,
            9 => RemoteErrorKind::WrongVersionHigher,
            10 => RemoteErrorKind::WrongVersionLower,
            11 => RemoteErrorKind::NoNetworkConnection,
            12 => RemoteErrorKind::GdprStatementNotAccepted,
            other => RemoteErrorKind::Unrecognized(other),
        }
    }

    /// The wire value this kind decodes from.
    pub fn code(&self) -> i64 {
        match self {
            RemoteErrorKind::UserNotFound => 1,
            RemoteErrorKind::PasswordExpired => 2,
            RemoteErrorKind::UnhandledException => 3,
            RemoteErrorKind::ServiceTimeout => 4,
            RemoteErrorKind::DeveloperGenerated => 5,
            RemoteErrorKind::ServerFull => 6,
            RemoteErrorKind::ServiceNotFound => 7,
            RemoteErrorKind::InvalidSession => 8,
            RemoteErrorKind::WrongVersionHigher => 9,
            RemoteErrorKind::WrongVersionLower => 10,
            RemoteErrorKind::NoNetworkConnection => 11,
            RemoteErrorKind::GdprStatementNotAccepted => 12,
            RemoteErrorKind::Unrecognized(code) => *code,
        }
    }

    /// True when the session should be considered dead on the server.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, RemoteErrorKind::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in 1..=12 {
            let kind = RemoteErrorKind::from_code(code);
            assert_eq!(kind.code(), code);
            assert!(!matches!(kind, RemoteErrorKind::Unrecognized(_)));
        }
    }

    #[test]
    fn code_eight_is_invalid_session() {
        let kind = RemoteErrorKind::from_code(8);
        assert_eq!(kind, RemoteErrorKind::InvalidSession);
        assert!(kind.is_session_invalid());
        assert_eq!(kind.to_string(), "invalid session");
    }

    #[test]
    fn out_of_table_code_is_preserved() {
        let kind = RemoteErrorKind::from_code(42);
        assert_eq!(kind, RemoteErrorKind::Unrecognized(42));
        assert_eq!(kind.code(), 42);
        assert_eq!(kind.to_string(), "unrecognized error code 42");
    }
}
