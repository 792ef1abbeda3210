//! Term kinds and the term entity.
//!
//! Each term listing lives behind its own remote operation. Instead of a
//! class hierarchy, [`TermKind`] is a closed enum carrying the operation
//! path, the payload key and the `Terms` selector value as static
//! configuration, and every [`Term`] records which kind produced it.

use serde::Serialize;

/// The term listings the service exposes.
///
/// Register kinds enumerate periods a student can still act in (subject
/// or exam sign-up); taken kinds enumerate periods the student already
/// has history in. The markbook listing is a taken-kind variant with its
/// own operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TermKind {
    RegisterSubject,
    RegisterExam,
    TakenSubject,
    TakenExam,
    Period,
    Markbook,
}

impl TermKind {
    /// Remote operation that lists terms of this kind.
    pub fn api_path(&self) -> &'static str {
        match self {
            TermKind::RegisterSubject
            | TermKind::RegisterExam
            | TermKind::TakenSubject
            | TermKind::TakenExam => "GetTermData",
            TermKind::Period => "GetPeriodTerms",
            TermKind::Markbook => "GetMarkbookTermData",
        }
    }

    /// Payload field holding the listed terms.
    pub fn item_key(&self) -> &'static str {
        match self {
            TermKind::Period => "PeriodTermList",
            _ => "Terms",
        }
    }

    /// Value of the request's `Terms` selector, where the operation
    /// takes one (0 = sign-up periods, 1 = casual/history periods).
    pub fn terms_enum_value(&self) -> Option<i64> {
        match self {
            TermKind::RegisterSubject | TermKind::RegisterExam => Some(0),
            TermKind::TakenSubject | TermKind::TakenExam | TermKind::Markbook => Some(1),
            TermKind::Period => None,
        }
    }

    /// Whether terms of this kind carry a `Value` field on the wire.
    pub fn has_value(&self) -> bool {
        !matches!(self, TermKind::Period)
    }

    /// Register-period kinds accepted by curriculum/elective/unrelated
    /// subject listings.
    pub fn is_register(&self) -> bool {
        matches!(self, TermKind::RegisterSubject | TermKind::RegisterExam)
    }

    /// Taken-period kinds accepted by the taken-subject listing.
    pub fn is_taken(&self) -> bool {
        matches!(
            self,
            TermKind::TakenSubject | TermKind::TakenExam | TermKind::Markbook
        )
    }
}

/// A term as returned by one of the term listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub id: i64,
    pub name: String,
    /// Selector value the service expects back for value-bearing kinds.
    pub value: Option<i64>,
    pub kind: TermKind,
}
