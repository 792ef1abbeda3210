//! Domain layer for neptun-rs
//!
//! This crate contains the entities and value objects of the Neptun
//! mobile service, free of any transport or serialization-format
//! concerns beyond plain `serde` derives for output formatting.
//!
//! # Core Concepts
//!
//! - **Institution**: a university deployment of the service, found
//!   through the central discovery endpoint.
//! - **Training**: the enrollment context (program/cohort) a student
//!   acts under; selected at login and scoping every later query.
//! - **Term**: a time-scoped query context (registration period, exam
//!   period, ...). Each [`term::TermKind`] carries its remote operation
//!   and payload key as static configuration.
//! - **Relevance**: how a subject listing relates to the student's
//!   curriculum (curriculum-bound, elective, unrelated, or taken).

pub mod curriculum;
pub mod institution;
pub mod language;
pub mod remote_code;
pub mod subject;
pub mod subject_query;
pub mod term;
pub mod training;

// Re-export commonly used types
pub use curriculum::Curriculum;
pub use institution::Institution;
pub use language::{KnownLanguage, Language};
pub use remote_code::RemoteErrorKind;
pub use subject::Subject;
pub use subject_query::{Relevance, RelevanceFilter, SortOrder, SubjectQuery};
pub use term::{Term, TermKind};
pub use training::Training;
