//! Subject entity.

use serde::Serialize;

/// A subject as returned by the subject listing.
///
/// `assessment` and `grade_count` come pre-split from the remote
/// `SubjectRequirement` string, which encodes both as `"<type> (<n>)"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    /// Whether the student is currently signed up for the subject.
    pub taken: bool,
    pub completed: bool,
    pub credit: f64,
    /// Assessment type, when the requirement string was well formed.
    pub assessment: Option<String>,
    /// Number of grade levels; the service default is 5.
    pub grade_count: u32,
    pub term_id: i64,
    /// Curriculum template the subject belongs to, if any.
    pub curriculum_template_id: Option<i64>,
}
