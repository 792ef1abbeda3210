//! Subject listing selectors and the query value object.

use crate::curriculum::Curriculum;
use crate::term::Term;
use serde::Serialize;

/// How a subject relates to the student's curriculum.
///
/// The remote `SubjectType` field expects the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relevance {
    Curriculum,
    Elective,
    Unrelated,
}

impl Relevance {
    /// Wire value of the `SubjectType` field.
    pub fn code(&self) -> i64 {
        match self {
            Relevance::Curriculum => 0,
            Relevance::Elective => 1,
            Relevance::Unrelated => 2,
        }
    }
}

/// Server-side sort order for subject listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire value of the `SubjectSortEnum` field.
    pub fn code(&self) -> i64 {
        match self {
            SortOrder::Ascending => 0,
            SortOrder::Descending => 1,
        }
    }
}

/// Relevance selector of a subject query.
///
/// `Any` issues one query per listed relevance and presents the results
/// as a single sequence; the default covers all three, matching the
/// service's own notion of "everything offered this term". `Taken` is a
/// separate listing over a taken-kind term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevanceFilter {
    One(Relevance),
    Any(Vec<Relevance>),
    Taken,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        RelevanceFilter::Any(vec![
            Relevance::Curriculum,
            Relevance::Elective,
            Relevance::Unrelated,
        ])
    }
}

impl From<Relevance> for RelevanceFilter {
    fn from(relevance: Relevance) -> Self {
        RelevanceFilter::One(relevance)
    }
}

impl From<Vec<Relevance>> for RelevanceFilter {
    fn from(relevances: Vec<Relevance>) -> Self {
        RelevanceFilter::Any(relevances)
    }
}

/// Parameters of a subject listing.
///
/// Built with `with_*` methods from a term; unset filters are simply not
/// sent. Which term kinds are valid depends on the relevance selector
/// and is checked when the query is issued, before any network call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectQuery {
    pub term: Term,
    pub relevance: RelevanceFilter,
    pub sort: SortOrder,
    pub name: Option<String>,
    pub code: Option<String>,
    pub lecturer: Option<String>,
    pub course_code: Option<String>,
    pub curriculum: Option<Curriculum>,
}

impl SubjectQuery {
    /// A query over `term` with the default relevance set and sort order.
    pub fn for_term(term: Term) -> Self {
        Self {
            term,
            relevance: RelevanceFilter::default(),
            sort: SortOrder::default(),
            name: None,
            code: None,
            lecturer: None,
            course_code: None,
            curriculum: None,
        }
    }

    pub fn with_relevance(mut self, relevance: impl Into<RelevanceFilter>) -> Self {
        self.relevance = relevance.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_lecturer(mut self, lecturer: impl Into<String>) -> Self {
        self.lecturer = Some(lecturer.into());
        self
    }

    pub fn with_course_code(mut self, course_code: impl Into<String>) -> Self {
        self.course_code = Some(course_code.into());
        self
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = Some(curriculum);
        self
    }

    pub fn sorted(mut self, order: SortOrder) -> Self {
        self.sort = order;
        self
    }
}
