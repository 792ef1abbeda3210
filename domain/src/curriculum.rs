//! Curriculum entity.

use serde::Serialize;

/// A curriculum template subjects can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Curriculum {
    pub id: i64,
    pub name: String,
}
