//! Training (enrollment context) entity.

use serde::Serialize;

/// A student's enrollment context: program, cohort and financing form.
///
/// Every authenticated query is scoped to a training; the session adopts
/// the first one returned at login and callers may override per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Training {
    pub id: i64,
    pub code: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trainings_compare_by_value() {
        let a = Training {
            id: 7,
            code: "BSC-INF".to_string(),
            description: "Computer Science BSc".to_string(),
        };
        assert_eq!(a, a.clone());
    }
}
