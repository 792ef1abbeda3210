//! Wire records of the mobile service and their mapping onto domain
//! entities.
//!
//! The remote payload uses its own field names and encodings; each
//! record here mirrors one payload shape exactly and converts into the
//! stable domain type. Nothing outside this module needs to know the
//! remote names.

use neptun_domain::{Curriculum, Institution, Language, Subject, Term, TermKind, Training};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingRecord {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Id")]
    pub id: i64,
}

impl From<TrainingRecord> for Training {
    fn from(record: TrainingRecord) -> Self {
        Training {
            id: record.id,
            code: record.code,
            description: record.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurriculumRecord {
    #[serde(rename = "CurriculumName")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: i64,
}

impl From<CurriculumRecord> for Curriculum {
    fn from(record: CurriculumRecord) -> Self {
        Curriculum {
            id: record.id,
            name: record.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRecord {
    #[serde(rename = "SubjectId")]
    pub id: i64,
    #[serde(rename = "SubjectName")]
    pub name: String,
    #[serde(rename = "SubjectCode")]
    pub code: String,
    #[serde(rename = "IsOnSubject", default)]
    pub is_on_subject: bool,
    #[serde(rename = "Completed", default)]
    pub completed: bool,
    #[serde(rename = "Credit", default)]
    pub credit: f64,
    #[serde(rename = "SubjectRequirement", default)]
    pub requirement: String,
    #[serde(rename = "TermID", default)]
    pub term_id: i64,
    #[serde(rename = "CurriculumTemplateID", default)]
    pub curriculum_template_id: Option<i64>,
}

/// Split the `"<assessment> (<grades>)"` requirement string. Falls back
/// to no assessment type and the service-wide default of 5 grades.
fn split_requirement(raw: &str) -> (Option<String>, u32) {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"^(.*) \((\d+)\)$").expect("requirement pattern"));

    match pattern.captures(raw) {
        Some(captures) => {
            let assessment = captures[1].to_string();
            let grades = captures[2].parse().unwrap_or(5);
            (Some(assessment), grades)
        }
        None => (None, 5),
    }
}

impl From<SubjectRecord> for Subject {
    fn from(record: SubjectRecord) -> Self {
        let (assessment, grade_count) = split_requirement(&record.requirement);
        Subject {
            id: record.id,
            name: record.name,
            code: record.code,
            taken: record.is_on_subject,
            completed: record.completed,
            credit: record.credit,
            assessment,
            grade_count,
            term_id: record.term_id,
            curriculum_template_id: record.curriculum_template_id,
        }
    }
}

/// Terms of the `GetTermData`/`GetMarkbookTermData` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TermValueRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: i64,
}

impl TermValueRecord {
    pub fn into_term(self, kind: TermKind) -> Term {
        Term {
            id: self.id,
            name: self.name,
            value: Some(self.value),
            kind,
        }
    }
}

/// Terms of the `GetPeriodTerms` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodTermRecord {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "TermName")]
    pub name: String,
}

impl PeriodTermRecord {
    pub fn into_term(self) -> Term {
        Term {
            id: self.id,
            name: self.name,
            value: None,
            kind: TermKind::Period,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OMCode")]
    pub om_code: String,
    #[serde(rename = "NeptunMobileServiceVersion", default)]
    pub service_version: i64,
    #[serde(rename = "Languages", default)]
    pub languages: String,
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
}

impl From<InstitutionRecord> for Institution {
    fn from(record: InstitutionRecord) -> Self {
        let languages = record
            .languages
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(Language::from_code)
            .collect();
        Institution {
            name: record.name,
            om_code: record.om_code,
            service_version: record.service_version,
            languages,
            url: record.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivacyStatementRecord {
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use neptun_domain::KnownLanguage;
    use serde_json::json;

    #[test]
    fn subject_record_maps_and_splits_the_requirement() {
        let record: SubjectRecord = serde_json::from_value(json!({
            "Completed": false,
            "Credit": 5.0,
            "CurriculumTemplateID": 31,
            "CurriculumTemplatelineID": null,
            "IsOnSubject": true,
            "SubjectCode": "IP-18KVSZAM",
            "SubjectId": 4242,
            "SubjectName": "Számítógépes alapismeretek",
            "SubjectRequirement": "Vizsga (5)",
            "SubjectSignupType": "Normál",
            "TermID": 11,
        }))
        .unwrap();

        let subject = Subject::from(record);
        assert_eq!(subject.id, 4242);
        assert_eq!(subject.code, "IP-18KVSZAM");
        assert!(subject.taken);
        assert_eq!(subject.assessment.as_deref(), Some("Vizsga"));
        assert_eq!(subject.grade_count, 5);
        assert_eq!(subject.curriculum_template_id, Some(31));
    }

    #[test]
    fn unparsable_requirement_defaults_to_five_grades() {
        assert_eq!(split_requirement("Gyakorlati jegy (3)"), (Some("Gyakorlati jegy".to_string()), 3));
        assert_eq!(split_requirement("Aláírás"), (None, 5));
        assert_eq!(split_requirement(""), (None, 5));
    }

    #[test]
    fn term_records_map_by_shape() {
        let with_value: TermValueRecord = serde_json::from_value(json!({
            "ID": 11, "Name": "2026/27/1", "Value": 3,
        }))
        .unwrap();
        let term = with_value.into_term(TermKind::RegisterSubject);
        assert_eq!(term.value, Some(3));
        assert_eq!(term.kind, TermKind::RegisterSubject);

        let period: PeriodTermRecord = serde_json::from_value(json!({
            "Id": 4, "TermName": "2025/26/2",
        }))
        .unwrap();
        let term = period.into_term();
        assert_eq!(term.value, None);
        assert_eq!(term.kind, TermKind::Period);
    }

    #[test]
    fn institution_record_parses_its_language_list() {
        let record: InstitutionRecord = serde_json::from_value(json!({
            "Languages": "hu,en, de,sk",
            "Name": "Eötvös Loránd Tudományegyetem",
            "NeptunMobileServiceVersion": 0,
            "OMCode": "FI80798",
            "Url": "https://neptun.elte.hu/Service.svc",
        }))
        .unwrap();

        let institution = Institution::from(record);
        assert!(institution.is_compatible());
        assert_eq!(institution.languages.len(), 4);
        assert_eq!(
            institution.languages[0].known(),
            Some(KnownLanguage::Hungarian)
        );
        assert_eq!(institution.languages[3].known(), None);
    }

    #[test]
    fn training_record_maps_field_names() {
        let record: TrainingRecord = serde_json::from_value(json!({
            "Code": "BSC-INF",
            "Description": "Programtervező informatikus BSc",
            "Id": 7,
        }))
        .unwrap();
        let training = Training::from(record);
        assert_eq!(training.id, 7);
        assert_eq!(training.code, "BSC-INF");
    }
}
