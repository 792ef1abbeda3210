//! Session management for the mobile service.
//!
//! A [`Session`] owns the login credentials, the resolved display
//! language and the active training context, and stamps them into every
//! request body. Queries that page hand out cursors; everything else
//! returns decoded entities directly.

use crate::mobile::endpoint::{HttpEndpoint, Transport};
use crate::mobile::envelope::{
    MOBILE_SERVICE_VERSION, MOBILE_VERSION, RequestEnvelope, ResponseEnvelope, call,
};
use crate::mobile::paging::EnvelopePageSource;
use crate::mobile::wire::{
    CurriculumRecord, PeriodTermRecord, SubjectRecord, TermValueRecord, TrainingRecord,
};
use neptun_application::{BoxCursor, EmptyCursor, PageCursor, QueryCursor, QueryError};
use neptun_domain::{
    Curriculum, Institution, KnownLanguage, Relevance, RelevanceFilter, Subject, SubjectQuery,
    Term, TermKind, Training,
};
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Login credentials: the student's own code and password.
#[derive(Clone)]
pub struct Credentials {
    pub user_login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_login: user_login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_login", &self.user_login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated conversation with one institution's service.
///
/// Lifecycle: construct unauthenticated, [`login`](Session::login) to
/// adopt the first training and initialize, then query;
/// [`logout`](Session::logout) consumes the session, so a signed-out
/// session cannot be reused by construction.
pub struct Session {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    language: KnownLanguage,
    /// Code the server echoed back, when it differs from what we send.
    assigned_code: Option<String>,
    training: Option<Training>,
    initialized: bool,
}

impl Session {
    /// A session over an already-built transport. Most callers want
    /// [`Session::connect`] instead.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        language: KnownLanguage,
    ) -> Self {
        Self {
            transport,
            credentials,
            language,
            assigned_code: None,
            training: None,
            initialized: false,
        }
    }

    /// Connect to a discovered institution and log in.
    pub async fn connect(
        institution: &Institution,
        credentials: Credentials,
        language: KnownLanguage,
    ) -> Result<Self, QueryError> {
        let url = institution
            .url
            .as_deref()
            .filter(|_| institution.is_compatible())
            .ok_or_else(|| {
                QueryError::argument(format!(
                    "institution {:?} has no compatible mobile service",
                    institution.name
                ))
            })?;

        let mut session = Self::new(
            Arc::new(HttpEndpoint::new(url)),
            credentials,
            language,
        );
        session.login().await?;
        Ok(session)
    }

    /// The active training context, once logged in.
    pub fn training(&self) -> Option<&Training> {
        self.training.as_ref()
    }

    /// Switch the active training for all subsequent calls.
    pub fn select_training(&mut self, training: Training) {
        self.training = Some(training);
    }

    pub fn language(&self) -> KnownLanguage {
        self.language
    }

    /// Fetch the training list, adopt the first entry as the active
    /// training and mark the session initialized. Rejected credentials
    /// surface as the remote error the server reports (user not found,
    /// password expired, ...).
    pub async fn login(&mut self) -> Result<(), QueryError> {
        let response = self.call_op("GetTrainings", Map::new(), None).await?;

        if let Some(code) = response.neptun_code.clone() {
            if self.assigned_code.as_deref() != Some(&code) {
                debug!(%code, "server assigned a neptun code");
            }
            self.assigned_code = Some(code);
        }

        let trainings: Vec<TrainingRecord> = response
            .decode_list("TrainingList")
            .map_err(QueryError::from)?;
        self.training = trainings.into_iter().next().map(Training::from);
        self.initialized = true;

        info!(training = ?self.training.as_ref().map(|t| &t.code), "logged in");
        Ok(())
    }

    /// Invalidate the server-side session. Consumes the session.
    pub async fn logout(self) -> Result<(), QueryError> {
        self.call_op("SignOut", Map::new(), None).await?;
        info!("signed out");
        Ok(())
    }

    /// All trainings of the student.
    pub async fn trainings(&self) -> Result<Vec<Training>, QueryError> {
        let response = self.call_op("GetTrainings", Map::new(), None).await?;
        let records: Vec<TrainingRecord> = response
            .decode_list("TrainingList")
            .map_err(QueryError::from)?;
        Ok(records.into_iter().map(Training::from).collect())
    }

    /// Terms of the given kind, under the active or overridden
    /// training.
    pub async fn terms(
        &self,
        kind: TermKind,
        training: Option<&Training>,
    ) -> Result<Vec<Term>, QueryError> {
        let mut extra = Map::new();
        if let Some(value) = kind.terms_enum_value() {
            extra.insert("Terms".to_string(), json!(value));
        }

        let response = self.call_op(kind.api_path(), extra, training).await?;

        if kind.has_value() {
            let records: Vec<TermValueRecord> = response
                .decode_list(kind.item_key())
                .map_err(QueryError::from)?;
            Ok(records
                .into_iter()
                .map(|record| record.into_term(kind))
                .collect())
        } else {
            let records: Vec<PeriodTermRecord> = response
                .decode_list(kind.item_key())
                .map_err(QueryError::from)?;
            Ok(records.into_iter().map(PeriodTermRecord::into_term).collect())
        }
    }

    /// Curriculums available for a term under one relevance.
    pub async fn curriculums(
        &self,
        term: &Term,
        relevance: Relevance,
        training: Option<&Training>,
    ) -> Result<Vec<Curriculum>, QueryError> {
        let mut extra = Map::new();
        extra.insert("TermID".to_string(), json!(term.id));
        extra.insert("SubjectType".to_string(), json!(relevance.code()));

        let response = self.call_op("GetCurriculums", extra, training).await?;
        let records: Vec<CurriculumRecord> = response
            .decode_list("CurriculumList")
            .map_err(QueryError::from)?;
        Ok(records.into_iter().map(Curriculum::from).collect())
    }

    /// Build the subject listing cursor for `query`.
    ///
    /// No network is touched here: argument checks happen up front and
    /// the cursor fetches lazily. A relevance set becomes one query per
    /// element, folded left-to-right into a single sequence over the
    /// empty cursor — unrelated listings are expensive server-side, so
    /// callers ask for exactly the subset they need and still get one
    /// uniform cursor back.
    pub fn subjects(
        &self,
        query: &SubjectQuery,
        training: Option<&Training>,
    ) -> Result<BoxCursor<Subject>, QueryError> {
        match &query.relevance {
            RelevanceFilter::Taken => {
                if query.term.kind.is_taken() {
                    Err(QueryError::not_implemented(
                        "listing taken subjects is not supported by this client yet",
                    ))
                } else {
                    Err(QueryError::argument(
                        "listing taken subjects accepts only taken-kind terms",
                    ))
                }
            }
            RelevanceFilter::Any(relevances) => {
                if !query.term.kind.is_register() {
                    return Err(QueryError::argument(
                        "a relevance set accepts only register-kind terms",
                    ));
                }
                let mut cursor: BoxCursor<Subject> = Box::new(EmptyCursor::new());
                for &relevance in relevances {
                    cursor = cursor.concat(self.relevance_cursor(query, relevance, training));
                }
                Ok(cursor)
            }
            RelevanceFilter::One(relevance) => {
                if !query.term.kind.is_register() {
                    return Err(QueryError::argument(
                        "curriculum, elective and unrelated listings require a register-kind term",
                    ));
                }
                Ok(self.relevance_cursor(query, *relevance, training))
            }
        }
    }

    /// One single-relevance subject cursor.
    fn relevance_cursor(
        &self,
        query: &SubjectQuery,
        relevance: Relevance,
        training: Option<&Training>,
    ) -> BoxCursor<Subject> {
        let mut extra = Map::new();
        extra.insert("SubjectSortEnum".to_string(), json!(query.sort.code()));
        extra.insert(
            "filter".to_string(),
            json!({
                "CourseCode": query.course_code,
                "CourseTutor": query.lecturer,
                "CurriculumID": query.curriculum.as_ref().map(|c| c.id),
                "SubjectCode": query.code,
                "SubjectName": query.name,
                "SubjectType": relevance.code(),
                "TermID": query.term.id,
            }),
        );

        let source = EnvelopePageSource::<Subject, SubjectRecord>::new(
            Arc::clone(&self.transport),
            "GetSubjects",
            "SubjectList",
            self.base_envelope(training).with_extra(extra),
        );
        Box::new(QueryCursor::new(Box::new(source)))
    }

    /// The body template every call starts from.
    fn base_envelope(&self, training: Option<&Training>) -> RequestEnvelope {
        RequestEnvelope {
            user_login: self.credentials.user_login.clone(),
            password: self.credentials.password.clone(),
            neptun_code: self.assigned_code.clone(),
            lcid: self.language.lcid(),
            student_training_id: training.or(self.training.as_ref()).map(|t| t.id),
            current_page: 0,
            total_row_count: -1,
            only_login: false,
            mobile_version: MOBILE_VERSION,
            mobile_service_version: MOBILE_SERVICE_VERSION,
            error_message: None,
            exceptions_enum: 0,
            extra: Map::new(),
        }
    }

    async fn call_op(
        &self,
        path: &str,
        extra: Map<String, Value>,
        training: Option<&Training>,
    ) -> Result<ResponseEnvelope, QueryError> {
        if !self.initialized && path != "GetTrainings" {
            warn!(path, "issuing a call on a session that never logged in");
        }
        let envelope = self.base_envelope(training).with_extra(extra);
        call(self.transport.as_ref(), path, &envelope)
            .await
            .map_err(QueryError::from)
    }
}
