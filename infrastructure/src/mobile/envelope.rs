//! Envelope protocol of the mobile service.
//!
//! Every call is a JSON POST whose body carries a fixed set of control
//! fields (credentials, locale, paging, status) next to the
//! call-specific fields, and every response mirrors them back together
//! with an integer status (`ExceptionsEnum`), an optional human-readable
//! message and the query payload.
//!
//! # Protocol Overview
//!
//! - Requests always send `TotalRowCount: -1`, `OnlyLogin: false`,
//!   `ErrorMessage: null` and `ExceptionsEnum: 0`; the server fills the
//!   real values in its response.
//! - `CurrentPage` starts at 0 and is advanced by the pagination layer,
//!   never by callers.
//! - A nonzero response `ExceptionsEnum` decodes through
//!   [`RemoteErrorKind`] and surfaces as
//!   [`ServiceError::Remote`]; the full record is returned unchanged
//!   otherwise.

use crate::mobile::endpoint::Transport;
use crate::mobile::error::{Result, ServiceError};
use neptun_domain::RemoteErrorKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client version marker the service expects.
pub const MOBILE_VERSION: &str = "1.5.2";
/// Service protocol version marker; 0 is the compatible protocol.
pub const MOBILE_SERVICE_VERSION: i64 = 0;

/// The fixed request field set, with call-specific fields flattened in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestEnvelope {
    pub user_login: String,
    pub password: String,
    /// Server-assigned code echoed back once known; `null` until then.
    pub neptun_code: Option<String>,
    #[serde(rename = "LCID")]
    pub lcid: i64,
    #[serde(rename = "StudentTrainingID")]
    pub student_training_id: Option<i64>,
    /// 1-based page number on paginated calls; 0 everywhere else.
    pub current_page: u32,
    /// Always -1 on requests.
    pub total_row_count: i64,
    /// Always false, even on the login call.
    pub only_login: bool,
    pub mobile_version: &'static str,
    pub mobile_service_version: i64,
    /// Always null on requests.
    pub error_message: Option<String>,
    /// Always 0 on requests.
    pub exceptions_enum: i64,
    /// Call-specific fields, merged into the same JSON object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestEnvelope {
    /// Replace the call-specific fields.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub(crate) fn to_body(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|source| ServiceError::Decode {
            context: "request envelope",
            source,
        })
    }
}

/// The mirrored control fields of a response, plus the query payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "ExceptionsEnum", default)]
    pub exceptions_enum: i64,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<String>,
    #[serde(rename = "TotalRowCount", default)]
    pub total_row_count: i64,
    #[serde(rename = "NeptunCode", default)]
    pub neptun_code: Option<String>,
    /// Everything else, including the operation's item list field.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Turn a nonzero status into the remote error it encodes.
    fn into_checked(self) -> Result<Self> {
        if self.exceptions_enum != 0 {
            return Err(ServiceError::Remote {
                kind: RemoteErrorKind::from_code(self.exceptions_enum),
                message: self.error_message.unwrap_or_default(),
            });
        }
        Ok(self)
    }

    /// The payload list under `key`.
    pub fn list(&self, key: &str) -> Result<&Vec<Value>> {
        self.payload
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| ServiceError::MissingField(key.to_string()))
    }

    /// Decode the payload list under `key` into typed records.
    pub fn decode_list<D: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<D>> {
        self.list(key)?
            .iter()
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|source| ServiceError::Decode { context: key, source })
            })
            .collect()
    }
}

/// Issue one envelope call: POST the body, decode the mirror, check the
/// status.
pub(crate) async fn call(
    transport: &dyn Transport,
    path: &str,
    envelope: &RequestEnvelope,
) -> Result<ResponseEnvelope> {
    let body = envelope.to_body()?;
    let value = transport.post(path, &body).await?;
    let decoded: ResponseEnvelope =
        serde_json::from_value(value).map_err(|source| ServiceError::Decode {
            context: "response envelope",
            source,
        })?;
    decoded.into_checked()
}
