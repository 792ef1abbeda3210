//! Institution discovery.
//!
//! One central deployment lists every institution's mobile service.
//! Discovery is unauthenticated and unenveloped: the listing responds
//! with a bare JSON array rather than the usual control-field mirror.

use crate::mobile::endpoint::{HttpEndpoint, Transport};
use crate::mobile::error::ServiceError;
use crate::mobile::wire::{InstitutionRecord, PrivacyStatementRecord};
use neptun_application::QueryError;
use neptun_domain::Institution;
use serde_json::{Map, Value};
use tracing::debug;

/// The central service that knows every deployment.
pub const DISCOVERY_URL: &str =
    "https://mobilecloudservice.sdainformatika.hu/MobileServiceLib/MobileCloudService.svc";

/// List all institutions from the central discovery service.
pub async fn list_institutions() -> Result<Vec<Institution>, QueryError> {
    list_institutions_with(&HttpEndpoint::new(DISCOVERY_URL)).await
}

/// List all institutions through the given transport.
pub async fn list_institutions_with(
    transport: &dyn Transport,
) -> Result<Vec<Institution>, QueryError> {
    let value = transport
        .post("GetAllNeptunMobileUrls", &Value::Object(Map::new()))
        .await
        .map_err(QueryError::from)?;

    let records: Vec<InstitutionRecord> =
        serde_json::from_value(value).map_err(|source| ServiceError::Decode {
            context: "institution list",
            source,
        })?;

    debug!(count = records.len(), "discovered institutions");
    Ok(records.into_iter().map(Institution::from).collect())
}

/// Fetch an institution's privacy statement URL, if it publishes one.
///
/// Returns `Ok(None)` for institutions without a compatible service.
pub async fn privacy_statement_url(
    institution: &Institution,
) -> Result<Option<String>, QueryError> {
    let Some(url) = institution
        .url
        .as_deref()
        .filter(|_| institution.is_compatible())
    else {
        return Ok(None);
    };

    let endpoint = HttpEndpoint::new(url);
    let value = endpoint
        .post("GetPrivacyStatement", &Value::Null)
        .await
        .map_err(QueryError::from)?;

    let record: PrivacyStatementRecord =
        serde_json::from_value(value).map_err(|source| ServiceError::Decode {
            context: "privacy statement",
            source,
        })?;
    Ok(record.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct OneShotTransport {
        response: Mutex<Option<Value>>,
    }

    #[async_trait]
    impl Transport for OneShotTransport {
        async fn post(&self, _path: &str, _body: &Value) -> Result<Value, ServiceError> {
            self.response
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| ServiceError::MissingField("scripted response".to_string()))
        }
    }

    #[tokio::test]
    async fn discovery_parses_the_bare_array() {
        let transport = OneShotTransport {
            response: Mutex::new(Some(json!([
                {
                    "Languages": "hu,en",
                    "Name": "Eötvös Loránd Tudományegyetem",
                    "NeptunMobileServiceVersion": 0,
                    "OMCode": "FI80798",
                    "Url": "https://neptun.elte.hu/Service.svc",
                },
                {
                    "Languages": "hu",
                    "Name": "Lejárt Egyetem",
                    "NeptunMobileServiceVersion": 2,
                    "OMCode": "FI00000",
                    "Url": null,
                },
            ]))),
        };

        let institutions = list_institutions_with(&transport).await.unwrap();
        assert_eq!(institutions.len(), 2);
        assert!(institutions[0].is_compatible());
        assert!(!institutions[1].is_compatible());
    }

    #[tokio::test]
    async fn discovery_surfaces_decode_failures_as_transport_errors() {
        let transport = OneShotTransport {
            response: Mutex::new(Some(json!({"unexpected": "object"}))),
        };

        let err = list_institutions_with(&transport).await.unwrap_err();
        assert!(matches!(err, QueryError::Transport { .. }));
    }
}
