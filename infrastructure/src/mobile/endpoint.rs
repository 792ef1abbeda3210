//! Cookie jar and HTTP transport.
//!
//! One [`HttpEndpoint`] per institution server. The jar is the only
//! state the transport keeps: cookies accumulate additively across the
//! session's lifetime and are replayed on every request. Responses are
//! never cached.

use crate::mobile::error::ServiceError;
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Accumulated session cookies, name → value.
///
/// Insertion order is irrelevant; a later assignment to the same name
/// overwrites. The jar is never cleared while the endpoint lives.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every cookie assignment out of a `Set-Cookie` header value.
    ///
    /// The service emits one header carrying a comma-separated list of
    /// `name=value[;attributes]` declarations. Attributes are dropped
    /// and malformed entries (no `=` before the first `;`) are ignored.
    pub fn absorb(&mut self, header: &str) {
        for declaration in header.split(',') {
            let pair = match declaration.find(';') {
                Some(end) => &declaration[..end],
                None => declaration,
            }
            .trim();
            let Some(eq) = pair.find('=') else { continue };
            let name = pair[..eq].trim();
            let value = pair[eq + 1..].trim();
            if name.is_empty() {
                continue;
            }
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    /// The `Cookie` header to send back, or `None` while the jar is
    /// empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// JSON POST transport bound to one base address.
///
/// The seam the envelope layer and the session talk through; tests
/// substitute a scripted implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `path` resolved against the base address
    /// and return the decoded response body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ServiceError>;
}

/// The real HTTP transport: reqwest client plus cookie jar.
pub struct HttpEndpoint {
    base: String,
    client: reqwest::Client,
    jar: Mutex<CookieJar>,
}

impl HttpEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            jar: Mutex::new(CookieJar::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Resolve `path` against the base with exactly one separator.
    fn full_url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpEndpoint {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        let url = self.full_url(path);

        let mut request = self.client.post(&url).json(body);
        if let Some(cookie_header) = self.jar.lock().await.header_value() {
            request = request.header(COOKIE, cookie_header);
        }

        trace!(%url, "issuing POST");
        let response = request.send().await?;

        {
            let mut jar = self.jar.lock().await;
            for header in response.headers().get_all(SET_COOKIE) {
                if let Ok(value) = header.to_str() {
                    jar.absorb(value);
                }
            }
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|error| {
            debug!(body = %text, "response body was not valid JSON");
            ServiceError::MalformedBody {
                error: error.to_string(),
                raw: text,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_splits_a_multi_cookie_header() {
        let mut jar = CookieJar::new();
        jar.absorb("ASP.NET_SessionId=abc123; Path=/; HttpOnly, LoadBalancer=node7; Path=/");

        assert_eq!(jar.len(), 2);
        assert_eq!(
            jar.header_value().as_deref(),
            Some("ASP.NET_SessionId=abc123; LoadBalancer=node7")
        );
    }

    #[test]
    fn later_assignment_overwrites_by_name() {
        let mut jar = CookieJar::new();
        jar.absorb("ASP.NET_SessionId=abc123; Path=/, LoadBalancer=node7");
        jar.absorb("ASP.NET_SessionId=def456; Path=/");

        assert_eq!(jar.len(), 2);
        assert_eq!(
            jar.header_value().as_deref(),
            Some("ASP.NET_SessionId=def456; LoadBalancer=node7")
        );
    }

    #[test]
    fn malformed_entries_are_ignored() {
        let mut jar = CookieJar::new();
        // An expiry date splits on its inner comma; the dangling date
        // fragment and the empty-name entry must both be dropped.
        jar.absorb("token=xyz; Expires=Wed, 21 Oct 2026 07:28:00 GMT, =orphan, garbage");

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.header_value().as_deref(), Some("token=xyz"));
    }

    #[test]
    fn empty_jar_sends_no_header() {
        let jar = CookieJar::new();
        assert!(jar.is_empty());
        assert_eq!(jar.header_value(), None);
    }

    #[test]
    fn full_url_uses_exactly_one_separator() {
        let endpoint = HttpEndpoint::new("https://neptun.example.test/Service.svc/");
        assert_eq!(
            endpoint.full_url("GetTrainings"),
            "https://neptun.example.test/Service.svc/GetTrainings"
        );
        assert_eq!(
            endpoint.full_url("/GetTrainings"),
            "https://neptun.example.test/Service.svc/GetTrainings"
        );
    }
}
