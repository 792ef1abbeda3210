//! Institution records returned by the central discovery endpoint.

use crate::language::Language;
use serde::Serialize;

/// A university deployment of the Neptun mobile service.
///
/// Discovered through the unauthenticated institution listing. An
/// institution is usable only when it advertises a service base URL and
/// its service version is the compatible one (0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    pub name: String,
    /// National education registry code of the institution.
    pub om_code: String,
    /// Mobile service version marker; 0 means compatible.
    pub service_version: i64,
    pub languages: Vec<Language>,
    /// Base address of the institution's own service, if deployed.
    pub url: Option<String>,
}

impl Institution {
    /// Whether this client can talk to the institution's service.
    pub fn is_compatible(&self) -> bool {
        self.service_version == 0 && self.url.is_some()
    }
}
