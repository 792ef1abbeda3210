//! Infrastructure layer for neptun-rs
//!
//! This crate contains the wire-facing adapters: the cookie-carrying
//! HTTP transport, the envelope protocol encode/decode, the
//! envelope-backed page source implementing the application layer's
//! port, the session object model, institution discovery, and
//! configuration file loading for the CLI.

pub mod config;
pub mod mobile;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use mobile::{
    discovery::{DISCOVERY_URL, list_institutions, list_institutions_with, privacy_statement_url},
    endpoint::{CookieJar, HttpEndpoint, Transport},
    envelope::{MOBILE_SERVICE_VERSION, MOBILE_VERSION, RequestEnvelope, ResponseEnvelope},
    error::ServiceError,
    paging::EnvelopePageSource,
    session::{Credentials, Session},
};
