//! Adapter for the Neptun mobile web service.
//!
//! Layering, bottom up: [`endpoint`] owns the cookie jar and raw JSON
//! POSTs; [`envelope`] wraps calls in the fixed request/response field
//! set and decodes the remote status; [`paging`] exposes one paginated
//! operation as a page source the application layer's cursors can pull
//! from; [`session`] owns credentials and the active training context
//! and builds the per-call request bodies.

pub mod discovery;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod paging;
pub mod session;
pub mod wire;
