//! Application layer for neptun-rs
//!
//! This crate contains the pagination cursor engine and the ports it is
//! driven through. It knows nothing about HTTP or the envelope wire
//! format; the infrastructure layer plugs in by implementing
//! [`ports::page_source::PageSource`].
//!
//! # Core Concepts
//!
//! ## Cursor
//!
//! A cursor is a lazy, forward-only view of a remote item listing. It
//! loads one page per [`PageCursor::load_more`] call, remembers
//! everything it has loaded, and never re-fetches. Cursors compose:
//! concatenation chains two cursors into one logical sequence and the
//! empty cursor is the identity element of that operation, so query
//! subsets can be folded into a single uniform listing.

pub mod pagination;
pub mod ports;

// Re-export commonly used types
pub use pagination::{
    BoxCursor, ConcatCursor, EmptyCursor, Items, PageCursor, QueryCursor, into_stream,
};
pub use ports::page_source::{FetchedPage, PageSource, QueryError};
