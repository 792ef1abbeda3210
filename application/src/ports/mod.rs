//! Ports (interfaces) for infrastructure adapters.

pub mod page_source;
