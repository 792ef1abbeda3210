//! Configuration file loading for CLI consumers.

mod file_config;
mod loader;

pub use file_config::{DiscoveryConfig, FileConfig, InstitutionConfig, LoginConfig};
pub use loader::ConfigLoader;
