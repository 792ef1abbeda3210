//! Configuration loader with multi-source merging.

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Loads configuration from all sources with proper priority.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `NEPTUN_*` environment variables (e.g. `NEPTUN_LOGIN_PASSWORD`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./neptun.toml` or `./.neptun.toml`
    /// 4. Global: `~/.config/neptun/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        for filename in &["neptun.toml", ".neptun.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // NEPTUN_LOGIN_USER → login.user, and so on.
        figment = figment.merge(Env::prefixed("NEPTUN_").split("_"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for `--no-config`).
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// The global config file path, under the platform config
    /// directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("neptun").join("config.toml"))
    }
}
