//! Configuration file schema.

use serde::{Deserialize, Serialize};

/// Top-level configuration, merged from defaults, config files and
/// `NEPTUN_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub institution: InstitutionConfig,
    pub login: LoginConfig,
    pub discovery: DiscoveryConfig,
}

/// Which institution to talk to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstitutionConfig {
    /// Case-insensitive substring matched against institution names
    /// and service URLs.
    pub name: Option<String>,
}

/// Login details. The password belongs in `NEPTUN_LOGIN_PASSWORD`, not
/// in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    /// Two-character display language code.
    pub language: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            language: "hu".to_string(),
        }
    }
}

/// Override for the central discovery service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_credentials_unset() {
        let config = FileConfig::default();
        assert_eq!(config.login.user, None);
        assert_eq!(config.login.password, None);
        assert_eq!(config.login.language, "hu");
        assert_eq!(config.discovery.url, None);
    }
}
