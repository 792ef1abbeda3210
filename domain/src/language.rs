//! Display languages of the Neptun mobile service.
//!
//! The service localizes responses based on a Windows locale id (`LCID`)
//! sent with every request. Only three locales are actually deployed;
//! institutions may still advertise other language codes, which are kept
//! as opaque values.

use serde::Serialize;
use std::fmt;

/// A language the mobile service can localize into.
///
/// Carries the locale id the envelope protocol expects in its `LCID`
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KnownLanguage {
    Hungarian,
    English,
    German,
}

impl KnownLanguage {
    /// The Windows locale id sent on the wire.
    pub fn lcid(&self) -> i64 {
        match self {
            KnownLanguage::Hungarian => 1038,
            KnownLanguage::English => 1033,
            KnownLanguage::German => 1031,
        }
    }

    /// Two-character language code as used in institution records.
    pub fn code(&self) -> &'static str {
        match self {
            KnownLanguage::Hungarian => "hu",
            KnownLanguage::English => "en",
            KnownLanguage::German => "de",
        }
    }

    /// The language's own name for itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            KnownLanguage::Hungarian => "Magyar",
            KnownLanguage::English => "English",
            KnownLanguage::German => "Deutsch",
        }
    }

    /// Parse a two-character code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "hu" => Some(KnownLanguage::Hungarian),
            "en" => Some(KnownLanguage::English),
            "de" => Some(KnownLanguage::German),
            _ => None,
        }
    }
}

impl fmt::Display for KnownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A language advertised by an institution.
///
/// Not every advertised code maps to a deployed locale; unknown codes
/// are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Language {
    Known(KnownLanguage),
    Other(String),
}

impl Language {
    /// Parse a two-character code, falling back to [`Language::Other`].
    pub fn from_code(code: &str) -> Self {
        match KnownLanguage::from_code(code) {
            Some(known) => Language::Known(known),
            None => Language::Other(code.to_string()),
        }
    }

    /// The two-character code.
    pub fn code(&self) -> &str {
        match self {
            Language::Known(known) => known.code(),
            Language::Other(code) => code,
        }
    }

    /// The locale, if this is a deployed language.
    pub fn known(&self) -> Option<KnownLanguage> {
        match self {
            Language::Known(known) => Some(*known),
            Language::Other(_) => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcid_table() {
        assert_eq!(KnownLanguage::Hungarian.lcid(), 1038);
        assert_eq!(KnownLanguage::English.lcid(), 1033);
        assert_eq!(KnownLanguage::German.lcid(), 1031);
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(KnownLanguage::from_code("HU"), Some(KnownLanguage::Hungarian));
        assert_eq!(KnownLanguage::from_code("En"), Some(KnownLanguage::English));
        assert_eq!(KnownLanguage::from_code("fr"), None);
    }

    #[test]
    fn unknown_code_is_preserved() {
        let lang = Language::from_code("sk");
        assert_eq!(lang, Language::Other("sk".to_string()));
        assert_eq!(lang.code(), "sk");
        assert_eq!(lang.known(), None);
    }

    #[test]
    fn known_code_resolves() {
        let lang = Language::from_code("de");
        assert_eq!(lang.known(), Some(KnownLanguage::German));
        assert_eq!(lang.to_string(), "de");
    }
}
