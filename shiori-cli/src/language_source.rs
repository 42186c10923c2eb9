//! Language source management for CLI

use anyhow::{Context, Result};
use shiori_core::LanguageProfile;
use shiori_engine::ParserRegistry;
use std::path::PathBuf;

/// Where the language profile comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Built-in profile by code or alias
    BuiltIn(String),
    /// External profile TOML file
    External(PathBuf),
}

impl LanguageSource {
    /// Pick the source from command line options; a config file wins over a code
    pub fn from_args(language: Option<&str>, config: Option<&PathBuf>, default: &str) -> Self {
        match (config, language) {
            (Some(path), _) => LanguageSource::External(path.clone()),
            (None, Some(code)) => LanguageSource::BuiltIn(code.to_string()),
            (None, None) => LanguageSource::BuiltIn(default.to_string()),
        }
    }

    /// Load and compile the profile
    pub fn load(&self, registry: &ParserRegistry) -> Result<LanguageProfile> {
        match self {
            LanguageSource::BuiltIn(code) => registry
                .builtin_profile(code)
                .with_context(|| format!("Failed to load built-in language '{code}'")),
            LanguageSource::External(path) => registry
                .load_profile(path)
                .with_context(|| format!("Failed to load language config: {}", path.display())),
        }
    }

    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(code) => format!("Built-in: {code}"),
            LanguageSource::External(path) => format!("External: {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiori_engine::EngineConfig;

    #[test]
    fn test_config_file_wins() {
        let path = PathBuf::from("lang.toml");
        assert_eq!(
            LanguageSource::from_args(Some("ja"), Some(&path), "en"),
            LanguageSource::External(path)
        );
        assert_eq!(
            LanguageSource::from_args(None, None, "en"),
            LanguageSource::BuiltIn("en".to_string())
        );
    }

    #[test]
    fn test_load_builtin_alias() {
        let registry = ParserRegistry::with_builtin(&EngineConfig::default()).unwrap();
        let profile = LanguageSource::BuiltIn("Arabic".to_string())
            .load(&registry)
            .unwrap();
        assert_eq!(profile.code(), "ar");
        assert!(profile.is_right_to_left());
    }

    #[test]
    fn test_unknown_language() {
        let registry = ParserRegistry::with_builtin(&EngineConfig::default()).unwrap();
        let err = LanguageSource::BuiltIn("klingon".to_string())
            .load(&registry)
            .unwrap_err();
        assert!(err.to_string().contains("klingon"));
        assert_eq!(
            LanguageSource::External(PathBuf::from("x.toml")).display_name(),
            "External: x.toml"
        );
    }
}
