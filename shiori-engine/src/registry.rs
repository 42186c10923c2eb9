//! Parser registry
//!
//! Owns the [`ParserCatalog`], the subprocess timeout and the spawn limiter
//! shared by every adapter it hands out. Built once and passed to the
//! pipeline; there is no process-wide registry.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::external::{ExternalParserAdapter, SpawnLimiter};
use shiori_core::language::{self, ProfileConfig};
use shiori_core::{ExternalParserConfig, LanguageProfile, ParserCatalog};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Named parsers plus the resources needed to run them
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    catalog: ParserCatalog,
    timeout: Duration,
    limiter: Arc<SpawnLimiter>,
}

/// A catalog entry and whether its binary could be found
#[derive(Debug, Clone)]
pub struct ParserAvailability<'a> {
    /// Catalog entry
    pub parser: &'a ExternalParserConfig,
    /// Resolved executable, if found
    pub resolved: Option<PathBuf>,
}

impl ParserRegistry {
    /// Registry over `catalog` using the engine's timeout and spawn limit
    pub fn new(catalog: ParserCatalog, config: &EngineConfig) -> Self {
        Self {
            catalog,
            timeout: config.parser_timeout,
            limiter: Arc::new(SpawnLimiter::new(config.max_concurrent_parsers)),
        }
    }

    /// Registry over the built-in catalog (MeCab, jieba)
    pub fn with_builtin(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(ParserCatalog::builtin()?, config))
    }

    /// The parser catalog
    pub fn catalog(&self) -> &ParserCatalog {
        &self.catalog
    }

    /// Subprocess timeout applied to every adapter
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Shared spawn limiter
    pub fn limiter(&self) -> &Arc<SpawnLimiter> {
        &self.limiter
    }

    /// Adapter for a parser configuration
    pub fn adapter_for(&self, parser: &ExternalParserConfig) -> ExternalParserAdapter {
        ExternalParserAdapter::new(parser.clone(), self.timeout)
            .with_limiter(Arc::clone(&self.limiter))
    }

    /// Adapter for a catalog entry
    pub fn adapter(&self, parser_type: &str) -> Result<ExternalParserAdapter> {
        let parser = self.catalog.get(parser_type).ok_or_else(|| {
            EngineError::Configuration(format!("unknown parser '{parser_type}'"))
        })?;
        Ok(self.adapter_for(parser))
    }

    /// Compile a profile configuration, resolving `use = "..."` parser
    /// references against this registry's catalog
    pub fn resolve_profile(&self, config: &ProfileConfig) -> Result<LanguageProfile> {
        Ok(LanguageProfile::from_config(config, &self.catalog)?)
    }

    /// Load a profile TOML file
    pub fn load_profile(&self, path: &Path) -> Result<LanguageProfile> {
        Ok(LanguageProfile::from_file(path, &self.catalog)?)
    }

    /// Load a built-in profile by code or alias
    pub fn builtin_profile(&self, code: &str) -> Result<LanguageProfile> {
        Ok(language::builtin_with(code, &self.catalog)?)
    }

    /// Every catalog entry with its binary looked up on `PATH`
    pub fn availability(&self) -> Vec<ParserAvailability<'_>> {
        self.catalog
            .iter()
            .map(|parser| ParserAvailability {
                parser,
                resolved: find_executable(parser.binary()),
            })
            .collect()
    }
}

/// Resolve a binary the way a shell would: paths as given, bare names on `PATH`
fn find_executable(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiori_core::{InputMode, OutputFormat, Tokenization};

    fn registry() -> ParserRegistry {
        ParserRegistry::with_builtin(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_adapter_lookup() {
        let registry = registry();
        let adapter = registry.adapter("mecab").unwrap();
        assert_eq!(adapter.config().binary(), "mecab");
        assert_eq!(adapter.timeout(), registry.timeout());

        let err = registry.adapter("nope").unwrap_err();
        assert!(err.to_string().contains("unknown parser 'nope'"));
    }

    #[test]
    fn test_resolve_profile_reference() {
        let mut catalog = ParserCatalog::new();
        catalog.register(
            ExternalParserConfig::new(
                "seg",
                "Segmenter",
                "seg-bin",
                vec![],
                InputMode::File,
                OutputFormat::Line,
            )
            .unwrap(),
        );
        let registry = ParserRegistry::new(catalog, &EngineConfig::default());

        let config: ProfileConfig = toml::from_str(
            r#"
[metadata]
code = "xx"
name = "X"

[words]
chars = "a-z"

[parser]
use = "seg"
"#,
        )
        .unwrap();
        let profile = registry.resolve_profile(&config).unwrap();
        assert!(matches!(profile.tokenization(), Tokenization::External(p) if p.binary() == "seg-bin"));
    }

    #[test]
    fn test_builtin_profile_through_registry() {
        let profile = registry().builtin_profile("zh-jieba").unwrap();
        assert_eq!(profile.parser().unwrap().parser_type(), "jieba");
    }

    #[test]
    fn test_builtin_jieba_segments_chinese() {
        let jieba_installed = std::process::Command::new("python3")
            .args(["-c", "import jieba"])
            .stderr(std::process::Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        if !jieba_installed {
            return;
        }

        let registry = registry();
        let profile = registry.builtin_profile("zh-jieba").unwrap();
        let parser = profile.parser().unwrap();
        let tokens = registry
            .adapter_for(parser)
            .tokenize("我喜欢冰淇淋。", profile.word_chars())
            .unwrap();

        assert!(tokens.len() > 1);
        let rebuilt: String = tokens
            .iter()
            .map(|t| format!("{}{}", t.surface, t.separator))
            .collect();
        assert_eq!(rebuilt, "我喜欢冰淇淋。");
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable() {
        assert!(find_executable("sh").is_some());
        assert!(find_executable("/bin/sh").is_some());
        assert!(find_executable("definitely-not-a-shiori-binary").is_none());
    }

    #[test]
    fn test_limiter_shared_across_adapters() {
        let config = EngineConfig::builder()
            .max_concurrent_parsers(3)
            .build()
            .unwrap();
        let registry = ParserRegistry::with_builtin(&config).unwrap();
        assert_eq!(registry.limiter().max(), 3);
        let _a = registry.adapter("mecab").unwrap();
        let _b = registry.adapter("jieba").unwrap();
        assert_eq!(Arc::strong_count(registry.limiter()), 3);
    }
}
