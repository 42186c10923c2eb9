//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shiori_engine::{EngineConfig, DEFAULT_PARSER_TIMEOUT};
use std::path::Path;
use std::time::Duration;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Engine settings, with an optional thread count override
    pub fn engine_config(&self, threads: Option<usize>) -> Result<EngineConfig> {
        let perf = &self.performance;
        let threads = threads.or(match perf.worker_threads {
            0 => None,
            n => Some(n),
        });

        let mut builder = EngineConfig::builder()
            .threads(threads)
            .parser_timeout(Duration::from_secs(perf.parser_timeout_secs))
            .parallel_sentence_threshold(perf.parallel_sentence_threshold);
        if perf.max_concurrent_parsers > 0 {
            builder = builder.max_concurrent_parsers(perf.max_concurrent_parsers);
        }

        builder.build().context("Invalid performance settings")
    }
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Language used when none is given on the command line
    pub default_language: String,

    /// Keep going when a text fails
    pub continue_on_error: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            continue_on_error: false,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Show lemmas next to word forms
    pub show_lemmas: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            show_lemmas: true,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,

    /// Parser processes alive at once (0 = one per core)
    pub max_concurrent_parsers: usize,

    /// Subprocess timeout in seconds
    pub parser_timeout_secs: u64,

    /// Sentence count from which a text is tokenized in parallel
    pub parallel_sentence_threshold: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            max_concurrent_parsers: 0,
            parser_timeout_secs: DEFAULT_PARSER_TIMEOUT.as_secs(),
            parallel_sentence_threshold: EngineConfig::default().parallel_sentence_threshold,
        }
    }
}
