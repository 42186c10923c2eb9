//! Configuration types for the engine

use crate::error::{EngineError, Result};
use std::time::Duration;

/// Default limit for one parser invocation
pub const DEFAULT_PARSER_TIMEOUT: Duration = Duration::from_secs(30);

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of worker threads (None = all cores)
    pub threads: Option<usize>,
    /// Time limit for a single parser process
    pub parser_timeout: Duration,
    /// Upper bound on parser processes alive at once
    pub max_concurrent_parsers: usize,
    /// Minimum sentence count before sentences are tokenized in parallel
    pub parallel_sentence_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: None,
            parser_timeout: DEFAULT_PARSER_TIMEOUT,
            max_concurrent_parsers: num_cpus::get(),
            parallel_sentence_threshold: 64,
        }
    }
}

impl EngineConfig {
    /// Start from the defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Single-threaded configuration, one parser process at a time
    pub fn sequential() -> Self {
        Self {
            threads: Some(1),
            max_concurrent_parsers: 1,
            parallel_sentence_threshold: usize::MAX,
            ..Default::default()
        }
    }

    /// Configuration for bulk work: parallelize early
    pub fn fast() -> Self {
        Self {
            parallel_sentence_threshold: 8,
            ..Default::default()
        }
    }

    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Worker threads actually used
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the worker thread count (None = all cores)
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set the per-invocation parser timeout
    pub fn parser_timeout(mut self, timeout: Duration) -> Self {
        self.config.parser_timeout = timeout;
        self
    }

    /// Set the concurrent parser process limit
    pub fn max_concurrent_parsers(mut self, max: usize) -> Self {
        self.config.max_concurrent_parsers = max;
        self
    }

    /// Set the sentence count from which sentences run in parallel
    pub fn parallel_sentence_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_sentence_threshold = threshold;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<EngineConfig> {
        let config = self.config;
        if config.threads == Some(0) {
            return Err(EngineError::Configuration(
                "thread count must be greater than 0".to_string(),
            ));
        }
        if config.max_concurrent_parsers == 0 {
            return Err(EngineError::Configuration(
                "max_concurrent_parsers must be greater than 0".to_string(),
            ));
        }
        if config.parser_timeout.is_zero() {
            return Err(EngineError::Configuration(
                "parser timeout must be greater than 0".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.parser_timeout, DEFAULT_PARSER_TIMEOUT);
        assert!(config.max_concurrent_parsers >= 1);
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn test_builder_validation() {
        assert!(EngineConfig::builder().threads(Some(0)).build().is_err());
        assert!(EngineConfig::builder()
            .max_concurrent_parsers(0)
            .build()
            .is_err());
        assert!(EngineConfig::builder()
            .parser_timeout(Duration::ZERO)
            .build()
            .is_err());

        let config = EngineConfig::builder()
            .threads(Some(2))
            .parser_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        assert_eq!(config.effective_threads(), 2);
        assert_eq!(config.parser_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_presets() {
        let sequential = EngineConfig::sequential();
        assert_eq!(sequential.effective_threads(), 1);
        assert_eq!(sequential.max_concurrent_parsers, 1);
        assert!(
            EngineConfig::fast().parallel_sentence_threshold
                < EngineConfig::balanced().parallel_sentence_threshold
        );
    }
}
