//! Layered error types
//!
//! Core errors are wrapped, subprocess failures get their own enum so that
//! callers can tell a broken parser apart from a broken profile.

use shiori_core::CoreError;
use std::time::Duration;
use thiserror::Error;

/// Failure of one external parser invocation
#[derive(Error, Debug)]
pub enum ExternalProcessError {
    /// The binary could not be started
    #[error("failed to spawn parser '{binary}': {source}")]
    Spawn {
        /// Binary as configured
        binary: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process finished unsuccessfully
    #[error("parser '{binary}' {}: {stderr}", describe_exit(.code))]
    Exit {
        /// Binary as configured
        binary: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error, truncated
        stderr: String,
    },

    /// The process did not finish in time and was killed
    #[error("parser '{binary}' timed out after {timeout:?}")]
    Timeout {
        /// Binary as configured
        binary: String,
        /// Configured limit
        timeout: Duration,
    },

    /// Writing input or reading output failed
    #[error("I/O error with parser '{binary}': {source}")]
    Io {
        /// Binary as configured
        binary: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The output could not be turned into tokens
    #[error("malformed output from parser '{binary}': {reason}")]
    MalformedOutput {
        /// Binary as configured
        binary: String,
        /// What was wrong
        reason: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Engine-level errors (Application Layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core error (profile, catalog, dictionary)
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// External parser failure; the text has no tokenization
    #[error("external parser error: {0}")]
    ExternalProcess(#[from] ExternalProcessError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Worker pool could not be created
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl EngineError {
    /// Whether the error came from an external parser
    pub fn is_external(&self) -> bool {
        matches!(self, EngineError::ExternalProcess(_))
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
