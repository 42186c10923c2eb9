//! Error types for the core tokenization layer
//!
//! The core layer is pure string and regex processing, so the only runtime
//! failures are configuration problems and lemma dictionary loading.

use thiserror::Error;

/// Core-level errors (Domain Layer)
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid or empty required field, bad regex, unknown enum value
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed line in a lemma dictionary
    #[error("lemma dictionary line {line}: {reason}")]
    LemmaDictionary {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// I/O error while reading a profile, catalog or dictionary
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CoreError::Configuration(msg.into())
    }

    /// Create an error for a required field that was left empty
    pub fn empty_field(field: &str) -> Self {
        CoreError::Configuration(format!("'{field}' must not be empty"))
    }

    /// Whether this error was raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoreError::Configuration(_))
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Configuration(format!("invalid TOML: {err}"))
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
