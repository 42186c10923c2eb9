//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Vocabulary file line that could not be read
    VocabularyError {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
    /// Some texts could not be tokenized
    TextsFailed {
        /// Number of failed texts
        failed: usize,
        /// Number of texts in the run
        total: usize,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::VocabularyError { line, reason } => {
                write!(f, "Vocabulary error at line {line}: {reason}")
            }
            CliError::TextsFailed { failed, total } => {
                write!(f, "{failed} of {total} texts could not be tokenized")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("bad threads".to_string()).to_string(),
            "Configuration error: bad threads"
        );
        assert_eq!(
            CliError::VocabularyError {
                line: 4,
                reason: "term id is not a number".to_string()
            }
            .to_string(),
            "Vocabulary error at line 4: term id is not a number"
        );
        assert_eq!(
            CliError::TextsFailed {
                failed: 1,
                total: 3
            }
            .to_string(),
            "1 of 3 texts could not be tokenized"
        );
    }

    #[test]
    fn test_wraps_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("x".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
