//! Vocabulary file reading
//!
//! One expression per line, optionally prefixed with a numeric term id and a
//! tab. Lines without an id are numbered by their line number. Blank lines and
//! `#` comments are skipped.

use crate::error::CliError;
use anyhow::{Context, Result};
use shiori_core::TermId;
use std::path::Path;

/// Parse vocabulary content into `(id, expression)` pairs
pub fn parse_vocabulary(content: &str) -> Result<Vec<(TermId, String)>, CliError> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entry = match line.split_once('\t') {
            Some((id, expression)) => {
                let id = id.trim().parse::<u64>().map_err(|_| CliError::VocabularyError {
                    line: idx + 1,
                    reason: format!("term id '{}' is not a number", id.trim()),
                })?;
                (TermId(id), expression.trim().to_string())
            }
            None => (TermId(idx as u64 + 1), line.to_string()),
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Read a vocabulary file
pub fn read_vocabulary(path: &Path) -> Result<Vec<(TermId, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary: {}", path.display()))?;
    let entries = parse_vocabulary(&content)
        .with_context(|| format!("Invalid vocabulary: {}", path.display()))?;
    log::info!("loaded {} vocabulary expressions", entries.len());
    Ok(entries)
}
