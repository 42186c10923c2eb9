//! Lemma dictionary lookup
//!
//! A dictionary is a TSV file of `word_form<TAB>lemma` lines. Blank lines and
//! lines starting with `#` are skipped. Forms are case-folded on load and
//! looked up with a token's lowercase form.

use crate::error::{CoreError, Result};
use crate::stream::TokenStream;
use std::collections::HashMap;
use std::path::Path;

/// Word form to lemma mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaDictionary {
    entries: HashMap<String, String>,
}

impl LemmaDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TSV content
    ///
    /// A line without a tab, or with an empty form or lemma, is rejected with
    /// its 1-based line number. Later duplicates replace earlier ones.
    pub fn from_tsv_str(content: &str) -> Result<Self> {
        let mut dictionary = Self::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let (form, lemma) = line.split_once('\t').ok_or_else(|| CoreError::LemmaDictionary {
                line: idx + 1,
                reason: "missing tab separator".to_string(),
            })?;
            let (form, lemma) = (form.trim(), lemma.trim());
            if form.is_empty() || lemma.is_empty() {
                return Err(CoreError::LemmaDictionary {
                    line: idx + 1,
                    reason: "empty word form or lemma".to_string(),
                });
            }

            dictionary.insert(form, lemma);
        }

        log::debug!("loaded lemma dictionary with {} entries", dictionary.len());
        Ok(dictionary)
    }

    /// Load a TSV dictionary file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_tsv_str(&content)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.entries.insert(form.to_lowercase(), lemma.to_string());
    }

    /// Lemma of a word form, case-insensitively
    pub fn lookup(&self, form: &str) -> Option<&str> {
        self.entries
            .get(form)
            .or_else(|| self.entries.get(&form.to_lowercase()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill in `lemma` on every word token with an entry
    ///
    /// Returns the number of annotated tokens. Non-word tokens are left alone.
    pub fn annotate(&self, stream: &mut TokenStream) -> usize {
        let mut annotated = 0;
        for item in stream.items_mut().iter_mut().filter(|item| item.is_word) {
            if let Some(lemma) = self.lookup(&item.lowercase) {
                item.lemma = Some(lemma.to_string());
                annotated += 1;
            }
        }
        annotated
    }
}
