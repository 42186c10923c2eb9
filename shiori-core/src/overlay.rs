//! Multi-word vocabulary overlay
//!
//! Known multi-word terms are matched against the word tokens of a stream and
//! recorded as non-overlapping groups. Tokens keep their single-word identity;
//! groups are layered on top.

use crate::language::{InternalRules, LanguageProfile, Tokenization};
use crate::stream::{TextItem, TokenStream};
use crate::tokenizer::InternalWordTokenizer;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a vocabulary term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vocabulary term as a lowercase word sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiWordTerm {
    id: TermId,
    words: Vec<String>,
}

impl MultiWordTerm {
    /// Create a term; words are lowercased
    pub fn new<I, S>(id: TermId, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id,
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn id(&self) -> TermId {
        self.id
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    fn matches(&self, window: &[TextItem]) -> bool {
        window.len() == self.words.len()
            && window
                .iter()
                .zip(&self.words)
                .all(|(item, word)| item.is_word && item.lowercase == *word)
    }
}

/// Frozen, pre-sorted set of multi-word terms
///
/// Terms with fewer than two words are dropped. The remaining terms are ordered
/// by descending word count, then ascending id, and indexed by first word.
#[derive(Debug, Clone, Default)]
pub struct VocabularySnapshot {
    terms: Vec<MultiWordTerm>,
    by_first_word: HashMap<String, SmallVec<[usize; 4]>>,
}

impl VocabularySnapshot {
    /// Build a snapshot from terms
    pub fn new<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = MultiWordTerm>,
    {
        let mut terms: Vec<MultiWordTerm> = terms
            .into_iter()
            .filter(|term| term.word_count() >= 2)
            .collect();
        terms.sort_by(|a, b| {
            b.word_count()
                .cmp(&a.word_count())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut by_first_word: HashMap<String, SmallVec<[usize; 4]>> = HashMap::new();
        for (idx, term) in terms.iter().enumerate() {
            by_first_word
                .entry(term.words[0].clone())
                .or_default()
                .push(idx);
        }

        Self {
            terms,
            by_first_word,
        }
    }

    /// Build a snapshot from raw expressions, splitting them into words with the
    /// profile's character-class rules
    ///
    /// Profiles backed by an external parser only get maximal word runs here,
    /// so unspaced expressions stay single words; the engine's pipeline
    /// segments them through the parser instead.
    pub fn from_expressions<I, S>(profile: &LanguageProfile, expressions: I) -> Self
    where
        I: IntoIterator<Item = (TermId, S)>,
        S: AsRef<str>,
    {
        let rules = match profile.tokenization() {
            Tokenization::Internal(rules) => *rules,
            Tokenization::External(_) => InternalRules::default(),
        };
        let tokenizer = InternalWordTokenizer::new(profile.word_chars(), rules);

        Self::new(expressions.into_iter().map(|(id, expression)| {
            let words = tokenizer
                .tokenize(expression.as_ref())
                .into_iter()
                .filter(|token| token.is_word)
                .map(|token| token.lowercase);
            MultiWordTerm::new(id, words)
        }))
    }

    /// Terms in match priority order
    pub fn terms(&self) -> &[MultiWordTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn candidates(&self, first_word: &str) -> impl Iterator<Item = &MultiWordTerm> {
        self.by_first_word
            .get(first_word)
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&idx| &self.terms[idx]))
    }
}

/// A matched multi-word term, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultiWordGroup {
    pub start_order: usize,
    pub end_order: usize,
    pub term_id: TermId,
}

impl MultiWordGroup {
    /// Whether the group covers the token with the given order
    pub fn contains(&self, order: usize) -> bool {
        (self.start_order..=self.end_order).contains(&order)
    }

    /// Number of tokens covered
    pub fn token_count(&self) -> usize {
        self.end_order - self.start_order + 1
    }
}

/// Greedy longest-match overlay over a frozen snapshot
#[derive(Debug, Clone, Copy)]
pub struct MultiWordOverlay<'v> {
    snapshot: &'v VocabularySnapshot,
}

impl<'v> MultiWordOverlay<'v> {
    pub fn new(snapshot: &'v VocabularySnapshot) -> Self {
        Self { snapshot }
    }

    /// Scan the stream left to right and return the groups in order
    ///
    /// A group never spans a non-word token or a sentence boundary. Of all
    /// terms matching at a position the longest wins, then the lowest id.
    pub fn apply(&self, stream: &TokenStream) -> Vec<MultiWordGroup> {
        let mut groups = Vec::new();
        if self.snapshot.is_empty() {
            return groups;
        }

        let items = stream.items();
        let mut pos = 0;
        while pos < items.len() {
            let first = &items[pos];
            if !first.is_word {
                pos += 1;
                continue;
            }

            let matched = self.snapshot.candidates(&first.lowercase).find(|term| {
                let end = pos + term.word_count();
                end <= items.len()
                    && items[end - 1].sentence_id == first.sentence_id
                    && term.matches(&items[pos..end])
            });

            match matched {
                Some(term) => {
                    let end_order = pos + term.word_count() - 1;
                    groups.push(MultiWordGroup {
                        start_order: items[pos].order,
                        end_order: items[end_order].order,
                        term_id: term.id(),
                    });
                    pos = end_order + 1;
                }
                None => pos += 1,
            }
        }

        log::debug!(
            "overlay matched {} groups over {} tokens",
            groups.len(),
            items.len()
        );
        groups
    }
}
