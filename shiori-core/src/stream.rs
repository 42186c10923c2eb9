//! Globally ordered token stream
//!
//! [`TokenStreamBuilder`] concatenates per-sentence token lists in sentence
//! order and assigns every token one global order. The result is a pure
//! function of its inputs, so re-tokenizing a text with the same profile
//! reproduces the same stream byte for byte.

use crate::language::{InternalRules, LanguageProfile};
use crate::segmenter::{SentenceSegmenter, SentenceSpan};
use crate::tokenizer::{InternalWordTokenizer, RawToken};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Identifier of a sentence within a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SentenceId(pub u32);

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A sentence and the contiguous range of tokens it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub id: SentenceId,
    pub ordinal: usize,
    /// Trimmed sentence text
    pub text: String,
    /// Byte span of `text` in the source
    pub span: Range<usize>,
    /// Global orders of the tokens of this sentence
    pub tokens: Range<usize>,
}

impl Sentence {
    /// Number of tokens in the sentence
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// One token of a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextItem {
    /// Global order, contiguous from 0
    pub order: usize,
    pub sentence_id: SentenceId,
    pub surface: String,
    pub lowercase: String,
    pub is_word: bool,
    /// Whitespace that followed the token in the source
    #[serde(skip_serializing_if = "String::is_empty")]
    pub separator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

/// Sentences plus their tokens in global order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    sentences: Vec<Sentence>,
    items: Vec<TextItem>,
}

impl TokenStream {
    /// All sentences in order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// All tokens in global order
    pub fn items(&self) -> &[TextItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [TextItem] {
        &mut self.items
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stream has no tokens
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Word tokens only
    pub fn words(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter(|item| item.is_word)
    }

    /// Tokens owned by a sentence
    pub fn tokens_of(&self, sentence: &Sentence) -> &[TextItem] {
        &self.items[sentence.tokens.clone()]
    }

    /// The sentence containing the token with the given order
    pub fn sentence_of(&self, order: usize) -> Option<&Sentence> {
        if order >= self.items.len() {
            return None;
        }
        let idx = self.sentences.partition_point(|s| s.tokens.end <= order);
        self.sentences.get(idx)
    }

    /// Tokens within `radius` positions of `order`, clamped to the stream
    pub fn context(&self, order: usize, radius: usize) -> &[TextItem] {
        if order >= self.items.len() {
            return &[];
        }
        let start = order.saturating_sub(radius);
        let end = order.saturating_add(radius).saturating_add(1).min(self.items.len());
        &self.items[start..end]
    }

    /// Concatenate surfaces and separators
    ///
    /// On the internal path with spaces kept this is the trimmed source text.
    pub fn reconstruct_text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            text.push_str(&item.surface);
            text.push_str(&item.separator);
        }
        text
    }

    /// Split into sentences and items
    pub fn into_parts(self) -> (Vec<Sentence>, Vec<TextItem>) {
        (self.sentences, self.items)
    }
}

/// Assembles a [`TokenStream`] from per-sentence token lists
#[derive(Debug)]
pub struct TokenStreamBuilder<'t> {
    source: &'t str,
    keep_separators: bool,
    id_base: u32,
    pending: Vec<(SentenceSpan<'t>, Vec<RawToken>)>,
}

impl<'t> TokenStreamBuilder<'t> {
    /// Builder over the source text the sentences were cut from
    pub fn new(source: &'t str) -> Self {
        Self {
            source,
            keep_separators: true,
            id_base: 0,
            pending: Vec::new(),
        }
    }

    /// Whether inter-sentence whitespace is kept as the separator of each
    /// sentence's last token (default: true)
    pub fn keep_separators(mut self, keep: bool) -> Self {
        self.keep_separators = keep;
        self
    }

    /// First sentence id; later sentences count up from it
    pub fn sentence_id_base(mut self, base: u32) -> Self {
        self.id_base = base;
        self
    }

    /// Append the tokens of the next sentence
    pub fn push_sentence(&mut self, span: SentenceSpan<'t>, tokens: Vec<RawToken>) {
        self.pending.push((span, tokens));
    }

    /// Assign global orders and produce the stream
    pub fn build(self) -> TokenStream {
        let total: usize = self.pending.iter().map(|(_, tokens)| tokens.len()).sum();
        let mut sentences = Vec::with_capacity(self.pending.len());
        let mut items = Vec::with_capacity(total);

        let mut pending = self.pending.into_iter().peekable();
        let mut ordinal = 0usize;
        while let Some((span, tokens)) = pending.next() {
            let id = SentenceId(self.id_base + ordinal as u32);
            let gap = match pending.peek() {
                Some((next, _)) if self.keep_separators => &self.source[span.end..next.start],
                _ => "",
            };

            let first = items.len();
            let count = tokens.len();
            for (i, token) in tokens.into_iter().enumerate() {
                let mut separator = token.separator;
                if i + 1 == count {
                    separator.push_str(gap);
                }
                items.push(TextItem {
                    order: items.len(),
                    sentence_id: id,
                    surface: token.surface,
                    lowercase: token.lowercase,
                    is_word: token.is_word,
                    separator,
                    lemma: None,
                });
            }

            sentences.push(Sentence {
                id,
                ordinal,
                text: span.text.to_string(),
                span: span.span(),
                tokens: first..items.len(),
            });
            ordinal += 1;
        }

        TokenStream { sentences, items }
    }
}

/// Segment and tokenize a text with the character-class tokenizer
pub fn tokenize_internal(text: &str, profile: &LanguageProfile, rules: InternalRules) -> TokenStream {
    let tokenizer = InternalWordTokenizer::new(profile.word_chars(), rules);
    let mut builder = TokenStreamBuilder::new(text).keep_separators(!rules.remove_spaces);
    for span in SentenceSegmenter::new(profile).segment(text) {
        let tokens = tokenizer.tokenize(span.text);
        builder.push_sentence(span, tokens);
    }
    builder.build()
}
