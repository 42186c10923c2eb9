//! Final pipeline output handed to storage and rendering

use crate::language::TextDirection;
use crate::overlay::MultiWordGroup;
use crate::stream::{Sentence, TextItem, TokenStream};
use serde::Serialize;

/// Token stream with multi-word groups and display direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedText {
    /// Profile code the text was tokenized with
    pub language: String,
    pub direction: TextDirection,
    #[serde(flatten)]
    pub stream: TokenStream,
    pub groups: Vec<MultiWordGroup>,
}

impl AnnotatedText {
    pub fn new(
        language: impl Into<String>,
        direction: TextDirection,
        stream: TokenStream,
        groups: Vec<MultiWordGroup>,
    ) -> Self {
        Self {
            language: language.into(),
            direction,
            stream,
            groups,
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        self.stream.sentences()
    }

    pub fn items(&self) -> &[TextItem] {
        self.stream.items()
    }

    /// Group covering the token with the given order
    pub fn group_of(&self, order: usize) -> Option<&MultiWordGroup> {
        let idx = self.groups.partition_point(|g| g.end_order < order);
        self.groups.get(idx).filter(|g| g.contains(order))
    }

    /// Number of word tokens
    pub fn word_count(&self) -> usize {
        self.stream.words().count()
    }
}
