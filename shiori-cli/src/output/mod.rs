//! Output formatting module

use anyhow::Result;
use shiori_core::{AnnotatedText, Sentence, TextDirection};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format one tokenized text; `source` names where it came from
    fn format_text(&mut self, source: &str, text: &AnnotatedText) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Render the tokens of one sentence on a line
///
/// Tokens are space separated, multi-word groups are bracketed and lemmas
/// that differ from the word form are appended as `form(lemma)`.
pub fn render_sentence(text: &AnnotatedText, sentence: &Sentence, show_lemmas: bool) -> String {
    let mut parts = Vec::with_capacity(sentence.token_count());

    for item in text.stream.tokens_of(sentence) {
        let mut part = String::new();
        let group = text.group_of(item.order);

        if group.is_some_and(|g| g.start_order == item.order) {
            part.push('[');
        }
        part.push_str(&item.surface);
        if let Some(lemma) = item.lemma.as_deref().filter(|l| show_lemmas && *l != item.lowercase) {
            part.push('(');
            part.push_str(lemma);
            part.push(')');
        }
        if group.is_some_and(|g| g.end_order == item.order) {
            part.push(']');
        }
        parts.push(part);
    }

    parts.join(" ")
}

pub(crate) fn direction_label(direction: TextDirection) -> &'static str {
    match direction {
        TextDirection::Ltr => "ltr",
        TextDirection::Rtl => "rtl",
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use shiori_core::{
        language, tokenize_internal, AnnotatedText, LemmaDictionary, MultiWordOverlay,
        MultiWordTerm, TermId, Tokenization, VocabularySnapshot,
    };

    /// "I gave up ice cream. It was hard." with one group and one lemma
    pub fn sample() -> AnnotatedText {
        let profile = language::builtin("en").unwrap();
        let Tokenization::Internal(rules) = profile.tokenization() else {
            unreachable!()
        };
        let mut stream = tokenize_internal("I gave up ice cream. It was hard.", &profile, *rules);
        LemmaDictionary::from_tsv_str("gave\tgive\n").unwrap().annotate(&mut stream);
        let snapshot = VocabularySnapshot::new([MultiWordTerm::new(TermId(1), ["ice", "cream"])]);
        let groups = MultiWordOverlay::new(&snapshot).apply(&stream);
        AnnotatedText::new(profile.code(), profile.direction(), stream, groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sentence() {
        let text = test_support::sample();
        let first = &text.sentences()[0];
        assert_eq!(
            render_sentence(&text, first, true),
            "I gave(give) up [ice cream] ."
        );
        assert_eq!(
            render_sentence(&text, first, false),
            "I gave up [ice cream] ."
        );
        assert_eq!(
            render_sentence(&text, &text.sentences()[1], true),
            "It was hard ."
        );
    }
}
