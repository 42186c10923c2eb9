//! Character-class word tokenizer
//!
//! Used for every profile whose tokenization is [`Tokenization::Internal`].
//!
//! [`Tokenization::Internal`]: crate::language::Tokenization::Internal

use crate::language::{CharClass, InternalRules};

/// A token before it receives a global order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub surface: String,
    pub lowercase: String,
    pub is_word: bool,
    /// Whitespace that followed the token in the source
    pub separator: String,
}

impl RawToken {
    /// A word token; its lowercase form is the codepoint-level lowercase mapping
    pub fn word(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        Self {
            lowercase: surface.to_lowercase(),
            surface,
            is_word: true,
            separator: String::new(),
        }
    }

    /// A non-word token (punctuation, digits, symbols)
    pub fn non_word(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        Self {
            lowercase: surface.clone(),
            surface,
            is_word: false,
            separator: String::new(),
        }
    }

    /// Set the trailing separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Splits one sentence into word and non-word tokens
#[derive(Debug, Clone, Copy)]
pub struct InternalWordTokenizer<'p> {
    word_chars: &'p CharClass,
    rules: InternalRules,
}

impl<'p> InternalWordTokenizer<'p> {
    pub fn new(word_chars: &'p CharClass, rules: InternalRules) -> Self {
        Self { word_chars, rules }
    }

    /// Tokenize a sentence
    ///
    /// Whitespace never becomes a token. It is attached to the preceding token
    /// as its separator, or dropped when `remove_spaces` is set.
    pub fn tokenize(&self, sentence: &str) -> Vec<RawToken> {
        let mut tokens = Vec::new();
        let mut cursor = 0;

        let words = if self.rules.split_each_char {
            self.word_chars.chars(sentence)
        } else {
            self.word_chars.runs(sentence)
        };

        for word in words {
            self.push_gap(&sentence[cursor..word.start()], &mut tokens);
            tokens.push(RawToken::word(word.as_str()));
            cursor = word.end();
        }
        self.push_gap(&sentence[cursor..], &mut tokens);

        tokens
    }

    /// Text between two word matches: non-whitespace chunks become non-word tokens
    fn push_gap(&self, gap: &str, tokens: &mut Vec<RawToken>) {
        let mut rest = gap;
        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            if ws_len > 0 {
                if !self.rules.remove_spaces {
                    if let Some(last) = tokens.last_mut() {
                        last.separator.push_str(&rest[..ws_len]);
                    }
                }
                rest = &rest[ws_len..];
                continue;
            }

            let chunk_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            tokens.push(RawToken::non_word(&rest[..chunk_len]));
            rest = &rest[chunk_len..];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(tokens: &[RawToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.surface.as_str()).collect()
    }

    fn latin() -> CharClass {
        CharClass::new("a-zA-Z").unwrap()
    }

    #[test]
    fn test_words_and_punctuation() {
        let class = latin();
        let tokens = InternalWordTokenizer::new(&class, InternalRules::default())
            .tokenize("The cat sat.");
        assert_eq!(surfaces(&tokens), vec!["The", "cat", "sat", "."]);
        let flags: Vec<bool> = tokens.iter().map(|t| t.is_word).collect();
        assert_eq!(flags, vec![true, true, true, false]);
        assert_eq!(tokens[0].lowercase, "the");
        assert_eq!(tokens[0].separator, " ");
        assert_eq!(tokens[2].separator, "");
    }

    #[test]
    fn test_non_word_chunks_split_on_whitespace() {
        let class = latin();
        let tokens = InternalWordTokenizer::new(&class, InternalRules::default())
            .tokenize("Wait -- 42 apples, ok?!");
        assert_eq!(
            surfaces(&tokens),
            vec!["Wait", "--", "42", "apples", ",", "ok", "?!"]
        );
        assert_eq!(tokens[1].separator, " ");
        assert_eq!(tokens[4].separator, " ");
        assert!(!tokens[2].is_word);
    }

    #[test]
    fn test_round_trip_with_separators() {
        let class = latin();
        let sentence = "Well,  that   is (odd)!";
        let tokens = InternalWordTokenizer::new(&class, InternalRules::default()).tokenize(sentence);
        let rebuilt: String = tokens
            .iter()
            .map(|t| format!("{}{}", t.surface, t.separator))
            .collect();
        assert_eq!(rebuilt, sentence);
    }

    #[test]
    fn test_remove_spaces_discards_separators() {
        let class = latin();
        let rules = InternalRules {
            remove_spaces: true,
            split_each_char: false,
        };
        let tokens = InternalWordTokenizer::new(&class, rules).tokenize("a b , c");
        assert!(tokens.iter().all(|t| t.separator.is_empty()));
        assert_eq!(surfaces(&tokens), vec!["a", "b", ",", "c"]);
    }

    #[test]
    fn test_split_each_char() {
        let class = CharClass::new(r"\p{Han}").unwrap();
        let rules = InternalRules {
            remove_spaces: true,
            split_each_char: true,
        };
        let tokens = InternalWordTokenizer::new(&class, rules).tokenize("日本語");
        assert_eq!(surfaces(&tokens), vec!["日", "本", "語"]);
        assert!(tokens.iter().all(|t| t.is_word));
    }

    #[test]
    fn test_split_each_char_keeps_punctuation_chunks() {
        let class = CharClass::new(r"\p{Han}\p{Hiragana}").unwrap();
        let rules = InternalRules {
            remove_spaces: true,
            split_each_char: true,
        };
        let tokens = InternalWordTokenizer::new(&class, rules).tokenize("雨だ。");
        assert_eq!(surfaces(&tokens), vec!["雨", "だ", "。"]);
        assert!(!tokens[2].is_word);
    }

    #[test]
    fn test_lowercase_is_codepoint_mapping() {
        let class = CharClass::new("a-zA-ZÀ-ÖØ-öø-ſ").unwrap();
        let tokens = InternalWordTokenizer::new(&class, InternalRules::default())
            .tokenize("ÉCOLE Straße");
        assert_eq!(tokens[0].lowercase, "école");
        assert_eq!(tokens[1].lowercase, "straße");
    }

    #[test]
    fn test_empty_sentence() {
        let class = latin();
        assert!(InternalWordTokenizer::new(&class, InternalRules::default())
            .tokenize("")
            .is_empty());
    }
}
