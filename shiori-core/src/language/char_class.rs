//! Compiled regex character classes
//!
//! Profiles describe word characters and sentence terminators as the body of a
//! regex character class (`a-zA-Z`, `.!?`, `\p{Han}ー`). The body is compiled once
//! into the matchers the tokenizer and segmenter need.

use crate::error::{CoreError, Result};
use regex::Regex;

/// A validated character class body with precompiled matchers
#[derive(Debug, Clone)]
pub struct CharClass {
    source: String,
    /// Maximal runs of member characters
    runs: Regex,
    /// Exactly one member character, unanchored
    single: Regex,
    /// Exactly one member character, anchored on both sides
    exact: Regex,
    /// Membership for ASCII, filled at construction
    ascii: [bool; 128],
}

impl CharClass {
    /// Compile a character class body
    ///
    /// The body must be non-empty and must form a single bracketed class once
    /// wrapped in `[...]`; an unbalanced `]` is rejected even when the regex
    /// engine would accept the result as an alternation.
    pub fn new(body: &str) -> Result<Self> {
        if body.is_empty() {
            return Err(CoreError::configuration(
                "character class must not be empty",
            ));
        }
        check_brackets(body)?;

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| {
                CoreError::configuration(format!("invalid character class '{body}': {e}"))
            })
        };

        let runs = compile(format!("[{body}]+"))?;
        let single = compile(format!("[{body}]"))?;
        let exact = compile(format!("^[{body}]$"))?;

        let mut ascii = [false; 128];
        let mut buf = [0u8; 4];
        for (code, slot) in ascii.iter_mut().enumerate() {
            let ch = code as u8 as char;
            *slot = exact.is_match(ch.encode_utf8(&mut buf));
        }

        Ok(Self {
            source: body.to_string(),
            runs,
            single,
            exact,
            ascii,
        })
    }

    /// The class body as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `ch` is a member of the class
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            return self.ascii[ch as usize];
        }
        let mut buf = [0u8; 4];
        self.exact.is_match(ch.encode_utf8(&mut buf))
    }

    /// Whether every character of `text` is a member (false for empty text)
    pub fn contains_all(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|ch| self.contains(ch))
    }

    /// Whether any character of `text` is a member
    pub fn contains_any(&self, text: &str) -> bool {
        self.single.is_match(text)
    }

    /// Iterate over maximal runs of member characters
    pub fn runs<'t>(&self, text: &'t str) -> regex::Matches<'_, 't> {
        self.runs.find_iter(text)
    }

    /// Iterate over single member characters
    pub fn chars<'t>(&self, text: &'t str) -> regex::Matches<'_, 't> {
        self.single.find_iter(text)
    }
}

impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CharClass {}

fn check_brackets(body: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut escaped = false;

    for ch in body.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    return Err(CoreError::configuration(format!(
                        "invalid character class '{body}': unbalanced ']'"
                    )));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if depth != 0 || escaped {
        return Err(CoreError::configuration(format!(
            "invalid character class '{body}': unterminated bracket or escape"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_membership() {
        let class = CharClass::new("a-zA-Z").unwrap();
        assert!(class.contains('a'));
        assert!(class.contains('Z'));
        assert!(!class.contains('.'));
        assert!(!class.contains(' '));
        assert!(!class.contains('é'));
    }

    #[test]
    fn test_unicode_property_class() {
        let class = CharClass::new(r"\p{Han}\p{Hiragana}\p{Katakana}ー").unwrap();
        assert!(class.contains('日'));
        assert!(class.contains('の'));
        assert!(class.contains('カ'));
        assert!(class.contains('ー'));
        assert!(!class.contains('。'));
        assert!(!class.contains('a'));
    }

    #[test]
    fn test_runs_and_chars() {
        let class = CharClass::new("a-z").unwrap();
        let runs: Vec<&str> = class.runs("ab, cd!").map(|m| m.as_str()).collect();
        assert_eq!(runs, vec!["ab", "cd"]);

        let chars: Vec<&str> = class.chars("ab,c").map(|m| m.as_str()).collect();
        assert_eq!(chars, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_contains_all_and_any() {
        let class = CharClass::new("a-z").unwrap();
        assert!(class.contains_all("abc"));
        assert!(!class.contains_all("ab1"));
        assert!(!class.contains_all(""));
        assert!(class.contains_any("1a2"));
        assert!(!class.contains_any("123"));
    }

    #[test]
    fn test_posix_class_inside_body() {
        let class = CharClass::new("[:alpha:]").unwrap();
        assert!(class.contains('q'));
        assert!(!class.contains('1'));
    }

    #[test]
    fn test_rejects_invalid_bodies() {
        assert!(CharClass::new("").is_err());
        assert!(CharClass::new("a]|[b").is_err());
        assert!(CharClass::new("z-a").is_err());
        assert!(CharClass::new("abc\\").is_err());
        assert!(CharClass::new("[abc").is_err());
    }

    #[test]
    fn test_sentence_terminators() {
        let class = CharClass::new(".!?").unwrap();
        assert!(class.contains('.'));
        assert!(class.contains('!'));
        assert!(class.contains('?'));
        assert!(!class.contains('a'));
    }
}
