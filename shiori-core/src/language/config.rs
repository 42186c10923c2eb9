//! Configuration structures
//!
//! This module defines the TOML schema for language profiles and parser
//! catalogs. Values stay as plain strings here; validation happens when they
//! are turned into a [`LanguageProfile`](super::LanguageProfile) or an
//! [`ExternalParserConfig`](super::ExternalParserConfig).

use serde::{Deserialize, Serialize};

/// Root language profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub metadata: Metadata,
    pub words: Words,
    #[serde(default)]
    pub sentences: Sentences,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub parser: Option<ParserSection>,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Word tokenization rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Words {
    /// Regex character class body of word characters
    pub chars: String,
    #[serde(default)]
    pub split_each_char: bool,
    #[serde(default)]
    pub remove_spaces: bool,
}

/// Sentence segmentation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentences {
    /// Regex character class body of terminators
    #[serde(default = "default_split_chars")]
    pub split_chars: String,
    /// Literal tokens that suppress a boundary (e.g. "Mr.")
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl Default for Sentences {
    fn default() -> Self {
        Self {
            split_chars: default_split_chars(),
            exceptions: Vec::new(),
        }
    }
}

/// Display hints carried through to renderers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    pub right_to_left: bool,
}

/// Parser section of a profile: a catalog reference or an inline definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParserSection {
    /// `use = "mecab"`
    Reference {
        #[serde(rename = "use")]
        reference: String,
    },
    /// Full inline parser definition
    Inline(ParserSpec),
}

/// External parser as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserSpec {
    #[serde(rename = "type")]
    pub parser_type: String,
    pub name: String,
    pub binary: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_input_mode")]
    pub input_mode: String,
    pub output_format: String,
}

/// Parser catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserCatalogConfig {
    #[serde(default)]
    pub parser: Vec<ParserSpec>,
}

/// Default sentence terminators
pub const DEFAULT_SPLIT_CHARS: &str = ".!?";

fn default_split_chars() -> String {
    DEFAULT_SPLIT_CHARS.to_string()
}

fn default_input_mode() -> String {
    "stdin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_profile_defaults() {
        let config: ProfileConfig = toml::from_str(
            r#"
[metadata]
code = "en"
name = "English"

[words]
chars = "a-zA-Z"
"#,
        )
        .unwrap();

        assert_eq!(config.sentences.split_chars, ".!?");
        assert!(config.sentences.exceptions.is_empty());
        assert!(!config.words.split_each_char);
        assert!(!config.words.remove_spaces);
        assert!(!config.display.right_to_left);
        assert!(config.parser.is_none());
    }

    #[test]
    fn test_parser_reference() {
        let config: ProfileConfig = toml::from_str(
            r#"
[metadata]
code = "ja"
name = "Japanese"

[words]
chars = "\\p{Han}"

[parser]
use = "mecab"
"#,
        )
        .unwrap();

        match config.parser {
            Some(ParserSection::Reference { reference }) => assert_eq!(reference, "mecab"),
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn test_parser_inline() {
        let config: ProfileConfig = toml::from_str(
            r#"
[metadata]
code = "zh"
name = "Chinese"

[words]
chars = "\\p{Han}"

[parser]
type = "custom"
name = "Custom"
binary = "/usr/bin/seg"
output_format = "line"
"#,
        )
        .unwrap();

        match config.parser {
            Some(ParserSection::Inline(spec)) => {
                assert_eq!(spec.parser_type, "custom");
                assert_eq!(spec.input_mode, "stdin");
                assert!(spec.args.is_empty());
            }
            other => panic!("expected inline parser, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_words_section_fails() {
        let result: Result<ProfileConfig, _> = toml::from_str(
            r#"
[metadata]
code = "en"
name = "English"
"#,
        );
        assert!(result.is_err());
    }
}
