//! Runtime language profile
//!
//! A [`LanguageProfile`] is the validated, compiled form of a
//! [`ProfileConfig`]. Whether text is tokenized internally or by an external
//! parser is decided here, once, as a closed [`Tokenization`] variant.

use crate::error::{CoreError, Result};
use crate::language::char_class::CharClass;
use crate::language::config::{ParserSection, ProfileConfig, DEFAULT_SPLIT_CHARS};
use crate::language::parser::{ExternalParserConfig, ParserCatalog};
use serde::{Deserialize, Serialize};

/// Reading direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left (Arabic, Hebrew, ...)
    Rtl,
}

/// Rules of the regex/character-class tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InternalRules {
    /// Drop whitespace entirely instead of recording it as separators
    pub remove_spaces: bool,
    /// Emit every word character as its own token
    pub split_each_char: bool,
}

/// Which tokenizer owns a profile's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenization {
    /// Character-class tokenizer
    Internal(InternalRules),
    /// Subprocess segmenter; internal rules are ignored
    External(ExternalParserConfig),
}

/// Per-language tokenization rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    code: String,
    name: String,
    word_chars: CharClass,
    sentence_split: CharClass,
    exceptions: Vec<String>,
    direction: TextDirection,
    tokenization: Tokenization,
}

impl LanguageProfile {
    /// Start building a profile programmatically
    pub fn builder(code: impl Into<String>) -> LanguageProfileBuilder {
        LanguageProfileBuilder::new(code)
    }

    /// Compile a profile configuration, resolving parser references in `catalog`
    pub fn from_config(config: &ProfileConfig, catalog: &ParserCatalog) -> Result<Self> {
        let mut builder = Self::builder(config.metadata.code.clone())
            .name(config.metadata.name.clone())
            .word_chars(config.words.chars.clone())
            .sentence_split(config.sentences.split_chars.clone())
            .exceptions(config.sentences.exceptions.clone())
            .remove_spaces(config.words.remove_spaces)
            .split_each_char(config.words.split_each_char)
            .right_to_left(config.display.right_to_left);

        if let Some(section) = &config.parser {
            let parser = match section {
                ParserSection::Reference { reference } => {
                    catalog.get(reference).cloned().ok_or_else(|| {
                        CoreError::configuration(format!(
                            "profile '{}' references unknown parser '{reference}'",
                            config.metadata.code
                        ))
                    })?
                }
                ParserSection::Inline(spec) => ExternalParserConfig::from_spec(spec)?,
            };
            builder = builder.parser(parser);
        }

        builder.build()
    }

    /// Parse and compile a TOML profile
    pub fn from_toml_str(toml_str: &str, catalog: &ParserCatalog) -> Result<Self> {
        let config: ProfileConfig = toml::from_str(toml_str)?;
        Self::from_config(&config, catalog)
    }

    /// Load and compile a TOML profile file
    pub fn from_file(path: &std::path::Path, catalog: &ParserCatalog) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, catalog)
    }

    /// Language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Language name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Word character class
    pub fn word_chars(&self) -> &CharClass {
        &self.word_chars
    }

    /// Sentence terminator class
    pub fn sentence_split(&self) -> &CharClass {
        &self.sentence_split
    }

    /// Boundary exceptions in configured order
    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    /// Reading direction
    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    /// Whether the language reads right to left
    pub fn is_right_to_left(&self) -> bool {
        self.direction == TextDirection::Rtl
    }

    /// Tokenization authority for this profile
    pub fn tokenization(&self) -> &Tokenization {
        &self.tokenization
    }

    /// External parser, when one is configured
    pub fn parser(&self) -> Option<&ExternalParserConfig> {
        match &self.tokenization {
            Tokenization::External(parser) => Some(parser),
            Tokenization::Internal(_) => None,
        }
    }
}

/// Fluent builder for [`LanguageProfile`]
#[derive(Debug, Clone)]
pub struct LanguageProfileBuilder {
    code: String,
    name: Option<String>,
    word_chars: Option<String>,
    sentence_split: String,
    exceptions: Vec<String>,
    rules: InternalRules,
    right_to_left: bool,
    parser: Option<ExternalParserConfig>,
}

impl LanguageProfileBuilder {
    /// Create a builder for the given language code
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            word_chars: None,
            sentence_split: DEFAULT_SPLIT_CHARS.to_string(),
            exceptions: Vec::new(),
            rules: InternalRules::default(),
            right_to_left: false,
            parser: None,
        }
    }

    /// Set the display name (defaults to the code)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the word character class body
    pub fn word_chars(mut self, class: impl Into<String>) -> Self {
        self.word_chars = Some(class.into());
        self
    }

    /// Set the sentence terminator class body
    pub fn sentence_split(mut self, class: impl Into<String>) -> Self {
        self.sentence_split = class.into();
        self
    }

    /// Set the boundary exception list
    pub fn exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = exceptions.into_iter().map(Into::into).collect();
        self
    }

    /// Drop whitespace separators
    pub fn remove_spaces(mut self, value: bool) -> Self {
        self.rules.remove_spaces = value;
        self
    }

    /// Split every word character into its own token
    pub fn split_each_char(mut self, value: bool) -> Self {
        self.rules.split_each_char = value;
        self
    }

    /// Mark the language as right to left
    pub fn right_to_left(mut self, value: bool) -> Self {
        self.right_to_left = value;
        self
    }

    /// Hand tokenization to an external parser
    pub fn parser(mut self, parser: ExternalParserConfig) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Validate and compile the profile
    pub fn build(self) -> Result<LanguageProfile> {
        if self.code.trim().is_empty() {
            return Err(CoreError::empty_field("code"));
        }

        let word_chars = match self.word_chars {
            Some(class) => CharClass::new(&class)
                .map_err(|e| CoreError::configuration(format!("word_chars: {e}")))?,
            None => return Err(CoreError::empty_field("word_chars")),
        };
        let sentence_split = CharClass::new(&self.sentence_split)
            .map_err(|e| CoreError::configuration(format!("split_chars: {e}")))?;

        let exceptions: Vec<String> = self
            .exceptions
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        let tokenization = match self.parser {
            Some(parser) => {
                if self.rules != InternalRules::default() {
                    log::debug!(
                        "profile '{}': remove_spaces/split_each_char ignored, parser '{}' owns tokenization",
                        self.code,
                        parser.parser_type()
                    );
                }
                Tokenization::External(parser)
            }
            None => Tokenization::Internal(self.rules),
        };

        Ok(LanguageProfile {
            name: self.name.unwrap_or_else(|| self.code.clone()),
            code: self.code,
            word_chars,
            sentence_split,
            exceptions,
            direction: if self.right_to_left {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            },
            tokenization,
        })
    }
}
