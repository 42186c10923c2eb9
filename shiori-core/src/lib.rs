//! Language-aware tokenization for reading texts
//!
//! Raw text in any supported language becomes an ordered stream of word and
//! punctuation tokens grouped into sentences, with known multi-word vocabulary
//! terms layered on top.
//!
//! # Pipeline
//!
//! - [`SentenceSegmenter`] splits text on terminator runs, honouring
//!   abbreviation exceptions and line breaks.
//! - [`InternalWordTokenizer`] splits each sentence with the profile's word
//!   character class. Profiles backed by an external parser are tokenized by
//!   `shiori-engine` instead.
//! - [`TokenStreamBuilder`] assigns global token orders.
//! - [`MultiWordOverlay`] matches a frozen [`VocabularySnapshot`].
//! - [`LemmaDictionary`] optionally annotates word tokens with lemmas.
//!
//! # Example
//!
//! ```rust
//! use shiori_core::{language, tokenize_internal, Tokenization};
//!
//! let profile = language::builtin("en").unwrap();
//! let Tokenization::Internal(rules) = profile.tokenization() else {
//!     unreachable!()
//! };
//!
//! let stream = tokenize_internal("The cat sat. It slept!", &profile, *rules);
//! assert_eq!(stream.sentences().len(), 2);
//!
//! let surfaces: Vec<&str> = stream.items().iter().map(|i| i.surface.as_str()).collect();
//! assert_eq!(surfaces, ["The", "cat", "sat", ".", "It", "slept", "!"]);
//! ```

pub mod annotated;
pub mod error;
pub mod language;
pub mod lemma;
pub mod overlay;
pub mod segmenter;
pub mod spacing;
pub mod stream;
pub mod tokenizer;

pub use annotated::AnnotatedText;
pub use error::{CoreError, Result};
pub use language::{
    CharClass, ExternalParserConfig, InputMode, InternalRules, LanguageProfile,
    LanguageProfileBuilder, OutputFormat, ParserCatalog, TextDirection, Tokenization,
};
pub use lemma::LemmaDictionary;
pub use overlay::{MultiWordGroup, MultiWordOverlay, MultiWordTerm, TermId, VocabularySnapshot};
pub use segmenter::{SentenceSegmenter, SentenceSpan};
pub use spacing::{
    assign_separators, convert_zws_to_spacing, join_with_zws, needs_space, separators_from_marked,
    ZWS,
};
pub use stream::{tokenize_internal, Sentence, SentenceId, TextItem, TokenStream, TokenStreamBuilder};
pub use tokenizer::{InternalWordTokenizer, RawToken};
