//! Language profiles and external parser configuration

pub mod char_class;
pub mod config;
pub mod loader;
pub mod parser;
pub mod profile;

pub use char_class::CharClass;
pub use config::{ParserSection, ParserSpec, ProfileConfig};
pub use loader::{builtin, builtin_codes, builtin_with};
pub use parser::{ExternalParserConfig, InputMode, OutputFormat, ParserCatalog, FILE_PLACEHOLDER};
pub use profile::{InternalRules, LanguageProfile, LanguageProfileBuilder, TextDirection, Tokenization};
