//! External parser configuration and catalog
//!
//! An external parser is a morphological segmenter run as a subprocess (MeCab,
//! jieba). Its configuration is validated on construction so that no partially
//! valid config can reach the engine.

use crate::error::{CoreError, Result};
use crate::language::config::{ParserCatalogConfig, ParserSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Placeholder in parser arguments replaced by the temp file path in file mode
pub const FILE_PLACEHOLDER: &str = "{file}";

/// How sentence text reaches the parser process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Text is written to the process's standard input
    Stdin,
    /// Text is written to a temporary file passed as an argument
    File,
}

impl InputMode {
    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Stdin => "stdin",
            InputMode::File => "file",
        }
    }
}

impl FromStr for InputMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdin" => Ok(InputMode::Stdin),
            "file" => Ok(InputMode::File),
            other => Err(CoreError::configuration(format!(
                "unknown input_mode '{other}' (expected 'stdin' or 'file')"
            ))),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the parser's standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line, blank lines ignored
    Line,
    /// Whitespace-separated tokens on a single line
    Wakati,
}

impl OutputFormat {
    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Line => "line",
            OutputFormat::Wakati => "wakati",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(OutputFormat::Line),
            "wakati" => Ok(OutputFormat::Wakati),
            other => Err(CoreError::configuration(format!(
                "unknown output_format '{other}' (expected 'line' or 'wakati')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated description of a subprocess segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalParserConfig {
    #[serde(rename = "type")]
    parser_type: String,
    name: String,
    binary: String,
    args: Vec<String>,
    input_mode: InputMode,
    output_format: OutputFormat,
}

impl ExternalParserConfig {
    /// Create a parser config, rejecting empty required fields
    pub fn new(
        parser_type: impl Into<String>,
        name: impl Into<String>,
        binary: impl Into<String>,
        args: Vec<String>,
        input_mode: InputMode,
        output_format: OutputFormat,
    ) -> Result<Self> {
        let parser_type = parser_type.into();
        let name = name.into();
        let binary = binary.into();

        if parser_type.trim().is_empty() {
            return Err(CoreError::empty_field("type"));
        }
        if name.trim().is_empty() {
            return Err(CoreError::empty_field("name"));
        }
        if binary.trim().is_empty() {
            return Err(CoreError::empty_field("binary"));
        }

        Ok(Self {
            parser_type,
            name,
            binary,
            args,
            input_mode,
            output_format,
        })
    }

    /// Build from the TOML representation, parsing the enum fields
    pub fn from_spec(spec: &ParserSpec) -> Result<Self> {
        let input_mode = spec.input_mode.parse()?;
        let output_format = spec.output_format.parse()?;
        Self::new(
            spec.parser_type.clone(),
            spec.name.clone(),
            spec.binary.clone(),
            spec.args.clone(),
            input_mode,
            output_format,
        )
    }

    /// Parser type identifier (e.g. "mecab")
    pub fn parser_type(&self) -> &str {
        &self.parser_type
    }

    /// Human readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executable path or name
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Argument list as configured
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Input mode
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Output format
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Arguments with the file placeholder substituted
    ///
    /// When no argument contains the placeholder the path is appended.
    pub fn args_for_file(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(FILE_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(FILE_PLACEHOLDER, &path)
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(path.into_owned());
        }
        args
    }
}

/// Named registry of parser configurations
///
/// Built once (from the embedded catalog, a TOML file, or programmatically) and
/// handed to whatever resolves profiles. There is no global instance.
#[derive(Debug, Clone, Default)]
pub struct ParserCatalog {
    parsers: BTreeMap<String, ExternalParserConfig>,
}

impl ParserCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the parsers shipped with shiori (MeCab, jieba)
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(include_str!("../../configs/parsers.toml"))
    }

    /// Parse a catalog from TOML (`[[parser]]` entries)
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: ParserCatalogConfig = toml::from_str(toml_str)?;
        let mut catalog = Self::new();
        for spec in &config.parser {
            let parser = ExternalParserConfig::from_spec(spec)?;
            if catalog.register(parser).is_some() {
                return Err(CoreError::configuration(format!(
                    "duplicate parser type '{}'",
                    spec.parser_type
                )));
            }
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Register a parser, returning the one it replaced
    pub fn register(&mut self, parser: ExternalParserConfig) -> Option<ExternalParserConfig> {
        self.parsers.insert(parser.parser_type.clone(), parser)
    }

    /// Look up a parser by type id
    pub fn get(&self, parser_type: &str) -> Option<&ExternalParserConfig> {
        self.parsers.get(parser_type)
    }

    /// Merge another catalog into this one; entries of `other` win
    pub fn extend(&mut self, other: ParserCatalog) {
        self.parsers.extend(other.parsers);
    }

    /// Iterate in type id order
    pub fn iter(&self) -> impl Iterator<Item = &ExternalParserConfig> {
        self.parsers.values()
    }

    /// Number of registered parsers
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
