//! List command implementation

use anyhow::{Context, Result};
use clap::Subcommand;
use shiori_core::{language, ParserCatalog, Tokenization};
use shiori_engine::{EngineConfig, ParserRegistry};
use std::path::PathBuf;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in language profiles
    Languages,

    /// List external parsers and whether their binaries are installed
    Parsers {
        /// Additional parser catalog TOML file
        #[arg(long, value_name = "FILE")]
        parsers: Option<PathBuf>,
    },

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Languages => list_languages(),
            ListCommands::Parsers { parsers } => list_parsers(parsers.as_ref()),
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text      - One tokenized sentence per line");
                println!("  json      - Sentences, tokens and groups as JSON");
                println!("  markdown  - Numbered sentences per text");
                Ok(())
            }
        }
    }
}

fn list_languages() -> Result<()> {
    let catalog = ParserCatalog::builtin()?;
    println!("Built-in languages:");
    for code in language::builtin_codes() {
        let profile = language::builtin_with(code, &catalog)?;
        let tokenization = match profile.tokenization() {
            Tokenization::Internal(rules) if rules.split_each_char => "per character".to_string(),
            Tokenization::Internal(_) => "word runs".to_string(),
            Tokenization::External(parser) => format!("parser '{}'", parser.parser_type()),
        };
        println!("  {:<10} {:<20} {}", code, profile.name(), tokenization);
    }
    Ok(())
}

fn list_parsers(extra: Option<&PathBuf>) -> Result<()> {
    let mut catalog = ParserCatalog::builtin()?;
    if let Some(path) = extra {
        catalog.extend(
            ParserCatalog::from_file(path)
                .with_context(|| format!("Failed to load parsers: {}", path.display()))?,
        );
    }
    let registry = ParserRegistry::new(catalog, &EngineConfig::default());

    println!("External parsers:");
    for entry in registry.availability() {
        let status = match &entry.resolved {
            Some(path) => format!("available ({})", path.display()),
            None => "not installed".to_string(),
        };
        println!(
            "  {:<10} {:<20} {}",
            entry.parser.parser_type(),
            entry.parser.name(),
            status
        );
    }
    Ok(())
}
