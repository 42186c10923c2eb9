//! Validate command implementation

use anyhow::{Context, Result};
use clap::Args;
use shiori_core::{LanguageProfile, ParserCatalog, Tokenization};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,

    /// Additional parser catalog the profile may reference
    #[arg(long, value_name = "FILE")]
    pub parsers: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        let mut catalog = ParserCatalog::builtin()?;
        if let Some(path) = &self.parsers {
            catalog.extend(
                ParserCatalog::from_file(path)
                    .with_context(|| format!("Failed to load parsers: {}", path.display()))?,
            );
        }

        match LanguageProfile::from_file(&self.language_config, &catalog) {
            Ok(profile) => {
                println!("✓ Configuration is valid!");
                println!("  Language code: {}", profile.code());
                println!("  Language name: {}", profile.name());
                match profile.tokenization() {
                    Tokenization::Internal(rules) => println!(
                        "  Tokenization: internal (split_each_char: {}, remove_spaces: {})",
                        rules.split_each_char, rules.remove_spaces
                    ),
                    Tokenization::External(parser) => println!(
                        "  Tokenization: external parser '{}' ({} {})",
                        parser.parser_type(),
                        parser.binary(),
                        parser.args().join(" ")
                    ),
                }
                println!("  Boundary exceptions: {}", profile.exceptions().len());
                if profile.is_right_to_left() {
                    println!("  Direction: right to left");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
