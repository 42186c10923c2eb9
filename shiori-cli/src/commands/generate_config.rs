//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Reference a catalog parser (e.g. mecab, jieba) instead of internal rules
    #[arg(short, long, value_name = "TYPE")]
    pub parser: Option<String>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating language configuration template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the word characters and sentence rules");
        println!("2. Validate your configuration:");
        println!(
            "   shiori validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for tokenizing:");
        println!(
            "   shiori tokenize -i input.txt --language-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        let parser = match &self.parser {
            Some(parser_type) => format!(
                r#"
# External morphological parser. Tokenization is handed to the parser and the
# [words] split_each_char/remove_spaces flags are ignored.
[parser]
use = "{parser_type}"
"#
            ),
            None => r#"
# Inline external parser (optional). Uncomment to tokenize with a subprocess.
# [parser]
# type = "custom"
# name = "Custom segmenter"
# binary = "/usr/local/bin/segmenter"
# args = ["--input", "{file}"]
# input_mode = "file"        # stdin | file
# output_format = "line"     # line | wakati
"#
            .to_string(),
        };

        format!(
            r#"# Language configuration for {code}

[metadata]
code = "{code}"
name = "Custom Language"

[words]
# Regex character class body of word characters
chars = "a-zA-Z"
# Emit every word character as its own token (for scripts without spaces)
split_each_char = false
# Drop whitespace between tokens instead of keeping it as separators
remove_spaces = false

[sentences]
# Sentence terminator characters
split_chars = ".!?"
# Tokens that end in a terminator but do not end a sentence
exceptions = ["Mr.", "Dr.", "e.g."]

[display]
right_to_left = false
{parser}"#,
            code = self.language_code,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiori_core::{LanguageProfile, ParserCatalog, Tokenization};
    use tempfile::TempDir;

    #[test]
    fn test_template_is_valid_profile() {
        let dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            language_code: "xx".to_string(),
            output: dir.path().join("xx.toml"),
            parser: None,
        };
        args.execute().unwrap();

        let profile =
            LanguageProfile::from_file(&args.output, &ParserCatalog::builtin().unwrap()).unwrap();
        assert_eq!(profile.code(), "xx");
        assert_eq!(profile.exceptions().len(), 3);
        assert!(matches!(profile.tokenization(), Tokenization::Internal(_)));
    }

    #[test]
    fn test_template_with_parser_reference() {
        let args = GenerateConfigArgs {
            language_code: "ja-custom".to_string(),
            output: PathBuf::from("unused.toml"),
            parser: Some("mecab".to_string()),
        };
        let profile = LanguageProfile::from_toml_str(
            &args.generate_template(),
            &ParserCatalog::builtin().unwrap(),
        )
        .unwrap();
        assert_eq!(profile.parser().unwrap().parser_type(), "mecab");
    }
}
