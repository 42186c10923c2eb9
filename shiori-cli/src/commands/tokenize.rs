//! Tokenize command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{read_vocabulary, resolve_patterns, FileReader};
use crate::language_source::LanguageSource;
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use shiori_core::{AnnotatedText, LemmaDictionary, ParserCatalog, VocabularySnapshot};
use shiori_engine::{
    Pipeline, ParserRegistry, ReparseJob, ReparseOptions, SinkError, TextId, TextOutcome,
    TextRecord, TextSink,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Built-in language code or alias (e.g. en, ja, zh-jieba, arabic)
    #[arg(short, long, value_name = "CODE", conflicts_with = "language_config")]
    pub language: Option<String>,

    /// Language profile TOML file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Additional parser catalog TOML file
    #[arg(long, value_name = "FILE")]
    pub parsers: Option<PathBuf>,

    /// Vocabulary file with multi-word expressions, one per line
    #[arg(long, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Lemma dictionary (word_form<TAB>lemma)
    #[arg(long, value_name = "FILE")]
    pub lemmas: Option<PathBuf>,

    /// CLI configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Keep tokenizing the remaining files after a failure
    #[arg(short, long)]
    pub keep_going: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tokenized sentence per line
    Text,
    /// JSON array with sentences, tokens and groups
    Json,
    /// Markdown section per text
    Markdown,
}

/// Keeps successful results in memory until the run ends
#[derive(Default)]
struct CollectingSink {
    texts: Mutex<Vec<(TextId, AnnotatedText)>>,
}

impl TextSink for CollectingSink {
    fn store(&self, id: TextId, text: &AnnotatedText) -> std::result::Result<(), SinkError> {
        self.texts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, text.clone()));
        Ok(())
    }
}

impl CollectingSink {
    fn into_results(self) -> Vec<(TextId, AnnotatedText)> {
        let mut texts = self.texts.into_inner().unwrap_or_else(PoisonError::into_inner);
        texts.sort_by_key(|(id, _)| *id);
        texts
    }
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let cli_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let engine_config = cli_config.engine_config(self.threads)?;

        let mut catalog = ParserCatalog::builtin()?;
        if let Some(path) = &self.parsers {
            catalog.extend(
                ParserCatalog::from_file(path)
                    .with_context(|| format!("Failed to load parsers: {}", path.display()))?,
            );
        }
        let registry = Arc::new(ParserRegistry::new(catalog, &engine_config));

        let source = LanguageSource::from_args(
            self.language.as_deref(),
            self.language_config.as_ref(),
            &cli_config.processing.default_language,
        );
        let profile = source.load(&registry)?;
        log::info!("Language: {}", source.display_name());

        let pipeline = Pipeline::new(registry, engine_config)?;

        let snapshot = match &self.vocabulary {
            Some(path) => pipeline
                .snapshot_from_expressions(&profile, read_vocabulary(path)?)
                .context("Failed to segment vocabulary")?,
            None => VocabularySnapshot::default(),
        };
        let lemmas = self
            .lemmas
            .as_ref()
            .map(|path| {
                LemmaDictionary::from_file(path)
                    .with_context(|| format!("Failed to load lemmas: {}", path.display()))
            })
            .transpose()?;

        let files = resolve_patterns(&self.input)?;
        let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        let texts = files
            .iter()
            .enumerate()
            .map(|(i, path)| Ok(TextRecord::new(i as u64, FileReader::read_text(path)?)))
            .collect::<Result<Vec<_>>>()?;
        log::info!("Tokenizing {} files", texts.len());

        let options = ReparseOptions {
            continue_on_error: self.keep_going || cli_config.processing.continue_on_error,
            threads: pipeline.config().threads,
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_texts(texts.len() as u64);
        let sink = CollectingSink::default();

        let report = {
            let progress = &progress;
            let names = &names;
            let mut job = ReparseJob::new(&pipeline, &profile, &snapshot)
                .options(options)
                .on_outcome(move |id, outcome| {
                    progress.text_finished(&names[id.0 as usize], outcome.is_completed())
                });
            if let Some(lemmas) = &lemmas {
                job = job.lemmas(lemmas);
            }
            job.run(&texts, Some(&sink))?
        };
        progress.finish();

        let mut formatter = self.formatter(&cli_config)?;
        for (id, text) in sink.into_results() {
            formatter.format_text(&names[id.0 as usize], &text)?;
        }
        formatter.finish()?;

        for (id, outcome) in report.outcomes() {
            if let TextOutcome::Failed(reason) = outcome {
                eprintln!("✗ {}: {reason}", names[id.0 as usize]);
            }
        }

        if !report.is_complete() {
            return Err(CliError::TextsFailed {
                failed: report.failed() + report.skipped(),
                total: texts.len(),
            }
            .into());
        }
        Ok(())
    }

    fn formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
            })?,
        };

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let show_lemmas = config.output.show_lemmas;
        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer, show_lemmas)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, show_lemmas)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
