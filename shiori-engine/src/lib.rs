//! Orchestration for shiori tokenization
//!
//! This crate runs external morphological parsers as subprocesses, drives the
//! per-text pipeline (in parallel for long texts) and re-tokenizes stored
//! texts in bulk when a language profile changes.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod registry;
pub mod reparse;

// Re-export key types
pub use config::{EngineConfig, EngineConfigBuilder, DEFAULT_PARSER_TIMEOUT};
pub use error::{EngineError, ExternalProcessError, Result};
pub use external::{ExternalParserAdapter, ParsedSentence, SpawnLimiter, SpawnPermit};
pub use pipeline::Pipeline;
pub use registry::{ParserAvailability, ParserRegistry};
pub use reparse::{
    CancellationToken, ReparseJob, ReparseOptions, ReparseReport, SinkError, SkipReason,
    TextId, TextOutcome, TextRecord, TextSink,
};

// Re-export core for convenience
pub use shiori_core;
