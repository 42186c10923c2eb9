//! Bulk re-tokenization
//!
//! When a language profile changes every stored text of that language has to
//! be tokenized again. A [`ReparseJob`] runs the pipeline over many texts with
//! a bounded worker pool. Cancellation is checked before each text starts, so
//! a text is either fully re-tokenized or untouched. Results reach storage
//! only through a [`TextSink`] and only on success.

use crate::error::{EngineError, Result};
use crate::pipeline::Pipeline;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use shiori_core::{AnnotatedText, LanguageProfile, LemmaDictionary, VocabularySnapshot};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Identifier of a stored text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub u64);

impl fmt::Display for TextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text {}", self.0)
    }
}

/// A text to re-tokenize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// Storage identifier
    pub id: TextId,
    /// Raw content
    pub content: String,
}

impl TextRecord {
    /// Create a record
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id: TextId(id),
            content: content.into(),
        }
    }
}

/// Error type returned by sinks
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Storage collaborator receiving successful results
///
/// Implementations replace the stored tokenization of `id` wholesale.
pub trait TextSink: Sync {
    /// Persist the new tokenization of a text
    fn store(&self, id: TextId, text: &AnnotatedText) -> std::result::Result<(), SinkError>;
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; texts already running finish
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a text was not processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The job was cancelled before the text started
    Cancelled,
    /// An earlier text failed and `continue_on_error` was off
    StoppedAfterFailure,
}

/// Result for one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    /// Tokenized and stored
    Completed {
        /// Sentence count
        sentences: usize,
        /// Token count
        tokens: usize,
        /// Multi-word group count
        groups: usize,
    },
    /// Tokenization or storage failed; the stored text is untouched
    Failed(String),
    /// Never started
    Skipped(SkipReason),
}

impl TextOutcome {
    /// Whether the text was re-tokenized
    pub fn is_completed(&self) -> bool {
        matches!(self, TextOutcome::Completed { .. })
    }
}

/// Options of a bulk run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReparseOptions {
    /// Keep going after a failed text
    pub continue_on_error: bool,
    /// Worker threads (None = all cores)
    pub threads: Option<usize>,
}

/// Per-text outcomes of a run, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReparseReport {
    outcomes: Vec<(TextId, TextOutcome)>,
}

impl ReparseReport {
    /// All outcomes in input order
    pub fn outcomes(&self) -> &[(TextId, TextOutcome)] {
        &self.outcomes
    }

    /// Outcome of one text
    pub fn outcome(&self, id: TextId) -> Option<&TextOutcome> {
        self.outcomes
            .iter()
            .find(|(text, _)| *text == id)
            .map(|(_, outcome)| outcome)
    }

    /// Number of completed texts
    pub fn completed(&self) -> usize {
        self.count(|o| o.is_completed())
    }

    /// Number of failed texts
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TextOutcome::Failed(_)))
    }

    /// Number of skipped texts
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TextOutcome::Skipped(_)))
    }

    /// Whether every text completed
    pub fn is_complete(&self) -> bool {
        self.completed() == self.outcomes.len()
    }

    /// Whether any text was skipped because of cancellation
    pub fn was_cancelled(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, o)| *o == TextOutcome::Skipped(SkipReason::Cancelled))
    }

    fn count(&self, pred: impl Fn(&TextOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

type Observer<'a> = Box<dyn Fn(TextId, &TextOutcome) + Send + Sync + 'a>;

/// Re-tokenizes a batch of texts with one profile and vocabulary snapshot
pub struct ReparseJob<'a> {
    pipeline: &'a Pipeline,
    profile: &'a LanguageProfile,
    snapshot: &'a VocabularySnapshot,
    lemmas: Option<&'a LemmaDictionary>,
    options: ReparseOptions,
    cancel: CancellationToken,
    observer: Option<Observer<'a>>,
}

impl<'a> ReparseJob<'a> {
    /// Create a job with default options
    pub fn new(
        pipeline: &'a Pipeline,
        profile: &'a LanguageProfile,
        snapshot: &'a VocabularySnapshot,
    ) -> Self {
        Self {
            pipeline,
            profile,
            snapshot,
            lemmas: None,
            options: ReparseOptions::default(),
            cancel: CancellationToken::new(),
            observer: None,
        }
    }

    /// Annotate lemmas from a dictionary
    pub fn lemmas(mut self, lemmas: &'a LemmaDictionary) -> Self {
        self.lemmas = Some(lemmas);
        self
    }

    /// Set the run options
    pub fn options(mut self, options: ReparseOptions) -> Self {
        self.options = options;
        self
    }

    /// Use an external cancellation token
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Called once per text as soon as its outcome is known
    pub fn on_outcome(mut self, observer: impl Fn(TextId, &TextOutcome) + Send + Sync + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Token that cancels this job
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run over `texts`, handing successful results to `sink`
    pub fn run(&self, texts: &[TextRecord], sink: Option<&dyn TextSink>) -> Result<ReparseReport> {
        let stop = AtomicBool::new(false);
        log::info!(
            "re-tokenizing {} texts as '{}'",
            texts.len(),
            self.profile.code()
        );

        let outcomes = self.run_all(texts, sink, &stop)?;
        let report = ReparseReport { outcomes };

        log::info!(
            "re-tokenization finished: {} completed, {} failed, {} skipped",
            report.completed(),
            report.failed(),
            report.skipped()
        );
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn run_all(
        &self,
        texts: &[TextRecord],
        sink: Option<&dyn TextSink>,
        stop: &AtomicBool,
    ) -> Result<Vec<(TextId, TextOutcome)>> {
        let threads = self.options.threads.unwrap_or_else(num_cpus::get).max(1);
        if threads == 1 {
            return Ok(texts.iter().map(|t| self.process(t, sink, stop)).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("shiori-reparse-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        Ok(pool.install(|| {
            texts
                .par_iter()
                .map(|t| self.process(t, sink, stop))
                .collect()
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(
        &self,
        texts: &[TextRecord],
        sink: Option<&dyn TextSink>,
        stop: &AtomicBool,
    ) -> Result<Vec<(TextId, TextOutcome)>> {
        if self.options.threads == Some(0) {
            return Err(EngineError::Configuration(
                "thread count must be greater than 0".to_string(),
            ));
        }
        Ok(texts.iter().map(|t| self.process(t, sink, stop)).collect())
    }

    fn process(
        &self,
        text: &TextRecord,
        sink: Option<&dyn TextSink>,
        stop: &AtomicBool,
    ) -> (TextId, TextOutcome) {
        let outcome = if self.cancel.is_cancelled() {
            TextOutcome::Skipped(SkipReason::Cancelled)
        } else if stop.load(Ordering::SeqCst) {
            TextOutcome::Skipped(SkipReason::StoppedAfterFailure)
        } else {
            let outcome = self.reparse(text, sink);
            if let TextOutcome::Failed(reason) = &outcome {
                log::warn!("{} failed: {reason}", text.id);
                if !self.options.continue_on_error {
                    stop.store(true, Ordering::SeqCst);
                }
            }
            outcome
        };

        if let Some(observer) = &self.observer {
            observer(text.id, &outcome);
        }
        (text.id, outcome)
    }

    fn reparse(&self, text: &TextRecord, sink: Option<&dyn TextSink>) -> TextOutcome {
        let annotated =
            match self
                .pipeline
                .annotate(&text.content, self.profile, self.snapshot, self.lemmas)
            {
                Ok(annotated) => annotated,
                Err(e) => return TextOutcome::Failed(e.to_string()),
            };

        if let Some(sink) = sink {
            if let Err(e) = sink.store(text.id, &annotated) {
                return TextOutcome::Failed(format!("storage failed: {e}"));
            }
        }

        TextOutcome::Completed {
            sentences: annotated.sentences().len(),
            tokens: annotated.items().len(),
            groups: annotated.groups.len(),
        }
    }
}

impl fmt::Debug for ReparseJob<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReparseJob")
            .field("profile", &self.profile.code())
            .field("terms", &self.snapshot.len())
            .field("options", &self.options)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
