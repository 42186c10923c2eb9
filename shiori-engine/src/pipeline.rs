//! Per-text tokenization pipeline
//!
//! segment -> tokenize each sentence -> build the ordered stream, then
//! optionally overlay multi-word terms and annotate lemmas. Sentences are
//! independent, so long texts are tokenized in parallel; collection preserves
//! sentence order. Any sentence failure fails the whole text.

use crate::config::EngineConfig;
#[cfg(feature = "parallel")]
use crate::error::EngineError;
use crate::error::Result;
use crate::registry::ParserRegistry;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use shiori_core::{
    AnnotatedText, InternalWordTokenizer, LanguageProfile, LemmaDictionary, MultiWordOverlay,
    MultiWordTerm, RawToken, SentenceSegmenter, TermId, TokenStream, TokenStreamBuilder,
    Tokenization, VocabularySnapshot,
};
use std::sync::Arc;
use std::time::Instant;

/// Tokenizes whole texts with a shared parser registry
#[derive(Debug)]
pub struct Pipeline {
    registry: Arc<ParserRegistry>,
    config: EngineConfig,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Pipeline {
    /// Create a pipeline; a dedicated thread pool is built when a thread
    /// count is configured
    pub fn new(registry: Arc<ParserRegistry>, config: EngineConfig) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let pool = match config.threads {
            Some(threads) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("shiori-sentence-{i}"))
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?,
            )),
            None => None,
        };

        Ok(Self {
            registry,
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// Pipeline over the built-in parser catalog with default settings
    pub fn with_defaults() -> Result<Self> {
        let config = EngineConfig::default();
        let registry = ParserRegistry::with_builtin(&config)?;
        Self::new(Arc::new(registry), config)
    }

    /// Parser registry used for external profiles
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Segment and tokenize `text`
    ///
    /// The result depends only on `text` and `profile`.
    pub fn tokenize(&self, text: &str, profile: &LanguageProfile) -> Result<TokenStream> {
        let started = Instant::now();
        let spans = SentenceSegmenter::new(profile).segment(text);
        let per_sentence =
            self.map_ordered(&spans, |span| self.tokenize_sentence(span.text, profile))?;

        let keep_separators = match profile.tokenization() {
            Tokenization::Internal(rules) => !rules.remove_spaces,
            Tokenization::External(_) => true,
        };
        let mut builder = TokenStreamBuilder::new(text).keep_separators(keep_separators);
        for (span, tokens) in spans.into_iter().zip(per_sentence) {
            builder.push_sentence(span, tokens);
        }
        let stream = builder.build();

        log::debug!(
            "tokenized {} bytes as '{}': {} sentences, {} tokens in {:?}",
            text.len(),
            profile.code(),
            stream.sentences().len(),
            stream.len(),
            started.elapsed()
        );
        Ok(stream)
    }

    /// Tokenize, overlay multi-word terms and optionally annotate lemmas
    pub fn annotate(
        &self,
        text: &str,
        profile: &LanguageProfile,
        snapshot: &VocabularySnapshot,
        lemmas: Option<&LemmaDictionary>,
    ) -> Result<AnnotatedText> {
        let mut stream = self.tokenize(text, profile)?;
        if let Some(lemmas) = lemmas {
            let annotated = lemmas.annotate(&mut stream);
            log::debug!("annotated {annotated} tokens with lemmas");
        }
        let groups = MultiWordOverlay::new(snapshot).apply(&stream);
        Ok(AnnotatedText::new(
            profile.code(),
            profile.direction(),
            stream,
            groups,
        ))
    }

    /// Build a vocabulary snapshot, splitting each expression into words the
    /// way `profile` splits text
    ///
    /// External profiles run every expression through their parser, so an
    /// unspaced expression such as `学生です` segments like the texts it is
    /// matched against. Blank expressions are skipped.
    pub fn snapshot_from_expressions<I, S>(
        &self,
        profile: &LanguageProfile,
        expressions: I,
    ) -> Result<VocabularySnapshot>
    where
        I: IntoIterator<Item = (TermId, S)>,
        S: AsRef<str>,
    {
        let expressions: Vec<(TermId, String)> = expressions
            .into_iter()
            .filter(|(_, expression)| !expression.as_ref().trim().is_empty())
            .map(|(id, expression)| (id, expression.as_ref().trim().to_string()))
            .collect();

        let terms = self.map_ordered(&expressions, |(id, expression)| {
            let words = self
                .tokenize_sentence(expression, profile)?
                .into_iter()
                .filter(|token| token.is_word)
                .map(|token| token.lowercase);
            Ok(MultiWordTerm::new(*id, words))
        })?;

        let snapshot = VocabularySnapshot::new(terms);
        log::debug!(
            "vocabulary snapshot for '{}': {} of {} expressions are multi-word",
            profile.code(),
            snapshot.len(),
            expressions.len()
        );
        Ok(snapshot)
    }

    fn tokenize_sentence(&self, sentence: &str, profile: &LanguageProfile) -> Result<Vec<RawToken>> {
        match profile.tokenization() {
            Tokenization::Internal(rules) => {
                Ok(InternalWordTokenizer::new(profile.word_chars(), *rules).tokenize(sentence))
            }
            Tokenization::External(parser) => Ok(self
                .registry
                .adapter_for(parser)
                .tokenize(sentence, profile.word_chars())?),
        }
    }

    /// Map `items` in order, in parallel from the configured threshold on
    #[cfg(feature = "parallel")]
    fn map_ordered<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> Result<U> + Sync + Send,
    {
        if items.len() < self.config.parallel_sentence_threshold
            || self.config.effective_threads() == 1
        {
            return items.iter().map(f).collect();
        }

        let run = || items.par_iter().map(&f).collect::<Result<Vec<_>>>();
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_ordered<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>>
    where
        F: Fn(&T) -> Result<U>,
    {
        items.iter().map(f).collect()
    }
}
