//! Bulk re-tokenization through the public API

use shiori_engine::shiori_core::{
    language, AnnotatedText, MultiWordTerm, TermId, VocabularySnapshot,
};
use shiori_engine::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MemoryStore {
    texts: Mutex<BTreeMap<TextId, AnnotatedText>>,
}

impl TextSink for MemoryStore {
    fn store(&self, id: TextId, text: &AnnotatedText) -> std::result::Result<(), SinkError> {
        self.texts.lock().unwrap().insert(id, text.clone());
        Ok(())
    }
}

fn records(contents: &[&str]) -> Vec<TextRecord> {
    contents
        .iter()
        .enumerate()
        .map(|(i, content)| TextRecord::new(i as u64 + 1, *content))
        .collect()
}

#[test]
fn test_reparse_stores_groups_per_text() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let profile = language::builtin("en").unwrap();
    let snapshot = VocabularySnapshot::new([MultiWordTerm::new(TermId(7), ["give", "up"])]);
    let store = MemoryStore::default();

    let texts = records(&["Never give up.", "They gave up.", "Give up now. Or not."]);
    let report = ReparseJob::new(&pipeline, &profile, &snapshot)
        .run(&texts, Some(&store))
        .unwrap();

    assert!(report.is_complete());
    let stored = store.texts.lock().unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[&TextId(1)].groups.len(), 1);
    assert!(stored[&TextId(2)].groups.is_empty());
    assert_eq!(stored[&TextId(3)].groups[0].term_id, TermId(7));
    assert_eq!(stored[&TextId(3)].sentences().len(), 2);
}

#[test]
fn test_outcomes_follow_input_order() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let profile = language::builtin("en").unwrap();
    let snapshot = VocabularySnapshot::default();

    let contents: Vec<String> = (0..40).map(|i| format!("Text {i} is here.")).collect();
    let texts: Vec<TextRecord> = contents
        .iter()
        .enumerate()
        .map(|(i, c)| TextRecord::new(i as u64, c.clone()))
        .collect();

    let report = ReparseJob::new(&pipeline, &profile, &snapshot)
        .options(ReparseOptions {
            continue_on_error: true,
            threads: Some(4),
        })
        .run(&texts, None)
        .unwrap();

    let ids: Vec<u64> = report.outcomes().iter().map(|(id, _)| id.0).collect();
    assert_eq!(ids, (0..40).collect::<Vec<_>>());
    assert_eq!(report.completed(), 40);
}

#[test]
fn test_observer_sees_every_text() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let profile = language::builtin("en").unwrap();
    let snapshot = VocabularySnapshot::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let report = ReparseJob::new(&pipeline, &profile, &snapshot)
        .on_outcome(move |id, outcome| sink.lock().unwrap().push((id, outcome.is_completed())))
        .run(&records(&["One.", "Two.", "Three."]), None)
        .unwrap();

    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(
        seen,
        vec![(TextId(1), true), (TextId(2), true), (TextId(3), true)]
    );
    assert!(!report.was_cancelled());
}

#[cfg(unix)]
mod external {
    use super::*;
    use shiori_engine::shiori_core::{
        ExternalParserConfig, InputMode, LanguageProfile, OutputFormat,
    };

    /// Echoes its input unless it contains "bad"
    fn picky_profile() -> LanguageProfile {
        let parser = ExternalParserConfig::new(
            "picky",
            "Picky parser",
            "sh",
            vec![
                "-c".to_string(),
                r#"input=$(cat); case "$input" in *bad*) echo rejected >&2; exit 1;; esac; printf '%s' "$input""#
                    .to_string(),
            ],
            InputMode::Stdin,
            OutputFormat::Wakati,
        )
        .unwrap();
        LanguageProfile::builder("picky")
            .word_chars("a-z")
            .parser(parser)
            .build()
            .unwrap()
    }

    #[test]
    fn test_failure_stops_run_by_default() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let profile = picky_profile();
        let snapshot = VocabularySnapshot::default();
        let store = MemoryStore::default();

        let report = ReparseJob::new(&pipeline, &profile, &snapshot)
            .options(ReparseOptions {
                continue_on_error: false,
                threads: Some(1),
            })
            .run(&records(&["fine text.", "bad text.", "more text."]), Some(&store))
            .unwrap();

        assert_eq!(report.completed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.outcome(TextId(3)),
            Some(&TextOutcome::Skipped(SkipReason::StoppedAfterFailure))
        );
        let stored = store.texts.lock().unwrap();
        assert_eq!(stored.keys().copied().collect::<Vec<_>>(), vec![TextId(1)]);
    }

    #[test]
    fn test_continue_on_error_processes_the_rest() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let profile = picky_profile();
        let snapshot = VocabularySnapshot::default();
        let store = MemoryStore::default();

        let report = ReparseJob::new(&pipeline, &profile, &snapshot)
            .options(ReparseOptions {
                continue_on_error: true,
                threads: Some(2),
            })
            .run(&records(&["fine text.", "bad text.", "more text."]), Some(&store))
            .unwrap();

        assert_eq!(report.completed(), 2);
        assert_eq!(report.failed(), 1);
        match report.outcome(TextId(2)) {
            Some(TextOutcome::Failed(reason)) => assert!(reason.contains("rejected")),
            other => panic!("unexpected outcome {other:?}"),
        }
        let stored = store.texts.lock().unwrap();
        assert!(!stored.contains_key(&TextId(2)));
        assert_eq!(stored.len(), 2);
    }
}
