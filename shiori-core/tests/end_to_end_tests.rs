//! End-to-end tests over the internal tokenization path

use shiori_core::{
    language, tokenize_internal, AnnotatedText, InternalRules, LanguageProfile, LemmaDictionary,
    MultiWordOverlay, TermId, Tokenization, VocabularySnapshot,
};

fn rules_of(profile: &LanguageProfile) -> InternalRules {
    match profile.tokenization() {
        Tokenization::Internal(rules) => *rules,
        Tokenization::External(parser) => panic!("unexpected parser {}", parser.parser_type()),
    }
}

fn surfaces_per_sentence(profile: &LanguageProfile, text: &str) -> Vec<Vec<String>> {
    let stream = tokenize_internal(text, profile, rules_of(profile));
    stream
        .sentences()
        .iter()
        .map(|s| stream.tokens_of(s).iter().map(|t| t.surface.clone()).collect())
        .collect()
}

#[test]
fn test_cat_sat_example() {
    let profile = LanguageProfile::builder("en")
        .word_chars("a-zA-Z")
        .sentence_split(".!?")
        .build()
        .unwrap();
    let stream = tokenize_internal("The cat sat. It slept!", &profile, InternalRules::default());

    assert_eq!(stream.sentences().len(), 2);
    let first = stream.tokens_of(&stream.sentences()[0]);
    let second = stream.tokens_of(&stream.sentences()[1]);

    let surfaces: Vec<&str> = first.iter().map(|t| t.surface.as_str()).collect();
    let flags: Vec<bool> = first.iter().map(|t| t.is_word).collect();
    assert_eq!(surfaces, vec!["The", "cat", "sat", "."]);
    assert_eq!(flags, vec![true, true, true, false]);

    let surfaces: Vec<&str> = second.iter().map(|t| t.surface.as_str()).collect();
    let flags: Vec<bool> = second.iter().map(|t| t.is_word).collect();
    assert_eq!(surfaces, vec!["It", "slept", "!"]);
    assert_eq!(flags, vec![true, true, false]);
}

#[test]
fn test_abbreviation_exception() {
    let profile = LanguageProfile::builder("en")
        .word_chars("a-zA-Z")
        .sentence_split(".")
        .exceptions(["Mr."])
        .build()
        .unwrap();
    let stream = tokenize_internal(
        "Mr. Smith went home. He left.",
        &profile,
        InternalRules::default(),
    );
    assert_eq!(stream.sentences().len(), 2);
    assert_eq!(stream.sentences()[0].text, "Mr. Smith went home.");
}

#[test]
fn test_builtin_english_abbreviations() {
    let profile = language::builtin("en").unwrap();
    let sentences = surfaces_per_sentence(&profile, "Dr. Who met Prof. Oak at 3 p.m. today. Fine.");
    assert_eq!(sentences.len(), 2);
}

#[test]
fn test_builtin_japanese_splits_each_char() {
    let profile = language::builtin("ja").unwrap();
    let sentences = surfaces_per_sentence(&profile, "日本語を話す。 はい！");
    assert_eq!(
        sentences,
        vec![
            vec!["日", "本", "語", "を", "話", "す", "。"],
            vec!["は", "い", "！"],
        ]
    );

    let stream = tokenize_internal("日本語を話す。 はい！", &profile, rules_of(&profile));
    assert!(stream.items().iter().all(|i| i.separator.is_empty()));
}

#[test]
fn test_three_ideographs() {
    let profile = language::builtin("zh").unwrap();
    let stream = tokenize_internal("中文字", &profile, rules_of(&profile));
    assert_eq!(stream.len(), 3);
    assert!(stream.items().iter().all(|i| i.is_word && i.surface.chars().count() == 1));
}

#[test]
fn test_arabic_question_mark() {
    let profile = language::builtin("ar").unwrap();
    let stream = tokenize_internal("كيف حالك؟ أنا بخير.", &profile, rules_of(&profile));
    assert_eq!(stream.sentences().len(), 2);
    assert!(profile.is_right_to_left());
}

#[test]
fn test_full_annotation() {
    let profile = language::builtin("en").unwrap();
    let text = "She gave up on it. Then she gave it up!";
    let stream = tokenize_internal(text, &profile, rules_of(&profile));

    let snapshot = VocabularySnapshot::from_expressions(
        &profile,
        [(TermId(7), "gave up"), (TermId(8), "gave it up")],
    );
    let groups = MultiWordOverlay::new(&snapshot).apply(&stream);

    let mut annotated = AnnotatedText::new(profile.code(), profile.direction(), stream, groups);
    let lemmas = LemmaDictionary::from_tsv_str("gave\tgive\n").unwrap();
    assert_eq!(lemmas.annotate(&mut annotated.stream), 2);

    assert_eq!(annotated.groups.len(), 2);
    assert_eq!(annotated.groups[0].term_id, TermId(7));
    assert_eq!(annotated.groups[1].term_id, TermId(8));
    assert_eq!(annotated.groups[1].token_count(), 3);
    assert_eq!(annotated.items()[1].lemma.as_deref(), Some("give"));
    assert_eq!(annotated.stream.reconstruct_text(), text);
}
