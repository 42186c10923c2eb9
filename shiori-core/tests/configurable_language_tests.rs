//! Loading language profiles and parser catalogs from TOML files

use shiori_core::{
    tokenize_internal, InputMode, LanguageProfile, OutputFormat, ParserCatalog, Tokenization,
};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_profile_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "german.toml",
        r#"
[metadata]
code = "de"
name = "German"

[words]
chars = "a-zA-ZäöüÄÖÜß"

[sentences]
split_chars = ".!?"
exceptions = ["z.B.", "Nr."]
"#,
    );

    let profile = LanguageProfile::from_file(&path, &ParserCatalog::new()).unwrap();
    assert_eq!(profile.name(), "German");

    let Tokenization::Internal(rules) = profile.tokenization() else {
        panic!("expected internal tokenization");
    };
    let stream = tokenize_internal("Das ist z.B. gut. Straße Nr. 5 ist weit.", &profile, *rules);
    assert_eq!(stream.sentences().len(), 2);
    assert!(stream.items().iter().any(|i| i.surface == "Straße" && i.is_word));
}

#[test]
fn test_profile_with_inline_parser() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "thai.toml",
        r#"
[metadata]
code = "th"
name = "Thai"

[words]
chars = "\\p{Thai}"
remove_spaces = true

[parser]
type = "thai-seg"
name = "Thai segmenter"
binary = "/opt/bin/thaiseg"
args = ["--in", "{file}"]
input_mode = "file"
output_format = "line"
"#,
    );

    let profile = LanguageProfile::from_file(&path, &ParserCatalog::new()).unwrap();
    let parser = profile.parser().unwrap();
    assert_eq!(parser.input_mode(), InputMode::File);
    assert_eq!(parser.output_format(), OutputFormat::Line);
    assert_eq!(parser.binary(), "/opt/bin/thaiseg");
}

#[test]
fn test_catalog_file_and_reference() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(
        &dir,
        "parsers.toml",
        r#"
[[parser]]
type = "kuromoji"
name = "Kuromoji"
binary = "kuromoji-cli"
output_format = "wakati"
"#,
    );
    let mut catalog = ParserCatalog::builtin().unwrap();
    catalog.extend(ParserCatalog::from_file(&catalog_path).unwrap());
    assert_eq!(catalog.len(), 3);

    let profile = LanguageProfile::from_toml_str(
        r#"
[metadata]
code = "ja-k"
name = "Japanese (Kuromoji)"

[words]
chars = "\\p{Han}\\p{Hiragana}\\p{Katakana}"

[parser]
use = "kuromoji"
"#,
        &catalog,
    )
    .unwrap();
    assert_eq!(profile.parser().unwrap().name(), "Kuromoji");
}

#[test]
fn test_invalid_profiles_are_rejected() {
    let catalog = ParserCatalog::new();

    let bad_class = r#"
[metadata]
code = "xx"
name = "Broken"

[words]
chars = "a-z]["
"#;
    let err = LanguageProfile::from_toml_str(bad_class, &catalog).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("word_chars"));

    let empty_binary = r#"
[metadata]
code = "xx"
name = "Broken"

[words]
chars = "a-z"

[parser]
type = "x"
name = "X"
binary = ""
output_format = "line"
"#;
    let err = LanguageProfile::from_toml_str(empty_binary, &catalog).unwrap_err();
    assert!(err.to_string().contains("'binary' must not be empty"));

    let bad_mode = r#"
[metadata]
code = "xx"
name = "Broken"

[words]
chars = "a-z"

[parser]
type = "x"
name = "X"
binary = "x"
input_mode = "socket"
output_format = "line"
"#;
    let err = LanguageProfile::from_toml_str(bad_mode, &catalog).unwrap_err();
    assert!(err.to_string().contains("input_mode"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = LanguageProfile::from_file(&dir.path().join("missing.toml"), &ParserCatalog::new())
        .unwrap_err();
    assert!(!err.is_configuration());
}
