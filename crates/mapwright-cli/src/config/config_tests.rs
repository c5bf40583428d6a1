#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// Config parsing tests

#[test]
fn Config___from_str___parses_full_config() {
    let toml = r#"
[gen]
input = "src/film.rs"
imports = ["super::*", "crate::model::Film"]
formatter = "rustfmt"
edition = "2021"

[log]
level = "debug"
"#;

    let config = Config::from_str(toml).unwrap();

    assert_eq!(config.generate.input, Some(PathBuf::from("src/film.rs")));
    assert_eq!(config.generate.imports, vec!["super::*", "crate::model::Film"]);
    assert_eq!(config.generate.formatter, FormatterKind::Rustfmt);
    assert_eq!(config.generate.edition, "2021");
    assert_eq!(config.log.level, "debug");
}

#[test]
fn Config___from_str___empty_config_uses_defaults() {
    let config = Config::from_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.generate.imports, vec!["super::*"]);
    assert_eq!(config.generate.formatter, FormatterKind::Rustfmt);
    assert_eq!(config.generate.edition, "2024");
    assert_eq!(config.log.level, "warn");
}

#[test]
fn Config___from_str___empty_imports_list_is_kept() {
    let config = Config::from_str("[gen]\nimports = []\n").unwrap();

    assert!(config.generate.imports.is_empty());
}

#[test]
fn Config___from_str___builtin_formatter_is_opt_in() {
    let config = Config::from_str("[gen]\nformatter = \"builtin\"\n").unwrap();

    assert_eq!(config.generate.formatter, FormatterKind::Builtin);
}

#[test]
fn Config___from_str___rejects_unknown_formatter() {
    let result = Config::from_str("[gen]\nformatter = \"prettier\"\n");

    assert!(result.is_err());
}

#[test]
fn Config___from_file___missing_file_returns_error() {
    let result = Config::from_file("/nonexistent/mapwright.toml");

    assert!(result.is_err());
}

// Config validation tests

#[test]
fn Config___validate___accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test_case(" " ; "blank")]
#[test_case("" ; "empty")]
fn Config___validate___rejects_empty_import(import: &str) {
    let mut config = Config::default();
    config.generate.imports.push(import.to_string());

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("Import paths cannot be empty"));
}

#[test]
fn Config___validate___rejects_empty_input() {
    let mut config = Config::default();
    config.generate.input = Some(PathBuf::new());

    assert!(config.validate().is_err());
}

#[test_case("trace")]
#[test_case("debug")]
#[test_case("info")]
#[test_case("warn")]
#[test_case("error")]
#[test_case("off")]
fn Config___validate___accepts_log_level(level: &str) {
    let mut config = Config::default();
    config.log.level = level.to_string();

    assert!(config.validate().is_ok());
}

#[test_case("2015")]
#[test_case("2018")]
#[test_case("2021")]
#[test_case("2024")]
fn Config___validate___accepts_edition(edition: &str) {
    let mut config = Config::default();
    config.generate.edition = edition.to_string();

    assert!(config.validate().is_ok());
}

#[test]
fn Config___validate___rejects_unknown_edition() {
    let mut config = Config::default();
    config.generate.edition = "2023".to_string();

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("Invalid edition: 2023"));
}

#[test]
fn Config___validate___rejects_unknown_log_level() {
    let mut config = Config::default();
    config.log.level = "loud".to_string();

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("Invalid log level: loud"));
}

// Input resolution tests

fn config_with_input(input: &str) -> Config {
    let mut config = Config::default();
    config.generate.input = Some(PathBuf::from(input));
    config
}

#[test]
fn Config___resolve_input___flag_wins() {
    let config = config_with_input("from_config.rs");

    let input = config
        .resolve_input_from(Some("from_flag.rs".to_string()), Some("from_env.rs".to_string()))
        .unwrap();

    assert_eq!(input, PathBuf::from("from_flag.rs"));
}

#[test]
fn Config___resolve_input___env_beats_config() {
    let config = config_with_input("from_config.rs");

    let input = config
        .resolve_input_from(None, Some("from_env.rs".to_string()))
        .unwrap();

    assert_eq!(input, PathBuf::from("from_env.rs"));
}

#[test]
fn Config___resolve_input___empty_env_falls_back_to_config() {
    let config = config_with_input("from_config.rs");

    let input = config.resolve_input_from(None, Some(String::new())).unwrap();

    assert_eq!(input, PathBuf::from("from_config.rs"));
}

#[test]
fn Config___resolve_input___nothing_set_returns_error() {
    let err = Config::default().resolve_input_from(None, None).unwrap_err();

    assert!(err.to_string().contains(INPUT_ENV));
}
