//! Integration tests for the mapwright binary.
//!
//! Runs `mapwright gen` and `mapwright spec` against files in a temporary
//! directory and checks outputs and exit codes.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FILM_MAPPER: &str = include_str!("testdata/film/film.rs");
const FILM_EXPECTED: &str = include_str!("testdata/film/expected.rs");

/// Helper to write an input file into the temp dir.
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Helper to run the binary in `dir` with a clean environment.
fn mapwright(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapwright"))
        .args(args)
        .current_dir(dir)
        .env_remove("MAPWRIGHT_FILE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Helper to check for `rustfmt` on `PATH`; tests of the default
/// formatter return early without it.
fn rustfmt_available() -> bool {
    Command::new("rustfmt")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

const BUILTIN_CONFIG: &str = "[gen]\nformatter = \"builtin\"\n";

// =============================================================================
// Gen Tests
// =============================================================================

mod gen_command {
    use super::*;

    #[test]
    fn gen___film_mapper___default_formatter_writes_expected_output() {
        if !rustfmt_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "src/film.rs", FILM_MAPPER);

        let output = mapwright(dir.path(), &["gen", "-i", "src/film.rs", "-o", "film_gen.rs"]);

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let generated = fs::read_to_string(dir.path().join("src/film_gen.rs")).unwrap();
        assert_eq!(generated, FILM_EXPECTED);
    }

    #[test]
    fn gen___film_mapper___builtin_formatter_writes_expected_output() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "src/film.rs", FILM_MAPPER);
        write_file(&dir, "mapwright.toml", BUILTIN_CONFIG);

        let output = mapwright(dir.path(), &["gen", "-i", "src/film.rs", "-o", "film_gen.rs"]);

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let generated = fs::read_to_string(dir.path().join("src/film_gen.rs")).unwrap();
        assert_eq!(generated, FILM_EXPECTED);
    }

    #[test]
    fn gen___run_twice___output_is_unchanged() {
        if !rustfmt_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);

        mapwright(dir.path(), &["gen", "-i", "film.rs", "-o", "film_gen.rs"]);
        let first = fs::read(dir.path().join("film_gen.rs")).unwrap();
        mapwright(dir.path(), &["gen", "-i", "film.rs", "-o", "film_gen.rs"]);
        let second = fs::read(dir.path().join("film_gen.rs")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn gen___input_from_environment___is_used() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);
        write_file(&dir, "mapwright.toml", BUILTIN_CONFIG);

        let output = Command::new(env!("CARGO_BIN_EXE_mapwright"))
            .args(["gen", "-o", "film_gen.rs"])
            .current_dir(dir.path())
            .env("MAPWRIGHT_FILE", "film.rs")
            .env_remove("RUST_LOG")
            .output()
            .unwrap();

        assert!(output.status.success());
        assert!(dir.path().join("film_gen.rs").exists());
    }

    #[test]
    fn gen___input_from_config___uses_config_imports() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "src/film.rs", FILM_MAPPER);
        write_file(
            &dir,
            "mapwright.toml",
            "[gen]\ninput = \"src/film.rs\"\nimports = [\"crate::model::*\"]\nformatter = \"builtin\"\n",
        );

        let output = mapwright(dir.path(), &["gen", "-o", "film_gen.rs"]);

        assert!(output.status.success());
        let generated = fs::read_to_string(dir.path().join("src/film_gen.rs")).unwrap();
        assert!(generated.contains("\nuse crate::model::*;\n"));
    }

    #[test]
    fn gen___explicit_config_path___is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);
        write_file(&dir, "conf/custom.toml", "[gen]\nimports = []\nformatter = \"builtin\"\n");

        let output = mapwright(
            dir.path(),
            &["gen", "-i", "film.rs", "-o", "film_gen.rs", "-c", "conf/custom.toml"],
        );

        assert!(output.status.success());
        let generated = fs::read_to_string(dir.path().join("film_gen.rs")).unwrap();
        assert!(!generated.contains("use "));
    }

    #[test]
    fn gen___no_mappers___writes_nothing_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "plain.rs", "pub struct Plain;\n");

        let output = mapwright(dir.path(), &["gen", "-i", "plain.rs", "-o", "plain_gen.rs"]);

        assert!(output.status.success());
        assert!(!dir.path().join("plain_gen.rs").exists());
    }
}

// =============================================================================
// Exit Code Tests
// =============================================================================

mod exit_codes {
    use super::*;

    fn gen_exit_code(source: &str) -> (Option<i32>, bool) {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "input.rs", source);

        let output = mapwright(dir.path(), &["gen", "-i", "input.rs", "-o", "out.rs"]);

        (output.status.code(), dir.path().join("out.rs").exists())
    }

    #[test]
    fn gen___invalid_rust___exits_2_without_output() {
        let (code, written) = gen_exit_code("pub trait {");

        assert_eq!(code, Some(2));
        assert!(!written);
    }

    #[test]
    fn gen___marker_on_struct___exits_3_without_output() {
        let (code, written) = gen_exit_code("/// +mapwright:mapper\npub struct Film;\n");

        assert_eq!(code, Some(3));
        assert!(!written);
    }

    #[test]
    fn gen___bad_directive___exits_4_without_output() {
        let source = "/// +mapwright:mapper\npub trait M {\n    /// +mapwright:ignore:\n    fn f(&self, a: A) -> B;\n}\n";

        let (code, written) = gen_exit_code(source);

        assert_eq!(code, Some(4));
        assert!(!written);
    }

    #[test]
    fn gen___two_results___exits_4_without_output() {
        let source = "/// +mapwright:mapper\npub trait M {\n    fn f(&self, a: A) -> (B, C);\n}\n";

        let (code, written) = gen_exit_code(source);

        assert_eq!(code, Some(4));
        assert!(!written);
    }

    #[test]
    fn gen___unbuildable_result___writes_placeholder_and_exits_5() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "input.rs", "/// +mapwright:mapper\npub trait M {\n    fn f(&self) -> [u8; 4];\n}\n");

        let output = mapwright(dir.path(), &["gen", "-i", "input.rs", "-o", "out.rs"]);

        assert_eq!(output.status.code(), Some(5));
        let text = fs::read_to_string(dir.path().join("out.rs")).unwrap();
        assert!(text.starts_with("<<<TEMPLATE ERROR:"));
    }

    #[test]
    fn gen___rustfmt_missing___writes_format_placeholder_and_exits_5() {
        let dir = tempfile::tempdir().unwrap();
        let empty_path = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);

        let output = Command::new(env!("CARGO_BIN_EXE_mapwright"))
            .args(["gen", "-i", "film.rs", "-o", "film_gen.rs"])
            .current_dir(dir.path())
            .env("PATH", empty_path.path())
            .env_remove("MAPWRIGHT_FILE")
            .env_remove("RUST_LOG")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(5));
        let text = fs::read_to_string(dir.path().join("film_gen.rs")).unwrap();
        assert!(text.starts_with("<<<FORMAT ERROR: failed to run rustfmt"), "{text}");
    }

    #[test]
    fn gen___unknown_flag___exits_1() {
        let dir = tempfile::tempdir().unwrap();

        let output = mapwright(dir.path(), &["gen", "--bogus"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("--bogus"));
    }

    #[test]
    fn missing_subcommand___exits_1() {
        let dir = tempfile::tempdir().unwrap();

        let output = mapwright(dir.path(), &[]);

        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn help___exits_0() {
        let dir = tempfile::tempdir().unwrap();

        let output = mapwright(dir.path(), &["--help"]);

        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stdout).contains("gen"));
    }

    #[test]
    fn gen___no_input_anywhere___exits_1() {
        let dir = tempfile::tempdir().unwrap();

        let output = mapwright(dir.path(), &["gen", "-o", "out.rs"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("No input file"));
    }

    #[test]
    fn gen___invalid_config___exits_1() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);
        write_file(&dir, "mapwright.toml", "[gen]\nformatter = \"prettier\"\n");

        let output = mapwright(dir.path(), &["gen", "-i", "film.rs", "-o", "out.rs"]);

        assert_eq!(output.status.code(), Some(1));
    }
}

// =============================================================================
// Spec Tests
// =============================================================================

mod spec_command {
    use super::*;

    #[test]
    fn spec___film_mapper___prints_json_tree() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "film.rs", FILM_MAPPER);

        let output = mapwright(dir.path(), &["spec", "-i", "film.rs"]);

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let function = &value["mappers"][0]["functions"][0];
        assert_eq!(value["module"], "film");
        assert_eq!(function["name"], "to_internal_user_film");
        assert_eq!(function["result"], "InternalUserFilm");
        assert_eq!(function["directives"][3]["kind"], "link_func");
        assert_eq!(function["directives"][3]["function"], "to_internal_user");
    }
}
