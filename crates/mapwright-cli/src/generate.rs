//! `gen` and `spec` commands
//!
//! Both read one annotated Rust file. `gen` writes the mapper
//! implementation next to it; `spec` prints the assembled spec tree.

use crate::config::{Config, FormatterKind, GenerateSection};
use crate::rustfmt::RustfmtFormatter;
use anyhow::{Context, Result};
use mapwright_core::{
    BuiltinFormatter, RenderOptions, SourceFormatter, SynthesisError, generate, read_spec,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Generated text was a placeholder; it was still written for inspection.
#[derive(Error, Debug)]
#[error("{} contains a placeholder instead of generated code: {error}", .path.display())]
pub struct PlaceholderWritten {
    pub path: PathBuf,
    pub error: SynthesisError,
}

impl PlaceholderWritten {
    pub fn exit_code(&self) -> i32 {
        5
    }
}

/// Gen command implementation
///
/// Returns the written path, or `None` when the input declares no mappers.
pub fn run(output: &str, input: Option<String>, config: &Config) -> Result<Option<PathBuf>> {
    let input = config.resolve_input(input)?;
    let source = read_input(&input)?;
    let module = module_name(&input)?;

    let options = RenderOptions {
        imports: config.generate.imports.clone(),
    };
    let formatter = formatter(&config.generate);

    let Some(generated) = generate(&source, &module, &options, formatter.as_ref())? else {
        info!(input = %input.display(), "no mappers found, nothing written");
        return Ok(None);
    };

    let output_path = output_path(&input, output);
    fs::write(&output_path, generated.text())
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;

    if let Some(error) = generated.error() {
        warn!(output = %output_path.display(), "wrote placeholder output");
        return Err(PlaceholderWritten {
            path: output_path,
            error: error.clone(),
        }
        .into());
    }

    info!(output = %output_path.display(), "wrote mapper implementation");
    println!("Generated mappers: {}", output_path.display());

    Ok(Some(output_path))
}

/// Spec command implementation: the spec tree as pretty JSON
pub fn spec(input: Option<String>, config: &Config) -> Result<String> {
    let input = config.resolve_input(input)?;
    let source = read_input(&input)?;
    let module = module_name(&input)?;

    let file = read_spec(&source, &module)?;

    serde_json::to_string_pretty(&file).context("Failed to serialize spec")
}

fn read_input(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("Failed to read input: {}", input.display()))
}

/// Module name of an input file: its file stem
pub fn module_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .with_context(|| format!("Input has no file name: {}", input.display()))
}

/// Output location: relative paths are taken from the input's directory
pub fn output_path(input: &Path, output: &str) -> PathBuf {
    let output = Path::new(output);
    if output.is_absolute() {
        return output.to_path_buf();
    }

    input
        .parent()
        .map(|dir| dir.join(output))
        .unwrap_or_else(|| output.to_path_buf())
}

/// `rustfmt` unless the config opts out; a missing `rustfmt` surfaces as
/// a `<<<FORMAT ERROR` placeholder, never as a silent fallback.
fn formatter(section: &GenerateSection) -> Box<dyn SourceFormatter> {
    match section.formatter {
        FormatterKind::Rustfmt => Box::new(RustfmtFormatter::new(section.edition.as_str())),
        FormatterKind::Builtin => Box::new(BuiltinFormatter),
    }
}
