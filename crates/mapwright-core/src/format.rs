//! Source formatting for generated code.

use thiserror::Error;

/// Formatting failure, carrying the formatter's diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FormatError(pub String);

/// Turns rendered source into its final, canonical form.
///
/// Implementations must be deterministic: the same input always yields the
/// same output.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Formatter that needs no external tools.
///
/// Not canonical: long lines are left as rendered. Used when `rustfmt` is
/// unavailable by choice. Verifies the source parses as a Rust file, then
/// normalizes whitespace:
/// trailing spaces are removed, runs of blank lines collapse to one, and the
/// text ends with exactly one newline. Comments are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl SourceFormatter for BuiltinFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        syn::parse_file(source).map_err(|err| {
            let start = err.span().start();
            FormatError(format!("{err} at line {}", start.line))
        })?;

        Ok(normalize_whitespace(source))
    }
}

fn normalize_whitespace(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut pending_blank = false;

    for line in source.lines().map(str::trim_end) {
        if line.is_empty() {
            pending_blank = !output.is_empty();
            continue;
        }
        if pending_blank {
            output.push('\n');
            pending_blank = false;
        }
        output.push_str(line);
        output.push('\n');
    }

    output
}
