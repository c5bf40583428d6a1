//! Formatting through an external `rustfmt`

use mapwright_core::{FormatError, SourceFormatter};
use std::io::Write;
use std::process::{Command, Stdio};

/// Edition used when none is configured, matching this workspace
pub const DEFAULT_EDITION: &str = "2024";

/// Formats generated source by piping it through `rustfmt`.
#[derive(Debug, Clone)]
pub struct RustfmtFormatter {
    program: String,
    edition: String,
}

impl Default for RustfmtFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_EDITION)
    }
}

impl RustfmtFormatter {
    /// `rustfmt` from `PATH`, formatting for `edition`
    pub fn new(edition: impl Into<String>) -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: edition.into(),
        }
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl SourceFormatter for RustfmtFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| FormatError(format!("failed to run {}: {err}", self.program)))?;

        // stdin is dropped at the end of this block so rustfmt sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        // The child is reaped even when the write failed
        let output = child
            .wait_with_output()
            .map_err(|err| FormatError(format!("failed to wait for {}: {err}", self.program)))?;

        written.map_err(|err| FormatError(format!("failed to write to {}: {err}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError(stderr.trim().to_string()));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| FormatError(format!("{} produced invalid UTF-8: {err}", self.program)))
    }
}
