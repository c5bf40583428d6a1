//! Error types for mapper generation

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for generation operations
pub type MapwrightResult<T> = Result<T, MapwrightError>;

/// Position of a declaration in the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    /// 1-based line
    pub line: usize,

    /// 0-based column
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location of the first token of a syntax node
    pub fn of(node: &impl syn::spanned::Spanned) -> Self {
        let start = node.span().start();
        Self::new(start.line, start.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, column {}]", self.line, self.column)
    }
}

/// Error type for the generation pipeline
///
/// Every variant is fatal for the file being processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapwrightError {
    /// The input is not valid Rust
    #[error("could not parse source: {0}")]
    Parse(String),

    /// A mapper declaration does not have the expected shape
    #[error("unexpected declaration shape {location}: {message}")]
    Structural { location: Location, message: String },

    /// A directive or function signature violates the annotation grammar
    #[error("specification error: {0}")]
    Spec(String),
}

impl MapwrightError {
    pub fn structural(location: Location, message: impl Into<String>) -> Self {
        MapwrightError::Structural {
            location,
            message: message.into(),
        }
    }

    pub fn spec(message: impl Into<String>) -> Self {
        MapwrightError::Spec(message.into())
    }

    /// Prefix the message with the mapper it was raised for
    pub fn in_mapper(self, mapper: &str) -> Self {
        match self {
            MapwrightError::Spec(message) => {
                MapwrightError::Spec(format!("cannot create mapper for {mapper}: {message}"))
            }
            MapwrightError::Structural { location, message } => MapwrightError::Structural {
                location,
                message: format!("mapper {mapper}: {message}"),
            },
            other => other,
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            MapwrightError::Parse(_) => 2,
            MapwrightError::Structural { .. } => 3,
            MapwrightError::Spec(_) => 4,
        }
    }
}

impl From<syn::Error> for MapwrightError {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        MapwrightError::Parse(format!(
            "{err} {}",
            Location::new(start.line, start.column)
        ))
    }
}
