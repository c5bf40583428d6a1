//! Configuration file parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// Default configuration file, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "mapwright.toml";

/// Environment variable naming the input file
pub const INPUT_ENV: &str = "MAPWRIGHT_FILE";

const EDITIONS: [&str; 4] = ["2015", "2018", "2021", "2024"];

/// mapwright.toml structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, rename = "gen")]
    pub generate: GenerateSection,

    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateSection {
    /// Input file used when neither `-i` nor the environment names one
    #[serde(default)]
    pub input: Option<PathBuf>,

    #[serde(default = "default_imports")]
    pub imports: Vec<String>,

    #[serde(default)]
    pub formatter: FormatterKind,

    /// Edition passed to `rustfmt`
    #[serde(default = "default_edition")]
    pub edition: String,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            input: None,
            imports: default_imports(),
            formatter: FormatterKind::default(),
            edition: default_edition(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Pipe generated source through `rustfmt`
    #[default]
    Rustfmt,

    /// Syntax check plus whitespace normalization, no external tools
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_imports() -> Vec<String> {
    vec!["super::*".to_string()]
}

fn default_edition() -> String {
    "2024".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse config from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the config for a command
    ///
    /// An explicit path must exist. Without one, `mapwright.toml` in the
    /// current directory is used if present, else the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        for import in &self.generate.imports {
            if import.trim().is_empty() {
                anyhow::bail!("Import paths cannot be empty");
            }
        }

        if !EDITIONS.contains(&self.generate.edition.as_str()) {
            anyhow::bail!("Invalid edition: {}", self.generate.edition);
        }

        if let Some(input) = &self.generate.input {
            if input.as_os_str().is_empty() {
                anyhow::bail!("Input path cannot be empty");
            }
        }

        self.log
            .level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.log.level))?;

        Ok(())
    }

    /// Pick the input file: `-i` flag, then `MAPWRIGHT_FILE`, then config
    pub fn resolve_input(&self, flag: Option<String>) -> Result<PathBuf> {
        self.resolve_input_from(flag, std::env::var(INPUT_ENV).ok())
    }

    fn resolve_input_from(&self, flag: Option<String>, env: Option<String>) -> Result<PathBuf> {
        flag.or(env.filter(|value| !value.is_empty()))
            .map(PathBuf::from)
            .or_else(|| self.generate.input.clone())
            .with_context(|| {
                format!("No input file: pass -i, set {INPUT_ENV}, or set gen.input in the config")
            })
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
