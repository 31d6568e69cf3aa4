//! Analyzer configuration, loaded from the `[analyzer]` table of `lamb.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::lexer::{ColumnMode, LexerOptions};
use crate::parser::{guards, ParseOptions};

/// Name of the manifest file the CLI looks for.
pub const MANIFEST_FILE: &str = "lamb.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the manifest file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Manifest layout; only the `[analyzer]` table is read.
#[derive(Debug, Clone, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    analyzer: AnalyzerConfig,
}

/// Settings for both analysis stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Column numbering of tokens and diagnostics
    pub columns: ColumnMode,
    /// Per-statement diagnostic ceiling for the repair search
    pub max_errors: usize,
    /// Maximum parenthesis nesting
    pub max_depth: usize,
    /// Record derivation traces
    pub trace: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMode::default(),
            max_errors: guards::MAX_ERRORS_PER_STATEMENT,
            max_depth: guards::MAX_PAREN_DEPTH,
            trace: false,
        }
    }
}

impl AnalyzerConfig {
    /// Load from a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse manifest text. A manifest without `[analyzer]` yields defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.analyzer.validate()?;
        Ok(manifest.analyzer)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.max_errors) {
            return Err(ConfigError::ValidationError(format!(
                "max-errors must be between 1 and 1000, got {}",
                self.max_errors
            )));
        }
        if !(1..=guards::MAX_CONFIGURABLE_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::ValidationError(format!(
                "max-depth must be between 1 and {}, got {}",
                guards::MAX_CONFIGURABLE_DEPTH,
                self.max_depth
            )));
        }
        Ok(())
    }

    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            columns: self.columns,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_errors: self.max_errors,
            max_depth: self.max_depth,
            trace: self.trace,
        }
    }
}
