//! Subcommand implementations.

pub mod check;
pub mod files;
pub mod manifest;
pub mod tokens;

use clap::ValueEnum;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Source snippets with labels
    Pretty,
    /// One line per item
    Plain,
    Json,
}

/// `--color` flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// A named piece of source text.
pub struct Source {
    pub name: String,
    pub text: String,
}

/// Name shown for text passed with `-e`.
pub const INLINE_SOURCE_NAME: &str = "<eval>";

impl Source {
    pub fn inline(text: String) -> Self {
        Self {
            name: INLINE_SOURCE_NAME.to_string(),
            text,
        }
    }
}
