//! Error-recovering parser for lambda-binding statements.
//!
//! The token stream is split into statements at each `;`, and every
//! statement is parsed on its own. Instead of stopping at the first
//! mismatch, the parser hypothesizes single-token repairs and keeps the
//! continuation that produces the fewest diagnostics (see [`grammar`]).

pub mod grammar;
pub mod guards;
pub mod recovery;

use serde::Serialize;

use crate::diagnostic::{sort_diagnostics, Diagnostic};
use crate::token::{Token, TokenKind};
use grammar::StatementParser;

pub use grammar::Nonterminal;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Diagnostics one statement may accumulate before repairs stop
    pub max_errors: usize,
    /// Maximum parenthesis nesting
    pub max_depth: usize,
    /// Record the derivation of every statement
    pub trace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_errors: guards::MAX_ERRORS_PER_STATEMENT,
            max_depth: guards::MAX_PAREN_DEPTH,
            trace: false,
        }
    }
}

/// Rules visited while parsing one statement, along the adopted repairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    /// Line of the statement's first significant token
    pub line: u32,
    pub rules: Vec<Nonterminal>,
}

/// Result of parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Seed and syntax diagnostics, sorted by `(line, column)`
    pub diagnostics: Vec<Diagnostic>,
    /// One entry per parsed statement when tracing is on
    pub derivations: Vec<Derivation>,
}

/// Parse with default options; returns seed plus syntax diagnostics, sorted.
pub fn parse(tokens: &[Token], seed: &[Diagnostic]) -> Vec<Diagnostic> {
    Parser::new(tokens).parse(seed).diagnostics
}

/// Split tokens into statements after every terminator.
///
/// A trailing remainder without a terminator is kept as a statement.
pub fn split_statements(tokens: &[Token]) -> Vec<&[Token]> {
    tokens
        .split_inclusive(|t| t.is(TokenKind::Semicolon))
        .collect()
}

/// Parser state. Holds no state between calls to [`Parser::parse`].
pub struct Parser<'t> {
    tokens: &'t [Token],
    options: ParseOptions,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse every statement and merge its diagnostics with `seed`.
    pub fn parse(&self, seed: &[Diagnostic]) -> ParseOutcome {
        let mut diagnostics = seed.to_vec();
        let mut derivations = Vec::new();

        for statement in split_statements(self.tokens) {
            let Some(parser) = StatementParser::new(statement, self.options) else {
                continue;
            };
            let line = statement
                .iter()
                .find(|t| !t.is_whitespace())
                .map_or(0, |t| t.line);

            let branch = parser.run();
            tracing::debug!(
                line,
                tokens = statement.len(),
                diagnostics = branch.diagnostics.len(),
                "parsed statement"
            );

            diagnostics.extend(branch.diagnostics);
            if let Some(rules) = branch.derivation {
                derivations.push(Derivation { line, rules });
            }
        }

        sort_diagnostics(&mut diagnostics);
        ParseOutcome {
            diagnostics,
            derivations,
        }
    }
}
