//! Diagnostics produced by the lexer and the parser.

use serde::Serialize;
use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Fixed message for any repair involving a parenthesis.
pub const PAREN_BALANCE_MESSAGE: &str = "parentheses must balance";

/// A single-token edit assumed in order to keep parsing past a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairKind {
    Insert,
    Replace,
    Delete,
    /// Deletion performed while skipping to the statement terminator
    DeleteAtEnd,
}

impl RepairKind {
    /// Canonical verb for the repair.
    pub fn verb(self) -> &'static str {
        match self {
            RepairKind::Insert => "Insert",
            RepairKind::Replace => "Replace",
            RepairKind::Delete | RepairKind::DeleteAtEnd => "Delete",
        }
    }
}

/// The class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "class", content = "repair", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Invalid character run found by the lexer
    Lexical,
    /// Grammar mismatch repaired by a single-token edit
    Syntax(RepairKind),
    /// A parser guard stopped the analysis of a statement
    LimitExceeded,
}

/// A positioned, human-readable description of a problem in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Fully rendered message
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Byte range of the token the diagnostic is anchored to
    pub span: Span,
}

impl Diagnostic {
    /// Lexical diagnostic for an invalid character run, anchored at its start.
    pub fn invalid_sequence(token: &Token) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            message: format!("invalid character sequence: `{}`", token.text),
            line: token.line,
            column: token.start_column,
            span: token.span,
        }
    }

    /// Syntactic diagnostic for a repair, anchored at the end of `anchor`.
    ///
    /// `anchor` doubles as the actual token for Replace/Delete rendering.
    pub fn repair(repair: RepairKind, expected: TokenKind, anchor: &Token) -> Self {
        Self {
            kind: DiagnosticKind::Syntax(repair),
            message: render_repair(repair, expected, anchor),
            line: anchor.line,
            column: anchor.end_column,
            span: anchor.span,
        }
    }

    /// Diagnostic emitted when a parser guard trips.
    pub fn limit_exceeded(reason: impl fmt::Display, anchor: &Token) -> Self {
        Self {
            kind: DiagnosticKind::LimitExceeded,
            message: format!("parser limit exceeded: {}", reason),
            line: anchor.line,
            column: anchor.end_column,
            span: anchor.span,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == DiagnosticKind::Lexical
    }

    pub fn repair_kind(&self) -> Option<RepairKind> {
        match self.kind {
            DiagnosticKind::Syntax(repair) => Some(repair),
            DiagnosticKind::Lexical | DiagnosticKind::LimitExceeded => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

/// Render the message for a repair.
///
/// Parenthesis repairs get the balance message, except when the repair is
/// about the statement terminator.
pub fn render_repair(repair: RepairKind, expected: TokenKind, actual: &Token) -> String {
    if expected != TokenKind::Semicolon && (expected.is_paren() || actual.kind.is_paren()) {
        return PAREN_BALANCE_MESSAGE.to_string();
    }

    match repair {
        RepairKind::Insert => format!("{}: '{}'", repair.verb(), expected.label()),
        RepairKind::Replace => format!(
            "Expected: '{}' Actually: '{}'",
            expected.label(),
            actual.text
        ),
        RepairKind::Delete | RepairKind::DeleteAtEnd => {
            format!("{}: '{}'", repair.verb(), actual.text)
        }
    }
}

/// Stable sort by `(line, column)`.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| (d.line, d.column));
}
