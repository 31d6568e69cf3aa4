//! Token definitions for lambda-binding statements.
//!
//! The token set is closed: every character of the input ends up in exactly
//! one token, including whitespace runs and runs of disallowed characters.

use serde::Serialize;
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Keyword `lambda`
    Lambda,
    /// Decimal digits
    Number,
    /// Letter followed by letters or digits
    Identifier,
    /// `=`
    Equal,
    /// `+` or `-`
    AddOp,
    /// `*` or `/`
    MulOp,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `;` statement terminator
    Semicolon,
    /// Run of characters no other pattern accepts
    Invalid,
    /// Run of whitespace
    Whitespace,
}

impl TokenKind {
    /// Human-readable label used when rendering diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Lambda => "lambda",
            TokenKind::Number => "число",
            TokenKind::Identifier => "идентификатор",
            TokenKind::Equal => "=",
            TokenKind::AddOp => "+ или -",
            TokenKind::MulOp => "* или /",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Invalid => "невалидный токен",
            TokenKind::Whitespace => "пробел",
        }
    }

    /// Returns true for tokens that can start an operand.
    pub fn starts_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::OpenParen
        )
    }

    /// Returns true for the two parenthesis kinds.
    pub fn is_paren(self) -> bool {
        matches!(self, TokenKind::OpenParen | TokenKind::CloseParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source location of a token as byte offsets into the analysed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A classified, positioned slice of the input.
///
/// Tokens are produced once by the lexer and never mutated afterwards; the
/// parser only reads them by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text
    pub text: String,
    /// 1-based line number
    pub line: u32,
    /// 0-based start column
    pub start_column: u32,
    /// 0-based end column, exclusive
    pub end_column: u32,
    pub span: Span,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.text.contains('\n') {
            "\\n"
        } else {
            self.text.as_str()
        };
        write!(
            f,
            "{:?}: '{}' at line {}, column {}",
            self.kind, text, self.line, self.start_column
        )
    }
}
