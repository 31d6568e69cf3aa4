//! Lexer for lambda-binding statements.
//!
//! Scanning is done with the logos library. Every character of the input
//! lands in some token: whitespace runs are kept (the grammar skips them),
//! and characters no other pattern accepts form `Invalid` runs.
//!
//! After scanning, a repair pass removes each invalid run, reports it, and
//! tries to glue its neighbours back together when the run split what was
//! meant to be a single identifier or number. A run between two whitespace
//! tokens leaves one whitespace token behind.

use crate::diagnostic::Diagnostic;
use crate::token::{Span, Token, TokenKind};
use logos::Logos;
use serde::{Deserialize, Serialize};

/// Logos-based token enum for lexing.
///
/// Converted to [`TokenKind`] after lexing. `lambda` wins over the
/// identifier pattern only on an exact match, so `lambda1` is an identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // Keywords (must come before identifiers)
    #[token("lambda")]
    Lambda,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,

    #[token("=")]
    Equal,

    #[regex(r"[+-]")]
    AddOp,

    #[regex(r"[*/]")]
    MulOp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[regex(r"\s+")]
    Whitespace,

    // Catch-all for disallowed characters
    #[regex(r"[^a-zA-Z0-9\s=()+\-*:,;/]+")]
    Invalid,
}

fn convert_token(logos_token: LogosToken) -> TokenKind {
    match logos_token {
        LogosToken::Lambda => TokenKind::Lambda,
        LogosToken::Number => TokenKind::Number,
        LogosToken::Identifier => TokenKind::Identifier,
        LogosToken::Equal => TokenKind::Equal,
        LogosToken::AddOp => TokenKind::AddOp,
        LogosToken::MulOp => TokenKind::MulOp,
        LogosToken::OpenParen => TokenKind::OpenParen,
        LogosToken::CloseParen => TokenKind::CloseParen,
        LogosToken::Colon => TokenKind::Colon,
        LogosToken::Comma => TokenKind::Comma,
        LogosToken::Semicolon => TokenKind::Semicolon,
        LogosToken::Whitespace => TokenKind::Whitespace,
        LogosToken::Invalid => TokenKind::Invalid,
    }
}

/// How token columns are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnMode {
    /// Character offset from the start of the input; never reset on newline.
    #[default]
    Absolute,
    /// Character offset from the start of the current line.
    LineRelative,
}

/// Lexer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    pub columns: ColumnMode,
}

/// Result of lexing: the token stream plus lexical diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize with default options.
pub fn tokenize(input: &str) -> Tokenized {
    Lexer::new(input).tokenize()
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    options: LexerOptions,
}

/// Kind and byte range of a scanned slice, before positions are assigned.
#[derive(Debug, Clone, Copy)]
struct RawToken {
    kind: TokenKind,
    span: Span,
}

/// Scan `source` into raw tokens. Never fails.
fn scan(source: &str) -> Vec<RawToken> {
    let mut raw = Vec::new();
    let mut lexer = LogosToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let kind = match result {
            Ok(token) => convert_token(token),
            Err(()) => TokenKind::Invalid,
        };
        raw.push(RawToken {
            kind,
            span: Span::new(range.start, range.end),
        });
    }

    raw
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            options: LexerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    /// Tokenize the whole input and repair invalid character runs.
    pub fn tokenize(self) -> Tokenized {
        let tokens = self.locate(&scan(self.source));
        let scanned = tokens.len();
        let result = self.repair_invalid_runs(tokens);

        tracing::trace!(
            scanned,
            tokens = result.tokens.len(),
            invalid_runs = result.diagnostics.len(),
            "tokenized input"
        );
        result
    }

    /// Assign line and column numbers to raw tokens.
    fn locate(&self, raw: &[RawToken]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(raw.len());
        let mut line = 1u32;
        let mut offset = 0u32;
        let mut line_start = 0u32;

        for raw in raw {
            let text = raw.span.slice(self.source);
            let start_line = line;
            let start_column = self.column(offset, line_start);

            for c in text.chars() {
                offset += 1;
                if c == '\n' {
                    line += 1;
                    line_start = offset;
                }
            }

            tokens.push(Token {
                kind: raw.kind,
                text: text.to_string(),
                line: start_line,
                start_column,
                end_column: self.column(offset, line_start),
                span: raw.span,
            });
        }

        tokens
    }

    fn column(&self, offset: u32, line_start: u32) -> u32 {
        match self.options.columns {
            ColumnMode::Absolute => offset,
            ColumnMode::LineRelative => offset - line_start,
        }
    }

    /// Remove every invalid run, reporting it, and merge its neighbours when
    /// re-scanning them together yields something other than the original
    /// pair. Runs are handled once each, left to right.
    fn repair_invalid_runs(&self, mut tokens: Vec<Token>) -> Tokenized {
        let mut diagnostics = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !tokens[i].is(TokenKind::Invalid) {
                i += 1;
                continue;
            }

            let invalid = tokens.remove(i);
            diagnostics.push(Diagnostic::invalid_sequence(&invalid));

            if i == 0 || i >= tokens.len() {
                continue;
            }
            let (previous, next) = (&tokens[i - 1], &tokens[i]);
            if previous.is_whitespace() && next.is_whitespace() {
                // The grammar skips at most one whitespace token per step.
                let fused = self.fuse(previous, next, TokenKind::Whitespace);
                tokens.splice(i - 1..=i, [fused]);
                continue;
            }
            if previous.is_whitespace() || next.is_whitespace() {
                continue;
            }

            if let Some(merged) = self.merge_neighbours(previous, next) {
                tracing::debug!(
                    text = %merged.text,
                    kind = ?merged.kind,
                    line = merged.line,
                    "merged tokens around invalid run"
                );
                tokens.splice(i - 1..=i, [merged]);
            }
        }

        Tokenized {
            tokens,
            diagnostics,
        }
    }

    /// Re-scan two neighbouring tokens as one string.
    ///
    /// Returns `None` when the pair re-scans to two tokens again.
    fn merge_neighbours(&self, previous: &Token, next: &Token) -> Option<Token> {
        let combined = format!("{}{}", previous.text, next.text);
        let mut relexed = scan(&combined);

        // A neighbour may itself be a merged token still holding an invalid
        // run; compare on the significant characters only.
        if combined.chars().count() > 2 {
            let significant: String = relexed
                .iter()
                .filter(|raw| raw.kind != TokenKind::Invalid)
                .map(|raw| raw.span.slice(&combined))
                .collect();
            relexed = scan(&significant);
        }

        if relexed.len() == 2 {
            return None;
        }

        let kind = relexed.first()?.kind;
        Some(self.fuse(previous, next, kind))
    }

    /// One token of `kind` covering `previous`, `next` and everything
    /// between them in the source.
    fn fuse(&self, previous: &Token, next: &Token, kind: TokenKind) -> Token {
        let span = previous.span.merge(&next.span);
        Token {
            kind,
            text: span.slice(self.source).to_string(),
            line: previous.line,
            start_column: previous.start_column,
            end_column: next.end_column,
            span,
        }
    }
}
