//! Grammar rules for one statement.
//!
//! ```text
//! Statement    := Identifier '=' 'lambda' Argument
//! Argument     := ':' Expression End
//!               | Identifier CommaOrColon
//! CommaOrColon := ',' Argument
//!               | ':' Expression End
//! Expression   := Term AddTail
//! Term         := Factor MulTail
//! Factor       := Identifier | Number | '(' Expression ')'
//! AddTail      := ('+'|'-') Term AddTail | ε
//! MulTail      := ('*'|'/') Factor MulTail | ε
//! End          := ';'
//! ```
//!
//! Every rule skips one whitespace token before looking at the cursor.
//! Header rules repair a mismatch by trying Insert, Replace and Delete and
//! keeping the cheapest completed branch. Expression rules use cheaper
//! local repairs: a juxtaposed operand means a missing operator, a closing
//! parenthesis is always inserted, and `End` skips to the terminator.

use serde::Serialize;
use std::fmt;

use super::guards;
use super::recovery::{cheapest, Branch, RepairMemo};
use super::ParseOptions;
use crate::diagnostic::{Diagnostic, RepairKind};
use crate::token::{Token, TokenKind};

/// Grammar rule names, as recorded in derivation traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nonterminal {
    Statement,
    Equals,
    Lambda,
    Argument,
    ArgumentName,
    CommaOrColon,
    Expression,
    Term,
    Factor,
    AddTail,
    MulTail,
    End,
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Header continuation points; each completes the rest of the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Goal {
    Statement,
    Equals,
    Lambda,
    Argument,
    ArgumentName,
    CommaOrColon,
    /// `Expression End`
    Body,
}

/// Parser for the tokens of a single statement.
pub(crate) struct StatementParser<'t> {
    tokens: &'t [Token],
    options: ParseOptions,
    /// Index of the last non-whitespace token
    last: usize,
    memo: RepairMemo<Goal>,
}

impl<'t> StatementParser<'t> {
    /// Returns `None` for statements with nothing but whitespace.
    pub fn new(tokens: &'t [Token], options: ParseOptions) -> Option<Self> {
        let last = tokens.iter().rposition(|t| !t.is_whitespace())?;
        Some(Self {
            tokens,
            options,
            last,
            memo: RepairMemo::new(),
        })
    }

    /// Parse the statement, returning the adopted branch.
    pub fn run(mut self) -> Branch {
        let branch = self.complete(Goal::Statement, 0, Branch::new(self.options.trace));
        tracing::trace!(
            memo_entries = self.memo.len(),
            memo_hits = self.memo.hits(),
            "statement search finished"
        );
        branch
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    #[inline]
    fn at_end(&self, pos: usize) -> bool {
        pos >= self.tokens.len()
    }

    #[inline]
    fn skip_whitespace(&self, pos: usize) -> usize {
        match self.tokens.get(pos) {
            Some(token) if token.is_whitespace() => pos + 1,
            _ => pos,
        }
    }

    #[inline]
    fn check(&self, pos: usize, kind: TokenKind) -> bool {
        self.tokens.get(pos).is_some_and(|t| t.is(kind))
    }

    fn kind_at(&self, pos: usize) -> Option<TokenKind> {
        self.tokens.get(pos).map(|t| t.kind)
    }

    /// True when the next significant token after `pos` is one of `kinds`.
    fn followed_by(&self, pos: usize, kinds: &[TokenKind]) -> bool {
        let next = self.skip_whitespace(pos + 1);
        self.kind_at(next).is_some_and(|kind| kinds.contains(&kind))
    }

    fn colon_ahead(&self, pos: usize) -> bool {
        self.tokens[pos.min(self.tokens.len())..]
            .iter()
            .any(|t| t.is(TokenKind::Colon))
    }

    /// Token a diagnostic at `pos` is anchored to: the token itself, or the
    /// last significant token before it when `pos` is past the end or on
    /// whitespace.
    fn anchor(&self, pos: usize) -> &Token {
        let end = pos.min(self.tokens.len());
        if let Some(token) = self.tokens.get(pos).filter(|t| !t.is_whitespace()) {
            return token;
        }
        self.tokens[..end]
            .iter()
            .rev()
            .find(|t| !t.is_whitespace())
            .unwrap_or(&self.tokens[self.last])
    }

    fn diagnostic(&self, pos: usize, repair: RepairKind, expected: TokenKind) -> Diagnostic {
        Diagnostic::repair(repair, expected, self.anchor(pos))
    }

    /// True once `branch` may not take another repair. A branch at the
    /// ceiling is halted: the rest of the statement is abandoned.
    fn at_ceiling(&self, branch: &mut Branch) -> bool {
        if guards::ceiling_reached(branch.cost(), self.options.max_errors) {
            tracing::trace!(cost = branch.cost(), "error ceiling reached");
            branch.halted = true;
        }
        branch.halted
    }

    /// Report a local repair at `pos`; returns false when the ceiling
    /// stopped it.
    fn local_repair(
        &self,
        branch: &mut Branch,
        pos: usize,
        repair: RepairKind,
        expected: TokenKind,
    ) -> bool {
        if self.at_ceiling(branch) {
            return false;
        }
        branch.report(self.diagnostic(pos, repair, expected));
        true
    }

    // ========================================================================
    // Statement header
    // ========================================================================

    /// Complete the statement from `goal` at `pos`, memoized.
    fn complete(&mut self, goal: Goal, pos: usize, mut branch: Branch) -> Branch {
        if branch.halted {
            return branch;
        }
        if self.memo.replay(goal, pos, &mut branch) {
            return branch;
        }

        let cost = branch.cost();
        let mark = branch.mark();
        let done = match goal {
            Goal::Statement => self.expect_then(
                Nonterminal::Statement,
                Goal::Statement,
                pos,
                branch,
                TokenKind::Identifier,
                Goal::Equals,
            ),
            Goal::Equals => self.expect_then(
                Nonterminal::Equals,
                Goal::Equals,
                pos,
                branch,
                TokenKind::Equal,
                Goal::Lambda,
            ),
            Goal::Lambda => self.expect_then(
                Nonterminal::Lambda,
                Goal::Lambda,
                pos,
                branch,
                TokenKind::Lambda,
                Goal::Argument,
            ),
            Goal::Argument => self.argument(pos, branch),
            Goal::ArgumentName => self.expect_then(
                Nonterminal::ArgumentName,
                Goal::ArgumentName,
                pos,
                branch,
                TokenKind::Identifier,
                Goal::CommaOrColon,
            ),
            Goal::CommaOrColon => self.comma_or_colon(pos, branch),
            Goal::Body => self.body(pos, branch),
        };

        self.memo.store(goal, pos, cost, done.suffix_since(mark));
        done
    }

    /// Require `expected` at the cursor, then continue with `next`.
    fn expect_then(
        &mut self,
        rule: Nonterminal,
        retry: Goal,
        pos: usize,
        mut branch: Branch,
        expected: TokenKind,
        next: Goal,
    ) -> Branch {
        branch.visit(rule);
        let pos = self.skip_whitespace(pos);

        if self.at_end(pos) {
            return self.missing_at_end(pos, expected, branch);
        }
        if self.check(pos, expected) {
            return self.complete(next, pos + 1, branch);
        }
        self.repair(retry, pos, expected, branch, next)
    }

    /// Three-way repair of a mismatch at `pos`.
    ///
    /// Insert continues with `next` at the same cursor, Replace continues
    /// with `next` past the offending token, Delete re-runs `retry` past it.
    fn repair(
        &mut self,
        retry: Goal,
        pos: usize,
        expected: TokenKind,
        mut branch: Branch,
        next: Goal,
    ) -> Branch {
        if self.at_ceiling(&mut branch) {
            return branch;
        }

        let insert = branch.hypothesis(self.diagnostic(pos, RepairKind::Insert, expected));
        let insert = self.complete(next, pos, insert);

        let replace = branch.hypothesis(self.diagnostic(pos, RepairKind::Replace, expected));
        let replace = self.complete(next, pos + 1, replace);

        let delete = branch.hypothesis(self.diagnostic(pos, RepairKind::Delete, expected));
        let delete = self.complete(retry, pos + 1, delete);

        cheapest(insert, replace, delete)
    }

    /// The statement ran out before `expected`; report it once and stop.
    fn missing_at_end(&self, pos: usize, expected: TokenKind, mut branch: Branch) -> Branch {
        self.local_repair(&mut branch, pos, RepairKind::Insert, expected);
        branch
    }

    fn argument(&mut self, pos: usize, mut branch: Branch) -> Branch {
        branch.visit(Nonterminal::Argument);
        let pos = self.skip_whitespace(pos);

        if self.at_end(pos) {
            return self.missing_at_end(pos, TokenKind::Colon, branch);
        }
        if self.check(pos, TokenKind::Colon) {
            return self.complete(Goal::Body, pos + 1, branch);
        }
        self.complete(Goal::ArgumentName, pos, branch)
    }

    fn comma_or_colon(&mut self, pos: usize, mut branch: Branch) -> Branch {
        branch.visit(Nonterminal::CommaOrColon);
        let pos = self.skip_whitespace(pos);

        match self.kind_at(pos) {
            None => self.missing_at_end(pos, TokenKind::Colon, branch),
            Some(TokenKind::Comma) => self.complete(Goal::Argument, pos + 1, branch),
            Some(TokenKind::Colon) => self.complete(Goal::Body, pos + 1, branch),
            // A colon further on means the argument list goes on.
            Some(_) if self.colon_ahead(pos) => {
                self.repair(Goal::CommaOrColon, pos, TokenKind::Comma, branch, Goal::Argument)
            }
            Some(_) => self.repair(Goal::CommaOrColon, pos, TokenKind::Colon, branch, Goal::Body),
        }
    }

    fn body(&mut self, pos: usize, branch: Branch) -> Branch {
        let (branch, pos) = self.expression(pos, branch, 0);
        self.end(pos, branch)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self, pos: usize, mut branch: Branch, depth: usize) -> (Branch, usize) {
        branch.visit(Nonterminal::Expression);
        let (branch, pos) = self.term(pos, branch, depth);
        self.add_tail(pos, branch, depth)
    }

    fn term(&mut self, pos: usize, mut branch: Branch, depth: usize) -> (Branch, usize) {
        branch.visit(Nonterminal::Term);
        let (branch, pos) = self.factor(pos, branch, depth);
        self.mul_tail(pos, branch, depth)
    }

    fn factor(&mut self, pos: usize, mut branch: Branch, depth: usize) -> (Branch, usize) {
        if branch.halted {
            return (branch, pos);
        }
        branch.visit(Nonterminal::Factor);
        let pos = self.skip_whitespace(pos);

        match self.kind_at(pos) {
            None => {
                self.local_repair(&mut branch, pos, RepairKind::Insert, TokenKind::Identifier);
                (branch, pos)
            }
            Some(TokenKind::Identifier | TokenKind::Number) => (branch, pos + 1),
            Some(TokenKind::OpenParen) => {
                if guards::nesting_too_deep(depth, self.options.max_depth) {
                    tracing::trace!(pos, depth, "parenthesis nesting limit reached");
                    let reason = format!(
                        "parentheses nested deeper than {}",
                        self.options.max_depth
                    );
                    branch.report(Diagnostic::limit_exceeded(reason, self.anchor(pos)));
                    branch.halted = true;
                    return (branch, self.tokens.len());
                }
                let (branch, pos) = self.expression(pos + 1, branch, depth + 1);
                self.close_paren(pos, branch)
            }
            Some(TokenKind::CloseParen) if depth == 0 => {
                self.local_repair(&mut branch, pos, RepairKind::Replace, TokenKind::Identifier);
                (branch, pos + 1)
            }
            Some(_) => {
                self.local_repair(&mut branch, pos, RepairKind::Insert, TokenKind::Identifier);
                (branch, pos)
            }
        }
    }

    /// Require `)`; a missing one is always inserted, never replaced.
    fn close_paren(&mut self, pos: usize, mut branch: Branch) -> (Branch, usize) {
        if branch.halted {
            return (branch, pos);
        }
        let pos = self.skip_whitespace(pos);

        if self.check(pos, TokenKind::CloseParen) {
            return (branch, pos + 1);
        }
        // Past the end this anchors at the last consumed token; otherwise the
        // offending token stays for the caller.
        self.local_repair(&mut branch, pos, RepairKind::Insert, TokenKind::CloseParen);
        (branch, pos)
    }

    fn add_tail(&mut self, pos: usize, branch: Branch, depth: usize) -> (Branch, usize) {
        self.tail(Nonterminal::AddTail, TokenKind::AddOp, pos, branch, depth)
    }

    fn mul_tail(&mut self, pos: usize, branch: Branch, depth: usize) -> (Branch, usize) {
        self.tail(Nonterminal::MulTail, TokenKind::MulOp, pos, branch, depth)
    }

    /// Shared loop for `AddTail` and `MulTail`.
    fn tail(
        &mut self,
        rule: Nonterminal,
        operator: TokenKind,
        mut pos: usize,
        mut branch: Branch,
        depth: usize,
    ) -> (Branch, usize) {
        loop {
            if branch.halted {
                return (branch, pos);
            }
            branch.visit(rule);
            pos = self.skip_whitespace(pos);

            let Some(kind) = self.kind_at(pos) else {
                return (branch, pos);
            };

            if kind.starts_operand() {
                // Juxtaposed operands: the operator is missing.
                if !self.local_repair(&mut branch, pos, RepairKind::Insert, operator) {
                    return (branch, pos);
                }
                (branch, pos) = self.operand(rule, pos, branch, depth);
            } else if kind == operator {
                (branch, pos) = self.operand(rule, pos + 1, branch, depth);
            } else if depth == 0
                && kind == TokenKind::CloseParen
                && self.followed_by(pos, &[operator, TokenKind::CloseParen])
            {
                if !self.local_repair(&mut branch, pos, RepairKind::Delete, operator) {
                    return (branch, pos);
                }
                pos += 1;
            } else {
                return (branch, pos);
            }
        }
    }

    /// The operand that follows an operator in `rule`.
    fn operand(
        &mut self,
        rule: Nonterminal,
        pos: usize,
        branch: Branch,
        depth: usize,
    ) -> (Branch, usize) {
        match rule {
            Nonterminal::AddTail => self.term(pos, branch, depth),
            _ => self.factor(pos, branch, depth),
        }
    }

    /// Require the terminator, deleting anything in front of it.
    fn end(&mut self, mut pos: usize, mut branch: Branch) -> Branch {
        if branch.halted {
            return branch;
        }
        branch.visit(Nonterminal::End);

        loop {
            pos = self.skip_whitespace(pos);

            match self.kind_at(pos) {
                None => {
                    if !self.anchor(pos).is(TokenKind::Semicolon) {
                        let expected = TokenKind::Semicolon;
                        self.local_repair(&mut branch, pos, RepairKind::Insert, expected);
                    }
                    return branch;
                }
                Some(TokenKind::Semicolon) => return branch,
                Some(_) => {
                    let deleted = self.local_repair(
                        &mut branch,
                        pos,
                        RepairKind::DeleteAtEnd,
                        TokenKind::Semicolon,
                    );
                    if !deleted {
                        return branch;
                    }
                    pos += 1;
                }
            }
        }
    }
}
