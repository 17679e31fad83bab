//! Token cursor shared by the validator and the interpreter.

use safexpr_lexer::token::{Token, TokenKind};
use safexpr_types::Span;

/// A read-only cursor over a token slice.
///
/// This is the parse state of one evaluation: an index into a token
/// sequence owned by that evaluation.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    /// The token stream.
    tokens: &'t [Token],
    /// Current index into `tokens`.
    pos: usize,
}

impl<'t> Cursor<'t> {
    /// Create a cursor at the start of `tokens`.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub fn peek_kind(&self) -> Option<&'t TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Look ahead by `n` tokens from current position.
    pub fn look_ahead(&self, n: usize) -> Option<&'t TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    /// Advance the cursor by one and return the consumed token.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Returns `true` once every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if the current token matches the given kind exactly.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// If the current token matches, advance and return `true`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Current index into the token stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &'t [Token] {
        self.tokens.get(self.pos..).unwrap_or(&[])
    }

    // ── Spans ─────────────────────────────────────────────────────────────────

    /// Span of the current token, or a point just past the last token.
    pub fn current_span(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => self.end_span(),
        }
    }

    /// Zero-width span just past the last token.
    pub fn end_span(&self) -> Span {
        Span::point(self.tokens.last().map_or(0, |t| t.span.end))
    }
}
