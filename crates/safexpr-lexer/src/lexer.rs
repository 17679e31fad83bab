//! Core safexpr lexer: converts source text to a token stream.
//!
//! Features:
//! - Longest-match scanning of numbers, identifiers, operators, punctuation
//! - Numerals with a redundant leading zero (`01`) are rejected, not reinterpreted
//! - `++` and `--` are single tokens, so they never read as two signs
//! - Fail-fast: the first unrecognized character ends the stream with an error
//!
//! Callers run [`normalize`] over raw input first so that visually identical
//! text always lexes identically.

use safexpr_types::{EvalError, EvalResult, Span};
use unicode_normalization::UnicodeNormalization;

use crate::token::{Token, TokenKind};

/// Canonicalize raw input to Unicode NFC.
pub fn normalize(raw: &str) -> String {
    raw.nfc().collect()
}

/// The safexpr lexer.
///
/// An iterator over [`Token`]s. Cloning it snapshots the cursor, so a clone
/// taken before iteration replays the same sequence. After yielding an error
/// the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// Current byte offset into `source`.
    pos: usize,
    /// Set once an error has been yielded.
    failed: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer over already-normalized source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            failed: false,
        }
    }

    /// Lex the entire source into a token vector, stopping at the first error.
    pub fn tokenize(source: &'src str) -> EvalResult<Vec<Token>> {
        Self::new(source).collect()
    }

    /// A fresh lexer over the same source, positioned at the start.
    pub fn restart(&self) -> Self {
        Self::new(self.source)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.advance();
        }
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, &self.source[start..self.pos], Span::new(start, self.pos))
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token. Whitespace has already been skipped.
    fn scan(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Err(EvalError::malformed(Span::point(start))),
        };

        let kind = match ch {
            b'0'..=b'9' => return self.scan_number(start),
            b'.' if matches!(self.peek(), Some(b'0'..=b'9')) => return self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' => return Ok(self.scan_identifier(start)),

            b'+' if self.peek() == Some(b'+') => {
                self.advance();
                TokenKind::PlusPlus
            }
            b'-' if self.peek() == Some(b'-') => {
                self.advance();
                TokenKind::MinusMinus
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,

            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,

            _ => return Err(self.unexpected_character(start)),
        };
        Ok(self.token_from(kind, start))
    }

    fn unexpected_character(&mut self, start: usize) -> EvalError {
        // `start` is always a char boundary: every accepted byte is ASCII.
        let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        let end = start + ch.len_utf8();
        self.pos = end;
        tracing::trace!(offset = start, "unrecognized character");
        EvalError::malformed_with(format!("character {ch:?}"), Span::new(start, end))
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    /// Scan a numeral. The first byte (a digit, or `.` before a digit) has
    /// already been consumed.
    ///
    /// The whole run of digits and dots is taken as one lexeme so that
    /// `0..` or `1.2.3` fail as a unit instead of splitting into tokens.
    fn scan_number(&mut self, start: usize) -> EvalResult<Token> {
        while let Some(b'0'..=b'9' | b'.') = self.peek() {
            self.advance();
        }
        let mantissa_end = self.pos;

        // Exponent only when digits follow
        if let Some(b'e' | b'E') = self.peek() {
            let digits_at = if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if matches!(self.peek_at(digits_at), Some(b'0'..=b'9')) {
                self.pos += digits_at;
                while let Some(b'0'..=b'9') = self.peek() {
                    self.advance();
                }
            }
        }

        let lexeme = &self.source[start..self.pos];
        let span = Span::new(start, self.pos);
        if !is_decimal_mantissa(&self.source[start..mantissa_end]) {
            return Err(EvalError::malformed_with(lexeme, span));
        }
        let value: f64 = lexeme
            .parse()
            .map_err(|_| EvalError::malformed_with(lexeme, span))?;

        Ok(Token::new(TokenKind::Number(value), lexeme, span))
    }

    // ─────────────────────────────────────────────────────────────
    // Identifiers
    // ─────────────────────────────────────────────────────────────

    fn scan_identifier(&mut self, start: usize) -> Token {
        // First character was already consumed (ASCII letter)
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        let name = &self.source[start..self.pos];
        self.token_from(TokenKind::Identifier(name.to_string()), start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = EvalResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        if self.at_end() {
            return None;
        }
        let result = self.scan();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// `0` or a digit string without a redundant leading zero, optionally
/// followed by `.` and digits; or `.` followed by at least one digit.
fn is_decimal_mantissa(text: &str) -> bool {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text, None),
    };
    let int_ok = match int.as_bytes() {
        [] => frac.is_some_and(|f| !f.is_empty()),
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    let frac_ok = frac.map_or(true, |f| f.bytes().all(|b| b.is_ascii_digit()));
    int_ok && frac_ok
}
