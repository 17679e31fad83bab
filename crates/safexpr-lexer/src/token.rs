//! Token types for the safexpr lexer.
//!
//! Defines [`TokenKind`] covering every lexeme the evaluator recognizes and
//! [`Token`], which pairs a kind with its exact source text and [`Span`].

use safexpr_types::Span;
use std::fmt;

/// The reserved namespace identifier.
pub const MATH_NAMESPACE: &str = "Math";

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub lexeme: String,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Returns `true` if this is the identifier `Math`.
    pub fn is_math(&self) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name == MATH_NAMESPACE)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Numeric literal: `42`, `0.`, `.5`, `1e-3`
    Number(f64),

    // ── Identifiers ──────────────────────────────────────────

    /// Variable or `Math` member name: `rate`, `Math`, `sqrt`
    Identifier(String),

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`, one token so it never reads as two signs
    PlusPlus,
    /// `--`
    MinusMinus,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `.`
    Dot,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Returns `true` for the five binary operators.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Star | Self::Slash | Self::Percent
        )
    }

    /// Returns `true` for the unary sign operators.
    pub fn is_sign(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::PlusPlus => write!(f, "++"),
            Self::MinusMinus => write!(f, "--"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Dot => write!(f, "."),
            Self::Comma => write!(f, ","),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operators() {
        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
        ] {
            assert!(kind.is_binary_operator(), "{kind}");
        }
        assert!(!TokenKind::PlusPlus.is_binary_operator());
        assert!(!TokenKind::Comma.is_binary_operator());
        assert!(!TokenKind::Number(1.0).is_binary_operator());
    }

    #[test]
    fn test_signs() {
        assert!(TokenKind::Plus.is_sign());
        assert!(TokenKind::Minus.is_sign());
        assert!(!TokenKind::Star.is_sign());
        assert!(!TokenKind::MinusMinus.is_sign());
    }

    #[test]
    fn test_is_math() {
        let math = Token::new(TokenKind::Identifier("Math".into()), "Math", Span::new(0, 4));
        let other = Token::new(TokenKind::Identifier("math".into()), "math", Span::new(0, 4));
        assert!(math.is_math());
        assert!(!other.is_math());
    }

    #[test]
    fn test_token_display_uses_lexeme() {
        let tok = Token::new(TokenKind::Number(10.0), "1e1", Span::new(0, 3));
        assert_eq!(tok.to_string(), "1e1");
        assert_eq!(TokenKind::Number(10.0).to_string(), "10");
    }
}
