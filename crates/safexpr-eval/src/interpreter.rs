//! Precedence-climbing interpreter over a validated token sequence.

use safexpr_lexer::token::{Token, TokenKind};
use safexpr_parser::{CheckedExpr, Cursor};
use safexpr_types::{EvalError, EvalResult};

use crate::bindings::Bindings;
use crate::resolver;

/// Lowest binding power; groups and call arguments restart here.
const LOWEST: u8 = 0;

/// The closed set of binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn from_kind(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            TokenKind::Percent => Some(Self::Rem),
            _ => None,
        }
    }

    /// Multiplicative operators bind tighter than additive ones.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 0,
            Self::Mul | Self::Div | Self::Rem => 1,
        }
    }

    /// IEEE-754 arithmetic; `%` keeps the sign of the dividend.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Rem => lhs % rhs,
        }
    }
}

/// Evaluate a validated expression against `bindings`.
pub fn interpret(expr: &CheckedExpr, bindings: &Bindings) -> EvalResult<f64> {
    Interpreter::new(expr, bindings).run()
}

/// Walks a [`CheckedExpr`] once, left to right, resolving names as they
/// are reached. The first failure ends evaluation.
pub struct Interpreter<'a> {
    cursor: Cursor<'a>,
    bindings: &'a Bindings,
}

impl<'a> Interpreter<'a> {
    pub fn new(expr: &'a CheckedExpr, bindings: &'a Bindings) -> Self {
        Self {
            cursor: Cursor::new(expr.tokens()),
            bindings,
        }
    }

    pub fn run(mut self) -> EvalResult<f64> {
        let value = self.eval(LOWEST)?;
        match self.cursor.peek() {
            None => Ok(value),
            Some(token) => Err(self.out_of_place(token)),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    /// One term, then every following operator binding at least as tightly
    /// as `min`. Right operands are evaluated one level tighter, which makes
    /// all operators left-associative.
    fn eval(&mut self, min: u8) -> EvalResult<f64> {
        let mut lhs = self.term()?;
        while let Some(op) = self.cursor.peek_kind().and_then(BinaryOp::from_kind) {
            if op.precedence() < min {
                break;
            }
            self.cursor.advance();
            let rhs = self.eval(op.precedence() + 1)?;
            lhs = op.apply(lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> EvalResult<f64> {
        match self.cursor.peek_kind() {
            Some(TokenKind::Minus) => {
                self.cursor.advance();
                Ok(-self.atom()?)
            }
            Some(TokenKind::Plus) => {
                self.cursor.advance();
                self.atom()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> EvalResult<f64> {
        let token = self.next_token()?;
        match &token.kind {
            TokenKind::Number(value) => Ok(*value),
            TokenKind::Identifier(_) if token.is_math() && self.cursor.eat(&TokenKind::Dot) => {
                self.math_member()
            }
            TokenKind::Identifier(_) => resolver::resolve_variable(self.bindings, token),
            TokenKind::LParen => {
                let value = self.eval(LOWEST)?;
                self.expect(&TokenKind::RParen)?;
                Ok(value)
            }
            _ => Err(self.out_of_place(token)),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Math members
    // ══════════════════════════════════════════════════════════════════════

    /// `Math` `.` has been consumed.
    fn math_member(&mut self) -> EvalResult<f64> {
        let name = self.next_token()?;
        if !self.cursor.eat(&TokenKind::LParen) {
            return resolver::resolve_math_constant(name);
        }
        let function = resolver::resolve_math_function(name)?;
        let args = self.arguments()?;
        Ok(function.apply(&args))
    }

    /// Argument list after `(`, through the closing `)`.
    fn arguments(&mut self) -> EvalResult<Vec<f64>> {
        let mut args = Vec::new();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.eval(LOWEST)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Cursor helpers
    // ══════════════════════════════════════════════════════════════════════

    // The validator has already accepted this sequence, so the failures
    // below are unreachable for a `CheckedExpr`; they still report rather
    // than panic.

    fn next_token(&mut self) -> EvalResult<&'a Token> {
        self.cursor
            .advance()
            .ok_or_else(|| EvalError::malformed(self.cursor.end_span()))
    }

    fn expect(&mut self, kind: &TokenKind) -> EvalResult<()> {
        if self.cursor.eat(kind) {
            Ok(())
        } else {
            Err(EvalError::UnbalancedParens {
                span: self.cursor.current_span(),
            })
        }
    }

    fn out_of_place(&self, token: &Token) -> EvalError {
        EvalError::malformed_with(format!("at '{}'", token.lexeme), token.span)
    }
}
