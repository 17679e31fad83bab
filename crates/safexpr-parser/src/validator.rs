//! Grammar validation.
//!
//! Three passes over the tokens, each failure-fast:
//! 1. empty input is malformed
//! 2. a `)` with nothing to close, and nesting depth
//! 3. recursive-descent recognition of the grammar
//!
//! An unclosed `(` is left to the descent, so a malformed token or a
//! dangling operator earlier in the group is reported first.
//!
//! Nothing is resolved or computed here; names are checked by the
//! interpreter once the shape of the expression is known to be sound.

use safexpr_lexer::token::{Token, TokenKind};
use safexpr_types::{EvalError, EvalResult, Span};

use crate::cursor::Cursor;

/// Default maximum parenthesis nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hard ceiling on nesting depth. A configured `max_depth` above it is
/// lowered to it, keeping validation and interpretation within the stack.
pub const MAX_DEPTH_CEILING: usize = 512;

/// Limits applied during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Deepest allowed parenthesis nesting, counting groups and call
    /// argument lists alike. Capped at [`MAX_DEPTH_CEILING`].
    pub max_depth: usize,
}

impl ValidatorConfig {
    /// The depth bound actually enforced.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A token sequence known to match the grammar.
///
/// Only [`Validator::check`] can build one.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedExpr {
    tokens: Vec<Token>,
}

impl CheckedExpr {
    /// The validated tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens. Never zero.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`: empty input never validates.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The grammar validator.
pub struct Validator<'t> {
    cursor: Cursor<'t>,
    /// Spans of the `(` tokens whose group is still being read.
    open: Vec<Span>,
}

impl<'t> Validator<'t> {
    /// Validate `tokens`, returning them wrapped as a [`CheckedExpr`].
    pub fn check(tokens: Vec<Token>, config: &ValidatorConfig) -> EvalResult<CheckedExpr> {
        if tokens.is_empty() {
            return Err(EvalError::malformed(Span::point(0)));
        }
        check_balance(&tokens, config.effective_max_depth())?;
        Validator {
            cursor: Cursor::new(&tokens),
            open: Vec::new(),
        }
        .check_complete()?;
        tracing::trace!(tokens = tokens.len(), "expression validated");
        Ok(CheckedExpr { tokens })
    }

    /// A top-level `Expr` followed by nothing.
    fn check_complete(mut self) -> EvalResult<()> {
        self.expr()?;
        let rest = self.cursor.remaining();
        match (rest.first(), rest.last()) {
            (Some(first), Some(last)) => Err(EvalError::TrailingInput {
                suffix: join_lexemes(rest),
                span: first.span.merge(last.span),
            }),
            _ => Ok(()),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Grammar
    // ══════════════════════════════════════════════════════════════════════

    /// `Expr := Term (BinOp Term)*`
    fn expr(&mut self) -> EvalResult<()> {
        self.term(None)?;
        while let Some(op) = self.cursor.peek() {
            if !op.kind.is_binary_operator() {
                break;
            }
            self.cursor.advance();
            self.term(Some(op))?;
        }
        Ok(())
    }

    /// `Term := ['+'|'-'] Atom`
    ///
    /// `operator` is the binary operator this term is the right operand of.
    fn term(&mut self, operator: Option<&'t Token>) -> EvalResult<()> {
        let mut dangling = operator;
        if let Some(sign) = self.cursor.peek() {
            if sign.kind.is_sign() {
                self.cursor.advance();
                dangling = Some(sign);
            }
        }
        self.atom(dangling)
    }

    /// `Atom := Number | Call | Identifier | '(' Expr ')'`
    fn atom(&mut self, operator: Option<&'t Token>) -> EvalResult<()> {
        let Some(token) = self.cursor.peek() else {
            return Err(match (operator, self.open.last()) {
                (None, Some(span)) => EvalError::UnbalancedParens { span: *span },
                _ => missing_or_malformed(operator, self.cursor.end_span()),
            });
        };
        match &token.kind {
            TokenKind::Number(_) => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Identifier(_)
                if token.is_math() && self.cursor.look_ahead(1) == Some(&TokenKind::Dot) =>
            {
                self.call()
            }
            TokenKind::Identifier(_) => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::LParen => {
                self.open.push(token.span);
                self.cursor.advance();
                self.expr()?;
                self.expect_close()
            }
            TokenKind::RParen | TokenKind::Comma if operator.is_some() => {
                Err(missing_or_malformed(operator, token.span))
            }
            _ => Err(unexpected(token)),
        }
    }

    /// `Call := 'Math' '.' Identifier ['(' (Expr (',' Expr)*)? ')']`
    fn call(&mut self) -> EvalResult<()> {
        self.cursor.advance(); // eat `Math`
        self.cursor.advance(); // eat `.`
        match self.cursor.peek() {
            Some(Token {
                kind: TokenKind::Identifier(_),
                ..
            }) => {
                self.cursor.advance();
            }
            Some(token) => return Err(unexpected(token)),
            None => return Err(EvalError::malformed(self.cursor.end_span())),
        }

        let open = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::LParen) {
            return Ok(());
        }
        self.open.push(open);
        if self.cursor.eat(&TokenKind::RParen) {
            self.open.pop();
            return Ok(());
        }
        loop {
            self.expr()?;
            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            return self.expect_close();
        }
    }

    /// The `)` closing a group or argument list must come next. At end of
    /// input the error points at the unclosed `(`.
    fn expect_close(&mut self) -> EvalResult<()> {
        let open = self.open.pop();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(());
        }
        let span = match (self.cursor.peek(), open) {
            (None, Some(open)) => open,
            _ => self.cursor.current_span(),
        };
        Err(EvalError::UnbalancedParens { span })
    }
}

/// Parenthesis pre-pass. A `)` with nothing to close fails immediately.
/// Depth beyond `max_depth` is malformed. Unclosed groups pass through.
fn check_balance(tokens: &[Token], max_depth: usize) -> EvalResult<()> {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LParen => {
                depth += 1;
                if depth > max_depth {
                    return Err(EvalError::malformed_with(
                        format!("nesting deeper than {max_depth}"),
                        token.span,
                    ));
                }
            }
            TokenKind::RParen => {
                if depth == 0 {
                    return Err(EvalError::UnbalancedParens { span: token.span });
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Ok(())
}

fn missing_or_malformed(operator: Option<&Token>, span: Span) -> EvalError {
    match operator {
        Some(op) => EvalError::MissingOperand {
            operator: op.lexeme.clone(),
            span: op.span,
        },
        None => EvalError::malformed(span),
    }
}

fn unexpected(token: &Token) -> EvalError {
    EvalError::malformed_with(format!("at '{}'", token.lexeme), token.span)
}

fn join_lexemes(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
