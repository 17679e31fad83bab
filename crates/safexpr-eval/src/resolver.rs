//! Name resolution against the bindings and the `Math` namespace.

use safexpr_lexer::token::Token;
use safexpr_types::{EvalError, EvalResult};

use crate::bindings::Bindings;
use crate::namespace::{self, MathFn, MathMember};

/// Resolve a plain identifier to a finite number.
pub fn resolve_variable(bindings: &Bindings, name: &Token) -> EvalResult<f64> {
    let value = bindings
        .get(&name.lexeme)
        .ok_or_else(|| EvalError::UndefinedVariable {
            name: name.lexeme.clone(),
            span: name.span,
        })?;
    value.to_number().ok_or_else(|| EvalError::NotANumber {
        name: name.lexeme.clone(),
        span: name.span,
    })
}

/// Resolve a `Math.<name>` used without a call.
pub fn resolve_math_constant(name: &Token) -> EvalResult<f64> {
    match lookup(name)? {
        MathMember::Constant(value) => Ok(value),
        MathMember::Function(_) => Err(not_callable(name)),
    }
}

/// Resolve a `Math.<name>(...)` call target.
pub fn resolve_math_function(name: &Token) -> EvalResult<MathFn> {
    match lookup(name)? {
        MathMember::Function(function) => Ok(function),
        MathMember::Constant(_) => Err(not_callable(name)),
    }
}

fn lookup(name: &Token) -> EvalResult<MathMember> {
    namespace::lookup(&name.lexeme).ok_or_else(|| EvalError::UndefinedMathMember {
        name: name.lexeme.clone(),
        span: name.span,
    })
}

fn not_callable(name: &Token) -> EvalError {
    EvalError::NotCallable {
        name: name.lexeme.clone(),
        span: name.span,
    }
}
