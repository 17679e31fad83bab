//! safexpr parser: validates a token stream against the expression grammar.
//!
//! ```text
//! Expr    := Term (BinOp Term)*
//! Term    := ['+'|'-'] Atom
//! Atom    := Number | Call | Identifier | '(' Expr ')'
//! Call    := 'Math' '.' Identifier ['(' (Expr (',' Expr)*)? ')']
//! BinOp   := '+' | '-' | '*' | '/' | '%'
//! ```
//!
//! Validation never evaluates anything. Its output, a [`CheckedExpr`], is
//! the only input the interpreter accepts.

mod cursor;
mod validator;

pub use cursor::Cursor;
pub use validator::{
    CheckedExpr, Validator, ValidatorConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};
