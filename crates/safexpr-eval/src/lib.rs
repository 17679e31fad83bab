//! safexpr interpreter.
//!
//! Evaluates a [`CheckedExpr`](safexpr_parser::CheckedExpr) to an IEEE-754
//! double. Identifiers resolve against caller-supplied [`Bindings`];
//! `Math.<name>` resolves against the fixed [`namespace`]. Nothing is ever
//! compiled or executed: control flow depends only on the token sequence
//! and those two lookups.

pub mod bindings;
pub mod error;
pub mod interpreter;
pub mod namespace;
pub mod resolver;

pub use bindings::{Bindings, BoundValue};
pub use error::{BindingsError, BindingsResult};
pub use interpreter::{interpret, BinaryOp, Interpreter};
pub use namespace::{Arity, MathFn, MathMember};
