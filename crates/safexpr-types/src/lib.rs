//! Shared types for the safexpr evaluator.
//!
//! This crate defines source spans, the closed error taxonomy every stage
//! reports through, and the serializable diagnostic form of those errors.

mod error;
mod span;

pub use error::{Diagnostic, ErrorCategory, ErrorCode, EvalError};
pub use span::Span;

/// Result type used throughout the evaluator.
pub type EvalResult<T> = std::result::Result<T, EvalError>;
