//! Errors raised while building variable bindings.
//!
//! Evaluation failures themselves are [`safexpr_types::EvalError`].

use thiserror::Error;

/// Bindings could not be built from the supplied input.
#[derive(Debug, Error)]
pub enum BindingsError {
    /// `Math` names the built-in namespace and cannot be rebound.
    #[error("`{0}` is reserved and cannot be bound")]
    ReservedName(String),

    /// The JSON was valid but its top level was not an object.
    #[error("bindings must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid bindings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for bindings construction.
pub type BindingsResult<T> = Result<T, BindingsError>;
