//! safexpr: evaluate untrusted arithmetic expressions without executing them.
//!
//! ```text
//! source → NFC → Lexer → Validator → Interpreter (+ Bindings, Math) → f64
//! ```
//!
//! The input is only ever tokenized, checked against a small grammar and
//! interpreted. Identifiers resolve against caller-supplied [`Bindings`] and
//! `Math.<name>` against a fixed namespace; nothing else is reachable.
//!
//! ```
//! use safexpr::{evaluate, Bindings};
//!
//! let vars = Bindings::from_json(r#"{"n": 2}"#).unwrap();
//! assert_eq!(evaluate("Math.pow(2, n) + 1", &vars), Ok(5.0));
//! ```
//!
//! Spans in errors are byte offsets into the NFC-normalized source.

pub mod config;
pub mod math_table;
pub mod report;

pub use config::{EvalConfig, DEFAULT_MAX_SOURCE_LEN};
pub use report::{evaluate_to_report, evaluate_to_report_with_config, format_number, OutcomeReport};

pub use safexpr_eval::{Bindings, BindingsError, BoundValue, MathFn};
pub use safexpr_parser::{CheckedExpr, MAX_DEPTH_CEILING};
pub use safexpr_types::{Diagnostic, ErrorCategory, ErrorCode, EvalError, EvalResult, Span};

use safexpr_eval::interpret;
use safexpr_lexer::{normalize, Lexer};
use safexpr_parser::Validator;

/// Crate version, reported by the CLI and the WASM module.
pub const SAFEXPR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluate `source` with the default limits.
pub fn evaluate(source: &str, bindings: &Bindings) -> EvalResult<f64> {
    evaluate_with_config(source, bindings, &EvalConfig::default())
}

/// Evaluate `source` under explicit limits.
///
/// A NaN or infinite result is a success. The first failure encountered is
/// the one returned.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn evaluate_with_config(
    source: &str,
    bindings: &Bindings,
    config: &EvalConfig,
) -> EvalResult<f64> {
    let outcome = validate(source, config).and_then(|expr| interpret(&expr, bindings));
    match &outcome {
        Ok(value) => tracing::debug!(%value, "evaluated"),
        Err(err) => tracing::debug!(code = %err.code(), kind = err.kind(), "evaluation failed"),
    }
    outcome
}

/// Normalize, tokenize and validate `source` without evaluating it.
///
/// Succeeds for every expression that is well-formed, whether or not its
/// names would resolve.
pub fn validate(source: &str, config: &EvalConfig) -> EvalResult<CheckedExpr> {
    if source.len() > config.max_source_len {
        return Err(EvalError::malformed_with(
            format!("input longer than {} bytes", config.max_source_len),
            Span::point(0),
        ));
    }
    let text = normalize(source);
    let tokens = Lexer::tokenize(&text)?;
    Validator::check(tokens, &config.validator_config())
}
