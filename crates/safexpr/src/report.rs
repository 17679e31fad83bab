//! Serializable evaluation outcomes.
//!
//! An [`OutcomeReport`] is what crosses a process or language boundary: the
//! WASM module and the CLI's `--json` mode both emit one. Result numbers are
//! rendered as decimal text so NaN and the infinities survive JSON.

use serde::{Deserialize, Serialize};

use crate::{evaluate_with_config, Bindings, BindingsError, Diagnostic, EvalConfig, EvalResult};

/// The outcome of one evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub success: bool,
    /// Decimal rendering of the result, on success.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<String>,
    /// Plain-text failure message. Renderers must escape it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    /// Structured failure, for evaluation errors only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub diagnostic: Option<Diagnostic>,
}

impl OutcomeReport {
    pub fn from_outcome(outcome: &EvalResult<f64>) -> Self {
        match outcome {
            Ok(value) => Self {
                success: true,
                result: Some(format_number(*value)),
                message: None,
                diagnostic: None,
            },
            Err(err) => Self {
                success: false,
                result: None,
                message: Some(err.to_string()),
                diagnostic: Some(err.to_diagnostic()),
            },
        }
    }

    /// Report for bindings that could not be decoded.
    pub fn from_bindings_error(err: &BindingsError) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(err.to_string()),
            diagnostic: None,
        }
    }

    /// Compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"message":"serialization error: {e}"}}"#)
        })
    }
}

/// Decimal text for a result: `NaN`, `Infinity`, `-Infinity`, and `0` for
/// either zero.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Decode `vars_json` and evaluate with default limits.
///
/// Blank `vars_json` means no bindings.
pub fn evaluate_to_report(source: &str, vars_json: &str) -> OutcomeReport {
    evaluate_to_report_with_config(source, vars_json, &EvalConfig::default())
}

pub fn evaluate_to_report_with_config(
    source: &str,
    vars_json: &str,
    config: &EvalConfig,
) -> OutcomeReport {
    let bindings = if vars_json.trim().is_empty() {
        Ok(Bindings::new())
    } else {
        Bindings::from_json(vars_json)
    };
    match bindings {
        Ok(bindings) => {
            OutcomeReport::from_outcome(&evaluate_with_config(source, &bindings, config))
        }
        Err(err) => OutcomeReport::from_bindings_error(&err),
    }
}
