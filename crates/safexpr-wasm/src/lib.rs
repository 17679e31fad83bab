//! safexpr as a WASM module for browser environments.
//!
//! This crate exposes expression evaluation via `wasm-bindgen` so a form can
//! check its inputs and preview results client-side, with the same code the
//! server runs.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { evaluate, check_vars } from 'safexpr-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(evaluate("Math.pow(2, n)", '{"n": 10}'));
//! // { success: true, result: "1024" }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use safexpr::Bindings;

/// Evaluate an expression against JSON-encoded bindings.
///
/// Returns a JSON string containing an `OutcomeReport`:
/// ```json
/// { "success": true, "result": "1024" }
/// ```
///
/// On failure, `success` is `false` and `message` holds plain text that the
/// page must escape before display. Evaluation failures also carry a
/// structured `diagnostic` with code, kind and byte span.
#[wasm_bindgen]
pub fn evaluate(source: &str, vars_json: &str) -> String {
    safexpr::evaluate_to_report(source, vars_json).to_json()
}

/// Result of checking a bindings object before submission.
#[derive(Debug, Serialize)]
struct VarsCheck {
    valid: bool,
    names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Validate JSON-encoded bindings without evaluating anything.
///
/// Returns `{ "valid": true, "names": [...] }` listing the bound names, or
/// `{ "valid": false, "names": [], "message": "..." }`. Names bound to values
/// that are not numbers are still valid here; they only fail if an
/// expression reads them.
#[wasm_bindgen]
pub fn check_vars(vars_json: &str) -> String {
    let check = match Bindings::from_json(vars_json) {
        Ok(bindings) => VarsCheck {
            valid: true,
            names: bindings.names().map(str::to_string).collect(),
            message: None,
        },
        Err(err) => VarsCheck {
            valid: false,
            names: Vec::new(),
            message: Some(err.to_string()),
        },
    };
    serde_json::to_string(&check).unwrap_or_else(|e| {
        format!(r#"{{"valid":false,"names":[],"message":"serialization error: {e}"}}"#)
    })
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    safexpr::SAFEXPR_VERSION.to_string()
}

/// Return a structured JSON table of the `Math` namespace.
///
/// Lists every constant with its value and every function with its arity
/// and a short description, for completion and help text.
#[wasm_bindgen]
pub fn get_math_table() -> String {
    safexpr::math_table::generate_math_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use safexpr::OutcomeReport;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).expect("export should return valid JSON")
    }

    #[test]
    fn evaluate_success() {
        let report: OutcomeReport =
            serde_json::from_str(&evaluate("Math.pow(2, n)", r#"{"n": 10}"#)).unwrap();
        assert!(report.success);
        assert_eq!(report.result.as_deref(), Some("1024"));
    }

    #[test]
    fn evaluate_failure_has_diagnostic() {
        let out = parse(&evaluate("2 *", "{}"));
        assert_eq!(out["success"], false);
        assert_eq!(out["message"], "missing operand: *");
        assert_eq!(out["diagnostic"]["code"], 102);
        assert_eq!(out["diagnostic"]["category"], "syntax");
    }

    #[test]
    fn check_vars_lists_names() {
        let out = parse(&check_vars(r#"{"b": 1, "a": "x"}"#));
        assert_eq!(out["valid"], true);
        assert_eq!(out["names"], serde_json::json!(["a", "b"]));
        assert!(out.get("message").is_none());
    }

    #[test]
    fn check_vars_rejects() {
        for bad in ["", "[]", "{", r#"{"Math": 1}"#] {
            let out = parse(&check_vars(bad));
            assert_eq!(out["valid"], false, "{bad:?}");
            assert!(out["message"].is_string());
        }
    }

    #[test]
    fn version_matches_crate() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn math_table_is_json() {
        let table = parse(&get_math_table());
        assert_eq!(table["total_functions"], 34);
    }
}
