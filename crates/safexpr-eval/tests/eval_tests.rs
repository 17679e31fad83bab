//! Integration tests for the safexpr interpreter.
//!
//! Tests key interpreter features:
//! - literal and variable evaluation
//! - precedence and associativity
//! - unary signs and parentheses
//! - Math constants and calls
//! - IEEE-754 edge results
//! - resolution failures and their ordering

use safexpr_eval::{interpret, Bindings};
use safexpr_lexer::Lexer;
use safexpr_parser::{Validator, ValidatorConfig};
use safexpr_types::{EvalError, EvalResult, Span};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Lex, validate and interpret `source`.
fn eval_with(source: &str, bindings: &Bindings) -> EvalResult<f64> {
    let tokens = Lexer::tokenize(source)?;
    let expr = Validator::check(tokens, &ValidatorConfig::default())?;
    interpret(&expr, bindings)
}

/// Evaluate with no bindings, panicking on failure.
fn eval(source: &str) -> f64 {
    eval_with(source, &Bindings::new())
        .unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

/// Bindings from a JSON object literal.
fn vars(json: &str) -> Bindings {
    Bindings::from_json(json).expect("test bindings should decode")
}

// ══════════════════════════════════════════════════════════════════════════════
// Literals and variables
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn literal_values() {
    assert_eq!(eval("0"), 0.0);
    assert_eq!(eval("0."), 0.0);
    assert_eq!(eval(".333"), 0.333);
    assert_eq!(eval("1e-1"), 0.1);
    assert_eq!(eval("(((42)))"), 42.0);
}

#[test]
fn variable_values() {
    let bindings = vars(r#"{"x": 1, "rate": "0.25", "flag": true, "none": null}"#);
    assert_eq!(eval_with("x", &bindings), Ok(1.0));
    assert_eq!(eval_with("rate * 4", &bindings), Ok(1.0));
    assert_eq!(eval_with("flag + flag", &bindings), Ok(2.0));
    assert_eq!(eval_with("none - 1", &bindings), Ok(-1.0));
}

// ══════════════════════════════════════════════════════════════════════════════
// Precedence and associativity
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn multiplicative_binds_tighter() {
    assert_eq!(eval("3 * 7 + (-11 + 13) * 19 - 23"), 36.0);
    assert_eq!(eval("1 + 2 * 3"), 7.0);
    assert_eq!(eval("2 * 3 + 1"), 7.0);
    assert_eq!(eval("10 - 6 / 2"), 7.0);
    assert_eq!(eval("1 + 7 % 4"), 4.0);
}

#[test]
fn left_associative() {
    assert_eq!(eval("2 - 2 - 2"), -2.0);
    assert_eq!(eval("16 / 4 / 2"), 2.0);
    assert_eq!(eval("17 % 10 % 4"), 3.0);
    assert_eq!(eval("2 * 3 % 4"), 2.0);
    assert_eq!(eval("1 - 2 + 3"), 2.0);
}

#[test]
fn parentheses_reset_precedence() {
    assert_eq!(eval("(1 + 2) * 3"), 9.0);
    assert_eq!(eval("2 - (2 - 2)"), 2.0);
    assert_eq!(eval("2 * (3 + 4) * 5"), 70.0);
}

#[test]
fn unary_signs() {
    assert_eq!(eval("-1"), -1.0);
    assert_eq!(eval("+1"), 1.0);
    assert_eq!(eval("1 - -1"), 2.0);
    assert_eq!(eval("1 + +2"), 3.0);
    assert_eq!(eval("-2 * 3"), -6.0);
    assert_eq!(eval("-(2 + 3)"), -5.0);
    assert!(eval("-0").is_sign_negative());
}

// ══════════════════════════════════════════════════════════════════════════════
// Math
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn math_constants() {
    assert_eq!(eval("Math.PI"), std::f64::consts::PI);
    assert_eq!(eval("Math.PI / 2"), std::f64::consts::FRAC_PI_2);
    assert_eq!(eval("Math.SQRT2 * Math.SQRT1_2"), std::f64::consts::SQRT_2 * std::f64::consts::FRAC_1_SQRT_2);
}

#[test]
fn math_calls() {
    assert_eq!(eval("Math.sqrt(2)"), std::f64::consts::SQRT_2);
    assert_eq!(eval_with("Math.pow(2, n)", &vars(r#"{"n": 2}"#)), Ok(4.0));
    assert_eq!(eval("Math.max(1, 5, 3)"), 5.0);
    assert_eq!(eval("Math.max()"), f64::NEG_INFINITY);
    assert_eq!(eval("Math.abs(-3) + Math.floor(2.7)"), 5.0);
    assert_eq!(eval("Math.min(Math.max(1, 2), 3) * 2"), 4.0);
    assert_eq!(eval("-Math.abs(-(1))"), -1.0);
    assert_eq!(eval("Math.pow(1 + 1, 2 * 2)"), 16.0);
}

#[test]
fn math_arity_is_lenient() {
    assert!(eval("Math.sqrt()").is_nan());
    assert_eq!(eval("Math.sqrt(9, 100)"), 3.0);
}

// ══════════════════════════════════════════════════════════════════════════════
// IEEE-754 results
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn division_by_zero() {
    assert_eq!(eval("1/0"), f64::INFINITY);
    assert_eq!(eval("1/-0"), f64::NEG_INFINITY);
    assert!(eval("0/0").is_nan());
}

#[test]
fn nan_is_a_result() {
    assert!(eval("Math.sqrt(-1)").is_nan());
    assert!(eval("Math.sqrt(-1) + 1").is_nan());
    assert!(eval("5 % 0").is_nan());
}

#[test]
fn remainder_follows_dividend() {
    assert_eq!(eval("-7 % 4"), -3.0);
    assert_eq!(eval("7 % -4"), 3.0);
    assert_eq!(eval("5.5 % 2"), 1.5);
}

#[test]
fn overflow_is_infinite() {
    assert_eq!(eval("1e308 * 10"), f64::INFINITY);
    assert_eq!(eval("-1e308 * 10"), f64::NEG_INFINITY);
}

// ══════════════════════════════════════════════════════════════════════════════
// Resolution failures
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn undefined_variable() {
    let err = eval_with("y", &vars(r#"{"x": 1}"#)).unwrap_err();
    assert_eq!(
        err,
        EvalError::UndefinedVariable {
            name: "y".into(),
            span: Span::new(0, 1),
        }
    );
    assert_eq!(err.to_string(), "y is not defined");
}

#[test]
fn bare_math_is_not_a_variable() {
    assert!(matches!(
        eval_with("Math + 1", &Bindings::new()),
        Err(EvalError::UndefinedVariable { name, .. }) if name == "Math"
    ));
}

#[test]
fn undefined_math_member() {
    let err = eval_with("Math.random()", &Bindings::new()).unwrap_err();
    assert_eq!(err.to_string(), "Math.random not defined");
    assert_eq!(err.span(), Span::new(5, 11));
    assert!(matches!(
        eval_with("Math.pi", &Bindings::new()),
        Err(EvalError::UndefinedMathMember { .. })
    ));
}

#[test]
fn not_callable_both_ways() {
    let err = eval_with("Math.PI(2)", &Bindings::new()).unwrap_err();
    assert_eq!(err.to_string(), "Math.PI not callable");
    let err = eval_with("Math.sqrt + 1", &Bindings::new()).unwrap_err();
    assert_eq!(err.to_string(), "Math.sqrt not callable");
}

#[test]
fn not_a_number() {
    let bindings = vars(r#"{"s": "abc", "list": [1], "obj": {}}"#);
    for name in ["s", "list", "obj"] {
        let err = eval_with(name, &bindings).unwrap_err();
        assert_eq!(err.to_string(), format!("{name} is not a number"));
    }
    let nan = Bindings::new().with("n", f64::NAN).unwrap();
    assert!(matches!(
        eval_with("n * 0", &nan),
        Err(EvalError::NotANumber { .. })
    ));
}

#[test]
fn first_failure_wins() {
    // Left to right: `a` is reached before `b`
    let err = eval_with("a + b", &Bindings::new()).unwrap_err();
    assert_eq!(err.subject(), Some("a"));
    // Arguments are not evaluated once the call target fails
    let err = eval_with("Math.nope(a)", &Bindings::new()).unwrap_err();
    assert!(matches!(err, EvalError::UndefinedMathMember { .. }));
}

#[test]
fn grammar_failures_precede_resolution() {
    // `y` is undefined, but the dangling operator is found first
    assert!(matches!(
        eval_with("y *", &Bindings::new()),
        Err(EvalError::MissingOperand { .. })
    ));
}

// ══════════════════════════════════════════════════════════════════════════════
// Determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn determinism_100_iterations() {
    let bindings = vars(r#"{"n": 3, "x": "1.5"}"#);
    let source = "Math.pow(2, n) * x - Math.hypot(3, 4) % 3 / 0.7";
    let first = eval_with(source, &bindings).unwrap();
    for i in 0..100 {
        let again = eval_with(source, &bindings).unwrap();
        assert_eq!(first.to_bits(), again.to_bits(), "Determinism failure at iteration {i}");
    }
}
