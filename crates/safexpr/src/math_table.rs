//! Machine-generated table of the `Math` namespace.
//!
//! Built from the namespace itself, so it cannot drift from what the
//! interpreter accepts. Editors and the browser form use it for completion
//! and help text.

use serde_json::{json, Value};

use safexpr_eval::namespace::{Arity, MathFn, CONSTANTS};

use crate::SAFEXPR_VERSION;

fn constant_description(name: &str) -> &'static str {
    match name {
        "E" => "Euler's number (2.718281828459045)",
        "LN10" => "Natural logarithm of 10",
        "LN2" => "Natural logarithm of 2",
        "LOG10E" => "Base-10 logarithm of E",
        "LOG2E" => "Base-2 logarithm of E",
        "PI" => "Pi (3.141592653589793)",
        "SQRT1_2" => "Square root of 1/2",
        "SQRT2" => "Square root of 2",
        _ => "",
    }
}

fn function_description(function: MathFn) -> &'static str {
    match function {
        MathFn::Abs => "Absolute value",
        MathFn::Acos => "Arccosine, in radians",
        MathFn::Acosh => "Hyperbolic arccosine",
        MathFn::Asin => "Arcsine, in radians",
        MathFn::Asinh => "Hyperbolic arcsine",
        MathFn::Atan => "Arctangent, in radians",
        MathFn::Atan2 => "Angle of the point (x, y), called as atan2(y, x)",
        MathFn::Atanh => "Hyperbolic arctangent",
        MathFn::Cbrt => "Cube root",
        MathFn::Ceil => "Round up to an integer",
        MathFn::Clz32 => "Leading zero bits of the 32-bit unsigned integer",
        MathFn::Cos => "Cosine of an angle in radians",
        MathFn::Cosh => "Hyperbolic cosine",
        MathFn::Exp => "E raised to the argument",
        MathFn::Expm1 => "exp(x) - 1, accurate near zero",
        MathFn::Floor => "Round down to an integer",
        MathFn::Fround => "Nearest single-precision value",
        MathFn::Hypot => "Square root of the sum of squares",
        MathFn::Imul => "32-bit integer multiplication",
        MathFn::Log => "Natural logarithm",
        MathFn::Log10 => "Base-10 logarithm",
        MathFn::Log1p => "ln(1 + x), accurate near zero",
        MathFn::Log2 => "Base-2 logarithm",
        MathFn::Max => "Largest argument; -Infinity with none",
        MathFn::Min => "Smallest argument; Infinity with none",
        MathFn::Pow => "Base raised to the exponent",
        MathFn::Round => "Round to the nearest integer, halves toward +Infinity",
        MathFn::Sign => "-1, 1, or the argument itself for zeros and NaN",
        MathFn::Sin => "Sine of an angle in radians",
        MathFn::Sinh => "Hyperbolic sine",
        MathFn::Sqrt => "Square root",
        MathFn::Tan => "Tangent of an angle in radians",
        MathFn::Tanh => "Hyperbolic tangent",
        MathFn::Trunc => "Integer part, dropping any fraction",
    }
}

fn arity_value(arity: Arity) -> Value {
    match arity {
        Arity::Fixed(n) => json!(n),
        Arity::Variadic => json!("variadic"),
    }
}

/// Generate the table as pretty-printed JSON.
///
/// ```json
/// {
///   "version": "0.1.0",
///   "total_constants": 8,
///   "total_functions": 34,
///   "constants": [ { "name": "E", "value": 2.718281828459045, "description": "..." } ],
///   "functions": [ { "name": "abs", "arity": 1, "description": "Absolute value" } ]
/// }
/// ```
pub fn generate_math_table() -> String {
    let constants: Vec<Value> = CONSTANTS
        .iter()
        .map(|(name, value)| {
            json!({
                "name": name,
                "value": value,
                "description": constant_description(name),
            })
        })
        .collect();
    let functions: Vec<Value> = MathFn::ALL
        .iter()
        .map(|f| {
            json!({
                "name": f.name(),
                "arity": arity_value(f.arity()),
                "description": function_description(*f),
            })
        })
        .collect();

    let table = json!({
        "version": SAFEXPR_VERSION,
        "total_constants": constants.len(),
        "total_functions": functions.len(),
        "constants": constants,
        "functions": functions,
    });
    format!("{table:#}")
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
