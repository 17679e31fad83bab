//! The fixed `Math` namespace.
//!
//! Members mirror the JavaScript `Math` object without the impure `random`.
//! Functions follow JavaScript argument handling: a missing argument is NaN,
//! extra arguments are ignored, and `max`/`min`/`hypot` take any number.

use std::f64::consts;
use std::fmt;

/// A resolved `Math` member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathMember {
    /// A bare numeric constant such as `Math.PI`.
    Constant(f64),
    /// A function that must be called, such as `Math.sqrt(2)`.
    Function(MathFn),
}

/// Named constants, in listing order.
pub const CONSTANTS: &[(&str, f64)] = &[
    ("E", consts::E),
    ("LN10", consts::LN_10),
    ("LN2", consts::LN_2),
    ("LOG10E", consts::LOG10_E),
    ("LOG2E", consts::LOG2_E),
    ("PI", consts::PI),
    ("SQRT1_2", consts::FRAC_1_SQRT_2),
    ("SQRT2", consts::SQRT_2),
];

/// Look up a member by its exact, case-sensitive name.
pub fn lookup(name: &str) -> Option<MathMember> {
    if let Some((_, value)) = CONSTANTS.iter().find(|(n, _)| *n == name) {
        return Some(MathMember::Constant(*value));
    }
    MathFn::from_name(name).map(MathMember::Function)
}

/// How many arguments a function reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Variadic => write!(f, "variadic"),
        }
    }
}

/// The closed set of `Math` functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atan2,
    Atanh,
    Cbrt,
    Ceil,
    Clz32,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Fround,
    Hypot,
    Imul,
    Log,
    Log10,
    Log1p,
    Log2,
    Max,
    Min,
    Pow,
    Round,
    Sign,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Trunc,
}

impl MathFn {
    /// Every function, in listing order.
    pub const ALL: &'static [MathFn] = &[
        Self::Abs,
        Self::Acos,
        Self::Acosh,
        Self::Asin,
        Self::Asinh,
        Self::Atan,
        Self::Atan2,
        Self::Atanh,
        Self::Cbrt,
        Self::Ceil,
        Self::Clz32,
        Self::Cos,
        Self::Cosh,
        Self::Exp,
        Self::Expm1,
        Self::Floor,
        Self::Fround,
        Self::Hypot,
        Self::Imul,
        Self::Log,
        Self::Log10,
        Self::Log1p,
        Self::Log2,
        Self::Max,
        Self::Min,
        Self::Pow,
        Self::Round,
        Self::Sign,
        Self::Sin,
        Self::Sinh,
        Self::Sqrt,
        Self::Tan,
        Self::Tanh,
        Self::Trunc,
    ];

    /// Resolve a member name to a function.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// The member name as written after `Math.`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Acos => "acos",
            Self::Acosh => "acosh",
            Self::Asin => "asin",
            Self::Asinh => "asinh",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Atanh => "atanh",
            Self::Cbrt => "cbrt",
            Self::Ceil => "ceil",
            Self::Clz32 => "clz32",
            Self::Cos => "cos",
            Self::Cosh => "cosh",
            Self::Exp => "exp",
            Self::Expm1 => "expm1",
            Self::Floor => "floor",
            Self::Fround => "fround",
            Self::Hypot => "hypot",
            Self::Imul => "imul",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log1p => "log1p",
            Self::Log2 => "log2",
            Self::Max => "max",
            Self::Min => "min",
            Self::Pow => "pow",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Sin => "sin",
            Self::Sinh => "sinh",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Tanh => "tanh",
            Self::Trunc => "trunc",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::Atan2 | Self::Imul | Self::Pow => Arity::Fixed(2),
            Self::Hypot | Self::Max | Self::Min => Arity::Variadic,
            _ => Arity::Fixed(1),
        }
    }

    /// Apply the function to already-evaluated arguments.
    pub fn apply(self, args: &[f64]) -> f64 {
        let x = arg(args, 0);
        match self {
            Self::Abs => x.abs(),
            Self::Acos => x.acos(),
            Self::Acosh => x.acosh(),
            Self::Asin => x.asin(),
            Self::Asinh => x.asinh(),
            Self::Atan => x.atan(),
            Self::Atan2 => x.atan2(arg(args, 1)),
            Self::Atanh => x.atanh(),
            Self::Cbrt => x.cbrt(),
            Self::Ceil => x.ceil(),
            Self::Clz32 => f64::from(to_uint32(x).leading_zeros()),
            Self::Cos => x.cos(),
            Self::Cosh => x.cosh(),
            Self::Exp => x.exp(),
            Self::Expm1 => x.exp_m1(),
            Self::Floor => x.floor(),
            Self::Fround => f64::from(x as f32),
            Self::Hypot => hypot(args),
            Self::Imul => f64::from(to_int32(x).wrapping_mul(to_int32(arg(args, 1)))),
            Self::Log => x.ln(),
            Self::Log10 => x.log10(),
            Self::Log1p => x.ln_1p(),
            Self::Log2 => x.log2(),
            Self::Max => extremum(args, f64::NEG_INFINITY, |a, b| {
                a > b || (a == 0.0 && b == 0.0 && b.is_sign_negative())
            }),
            Self::Min => extremum(args, f64::INFINITY, |a, b| {
                a < b || (a == 0.0 && b == 0.0 && a.is_sign_negative())
            }),
            Self::Pow => pow(x, arg(args, 1)),
            Self::Round => round(x),
            Self::Sign => sign(x),
            Self::Sin => x.sin(),
            Self::Sinh => x.sinh(),
            Self::Sqrt => x.sqrt(),
            Self::Tan => x.tan(),
            Self::Tanh => x.tanh(),
            Self::Trunc => x.trunc(),
        }
    }
}

impl fmt::Display for MathFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Math.{}", self.name())
    }
}

// ══════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════

fn arg(args: &[f64], index: usize) -> f64 {
    args.get(index).copied().unwrap_or(f64::NAN)
}

/// `ToUint32`: truncate, then wrap modulo 2^32. Non-finite is 0.
fn to_uint32(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// `ToInt32`: `ToUint32` reinterpreted as two's complement.
fn to_int32(x: f64) -> i32 {
    to_uint32(x) as i32
}

/// Fold with `prefer(a, b)` meaning "`a` wins over `b`". Any NaN wins.
fn extremum(args: &[f64], empty: f64, prefer: impl Fn(f64, f64) -> bool) -> f64 {
    let mut best = empty;
    for &x in args {
        if x.is_nan() {
            return f64::NAN;
        }
        if prefer(x, best) {
            best = x;
        }
    }
    best
}

/// An infinite argument wins over NaN.
fn hypot(args: &[f64]) -> f64 {
    if args.iter().any(|x| x.is_infinite()) {
        return f64::INFINITY;
    }
    args.iter().fold(0.0_f64, |acc, &x| acc.hypot(x))
}

/// `powf` except that `1 ** NaN` and `(±1) ** ±Infinity` are NaN.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Round half toward +Infinity, keeping the sign of zero.
fn round(x: f64) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 && x < 0.0 {
        -0.0
    } else {
        rounded
    }
}

/// Like `signum`, but zeros and NaN map to themselves.
fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}
