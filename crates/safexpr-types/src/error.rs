use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// The text is not a well-formed expression (E100–E199).
    Syntax,
    /// A name in a well-formed expression could not be resolved (E200–E299).
    Resolution,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Resolution => write!(f, "resolution"),
        }
    }
}

/// Numeric error code (E100–E299).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const MALFORMED_INPUT: Self = Self(100);
    pub const UNBALANCED_PARENS: Self = Self(101);
    pub const MISSING_OPERAND: Self = Self(102);
    pub const TRAILING_INPUT: Self = Self(103);

    // ── Resolution errors (E200–E299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);
    pub const UNDEFINED_MATH_MEMBER: Self = Self(201);
    pub const NOT_CALLABLE: Self = Self(202);
    pub const NOT_A_NUMBER: Self = Self(203);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Resolution,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Every way an evaluation can fail.
///
/// The set is closed and evaluation is failure-fast: the first failure
/// encountered is the one returned. Messages only ever embed token lexemes,
/// never anything produced by running the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Unrecognized character, bad numeral, empty input, or a token that
    /// cannot start an operand.
    #[error("malformed{}", detail_suffix(.detail))]
    MalformedInput { detail: Option<String>, span: Span },

    #[error("unbalanced parentheses")]
    UnbalancedParens { span: Span },

    #[error("{name} is not defined")]
    UndefinedVariable { name: String, span: Span },

    #[error("Math.{name} not defined")]
    UndefinedMathMember { name: String, span: Span },

    /// A `Math` constant used with call syntax, or a function used bare.
    #[error("Math.{name} not callable")]
    NotCallable { name: String, span: Span },

    /// A bound value that does not coerce to a finite number.
    #[error("{name} is not a number")]
    NotANumber { name: String, span: Span },

    #[error("missing operand: {operator}")]
    MissingOperand { operator: String, span: Span },

    /// Tokens left over after a complete expression.
    #[error("unparsed: {suffix}")]
    TrailingInput { suffix: String, span: Span },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" {detail}"),
        None => String::new(),
    }
}

impl EvalError {
    /// A bare `malformed` failure.
    pub fn malformed(span: Span) -> Self {
        Self::MalformedInput { detail: None, span }
    }

    /// A `malformed` failure naming what was wrong.
    pub fn malformed_with(detail: impl Into<String>, span: Span) -> Self {
        Self::MalformedInput {
            detail: Some(detail.into()),
            span,
        }
    }

    /// The stable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInput { .. } => ErrorCode::MALFORMED_INPUT,
            Self::UnbalancedParens { .. } => ErrorCode::UNBALANCED_PARENS,
            Self::MissingOperand { .. } => ErrorCode::MISSING_OPERAND,
            Self::TrailingInput { .. } => ErrorCode::TRAILING_INPUT,
            Self::UndefinedVariable { .. } => ErrorCode::UNDEFINED_VARIABLE,
            Self::UndefinedMathMember { .. } => ErrorCode::UNDEFINED_MATH_MEMBER,
            Self::NotCallable { .. } => ErrorCode::NOT_CALLABLE,
            Self::NotANumber { .. } => ErrorCode::NOT_A_NUMBER,
        }
    }

    /// Snake-case name of the variant, used as the `kind` of a [`Diagnostic`].
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "malformed_input",
            Self::UnbalancedParens { .. } => "unbalanced_parens",
            Self::MissingOperand { .. } => "missing_operand",
            Self::TrailingInput { .. } => "trailing_input",
            Self::UndefinedVariable { .. } => "undefined_variable",
            Self::UndefinedMathMember { .. } => "undefined_math_member",
            Self::NotCallable { .. } => "not_callable",
            Self::NotANumber { .. } => "not_a_number",
        }
    }

    /// Where in the normalized source the failure was detected.
    pub fn span(&self) -> Span {
        match self {
            Self::MalformedInput { span, .. }
            | Self::UnbalancedParens { span }
            | Self::MissingOperand { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::UndefinedMathMember { span, .. }
            | Self::NotCallable { span, .. }
            | Self::NotANumber { span, .. } => *span,
        }
    }

    /// The name, operator, suffix or detail the failure is about.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::MalformedInput { detail, .. } => detail.as_deref(),
            Self::UnbalancedParens { .. } => None,
            Self::MissingOperand { operator, .. } => Some(operator),
            Self::TrailingInput { suffix, .. } => Some(suffix),
            Self::UndefinedVariable { name, .. }
            | Self::UndefinedMathMember { name, .. }
            | Self::NotCallable { name, .. }
            | Self::NotANumber { name, .. } => Some(name),
        }
    }

    /// Structured form for transport.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::from(self)
    }
}

/// A structured evaluation error.
///
/// The message is plain text. Renderers must escape it before embedding it
/// in markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E200).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Variant name, e.g. `undefined_variable`.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
    /// The name/operator/suffix the error is about.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        let code = err.code();
        Self {
            code,
            category: code.category(),
            kind: err.kind().to_string(),
            message: err.to_string(),
            span: err.span(),
            subject: err.subject().map(str::to_string),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.span, self.code, self.category, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::MALFORMED_INPUT.category(),
            ErrorCategory::Syntax
        );
        assert_eq!(ErrorCode::TRAILING_INPUT.category(), ErrorCategory::Syntax);
        assert_eq!(
            ErrorCode::UNDEFINED_VARIABLE.category(),
            ErrorCategory::Resolution
        );
        assert_eq!(ErrorCode::NOT_A_NUMBER.category(), ErrorCategory::Resolution);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::UNDEFINED_VARIABLE), "E200");
        assert_eq!(format!("{}", ErrorCode::MALFORMED_INPUT), "E100");
    }

    #[test]
    fn test_messages() {
        let span = Span::new(0, 1);
        let cases = [
            (EvalError::malformed(span), "malformed"),
            (EvalError::malformed_with("01", span), "malformed 01"),
            (EvalError::UnbalancedParens { span }, "unbalanced parentheses"),
            (
                EvalError::UndefinedVariable {
                    name: "y".into(),
                    span,
                },
                "y is not defined",
            ),
            (
                EvalError::UndefinedMathMember {
                    name: "nope".into(),
                    span,
                },
                "Math.nope not defined",
            ),
            (
                EvalError::NotCallable {
                    name: "PI".into(),
                    span,
                },
                "Math.PI not callable",
            ),
            (
                EvalError::NotANumber {
                    name: "x".into(),
                    span,
                },
                "x is not a number",
            ),
            (
                EvalError::MissingOperand {
                    operator: "*".into(),
                    span,
                },
                "missing operand: *",
            ),
            (
                EvalError::TrailingInput {
                    suffix: "++ 2".into(),
                    span,
                },
                "unparsed: ++ 2",
            ),
        ];
        for (err, expected) in &cases {
            assert_eq!(err.to_string(), *expected);
        }
    }

    #[test]
    fn test_subject() {
        let span = Span::point(0);
        assert_eq!(EvalError::malformed(span).subject(), None);
        assert_eq!(EvalError::UnbalancedParens { span }.subject(), None);
        let err = EvalError::MissingOperand {
            operator: "/".into(),
            span,
        };
        assert_eq!(err.subject(), Some("/"));
    }

    #[test]
    fn test_diagnostic_from_error() {
        let err = EvalError::UndefinedVariable {
            name: "rate".into(),
            span: Span::new(4, 8),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::UNDEFINED_VARIABLE);
        assert_eq!(diag.category, ErrorCategory::Resolution);
        assert_eq!(diag.kind, "undefined_variable");
        assert_eq!(diag.message, "rate is not defined");
        assert_eq!(diag.subject.as_deref(), Some("rate"));
        assert_eq!(format!("{diag}"), "4..8: E200 [resolution] rate is not defined");
    }

    #[test]
    fn test_diagnostic_json_serialization() {
        let diag = EvalError::TrailingInput {
            suffix: "x".into(),
            span: Span::new(1, 2),
        }
        .to_diagnostic();

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"code\""));
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"kind\": \"trailing_input\""));
        assert!(json.contains("\"category\": \"syntax\""));
        assert!(json.contains("\"start\": 1"), "span must be flattened");
        assert!(json.contains("\"end\": 2"));

        let deserialized: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, diag);
    }

    #[test]
    fn test_diagnostic_omits_missing_subject() {
        let diag = EvalError::UnbalancedParens {
            span: Span::point(3),
        }
        .to_diagnostic();
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("subject"));
    }

    #[test]
    fn test_error_determinism_100_iterations() {
        let make = || EvalError::NotANumber {
            name: "x".into(),
            span: Span::new(12, 13),
        };
        let first_json = serde_json::to_string(&make().to_diagnostic()).unwrap();

        for i in 0..100 {
            let json = serde_json::to_string(&make().to_diagnostic()).unwrap();
            assert_eq!(first_json, json, "Determinism failure at iteration {i}");
        }
    }
}
