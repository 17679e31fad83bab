//! Caller-supplied variable bindings.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{BindingsError, BindingsResult};
use safexpr_lexer::token::MATH_NAMESPACE;

/// A value bound to a variable name.
///
/// Values are kept as supplied and only coerced to a number when an
/// expression reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// A number supplied directly, NaN and infinities included.
    Number(f64),
    /// A value decoded from JSON.
    Json(Value),
}

impl BoundValue {
    /// Coerce to a finite number.
    ///
    /// JSON numbers are taken as-is, booleans are 1 or 0 and `null` is 0.
    /// Strings are trimmed: empty is 0, anything else must parse as a decimal
    /// numeral. Arrays, objects and non-finite results give `None`.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Json(Value::Number(n)) => n.as_f64()?,
            Self::Json(Value::Bool(b)) => f64::from(u8::from(*b)),
            Self::Json(Value::Null) => 0.0,
            Self::Json(Value::String(s)) => match s.trim() {
                "" => 0.0,
                text => text.parse().ok()?,
            },
            Self::Json(Value::Array(_) | Value::Object(_)) => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<f64> for BoundValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for BoundValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for BoundValue {
    fn from(b: bool) -> Self {
        Self::Json(Value::Bool(b))
    }
}

impl From<&str> for BoundValue {
    fn from(s: &str) -> Self {
        Self::Json(Value::String(s.to_string()))
    }
}

impl From<Value> for BoundValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Mapping from variable name to bound value, read-only during evaluation.
///
/// No entry may be named `Math`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, BoundValue>,
}

impl Bindings {
    /// Empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<BoundValue>,
    ) -> BindingsResult<()> {
        let name = name.into();
        if name == MATH_NAMESPACE {
            return Err(BindingsError::ReservedName(name));
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Builder form of [`Bindings::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<BoundValue>,
    ) -> BindingsResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Decode bindings from a JSON object.
    pub fn from_json(json: &str) -> BindingsResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build bindings from an already-decoded JSON object.
    pub fn from_value(value: Value) -> BindingsResult<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => return Err(BindingsError::NotAnObject(json_kind(&other))),
        };
        let mut bindings = Self::new();
        for (name, value) in object {
            bindings.insert(name, value)?;
        }
        Ok(bindings)
    }

    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
