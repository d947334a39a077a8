//! Dynamic values
//!
//! [`Value`] is the tagged variant every key resolves to. Primitives are held
//! inline; objects, arrays and views are shared handles compared by identity.

use crate::array::Array;
use crate::object::Object;
use crate::view::ScopeView;
use std::fmt::{self, Display, Formatter};

/// Largest integer an `f64` represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Dynamically typed value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Missing value
    #[default]
    Undefined,

    /// Explicit null
    Null,

    /// Boolean
    Bool(bool),

    /// IEEE-754 double, the only numeric type
    Number(f64),

    /// String
    String(String),

    /// Shared record
    Object(Object),

    /// Shared list
    Array(Array),

    /// Scope view
    View(ScopeView),
}

impl Value {
    /// Returns true for `undefined`
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true for `undefined` and `null`
    #[inline]
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns true for values that cannot carry properties
    #[inline]
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_) | Self::View(_))
    }

    /// Boolean coercion
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Object(_) | Self::Array(_) | Self::View(_) => true,
        }
    }

    /// Short type name used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(n) if n.is_nan() => "NaN",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::View(_) => "view",
        }
    }

    /// Numeric coercion
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
            Self::Array(a) => match a.len() {
                0 => 0.0,
                1 => a.get_index(0).map_or(f64::NAN, |v| v.to_number()),
                _ => f64::NAN,
            },
            Self::Object(_) | Self::View(_) => f64::NAN,
        }
    }

    /// Number value, if this is a number
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String slice, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Object handle, if this is an object
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Array handle, if this is an array
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// View handle, if this is a view
    #[inline]
    #[must_use]
    pub fn as_view(&self) -> Option<&ScopeView> {
        match self {
            Self::View(v) => Some(v),
            _ => None,
        }
    }

    /// Non-negative integral number usable as a length or index
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_index(&self) -> Option<usize> {
        let n = self.as_number()?;
        if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
            Some(n as usize)
        } else {
            None
        }
    }

    /// Property read on any value
    ///
    /// Primitives carry no properties and yield `undefined`.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Value {
        match self {
            Self::Object(o) => o.get(key).unwrap_or_default(),
            Self::Array(a) => a.get(key).unwrap_or_default(),
            Self::View(v) => v.get(key),
            _ => Value::Undefined,
        }
    }

    /// Property presence on any value
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        match self {
            Self::Object(o) => o.has(key),
            Self::Array(a) => a.has(key),
            Self::View(v) => v.has(key),
            _ => false,
        }
    }

    /// Convert to JSON
    ///
    /// Undefined and non-finite numbers become `null`; views export their
    /// wrapped target.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Object(o) => o.to_json(),
            Self::Array(a) => a.to_json(),
            Self::View(v) => v.target().to_json(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

#[allow(clippy::cast_precision_loss)]
fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64, f: &mut Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Object(_) | Self::View(_) => f.write_str("[object Object]"),
            Self::Array(a) => {
                for (i, item) in a.to_vec().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_nullish() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<ScopeView> for Value {
    fn from(v: ScopeView) -> Self {
        Self::View(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(Object::from(map)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::from(Object::new()).is_truthy());
        assert!(Value::from(Array::new()).is_truthy());
    }

    #[test]
    fn primitives() {
        for v in [
            Value::Undefined,
            Value::Null,
            Value::from(true),
            Value::from(f64::NAN),
            Value::from("foo"),
            Value::from(7),
        ] {
            assert!(v.is_primitive(), "{v:?}");
        }
        assert!(!Value::from(Object::new()).is_primitive());
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_eq!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn number_coercion() {
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x10").to_number(), 16.0);
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        let arr: Array = [Value::from(1), Value::Null, Value::from("x")].into_iter().collect();
        assert_eq!(Value::from(arr).to_string(), "1,,x");
    }

    #[test]
    fn json_conversion() {
        let v = Value::from(json!({"a": 1, "b": [true, null], "c": 2.5}));
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(Value::from(1)));
        assert_eq!(v.get_property("b").get_property("length"), Value::from(2));
        assert_eq!(v.to_json(), json!({"a": 1, "b": [true, null], "c": 2.5}));
        assert_eq!(Value::from(f64::INFINITY).to_json(), json!(null));
    }

    #[test]
    fn primitive_has_no_properties() {
        assert_eq!(Value::from("foo").get_property("length"), Value::Undefined);
        assert!(!Value::from(7).has_property("a"));
    }
}
