//! Typed value representation.
//!
//! This module provides the [`Value`] enum produced for every key in a parsed
//! document.
//!
//! ## Usage Patterns
//!
//! ### Type Checking
//!
//! ```rust
//! use toml_lite::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert!(!value.is_str());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use toml_lite::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::classify::Kind;
use crate::Table;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// A typed configuration value.
///
/// Arrays are not required to be homogeneous: `[1, "two", 3.0]` is kept as
/// written. Inline tables and array-of-tables instances are [`Value::Table`].
///
/// # Examples
///
/// ```rust
/// use toml_lite::Value;
///
/// let text = Value::Str("hello".to_string());
/// let num = Value::Int(42);
///
/// assert!(text.is_str());
/// assert_eq!(num.as_i64(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Basic string, escape sequences resolved.
    Str(String),
    /// Literal string, taken verbatim.
    LiteralStr(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date-time normalized to UTC.
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
    Table(Table),
}

impl Value {
    /// Returns the [`Kind`] this value was coerced from.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Str(_) => Kind::String,
            Value::LiteralStr(_) => Kind::LiteralString,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::DateTime(_) => Kind::DateTime,
            Value::Array(_) => Kind::Array,
            Value::Table(_) => Kind::InlineTable,
        }
    }

    /// Returns `true` for basic and literal strings.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::Str(_) | Value::LiteralStr(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a basic or literal string, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::LiteralStr("C:\\x".into()).as_str(), Some("C:\\x"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::LiteralStr(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float or an integer, returns it as `f64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::Value;
    ///
    /// assert_eq!(Value::Float(3.5).as_f64(), Some(3.5));
    /// assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::Bool(true).as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            Value::LiteralStr(s) => write!(f, "'{}'", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Table(table) => {
                write!(
                    f,
                    "{{ {} }}",
                    table
                        .iter()
                        .map(|(k, v)| format!("{} = {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Str(s) | Value::LiteralStr(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

fn mismatch(expected: Kind, value: &Value) -> crate::Error {
    crate::Error::custom(format!("expected {}, found {}", expected, value.kind()))
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            _ => Err(mismatch(Kind::Int, &value)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            _ => Err(mismatch(Kind::Float, &value)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(mismatch(Kind::Bool, &value)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Str(s) | Value::LiteralStr(s) => Ok(s),
            _ => Err(mismatch(Kind::String, &value)),
        }
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            _ => Err(mismatch(Kind::DateTime, &value)),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Value::Int(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Float(42.0)).is_err());
        assert!(i64::try_from(Value::from("42")).is_err());
    }

    #[test]
    fn test_tryfrom_f64_widens_integers() {
        assert_eq!(f64::try_from(Value::Float(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::Int(42)).unwrap(), 42.0);
        assert!(f64::try_from(Value::Bool(true)).is_err());
    }

    #[test]
    fn test_tryfrom_string_accepts_both_string_kinds() {
        assert_eq!(String::try_from(Value::from("a")).unwrap(), "a");
        assert_eq!(String::try_from(Value::LiteralStr("b".into())).unwrap(), "b");
        let err = String::try_from(Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "Error: expected string, found integer");
    }

    #[test]
    fn test_tryfrom_datetime() {
        let dt = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        assert_eq!(DateTime::<Utc>::try_from(Value::DateTime(dt)).unwrap(), dt);
        assert!(DateTime::<Utc>::try_from(Value::Int(0)).is_err());
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::LiteralStr("x".into()).kind(), Kind::LiteralString);
        assert_eq!(Value::Array(vec![]).kind(), Kind::Array);
        assert_eq!(Value::Table(Table::new()).kind(), Kind::InlineTable);
    }

    #[test]
    fn test_display() {
        let arr = Value::Array(vec![Value::Int(1), Value::from("two"), Value::Float(3.0)]);
        assert_eq!(arr.to_string(), r#"[1, "two", 3.0]"#);

        let mut table = Table::new();
        table.insert("x".to_string(), Value::Bool(true));
        assert_eq!(Value::Table(table).to_string(), "{ x = true }");

        let dt = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn test_serialize_to_json() {
        let dt = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        let value = Value::Array(vec![Value::Int(1), Value::DateTime(dt), Value::LiteralStr("x".into())]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[1,"1979-05-27T07:32:00Z","x"]"#
        );
    }
}
