//! Deserialization of parsed values into Rust types.
//!
//! This module provides [`ValueDeserializer`], a serde `Deserializer` that
//! reads from an owned [`Value`]. It backs [`from_str`](crate::from_str),
//! [`from_document`](crate::from_document), [`from_value`](crate::from_value)
//! and [`Document::get_as`](crate::Document::get_as).
//!
//! ## Mapping
//!
//! - Both string kinds visit as strings
//! - Integers visit as `i64`, floats as `f64`
//! - Date-times visit as RFC 3339 strings, so `chrono::DateTime<Utc>` fields
//!   deserialize directly
//! - Arrays visit as sequences, tables as maps in declaration order
//! - Enums are read from a string (unit variants) or from a table with a
//!   single key naming the variant
//!
//! A whole [`Document`](crate::Document) is first folded into one table with
//! [`Document::to_value`](crate::Document::to_value); table paths become
//! field names as written.
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_lite::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Owner { name: String, age: u8 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { title: String, owner: Owner }
//!
//! let config: Config = from_str("title = \"demo\"\n[owner]\nname = \"Tom\"\nage = 30").unwrap();
//! assert_eq!(config.owner, Owner { name: "Tom".into(), age: 30 });
//! ```

use crate::{Error, Result, Table, Value};
use chrono::SecondsFormat;
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A serde `Deserializer` over an owned [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toml_lite::{de::ValueDeserializer, Value};
///
/// let value = Value::Array(vec![Value::Int(1), Value::Int(2)]);
/// let numbers = Vec::<u8>::deserialize(ValueDeserializer::new(value)).unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Str(s) | Value::LiteralStr(s) => visitor.visit_string(s),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::DateTime(dt) => {
                visitor.visit_string(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    /// Every value is present; absent keys are handled by serde's own
    /// `Option` defaulting.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Str(variant) | Value::LiteralStr(variant) => {
                visitor.visit_enum(EnumDeserializer::new(variant, None))
            }
            Value::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            other => Err(Error::custom(format!(
                "Expected a string or a single-key table for an enum, found {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) if table.is_empty() => visitor.visit_unit(),
            Value::Array(arr) if arr.is_empty() => visitor.visit_unit(),
            other => Err(Error::custom(format!(
                "Expected an empty table or array for unit, found {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Value>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(_) => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;
    use std::collections::HashMap;

    fn table(pairs: Vec<(&str, Value)>) -> Value {
        Value::Table(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Mode {
        Fast,
        Slow,
        Custom { level: u8 },
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        weight: f64,
        mode: Mode,
        alias: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_struct_from_table() {
        let value = table(vec![
            ("host", Value::LiteralStr("10.0.0.1".into())),
            ("port", Value::Int(8080)),
            ("weight", Value::Int(2)),
            ("mode", Value::Str("fast".into())),
        ]);
        let server = Server::deserialize(ValueDeserializer::new(value)).unwrap();
        assert_eq!(
            server,
            Server {
                host: "10.0.0.1".into(),
                port: 8080,
                weight: 2.0,
                mode: Mode::Fast,
                alias: None,
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_enum_from_single_key_table() {
        let value = table(vec![("custom", table(vec![("level", Value::Int(3))]))]);
        assert_eq!(
            Mode::deserialize(ValueDeserializer::new(value)).unwrap(),
            Mode::Custom { level: 3 }
        );
        assert_eq!(
            Mode::deserialize(ValueDeserializer::new(Value::Str("slow".into()))).unwrap(),
            Mode::Slow
        );
        assert!(Mode::deserialize(ValueDeserializer::new(Value::Int(1))).is_err());
    }

    #[test]
    fn test_datetime_field() {
        let when = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        let parsed = DateTime::<Utc>::deserialize(ValueDeserializer::new(Value::DateTime(when)));
        assert_eq!(parsed.unwrap(), when);
    }

    #[test]
    fn test_out_of_range_integer_is_error() {
        let err = u8::deserialize(ValueDeserializer::new(Value::Int(300))).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_map_keeps_all_entries() {
        let value = table(vec![("a", Value::Bool(true)), ("b", Value::Bool(false))]);
        let map = HashMap::<String, bool>::deserialize(ValueDeserializer::new(value)).unwrap();
        assert_eq!(map.len(), 2);
        assert!(!map["b"]);
    }
}
