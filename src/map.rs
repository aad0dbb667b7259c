//! Ordered key/value storage for tables.
//!
//! [`Table`] is a thin wrapper around [`IndexMap`] holding one table's
//! key/value pairs in declaration order. It backs every section of a
//! [`Document`](crate::Document), every inline table and every
//! array-of-tables instance.
//!
//! ## Examples
//!
//! ```rust
//! use toml_lite::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Value::from("Tom"));
//! table.insert("age".to_string(), Value::from(30));
//!
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A single `key = value` entry.
///
/// The key is the raw text left of `=`, trimmed; quoted keys keep their quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: Value,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        KeyValuePair {
            key: key.into(),
            value,
        }
    }
}

/// An ordered sequence of key/value pairs with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Inserts a key-value pair at the end of the table.
    ///
    /// If the table already contained this key, the value is replaced in place
    /// and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(table.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in declaration order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in declaration order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Copies the entries out as [`KeyValuePair`]s, in declaration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::{parse_str, KeyValuePair, Value};
    ///
    /// let doc = parse_str("a = 1\nb = true").unwrap();
    /// assert_eq!(
    ///     doc[""].pairs(),
    ///     vec![
    ///         KeyValuePair::new("a", Value::Int(1)),
    ///         KeyValuePair::new("b", Value::Bool(true)),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn pairs(&self) -> Vec<KeyValuePair> {
        self.0
            .iter()
            .map(|(key, value)| KeyValuePair::new(key.clone(), value.clone()))
            .collect()
    }

    /// Appends every entry of `other`, keeping their order.
    pub(crate) fn extend(&mut self, other: Table) {
        self.0.extend(other.0);
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

impl FromIterator<KeyValuePair> for Table {
    fn from_iter<T: IntoIterator<Item = KeyValuePair>>(iter: T) -> Self {
        iter.into_iter().map(|pair| (pair.key, pair.value)).collect()
    }
}
