//! The parsed document.
//!
//! A [`Document`] maps table paths, exactly as written between the header
//! brackets, to their key/value pairs. Paths are not split into nested maps:
//! `[servers.alpha]` lives under the path `"servers.alpha"`. Keys before the
//! first header belong to the root table, whose path is the empty string.
//!
//! ```rust
//! use toml_lite::{parse_str, Value};
//!
//! let doc = parse_str("title = \"demo\"\n[owner]\nname = \"Tom\"\nage = 30").unwrap();
//!
//! assert_eq!(doc[""].get("title"), Some(&Value::from("demo")));
//! assert_eq!(doc.value("owner", "age"), Some(&Value::Int(30)));
//! assert!(doc.has_key("owner", "name"));
//! ```

use crate::{Error, Result, Table, Value};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// A parsed configuration document. Built once per parse call and not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Every `[name]` section plus the root, in the order they were closed.
    tables: Vec<(String, Table)>,
    /// `[[name]]` sections: each value is a `Value::Array` of `Value::Table`.
    arrays: IndexMap<String, Value>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_table(&mut self, path: String, table: Table) {
        self.tables.push((path, table));
    }

    /// Appends `table`'s pairs to the first entry for `path`, or adds a new
    /// entry when there is none.
    pub(crate) fn merge_table(&mut self, path: String, table: Table) {
        match self.tables.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => existing.extend(table),
            None => self.push_table(path, table),
        }
    }

    pub(crate) fn push_array_instance(&mut self, path: String, table: Table) {
        // entries are only ever created as arrays
        if let Value::Array(items) = self
            .arrays
            .entry(path)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            items.push(Value::Table(table));
        }
    }

    /// Returns `true` if a `[path]` table (or the root, for `""`) exists.
    #[must_use]
    pub fn contains_table(&self, path: &str) -> bool {
        self.tables.iter().any(|(p, _)| p == path)
    }

    /// Returns `true` if a `[[path]]` array of tables exists.
    #[must_use]
    pub fn contains_array(&self, path: &str) -> bool {
        self.arrays.contains_key(path)
    }

    /// Returns the first table entry for `path`.
    ///
    /// `[[path]]` instances are not table entries; read them through
    /// [`array_of_tables`](Document::array_of_tables).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Table> {
        self.get_all(path).next()
    }

    /// Returns every table entry for `path`, in source order. There is more
    /// than one only when a header is repeated under
    /// [`DuplicateTables::Separate`](crate::DuplicateTables::Separate).
    pub fn get_all<'a, 'p>(&'a self, path: &'p str) -> impl Iterator<Item = &'a Table> + 'p
    where
        'a: 'p,
    {
        self.tables
            .iter()
            .filter(move |(p, _)| p == path)
            .map(|(_, table)| table)
    }

    /// Returns the array of tables declared with `[[path]]` headers, as a
    /// [`Value::Array`] of [`Value::Table`] instances in source order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::parse_str;
    ///
    /// let doc = parse_str("[[pkg]]\nname = \"a\"\n[[pkg]]\nname = \"b\"").unwrap();
    /// let pkgs = doc.array_of_tables("pkg").and_then(|v| v.as_array()).unwrap();
    /// assert_eq!(pkgs.len(), 2);
    /// ```
    #[must_use]
    pub fn array_of_tables(&self, path: &str) -> Option<&Value> {
        self.arrays.get(path)
    }

    /// Iterates over `(path, table)` entries, in the order they were closed.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(p, t)| (p.as_str(), t))
    }

    /// Iterates over `(path, array)` entries for every `[[path]]` header.
    pub fn arrays(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.arrays.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// Looks up `key` in the tables at `path`, searching repeated entries in
    /// source order.
    #[must_use]
    pub fn value(&self, path: &str, key: &str) -> Option<&Value> {
        self.get_all(path).find_map(|table| table.get(key))
    }

    #[must_use]
    pub fn has_key(&self, path: &str, key: &str) -> bool {
        self.value(path, key).is_some()
    }

    /// Reads `key` from the tables at `path` as any deserializable type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::parse_str;
    ///
    /// let doc = parse_str("[server]\nports = [8001, 8002]\nname = 'edge'").unwrap();
    /// let ports: Vec<u16> = doc.get_as("server", "ports").unwrap();
    /// assert_eq!(ports, vec![8001, 8002]);
    /// assert!(doc.get_as::<u16>("server", "name").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTable`] or [`Error::MissingKey`] when the lookup
    /// fails, and [`Error::Custom`] when the value does not fit `T`.
    pub fn get_as<T>(&self, path: &str, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !self.contains_table(path) {
            return Err(Error::MissingTable(path.to_string()));
        }
        let value = self.value(path, key).ok_or_else(|| Error::MissingKey {
            table: path.to_string(),
            key: key.to_string(),
        })?;
        crate::from_value(value.clone())
    }

    /// Folds the document into a single [`Value::Table`]: root keys first, then
    /// one entry per table path (repeated entries merged), then one per
    /// array-of-tables path. A later entry replaces an earlier one with the
    /// same name.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = Table::new();
        let mut sections: IndexMap<&str, Table> = IndexMap::new();

        for (path, table) in &self.tables {
            if path.is_empty() {
                root.extend(table.clone());
            } else {
                sections.entry(path.as_str()).or_default().extend(table.clone());
            }
        }
        for (path, table) in sections {
            root.insert(path.to_string(), Value::Table(table));
        }
        for (path, array) in &self.arrays {
            root.insert(path.clone(), array.clone());
        }

        Value::Table(root)
    }
}

impl Index<&str> for Document {
    type Output = Table;

    /// Returns the first table entry for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the document has no table at `path`. An array-of-tables path
    /// is not a table entry, so `doc["pkg"]` panics after `[[pkg]]`; use
    /// [`Document::array_of_tables`] for those.
    fn index(&self, path: &str) -> &Table {
        match self.get(path) {
            Some(table) => table,
            None => panic!("no table `{}` in document", path),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, i64)]) -> Table {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::Int(*v)))
            .collect()
    }

    #[test]
    fn test_separate_entries_keep_source_order() {
        let mut doc = Document::new();
        doc.push_table(String::new(), Table::new());
        doc.push_table("a".into(), table(&[("x", 1)]));
        doc.push_table("a".into(), table(&[("y", 2)]));

        assert_eq!(doc.get_all("a").count(), 2);
        assert_eq!(doc["a"].get("x"), Some(&Value::Int(1)));
        assert_eq!(doc.value("a", "y"), Some(&Value::Int(2)));
        assert!(!doc.has_key("a", "z"));
    }

    #[test]
    fn test_lookups_outlive_the_path() {
        let mut doc = Document::new();
        doc.push_table("a".into(), table(&[("x", 1)]));

        let (found, x) = {
            let path = String::from("a");
            (doc.get(&path), doc.value(&path, "x"))
        };
        assert_eq!(found.map(Table::len), Some(1));
        assert_eq!(x, Some(&Value::Int(1)));
    }

    #[test]
    fn test_array_paths_are_not_tables() {
        let mut doc = Document::new();
        doc.push_array_instance("pkg".into(), table(&[("n", 1)]));
        assert!(doc.get("pkg").is_none());
        assert!(doc.array_of_tables("pkg").is_some());
    }

    #[test]
    fn test_merge_appends_to_first_entry() {
        let mut doc = Document::new();
        doc.merge_table("a".into(), table(&[("x", 1)]));
        doc.merge_table("a".into(), table(&[("y", 2)]));
        assert_eq!(doc.get_all("a").count(), 1);
        assert_eq!(doc["a"].len(), 2);
    }

    #[test]
    fn test_array_instances_append() {
        let mut doc = Document::new();
        doc.push_array_instance("pkg".into(), table(&[("n", 1)]));
        doc.push_array_instance("pkg".into(), table(&[("n", 2)]));
        let items = doc.array_of_tables("pkg").and_then(Value::as_array).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_table().unwrap().get("n"), Some(&Value::Int(2)));
        assert!(doc.contains_array("pkg"));
        assert!(!doc.contains_table("pkg"));
    }

    #[test]
    fn test_get_as_errors() {
        let mut doc = Document::new();
        doc.push_table("a".into(), table(&[("x", 1)]));
        assert_eq!(doc.get_as::<i64>("a", "x").unwrap(), 1);
        assert_eq!(doc.get_as::<i64>("b", "x"), Err(Error::MissingTable("b".into())));
        assert!(matches!(doc.get_as::<i64>("a", "y"), Err(Error::MissingKey { .. })));
    }

    #[test]
    #[should_panic(expected = "no table `missing`")]
    fn test_index_panics_on_missing_path() {
        let doc = Document::new();
        let _ = &doc["missing"];
    }

    #[test]
    fn test_to_value_layout() {
        let mut doc = Document::new();
        doc.push_table(String::new(), table(&[("top", 0)]));
        doc.push_table("a".into(), table(&[("x", 1)]));
        doc.push_array_instance("pkg".into(), table(&[("n", 1)]));

        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"top":0,"a":{"x":1},"pkg":[{"n":1}]}"#
        );
    }
}
