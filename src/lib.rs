//! # toml_lite
//!
//! A parser for a TOML-like configuration format: tables, array-of-tables,
//! inline tables, arrays and typed scalar values, read into a [`Document`]
//! that application code queries by table path and key.
//!
//! ## Key Features
//!
//! - **Quote-aware scanning**: `#`, `/*`, `=` and `,` inside string literals
//!   are never mistaken for syntax
//! - **Multi-line constructs**: triple-quoted strings and bracketed arrays may
//!   span lines, arrays nest to any depth
//! - **Typed values**: strings, literal strings, integers, floats, booleans,
//!   UTC date-times, arrays and inline tables
//! - **Line-accurate errors**: every parse error names the 1-based line it
//!   came from
//! - **Serde Compatible**: documents deserialize into your own types via
//!   `#[derive(Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_lite::{parse_str, Value};
//!
//! let doc = parse_str(r#"
//! title = "demo"   # inline comments are fine
//!
//! [owner]
//! name = "Tom"
//! age = 30
//! "#).unwrap();
//!
//! assert_eq!(doc[""].get("title"), Some(&Value::Str("demo".into())));
//! assert_eq!(doc.value("owner", "age").and_then(Value::as_i64), Some(30));
//! ```
//!
//! ### Typed Deserialization
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_lite::from_str;
//!
//! #[derive(Deserialize)]
//! struct Package { name: String, version: String }
//!
//! #[derive(Deserialize)]
//! struct Manifest { pkg: Vec<Package> }
//!
//! let manifest: Manifest = from_str(
//!     "[[pkg]]\nname = 'core'\nversion = '1.0'\n[[pkg]]\nname = 'cli'\nversion = '0.3'",
//! )
//! .unwrap();
//! assert_eq!(manifest.pkg[1].name, "cli");
//! ```
//!
//! ## Format Summary
//!
//! ```text
//! key = value            # key/value pair in the current table
//! [servers.alpha]        # table; the path is stored as written
//! [[products]]           # one more instance of an array of tables
//! inline = { x = 1, y = 2 }
//! list = [ 1, [2, 3], "four" ]
//! text = """
//! spans lines"""
//! raw = 'C:\no\escapes'
//! when = 1979-05-27T07:32:00-08:00
//! /* block comments may span lines */
//! ```
//!
//! Value kinds are decided in a fixed order: basic string, literal string,
//! array, inline table, boolean, integer, float, date-time. Text that matches
//! none of them is an error; the parser never falls back to a default.
//!
//! ## Pipeline
//!
//! Input lines go through [`strip_comments`], then the table assembler in
//! [`parser`], which hands each value to [`classify`] and [`coerce`] and feeds
//! multi-line values through [`multiline::Accumulator`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parse a document and walk its tables
//! - **`typed_config.rs`** - Deserialize a configuration into structs
//!
//! Run any example with: `cargo run --example <name>`

pub mod classify;
pub mod coerce;
pub mod comment;
pub mod de;
pub mod document;
pub mod error;
pub mod macros;
pub mod map;
pub mod multiline;
pub mod options;
pub mod parser;
mod scan;
pub mod value;

pub use classify::{classify, Kind};
pub use coerce::{coerce, float_form, FloatForm};
pub use comment::{strip_comments, strip_comments_with};
pub use de::ValueDeserializer;
pub use document::Document;
pub use error::{Error, Result, ValueError};
pub use map::{KeyValuePair, Table};
pub use multiline::parse_array_body;
pub use options::{DuplicateTables, ParseOptions};
pub use value::Value;

use serde::de::DeserializeOwned;
use std::io;

/// Parses a sequence of lines into a [`Document`] with default options.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{parse, Value};
///
/// let doc = parse(["[[pkg]]", "name = 'a'", "[[pkg]]", "name = 'b'"]).unwrap();
/// let pkgs = doc.array_of_tables("pkg").and_then(Value::as_array).unwrap();
/// assert_eq!(pkgs.len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first parse error, carrying the 1-based line it occurred on.
/// No partial document is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with_options(lines, ParseOptions::default())
}

/// Parses a sequence of lines into a [`Document`] with custom options.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{parse_with_options, Error, ParseOptions};
///
/// let err = parse_with_options(["[a]", "[a]"], ParseOptions::strict()).unwrap_err();
/// assert!(matches!(err, Error::MalformedHeader { line: 2, .. }));
/// ```
///
/// # Errors
///
/// Returns the first parse error, carrying the 1-based line it occurred on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options<I, S>(lines: I, options: ParseOptions) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parser::parse_lines(lines, &options)
}

/// Splits `text` on `\n` and `\r\n` and parses the resulting lines.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{parse_str, Value};
///
/// let doc = parse_str("a = 1\r\nb = 2\n").unwrap();
/// assert_eq!(doc.value("", "b"), Some(&Value::Int(2)));
/// ```
///
/// # Errors
///
/// Returns the first parse error, carrying the 1-based line it occurred on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(text: &str) -> Result<Document> {
    parse(text.lines())
}

/// Deserialize an instance of type `T` from configuration text.
///
/// The document is folded into a single map (see
/// [`Document::to_value`]) before deserialization.
///
/// # Examples
///
/// ```rust
/// use toml_lite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a parse error, or [`Error::Custom`] if the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let document = parse_str(s)?;
    from_document(&document)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use toml_lite::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"x = 1\ny = 2");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use toml_lite::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Custom`] if the bytes are not valid UTF-8, otherwise as
/// [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an already parsed [`Document`].
///
/// # Errors
///
/// Returns [`Error::Custom`] if the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<T>(document: &Document) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(document.to_value())
}

/// Deserialize an instance of type `T` from a single [`Value`].
///
/// # Examples
///
/// ```rust
/// use toml_lite::{from_value, Value};
///
/// let ports: Vec<u16> = from_value(Value::Array(vec![Value::Int(80), Value::Int(443)])).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Custom`] if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Owner {
        name: String,
        dob: DateTime<Utc>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Database {
        ports: Vec<u16>,
        enabled: bool,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Config {
        title: String,
        owner: Owner,
        database: Database,
        #[serde(rename = "servers.alpha")]
        alpha: HashMap<String, String>,
    }

    const SAMPLE: &str = r#"
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00 # First class dates

[database]
ports = [ 8001, 8001, 8002 ]
enabled = true

[servers.alpha]
ip = "10.0.0.1"
"#;

    #[test]
    fn test_from_str_nested_config() {
        let config: Config = from_str(SAMPLE).unwrap();
        assert_eq!(config.title, "TOML Example");
        assert_eq!(
            config.owner.dob,
            Utc.with_ymd_and_hms(1979, 5, 27, 15, 32, 0).unwrap()
        );
        assert_eq!(config.database.ports, vec![8001, 8001, 8002]);
        assert_eq!(config.alpha["ip"], "10.0.0.1");
    }

    #[test]
    fn test_parse_error_surfaces_through_from_str() {
        let err = from_str::<Config>("title = \"x\"\n[owner\n").unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { line: 2, .. }));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<HashMap<String, i64>>(&[b'a', b'=', 0xff]).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_parse_accepts_owned_lines() {
        let lines: Vec<String> = vec!["a = 1".to_string(), "[t]".to_string()];
        let doc = parse(lines).unwrap();
        assert!(doc.contains_table("t"));
    }

    #[test]
    fn test_from_document_and_value() {
        let doc = parse_str("[limits]\ncpu = 2\nmem = 512").unwrap();
        let all: HashMap<String, HashMap<String, i64>> = from_document(&doc).unwrap();
        assert_eq!(all["limits"]["mem"], 512);

        let cpu: f64 = from_value(doc["limits"].get("cpu").cloned().unwrap()).unwrap();
        assert_eq!(cpu, 2.0);
    }
}
