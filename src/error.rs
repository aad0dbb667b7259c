//! Error types for parsing configuration documents.
//!
//! Every parse error aborts the current [`parse`](crate::parse) call and carries
//! the 1-based line number of the offending line. For multi-line strings and
//! arrays the reported line is the one that opened the construct.
//!
//! ## Error Categories
//!
//! - **Unclassifiable values**: value text that matches no known kind
//! - **Coercion failures**: text shaped like a kind that still fails the strict parse
//! - **Unterminated constructs**: multi-line strings or arrays that never close
//! - **Malformed headers**: `[name]` / `[[name]]` lines with bad bracket syntax
//! - **Structural errors**: lines that are neither a header nor a key/value pair
//!
//! ## Examples
//!
//! ```rust
//! use toml_lite::{parse_str, Error};
//!
//! let err = parse_str("title = \"demo\"\nfoo bar").unwrap_err();
//! assert!(matches!(err, Error::StructuralError { line: 2, .. }));
//! assert!(err.to_string().contains("line 2"));
//! ```

use crate::classify::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced while parsing or reading a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value's text matched none of the recognised kinds.
    #[error("Unclassifiable value at line {line}: `{text}`\nExpected a string, number, boolean, date-time, array or inline table")]
    UnclassifiableValue { line: usize, text: String },

    /// The text looked like `kind` but failed the strict parse.
    #[error("Cannot read `{text}` as {kind} at line {line}: {msg}")]
    CoercionFailure {
        line: usize,
        kind: Kind,
        text: String,
        msg: String,
    },

    /// A multi-line string or array never found its closing delimiter.
    #[error("Unterminated {construct} opened at line {line}\nExpected: closing `{delimiter}` before end of input")]
    UnterminatedConstruct {
        line: usize,
        construct: String,
        delimiter: String,
    },

    /// A table or array-of-tables header with invalid bracket syntax or name.
    #[error("Malformed header at line {line}: `{header}`\n{msg}")]
    MalformedHeader {
        line: usize,
        header: String,
        msg: String,
    },

    /// A line that is neither a header, a key/value pair, nor part of an open construct.
    #[error("Structural error at line {line}: `{context}`\n{msg}")]
    StructuralError {
        line: usize,
        context: String,
        msg: String,
    },

    /// Lookup of a table path that the document does not contain.
    #[error("Missing table `{0}`")]
    MissingTable(String),

    /// Lookup of a key that the table does not contain.
    #[error("Missing key `{key}` in table `{table}`")]
    MissingKey { table: String, key: String },

    /// IO error while reading the source
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised by conversions and serde
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a structural error for a line that matches no recognised shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::Error;
    ///
    /// let err = Error::structural(4, "foo bar", "expected `key = value` or a `[table]` header");
    /// assert!(err.to_string().contains("line 4"));
    /// ```
    pub fn structural(line: usize, context: &str, msg: &str) -> Self {
        Error::StructuralError {
            line,
            context: context.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a malformed header error.
    pub fn malformed_header(line: usize, header: &str, msg: &str) -> Self {
        Error::MalformedHeader {
            line,
            header: header.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unterminated construct error anchored at the opening line.
    pub fn unterminated(line: usize, construct: &str, delimiter: &str) -> Self {
        Error::UnterminatedConstruct {
            line,
            construct: construct.to_string(),
            delimiter: delimiter.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the source line the error points at, if it came from the parser.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::parse_str;
    ///
    /// let err = parse_str("a = 1\nb = ?").unwrap_err();
    /// assert_eq!(err.line(), Some(2));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnclassifiableValue { line, .. }
            | Error::CoercionFailure { line, .. }
            | Error::UnterminatedConstruct { line, .. }
            | Error::MalformedHeader { line, .. }
            | Error::StructuralError { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// A line-free error raised by the value-level functions
/// ([`classify`](crate::classify()), [`coerce`](crate::coerce()),
/// [`parse_array_body`](crate::parse_array_body)).
///
/// The parser turns it into an [`Error`] with [`ValueError::at`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("unclassifiable value `{0}`")]
    Unclassifiable(String),

    #[error("cannot read `{text}` as {kind}: {msg}")]
    Coercion {
        kind: Kind,
        text: String,
        msg: String,
    },
}

impl ValueError {
    pub(crate) fn unclassifiable(text: &str) -> Self {
        ValueError::Unclassifiable(text.to_string())
    }

    pub(crate) fn coercion<T: fmt::Display>(kind: Kind, text: &str, msg: T) -> Self {
        ValueError::Coercion {
            kind,
            text: text.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Attaches the source line, producing the matching [`Error`] variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::{classify, Error};
    ///
    /// let err = classify("???").unwrap_err().at(7);
    /// assert!(matches!(err, Error::UnclassifiableValue { line: 7, .. }));
    /// ```
    #[must_use]
    pub fn at(self, line: usize) -> Error {
        match self {
            ValueError::Unclassifiable(text) => Error::UnclassifiableValue { line, text },
            ValueError::Coercion { kind, text, msg } => Error::CoercionFailure {
                line,
                kind,
                text,
                msg,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
