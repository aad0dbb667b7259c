//! Multi-line constructs.
//!
//! A value that opens a triple-quoted string or a bracketed array without
//! closing it on the same line is handed to an [`Accumulator`], which collects
//! raw lines until the closing delimiter shows up and returns the joined text
//! for classification and coercion.
//!
//! ```text
//! Idle ──"""──▶ InBasicString ──"""──▶ Idle
//! Idle ──'''──▶ InLiteralString ──'''──▶ Idle
//! Idle ───[───▶ InArray{depth} ───]───▶ Idle   (depth back to zero)
//! ```
//!
//! Array bodies are read by [`parse_array_body`], which recurses into nested
//! arrays through [`coerce`](crate::coerce()).

use crate::coerce::read_value;
use crate::error::ValueError;
use crate::scan::{split_top_level, Nesting, Quote};
use crate::Value;

/// Where the accumulator stands between two lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    InBasicString,
    InLiteralString,
    InArray { depth: usize },
}

impl State {
    fn of(nesting: Nesting) -> State {
        match (nesting.depth, nesting.quote) {
            (depth, _) if depth > 0 => State::InArray { depth },
            (_, Quote::MultiBasic) => State::InBasicString,
            (_, Quote::MultiLiteral) => State::InLiteralString,
            _ => State::Idle,
        }
    }

    /// Names the open construct for error messages.
    #[must_use]
    pub const fn construct(&self) -> &'static str {
        match self {
            State::Idle => "value",
            State::InBasicString => "multi-line basic string",
            State::InLiteralString => "multi-line literal string",
            State::InArray { .. } => "multi-line array",
        }
    }

    /// The delimiter that ends the open construct.
    #[must_use]
    pub const fn delimiter(&self) -> &'static str {
        match self {
            State::Idle => "",
            State::InBasicString => "\"\"\"",
            State::InLiteralString => "'''",
            State::InArray { .. } => "]",
        }
    }
}

/// Collects the raw lines of one multi-line value.
#[derive(Debug, Clone)]
pub struct Accumulator {
    nesting: Nesting,
    opened: State,
    buffer: String,
}

impl Accumulator {
    /// Starts accumulating if `value` opens a construct it does not close.
    ///
    /// Returns `None` for values that are complete on their own line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::multiline::{Accumulator, State};
    ///
    /// let acc = Accumulator::open("\"\"\"first line").unwrap();
    /// assert_eq!(acc.state(), State::InBasicString);
    /// assert!(Accumulator::open("[1, 2]").is_none());
    /// assert!(Accumulator::open("\"plain\"").is_none());
    /// ```
    #[must_use]
    pub fn open(value: &str) -> Option<Accumulator> {
        let value = value.trim();
        if !(value.starts_with("\"\"\"") || value.starts_with("'''") || value.starts_with('[')) {
            return None;
        }

        let mut nesting = Nesting::default();
        nesting.feed(value);
        let state = State::of(nesting);
        if state == State::Idle {
            return None;
        }

        Some(Accumulator {
            nesting,
            opened: state,
            buffer: value.to_string(),
        })
    }

    #[must_use]
    pub fn state(&self) -> State {
        State::of(self.nesting)
    }

    /// The kind of construct that was opened.
    #[must_use]
    pub fn opened(&self) -> State {
        self.opened
    }

    /// Appends the next raw line. Returns the complete value text once the
    /// closing delimiter has been consumed. Anything after the delimiter on
    /// that line is kept, so trailing junk fails classification instead of
    /// reopening the construct.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::multiline::Accumulator;
    ///
    /// let mut acc = Accumulator::open("[").unwrap();
    /// assert_eq!(acc.push("  1,"), None);
    /// assert_eq!(acc.push("  2,"), None);
    /// assert_eq!(acc.push("]").as_deref(), Some("[\n  1,\n  2,\n]"));
    /// ```
    pub fn push(&mut self, line: &str) -> Option<String> {
        self.buffer.push('\n');
        self.buffer.push_str(line);
        if self.nesting.feed(line) {
            Some(std::mem::take(&mut self.buffer).trim_end().to_string())
        } else {
            None
        }
    }
}

/// Reads the comma-separated elements between an array's outer brackets.
///
/// Each element is classified and coerced on its own, so arrays may mix kinds
/// and nest arbitrarily. A single trailing comma is allowed.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{parse_array_body, Value};
///
/// let values = parse_array_body(" 1, [2, 'x'], \"y\", ").unwrap();
/// assert_eq!(
///     values,
///     vec![
///         Value::Int(1),
///         Value::Array(vec![Value::Int(2), Value::LiteralStr("x".into())]),
///         Value::Str("y".into()),
///     ]
/// );
/// ```
///
/// # Errors
///
/// Returns the first element's classification or coercion error, or
/// [`ValueError::Unclassifiable`] for an empty element such as `1,,2`.
pub fn parse_array_body(text: &str) -> Result<Vec<Value>, ValueError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut elements: Vec<&str> = split_top_level(text, b',');
    if elements.last().is_some_and(|last| last.trim().is_empty()) {
        elements.pop();
    }

    elements
        .into_iter()
        .map(|element| {
            if element.trim().is_empty() {
                Err(ValueError::unclassifiable(text.trim()))
            } else {
                read_value(element)
            }
        })
        .collect()
}
