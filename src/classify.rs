//! Value classification.
//!
//! [`classify`] decides which [`Kind`] a raw value text represents before any
//! conversion happens. The rules run in a fixed order and the first match
//! wins, because the lexical tests overlap (`1979` is both an integer and the
//! start of a date, `"[x]"` is a string that contains a bracket):
//!
//! 1. starts with `"`: basic string (`"""` for the multi-line form)
//! 2. starts with `'`: literal string (`'''` for the multi-line form)
//! 3. starts with `[`: array
//! 4. starts with `{` and ends with `}`: inline table
//! 5. exactly `true` or `false`: boolean
//! 6. parses as `i64` once `_` separators are removed: integer
//! 7. parses as `f64` once `_` separators are removed: float
//! 8. has the shape of a date or date-time: date-time
//!
//! Classification only checks shape. A date-shaped `1979-13-01` classifies as
//! [`Kind::DateTime`] and fails later, in [`coerce`](crate::coerce()).

use crate::error::ValueError;
use crate::scan::{is_balanced, is_single_literal};
use std::fmt;

/// The kind of value a raw text fragment represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    LiteralString,
    Int,
    Float,
    Bool,
    DateTime,
    Array,
    InlineTable,
}

impl Kind {
    /// Returns a human-readable name for messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::LiteralString => "literal string",
            Kind::Int => "integer",
            Kind::Float => "float",
            Kind::Bool => "boolean",
            Kind::DateTime => "date-time",
            Kind::Array => "array",
            Kind::InlineTable => "inline table",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw value text.
///
/// Surrounding whitespace is ignored. Multi-line strings and arrays must be
/// passed complete, as produced by the multi-line accumulator.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{classify, Kind};
///
/// assert_eq!(classify("\"hello\"").unwrap(), Kind::String);
/// assert_eq!(classify("1_000").unwrap(), Kind::Int);
/// assert_eq!(classify("6.626e-34").unwrap(), Kind::Float);
/// assert_eq!(classify("1979-05-27T07:32:00Z").unwrap(), Kind::DateTime);
/// assert!(classify("hello").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValueError::Unclassifiable`] when no rule matches, including
/// strings with trailing text and arrays whose brackets do not balance.
pub fn classify(text: &str) -> Result<Kind, ValueError> {
    let text = text.trim();

    if text.starts_with('"') {
        return literal_shape(text, Kind::String);
    }
    if text.starts_with('\'') {
        return literal_shape(text, Kind::LiteralString);
    }
    if text.starts_with('[') {
        return if text.ends_with(']') && is_balanced(text) {
            Ok(Kind::Array)
        } else {
            Err(ValueError::unclassifiable(text))
        };
    }
    if text.starts_with('{') && text.ends_with('}') {
        return Ok(Kind::InlineTable);
    }
    if text == "true" || text == "false" {
        return Ok(Kind::Bool);
    }

    let digits = strip_separators(text);
    if digits.parse::<i64>().is_ok() {
        return Ok(Kind::Int);
    }
    if is_float_text(&digits) {
        return Ok(Kind::Float);
    }
    if is_datetime_shape(text) {
        return Ok(Kind::DateTime);
    }

    Err(ValueError::unclassifiable(text))
}

fn literal_shape(text: &str, kind: Kind) -> Result<Kind, ValueError> {
    if is_single_literal(text) {
        Ok(kind)
    } else {
        Err(ValueError::unclassifiable(text))
    }
}

/// Removes `_` digit separators.
pub(crate) fn strip_separators(text: &str) -> String {
    text.replace('_', "")
}

/// `f64::from_str` also accepts words such as `infinity`, so only plain
/// numeric text and the `inf` / `nan` spellings are let through.
pub(crate) fn is_float_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "inf" || unsigned == "nan" {
        return true;
    }
    !unsigned.is_empty()
        && unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && text.parse::<f64>().is_ok()
}

/// Shape check for `YYYY-MM-DD`, optionally followed by `[Tt ]HH:MM:SS`,
/// optional fractional seconds and an optional `Z` / `±HH:MM` offset.
pub(crate) fn is_datetime_shape(text: &str) -> bool {
    let b = text.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        b.get(range)
            .is_some_and(|s| s.iter().all(u8::is_ascii_digit))
    };
    let byte_is = |i: usize, expected: u8| b.get(i) == Some(&expected);

    let date = digits(0..4) && byte_is(4, b'-') && digits(5..7) && byte_is(7, b'-') && digits(8..10);
    if !date {
        return false;
    }
    if b.len() == 10 {
        return true;
    }
    if !matches!(b[10], b'T' | b't' | b' ') {
        return false;
    }
    let time = digits(11..13) && byte_is(13, b':') && digits(14..16) && byte_is(16, b':') && digits(17..19);
    if !time {
        return false;
    }

    let mut rest = &text[19..];
    if let Some(frac) = rest.strip_prefix('.') {
        let len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return false;
        }
        rest = &frac[len..];
    }

    match rest.as_bytes() {
        [] | [b'Z'] | [b'z'] => true,
        [b'+' | b'-', h1, h2, b':', m1, m2] => {
            [h1, h2, m1, m2].iter().all(|d| d.is_ascii_digit())
        }
        _ => false,
    }
}
