//! Scalar coercion.
//!
//! [`coerce`] turns raw value text into a typed [`Value`] once
//! [`classify`](crate::classify()) has settled its [`Kind`]. It does not
//! repeat the classifier's shape checks, but it does reject content the shape
//! check cannot see: invalid escapes, impossible calendar dates and malformed
//! inline-table members.

use crate::classify::{is_datetime_shape, strip_separators, Kind};
use crate::error::ValueError;
use crate::multiline::parse_array_body;
use crate::scan::{find_assignment, is_valid_path, split_top_level};
use crate::{Table, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// The notation a float literal was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatForm {
    /// `3.14`
    Fractional,
    /// `5e+22`
    Exponential,
    /// `6.626e-34`
    Both,
}

/// Reports which notation a float literal uses, or `None` for text without a
/// fraction or exponent (`inf`, `nan`, plain integers).
///
/// # Examples
///
/// ```rust
/// use toml_lite::{float_form, FloatForm};
///
/// assert_eq!(float_form("3.14"), Some(FloatForm::Fractional));
/// assert_eq!(float_form("1E6"), Some(FloatForm::Exponential));
/// assert_eq!(float_form("-2.5e-3"), Some(FloatForm::Both));
/// assert_eq!(float_form("inf"), None);
/// ```
#[must_use]
pub fn float_form(text: &str) -> Option<FloatForm> {
    let text = text.trim().to_ascii_lowercase();
    if text.ends_with("inf") || text.ends_with("nan") {
        return None;
    }
    match (text.contains('.'), text.contains('e')) {
        (true, false) => Some(FloatForm::Fractional),
        (false, true) => Some(FloatForm::Exponential),
        (true, true) => Some(FloatForm::Both),
        (false, false) => None,
    }
}

/// Converts classified value text into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use toml_lite::{coerce, Kind, Value};
///
/// assert_eq!(coerce("1_000", Kind::Int).unwrap(), Value::Int(1000));
/// assert_eq!(coerce(r#""a\tb""#, Kind::String).unwrap(), Value::Str("a\tb".into()));
/// assert_eq!(coerce(r"'a\tb'", Kind::LiteralString).unwrap(), Value::LiteralStr(r"a\tb".into()));
/// assert!(coerce("1979-13-01", Kind::DateTime).is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValueError::Coercion`] when the text has the right shape but
/// invalid content, and propagates errors from nested array or inline-table
/// members.
pub fn coerce(text: &str, kind: Kind) -> Result<Value, ValueError> {
    let text = text.trim();
    match kind {
        Kind::String => coerce_basic_string(text).map(Value::Str),
        Kind::LiteralString => Ok(Value::LiteralStr(literal_body(text).to_string())),
        Kind::Int => strip_separators(text)
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| ValueError::coercion(kind, text, e)),
        Kind::Float => strip_separators(text)
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| ValueError::coercion(kind, text, e)),
        Kind::Bool => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ValueError::coercion(kind, text, "expected `true` or `false`")),
        },
        Kind::DateTime => coerce_datetime(text).map(Value::DateTime),
        Kind::Array => {
            let inner = text
                .strip_prefix('[')
                .and_then(|t| t.strip_suffix(']'))
                .ok_or_else(|| ValueError::coercion(kind, text, "expected `[ ... ]`"))?;
            parse_array_body(inner).map(Value::Array)
        }
        Kind::InlineTable => coerce_inline_table(text).map(Value::Table),
    }
}

/// Classifies then coerces `text`.
pub(crate) fn read_value(text: &str) -> Result<Value, ValueError> {
    let kind = crate::classify::classify(text)?;
    coerce(text, kind)
}

/// Strips the delimiters of a (multi-line) string literal. A newline right
/// after an opening triple quote is not part of the value.
fn string_body(text: &str, quote: char) -> (&str, bool) {
    let triple = if quote == '"' { "\"\"\"" } else { "'''" };
    if text.len() >= 6 {
        if let Some(body) = text.strip_prefix(triple).and_then(|t| t.strip_suffix(triple)) {
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            return (body, true);
        }
    }
    let body = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);
    (body, false)
}

fn literal_body(text: &str) -> &str {
    string_body(text, '\'').0
}

fn coerce_basic_string(text: &str) -> Result<String, ValueError> {
    let (body, multiline) = string_body(text, '"');
    unescape(body, multiline).map_err(|msg| ValueError::coercion(Kind::String, text, msg))
}

/// Resolves escape sequences in a basic string body.
///
/// In multi-line bodies a backslash that ends a line removes the newline and
/// all whitespace that follows it.
pub(crate) fn unescape(body: &str, multiline: bool) -> Result<String, String> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => result.push('\u{0008}'),
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('f') => result.push('\u{000C}'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('u') => result.push(unicode_escape(&mut chars, 4)?),
            Some('U') => result.push(unicode_escape(&mut chars, 8)?),
            Some(c) if multiline && c.is_whitespace() => {
                let ends_line = std::iter::once(c)
                    .chain(chars.clone())
                    .take_while(|c| *c != '\n')
                    .all(|c| c == ' ' || c == '\t' || c == '\r');
                if !ends_line {
                    return Err("backslash followed by whitespace must end the line".to_string());
                }
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
            }
            Some(other) => return Err(format!("invalid escape sequence `\\{}`", other)),
            None => return Err("unexpected end of string after `\\`".to_string()),
        }
    }

    Ok(result)
}

fn unicode_escape<I>(chars: &mut I, len: usize) -> Result<char, String>
where
    I: Iterator<Item = char>,
{
    let hex: String = chars.take(len).collect();
    if hex.len() != len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid unicode escape (expected {} hex digits)", len));
    }
    let code_point =
        u32::from_str_radix(&hex, 16).map_err(|_| "invalid hex in unicode escape".to_string())?;
    char::from_u32(code_point).ok_or_else(|| format!("invalid unicode code point U+{}", hex))
}

/// Parses a date or date-time and normalizes it to UTC. Text without an offset
/// is read as UTC; a bare date is midnight.
fn coerce_datetime(text: &str) -> Result<DateTime<Utc>, ValueError> {
    let fail = |e: chrono::ParseError| ValueError::coercion(Kind::DateTime, text, e);
    if !is_datetime_shape(text) {
        return Err(ValueError::coercion(Kind::DateTime, text, "not a date or date-time"));
    }

    if text.len() == 10 {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(fail)?;
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| ValueError::coercion(Kind::DateTime, text, "invalid date"));
    }

    let mut normalized = text.to_string();
    normalized.replace_range(10..11, "T");
    if normalized.ends_with('z') {
        normalized.replace_range(normalized.len() - 1.., "Z");
    }

    let has_offset = normalized.ends_with('Z') || normalized[19..].contains(['+', '-']);
    if has_offset {
        DateTime::parse_from_rfc3339(&normalized)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(fail)
    } else {
        NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(fail)
    }
}

/// Reads `{ member = value, ... }` into a [`Table`]. Members are
/// comma-separated and keep their order; a repeated member is an error.
fn coerce_inline_table(text: &str) -> Result<Table, ValueError> {
    let fail = |msg: String| ValueError::coercion(Kind::InlineTable, text, msg);
    let inner = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| fail("expected `{ ... }`".to_string()))?;

    let mut table = Table::new();
    if inner.trim().is_empty() {
        return Ok(table);
    }

    for member in split_top_level(inner, b',') {
        let member = member.trim();
        let eq = find_assignment(member)
            .ok_or_else(|| fail(format!("expected `member = value`, found `{}`", member)))?;
        let key = member[..eq].trim();
        if !is_valid_path(key) {
            return Err(fail(format!("invalid key `{}`", key)));
        }
        let value = read_value(&member[eq + 1..])?;
        if table.insert(key.to_string(), value).is_some() {
            return Err(fail(format!("duplicate key `{}`", key)));
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Value {
        Value::DateTime(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_integers_ignore_separators() {
        assert_eq!(coerce("1_000_000", Kind::Int), Ok(Value::Int(1_000_000)));
        assert_eq!(coerce("-17", Kind::Int), Ok(Value::Int(-17)));
        assert_eq!(coerce("+99", Kind::Int), Ok(Value::Int(99)));
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce("3.1415", Kind::Float), Ok(Value::Float(3.1415)));
        assert_eq!(coerce("5e+22", Kind::Float), Ok(Value::Float(5e22)));
        assert_eq!(coerce("224_617.445_991", Kind::Float), Ok(Value::Float(224617.445991)));
        assert_eq!(coerce("-inf", Kind::Float), Ok(Value::Float(f64::NEG_INFINITY)));
        match coerce("nan", Kind::Float) {
            Ok(Value::Float(f)) => assert!(f.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(float_form("1.5"), Some(FloatForm::Fractional));
        assert_eq!(float_form("5e+22"), Some(FloatForm::Exponential));
        assert_eq!(float_form("6.626E-34"), Some(FloatForm::Both));
        assert_eq!(float_form("-nan"), None);
        assert_eq!(float_form("42"), None);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(coerce("true", Kind::Bool), Ok(Value::Bool(true)));
        assert_eq!(coerce("false", Kind::Bool), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_basic_string_escapes() {
        assert_eq!(
            coerce(r#""tab\there \"quoted\" back\\slash""#, Kind::String),
            Ok(Value::Str("tab\there \"quoted\" back\\slash".into()))
        );
        assert_eq!(
            coerce(r#""\u00e9\U0001F600""#, Kind::String),
            Ok(Value::Str("é😀".into()))
        );
        assert_eq!(coerce(r#""""#, Kind::String), Ok(Value::Str(String::new())));
    }

    #[test]
    fn test_invalid_escapes_fail() {
        assert!(matches!(
            coerce(r#""bad \q""#, Kind::String),
            Err(ValueError::Coercion { kind: Kind::String, .. })
        ));
        assert!(coerce(r#""\u12""#, Kind::String).is_err());
        assert!(coerce(r#""\uD800""#, Kind::String).is_err());
    }

    #[test]
    fn test_literal_strings_are_verbatim() {
        assert_eq!(
            coerce(r"'C:\Users\nodejs\templates'", Kind::LiteralString),
            Ok(Value::LiteralStr(r"C:\Users\nodejs\templates".into()))
        );
        assert_eq!(
            coerce("'''\nfirst\n  second\n'''", Kind::LiteralString),
            Ok(Value::LiteralStr("first\n  second\n".into()))
        );
    }

    #[test]
    fn test_multiline_basic_string() {
        assert_eq!(
            coerce("\"\"\"\nRoses\nViolets\n\"\"\"", Kind::String),
            Ok(Value::Str("Roses\nViolets\n".into()))
        );
        assert_eq!(
            coerce("\"\"\"one line\"\"\"", Kind::String),
            Ok(Value::Str("one line".into()))
        );
    }

    #[test]
    fn test_line_ending_backslash() {
        let raw = "\"\"\"\nThe quick \\\n    brown fox \\\n\n    jumps.\"\"\"";
        assert_eq!(
            coerce(raw, Kind::String),
            Ok(Value::Str("The quick brown fox jumps.".into()))
        );
    }

    #[test]
    fn test_datetimes() {
        assert_eq!(coerce("1979-05-27T07:32:00Z", Kind::DateTime), Ok(dt(1979, 5, 27, 7, 32, 0)));
        assert_eq!(coerce("1979-05-27t07:32:00z", Kind::DateTime), Ok(dt(1979, 5, 27, 7, 32, 0)));
        assert_eq!(
            coerce("1979-05-27T00:32:00-07:00", Kind::DateTime),
            Ok(dt(1979, 5, 27, 7, 32, 0))
        );
        assert_eq!(coerce("1979-05-27 07:32:00", Kind::DateTime), Ok(dt(1979, 5, 27, 7, 32, 0)));
        assert_eq!(coerce("1979-05-27", Kind::DateTime), Ok(dt(1979, 5, 27, 0, 0, 0)));

        let with_fraction = coerce("1979-05-27T00:32:00.5+00:00", Kind::DateTime).unwrap();
        let dt = with_fraction.as_datetime().unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_invalid_calendar_values_fail_coercion() {
        for text in ["1979-13-27", "1979-02-30T00:00:00Z", "1979-05-27T25:00:00"] {
            assert!(
                matches!(
                    coerce(text, Kind::DateTime),
                    Err(ValueError::Coercion { kind: Kind::DateTime, .. })
                ),
                "{text} should fail"
            );
        }
    }

    #[test]
    fn test_inline_table() {
        let value = coerce(r#"{ first = "Tom", last = "Preston-Werner", age = 30 }"#, Kind::InlineTable)
            .unwrap();
        let table = value.as_table().unwrap();
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["first", "last", "age"]);
        assert_eq!(table.get("age"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_inline_table_members_with_separators_in_strings() {
        let value = coerce(r#"{ a = "x, y = z", b = [1, 2] }"#, Kind::InlineTable).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("a"), Some(&Value::Str("x, y = z".into())));
        assert_eq!(
            table.get("b"),
            Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
        );
    }

    #[test]
    fn test_inline_table_errors() {
        assert_eq!(coerce("{}", Kind::InlineTable), Ok(Value::Table(Table::new())));
        assert!(coerce("{ a = 1, a = 2 }", Kind::InlineTable).is_err());
        assert!(coerce("{ a }", Kind::InlineTable).is_err());
        assert!(coerce("{ a = 1, }", Kind::InlineTable).is_err());
        assert!(matches!(
            coerce("{ a = nope }", Kind::InlineTable),
            Err(ValueError::Unclassifiable(_))
        ));
    }
}
