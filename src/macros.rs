/// Builds a [`Value`](crate::Value) from a literal, JSON-like description.
///
/// Arrays use `[...]`, tables use `{ "key": value }`, and any other
/// expression goes through `Value::from`. Two prefixes cover the kinds a
/// plain Rust literal cannot express: `literal "..."` gives a
/// [`Value::LiteralStr`](crate::Value::LiteralStr), and `datetime "..."`
/// reads its text the way a document value is read, normalized to UTC.
/// Inside arrays and tables, wrap a prefixed value in parentheses.
///
/// # Panics
///
/// `datetime` panics if its text is not a valid date-time value.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{toml, Value};
///
/// let owner = toml!({
///     "name": "Tom",
///     "age": 30,
///     "langs": ["rust", "c"],
///     "admin": false
/// });
///
/// let table = owner.as_table().unwrap();
/// assert_eq!(table.get("age"), Some(&Value::Int(30)));
/// assert_eq!(table.get("langs").and_then(Value::as_array).map(Vec::len), Some(2));
///
/// let release = toml!({
///     "path": (literal r"C:\builds"),
///     "date": (datetime "2024-01-15T10:00:00+01:00")
/// });
/// let release = release.as_table().unwrap();
/// assert_eq!(release.get("path"), Some(&Value::LiteralStr(r"C:\builds".into())));
/// assert_eq!(release.get("date").map(Value::kind), Some(toml_lite::Kind::DateTime));
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    (literal $text:literal) => {
        $crate::Value::LiteralStr(::std::string::String::from($text))
    };

    (datetime $text:literal) => {
        $crate::macros::datetime_value($text)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    (( $($inner:tt)+ )) => {
        $crate::toml!($($inner)+)
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[doc(hidden)]
pub fn datetime_value(text: &str) -> crate::Value {
    match crate::coerce(text, crate::Kind::DateTime) {
        Ok(value) => value,
        Err(err) => panic!("toml!: {}", err),
    }
}
