//! Table assembly.
//!
//! The assembler makes a single forward pass over comment-stripped lines. It
//! keeps the section currently being filled (the root table, a `[name]` table
//! or the newest `[[name]]` instance) and finalizes it into the [`Document`]
//! when the next header or the end of input is reached. Values that open a
//! multi-line construct are handed to an [`Accumulator`] until it closes.
//!
//! ```rust
//! use toml_lite::{parse, Value};
//!
//! let doc = parse([
//!     "[[fruit]]",
//!     "name = 'apple'",
//!     "colors = [",
//!     "  'red',",
//!     "  'green',",
//!     "]",
//!     "[[fruit]]",
//!     "name = 'banana'",
//! ])
//! .unwrap();
//!
//! let fruit = doc.array_of_tables("fruit").and_then(Value::as_array).unwrap();
//! assert_eq!(fruit.len(), 2);
//! ```

use crate::coerce::read_value;
use crate::comment::strip_comments_with;
use crate::multiline::Accumulator;
use crate::options::{DuplicateTables, ParseOptions};
use crate::scan::{find_assignment, is_valid_path};
use crate::{Document, Error, Result, Table, Value};

const EXPECTED_LINE: &str = "expected `key = value` or a `[table]` header";

/// Where key/value pairs are currently being written.
#[derive(Debug, Clone, PartialEq)]
enum Target {
    Table(String),
    ArrayInstance(String),
}

#[derive(Debug)]
struct Section {
    target: Target,
    table: Table,
}

impl Section {
    fn root() -> Self {
        Section {
            target: Target::Table(String::new()),
            table: Table::new(),
        }
    }
}

/// A parsed `[name]` or `[[name]]` line.
#[derive(Debug, PartialEq)]
struct Header<'a> {
    path: &'a str,
    array: bool,
}

impl<'a> Header<'a> {
    fn parse(line: usize, text: &'a str) -> Result<Header<'a>> {
        let (inner, array) = match text.strip_prefix("[[") {
            Some(rest) => {
                let inner = rest.strip_suffix("]]").ok_or_else(|| {
                    Error::malformed_header(line, text, "expected `]]` to close the array-of-tables header")
                })?;
                (inner, true)
            }
            None => {
                let inner = text
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| Error::malformed_header(line, text, "expected `]` to close the table header"))?;
                (inner, false)
            }
        };

        let path = inner.trim();
        if path.is_empty() {
            return Err(Error::malformed_header(line, text, "table name is empty"));
        }
        if !is_valid_path(path) {
            return Err(Error::malformed_header(
                line,
                text,
                "expected dot-separated bare or quoted names",
            ));
        }
        Ok(Header { path, array })
    }
}

/// A multi-line value waiting for its closing delimiter.
struct Pending {
    line: usize,
    key: String,
    accumulator: Accumulator,
}

struct Assembler<'o> {
    options: &'o ParseOptions,
    document: Document,
    section: Section,
}

impl<'o> Assembler<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Assembler {
            options,
            document: Document::new(),
            section: Section::root(),
        }
    }

    /// Handles one line outside any multi-line construct.
    fn line(&mut self, line: usize, raw: &str) -> Result<Option<Pending>> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if text.starts_with('[') {
            let header = Header::parse(line, text)?;
            self.open(line, text, header)?;
            return Ok(None);
        }

        let eq = find_assignment(text).ok_or_else(|| Error::structural(line, text, EXPECTED_LINE))?;
        let key = text[..eq].trim();
        let value = text[eq + 1..].trim();

        if key.is_empty() {
            return Err(Error::structural(line, text, "key is empty"));
        }
        if !is_valid_path(key) {
            return Err(Error::structural(
                line,
                text,
                "expected a bare key (A-Z a-z 0-9 _ -) or a quoted key",
            ));
        }
        if value.is_empty() {
            return Err(Error::UnclassifiableValue {
                line,
                text: text.to_string(),
            });
        }

        if let Some(accumulator) = Accumulator::open(value) {
            log::trace!("line {}: {} opened for `{}`", line, accumulator.opened().construct(), key);
            return Ok(Some(Pending {
                line,
                key: key.to_string(),
                accumulator,
            }));
        }

        let value = read_value(value).map_err(|e| e.at(line))?;
        self.insert(line, key.to_string(), value)?;
        Ok(None)
    }

    fn insert(&mut self, line: usize, key: String, value: Value) -> Result<()> {
        let merged_clash = match &self.section.target {
            Target::Table(path) if self.options.duplicate_tables == DuplicateTables::Merge => {
                self.document.get(path).is_some_and(|t| t.contains_key(&key))
            }
            _ => false,
        };
        if merged_clash || self.section.table.contains_key(&key) {
            return Err(Error::structural(line, &key, "duplicate key in table"));
        }
        self.section.table.insert(key, value);
        Ok(())
    }

    /// Finalizes the current section and starts the one `header` declares.
    fn open(&mut self, line: usize, text: &str, header: Header<'_>) -> Result<()> {
        self.finalize();
        let path = header.path;

        if header.array {
            if self.document.contains_table(path) {
                return Err(Error::structural(
                    line,
                    text,
                    "already declared as a `[table]`; cannot also be an array of tables",
                ));
            }
            log::trace!("line {}: array-of-tables instance `{}`", line, path);
            self.section.target = Target::ArrayInstance(path.to_string());
            return Ok(());
        }

        if self.document.contains_array(path) {
            return Err(Error::structural(
                line,
                text,
                "already declared as an array of tables; cannot also be a `[table]`",
            ));
        }
        if self.document.contains_table(path)
            && self.options.duplicate_tables == DuplicateTables::Reject
        {
            return Err(Error::malformed_header(line, text, "table declared more than once"));
        }
        log::trace!("line {}: table `{}`", line, path);
        self.section.target = Target::Table(path.to_string());
        Ok(())
    }

    /// Moves the current section into the document.
    fn finalize(&mut self) {
        let Section { target, table } = std::mem::replace(&mut self.section, Section::root());
        match target {
            Target::Table(path) => {
                log::trace!("finalized table `{}` ({} keys)", path, table.len());
                match self.options.duplicate_tables {
                    DuplicateTables::Merge => self.document.merge_table(path, table),
                    DuplicateTables::Separate | DuplicateTables::Reject => {
                        self.document.push_table(path, table)
                    }
                }
            }
            Target::ArrayInstance(path) => {
                log::trace!("finalized array-of-tables instance `{}` ({} keys)", path, table.len());
                self.document.push_array_instance(path, table);
            }
        }
    }

    fn finish(mut self) -> Document {
        self.finalize();
        self.document
    }
}

/// Runs comment stripping and table assembly over `lines`.
pub(crate) fn parse_lines<I, S>(lines: I, options: &ParseOptions) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = strip_comments_with(lines, options.block_comments);
    log::trace!("parsing {} lines", lines.len());

    let result = assemble(&lines, options);
    if let Err(err) = &result {
        log::debug!("parse aborted: {}", err);
    }
    result
}

fn assemble(lines: &[String], options: &ParseOptions) -> Result<Document> {
    let mut assembler = Assembler::new(options);
    let mut pending: Option<Pending> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let line = idx + 1;

        if let Some(mut open) = pending.take() {
            match open.accumulator.push(raw) {
                Some(text) => {
                    log::trace!("line {}: multi-line value for `{}` closed", line, open.key);
                    let value = read_value(&text).map_err(|e| e.at(open.line))?;
                    assembler.insert(open.line, open.key, value)?;
                }
                None => pending = Some(open),
            }
            continue;
        }

        pending = assembler.line(line, raw)?;
    }

    if let Some(open) = pending {
        let state = open.accumulator.state();
        return Err(Error::unterminated(open.line, state.construct(), state.delimiter()));
    }

    Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Result<Document> {
        parse_lines(lines, &ParseOptions::default())
    }

    fn parse_with(lines: &[&str], policy: DuplicateTables) -> Result<Document> {
        parse_lines(lines, &ParseOptions::new().with_duplicate_tables(policy))
    }

    #[test]
    fn test_header_parsing() {
        assert_eq!(
            Header::parse(1, "[owner]").unwrap(),
            Header { path: "owner", array: false }
        );
        assert_eq!(
            Header::parse(1, "[[ pkg.deps ]]").unwrap(),
            Header { path: "pkg.deps", array: true }
        );
        assert!(matches!(Header::parse(3, "[owner"), Err(Error::MalformedHeader { line: 3, .. })));
        assert!(Header::parse(1, "[[pkg]").is_err());
        assert!(Header::parse(1, "[a]]").is_err());
        assert!(Header::parse(1, "[]").is_err());
        assert!(Header::parse(1, "[a b]").is_err());
    }

    #[test]
    fn test_root_and_tables_in_order() {
        let doc = parse(&["title = \"demo\"", "", "[owner]", "name = \"Tom\"", "age = 30"]).unwrap();
        let paths: Vec<&str> = doc.tables().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["", "owner"]);
        let keys: Vec<&String> = doc["owner"].keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
    }

    #[test]
    fn test_empty_input_has_root() {
        let doc = parse(&[]).unwrap();
        assert!(doc.contains_table(""));
        assert!(doc[""].is_empty());
    }

    #[test]
    fn test_empty_header_still_declared() {
        let doc = parse(&["[a]", "[b]", "x = 1"]).unwrap();
        assert!(doc["a"].is_empty());
        assert_eq!(doc["b"].len(), 1);
    }

    #[test]
    fn test_multiline_error_reports_opening_line() {
        let err = parse(&["a = 1", "b = [", "  1,", "  nope,", "]"]).unwrap_err();
        assert!(matches!(err, Error::UnclassifiableValue { line: 2, .. }));

        let err = parse(&["s = \"\"\"", "text"]).unwrap_err();
        assert_eq!(
            err,
            Error::unterminated(1, "multi-line basic string", "\"\"\"")
        );
    }

    #[test]
    fn test_text_after_closing_delimiter() {
        let err = parse(&["s = '''", "x", "''' '''", "t = 1"]).unwrap_err();
        assert!(
            matches!(err, Error::UnclassifiableValue { line: 1, ref text } if text.ends_with("''' '''")),
            "{:?}",
            err
        );

        let err = parse(&["a = [", "  1,", "] [2]"]).unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert!(!matches!(err, Error::UnterminatedConstruct { .. }));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(parse(&["foo bar"]), Err(Error::StructuralError { line: 1, .. })));
        assert!(matches!(parse(&["= 1"]), Err(Error::StructuralError { .. })));
        assert!(matches!(parse(&["a b = 1"]), Err(Error::StructuralError { .. })));
        assert!(matches!(parse(&["a = "]), Err(Error::UnclassifiableValue { .. })));
        assert!(matches!(
            parse(&["a = 1", "a = 2"]),
            Err(Error::StructuralError { line: 2, .. })
        ));
    }

    #[test]
    fn test_table_and_array_conflict() {
        assert!(matches!(
            parse(&["[x]", "[[x]]"]),
            Err(Error::StructuralError { line: 2, .. })
        ));
        assert!(matches!(
            parse(&["[[x]]", "[x]"]),
            Err(Error::StructuralError { line: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_table_policies() {
        let lines = ["[a]", "x = 1", "[b]", "[a]", "y = 2"];

        let doc = parse_with(&lines, DuplicateTables::Separate).unwrap();
        assert_eq!(doc.get_all("a").count(), 2);

        let doc = parse_with(&lines, DuplicateTables::Merge).unwrap();
        assert_eq!(doc.get_all("a").count(), 1);
        assert_eq!(doc["a"].len(), 2);

        let err = parse_with(&lines, DuplicateTables::Reject).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { line: 4, .. }));

        let err = parse_with(&["[a]", "x = 1", "[a]", "x = 2"], DuplicateTables::Merge).unwrap_err();
        assert!(matches!(err, Error::StructuralError { line: 4, .. }));
    }

    #[test]
    fn test_block_comment_spanning_header() {
        let doc = parse(&["a = 1 /*", "[hidden]", "*/", "[shown]"]).unwrap();
        assert!(!doc.contains_table("hidden"));
        assert!(doc.contains_table("shown"));
    }
}
