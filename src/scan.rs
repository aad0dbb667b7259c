//! Quote-aware lexical helpers shared by the comment stripper, the classifier
//! and the multi-line accumulator.
//!
//! Every delimiter the format cares about (`#`, `/*`, `=`, `,`, brackets and
//! braces) is ASCII, so scanning works on bytes: a multi-byte UTF-8 sequence
//! never contains an ASCII byte.

/// The string literal the scanner is currently inside, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum Quote {
    #[default]
    None,
    Basic,
    Literal,
    MultiBasic,
    MultiLiteral,
}

impl Quote {
    /// State carried over to the next line. Single-line strings never span lines.
    pub(crate) fn carried(self) -> Quote {
        match self {
            Quote::MultiBasic | Quote::MultiLiteral => self,
            _ => Quote::None,
        }
    }
}

/// Iterates over the bytes of `text` that sit outside string literals,
/// yielding `(index, byte)` pairs. Quote characters are never yielded.
pub(crate) struct Unquoted<'a> {
    bytes: &'a [u8],
    pos: usize,
    quote: Quote,
}

impl<'a> Unquoted<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self::resume(text, 0, Quote::None)
    }

    /// Starts scanning at byte `pos` with the given quote state.
    pub(crate) fn resume(text: &'a str, pos: usize, quote: Quote) -> Self {
        Unquoted {
            bytes: text.as_bytes(),
            pos,
            quote,
        }
    }

    pub(crate) fn quote(&self) -> Quote {
        self.quote
    }

    fn starts_with(&self, pat: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pat)
    }

    /// Enters a string literal if one starts at the current position.
    fn open_quote(&mut self) -> bool {
        let quote = match self.bytes[self.pos] {
            b'"' if self.starts_with(b"\"\"\"") => Quote::MultiBasic,
            b'"' => Quote::Basic,
            b'\'' if self.starts_with(b"'''") => Quote::MultiLiteral,
            b'\'' => Quote::Literal,
            _ => return false,
        };
        self.quote = quote;
        self.pos += match quote {
            Quote::MultiBasic | Quote::MultiLiteral => 3,
            _ => 1,
        };
        true
    }

    /// Consumes the string literal that starts at the current position and
    /// returns the offset just past its closing delimiter.
    pub(crate) fn skip_literal(&mut self) -> Option<usize> {
        if self.pos >= self.bytes.len() || !self.open_quote() {
            return None;
        }
        while self.pos < self.bytes.len() {
            self.step_quoted();
            if self.quote == Quote::None {
                return Some(self.pos);
            }
        }
        None
    }

    /// Advances over one unit of quoted content, leaving the literal when its
    /// closing delimiter is consumed.
    fn step_quoted(&mut self) {
        let b = self.bytes[self.pos];
        match self.quote {
            Quote::None => {}
            Quote::Basic => match b {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.quote = Quote::None;
                    self.pos += 1;
                }
                _ => self.pos += 1,
            },
            Quote::Literal => {
                if b == b'\'' {
                    self.quote = Quote::None;
                }
                self.pos += 1;
            }
            Quote::MultiBasic => {
                if b == b'\\' {
                    self.pos += 2;
                } else if self.starts_with(b"\"\"\"") {
                    self.quote = Quote::None;
                    self.pos += 3;
                } else {
                    self.pos += 1;
                }
            }
            Quote::MultiLiteral => {
                if self.starts_with(b"'''") {
                    self.quote = Quote::None;
                    self.pos += 3;
                } else {
                    self.pos += 1;
                }
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }
}

impl Iterator for Unquoted<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<(usize, u8)> {
        while self.pos < self.bytes.len() {
            if self.quote != Quote::None {
                self.step_quoted();
                continue;
            }
            if !self.open_quote() {
                self.pos += 1;
                return Some((self.pos - 1, self.bytes[self.pos - 1]));
            }
        }
        None
    }
}

/// Bracket/brace nesting plus quote state, fed one line at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Nesting {
    pub(crate) depth: usize,
    pub(crate) quote: Quote,
}

impl Nesting {
    /// Returns `true` if everything was closed at some point on `line`, even
    /// when the rest of the line opens something new.
    pub(crate) fn feed(&mut self, line: &str) -> bool {
        let mut closed = false;
        let mut scan = Unquoted::resume(line, 0, self.quote);
        while let Some((_, b)) = scan.next() {
            match b {
                b'[' | b'{' => self.depth += 1,
                b']' | b'}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
            closed |= self.depth == 0 && scan.quote() == Quote::None;
        }
        self.quote = scan.quote().carried();
        closed || self.is_closed()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.depth == 0 && self.quote == Quote::None
    }
}

/// Position of the first `=` outside quotes, brackets and braces.
pub(crate) fn find_assignment(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in Unquoted::new(text) {
        match b {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Splits `text` on `sep` bytes that sit outside quotes, brackets and braces.
pub(crate) fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in Unquoted::new(text) {
        match b {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ if b == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// `true` when `text` is exactly one complete string literal and nothing else.
pub(crate) fn is_single_literal(text: &str) -> bool {
    Unquoted::new(text).skip_literal() == Some(text.len())
}

/// `true` when the open brackets and braces in `text` all close again.
pub(crate) fn is_balanced(text: &str) -> bool {
    let mut depth = 0isize;
    let mut scan = Unquoted::new(text);
    for (_, b) in scan.by_ref() {
        match b {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && scan.quote() == Quote::None
}

/// `true` for a bare key segment: ASCII letters, digits, `_` and `-`.
fn is_bare(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Validates a key or table name: dot-separated bare or quoted segments.
pub(crate) fn is_valid_path(path: &str) -> bool {
    let path = path.trim();
    !path.is_empty()
        && split_top_level(path, b'.').into_iter().all(|segment| {
            let segment = segment.trim();
            let quoted = (segment.starts_with('"') || segment.starts_with('\''))
                && !segment.starts_with("\"\"\"")
                && !segment.starts_with("'''");
            if quoted {
                is_single_literal(segment)
            } else {
                is_bare(segment)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unquoted(text: &str) -> String {
        Unquoted::new(text).map(|(_, b)| b as char).collect()
    }

    #[test]
    fn test_unquoted_skips_strings() {
        assert_eq!(unquoted(r#"a = "x # y" # c"#), "a =  # c");
        assert_eq!(unquoted("a = 'x\\' # c"), "a =  # c");
        assert_eq!(unquoted(r#"a = "x\"y" z"#), "a =  z");
        assert_eq!(unquoted(r#"a = """x"y""" z"#), "a =  z");
    }

    #[test]
    fn test_quote_state_after_open_multiline() {
        let mut scan = Unquoted::new(r#"s = """abc"#);
        scan.by_ref().for_each(drop);
        assert_eq!(scan.quote(), Quote::MultiBasic);

        let mut scan = Unquoted::new("s = '''");
        scan.by_ref().for_each(drop);
        assert_eq!(scan.quote(), Quote::MultiLiteral);
    }

    #[test]
    fn test_nesting_tracks_depth_across_lines() {
        let mut nesting = Nesting::default();
        nesting.feed("[");
        nesting.feed("  [1, 2],");
        assert_eq!(nesting.depth, 1);
        nesting.feed("  \"]\",");
        assert!(!nesting.is_closed());
        nesting.feed("]");
        assert!(nesting.is_closed());
    }

    #[test]
    fn test_find_assignment_ignores_quoted_equals() {
        assert_eq!(find_assignment(r#""a=b" = 1"#), Some(6));
        assert_eq!(find_assignment("{ a = 1 }"), None);
        assert_eq!(find_assignment("foo bar"), None);
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level(r#"1, "a,b", [2, 3], { x = 4, y = 5 }"#, b','),
            vec!["1", r#" "a,b""#, " [2, 3]", " { x = 4, y = 5 }"]
        );
        assert_eq!(split_top_level("", b','), vec![""]);
    }

    #[test]
    fn test_single_literal_and_balance() {
        assert!(is_single_literal(r#""abc""#));
        assert!(is_single_literal("'a\\b'"));
        assert!(!is_single_literal(r#""abc" x"#));
        assert!(!is_single_literal(r#""abc"#));
        assert!(!is_single_literal(r#""a""""#));
        assert!(is_single_literal(r#""""""""#));
        assert!(is_single_literal(r#""""#));
        assert!(is_balanced("[1, [2], { a = ']' }]"));
        assert!(!is_balanced("[1, [2]"));
        assert!(!is_balanced("]["));
    }

    #[test]
    fn test_valid_paths() {
        assert!(is_valid_path("owner"));
        assert!(is_valid_path("servers.alpha"));
        assert!(is_valid_path(r#"site."google.com""#));
        assert!(is_valid_path("bare-key_1"));
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("foo bar"));
        assert!(!is_valid_path("a..b"));
        assert!(!is_valid_path("a]"));
    }
}
