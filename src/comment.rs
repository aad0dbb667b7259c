//! Comment stripping.
//!
//! Removes `#` line comments and `/* ... */` block comments before any other
//! analysis. The stripper is quote-aware, so a `#` or `/*` inside a string
//! literal (including a multi-line one) is kept. It never changes the number
//! of lines: a line that held only a comment comes back empty.

use crate::scan::{Quote, Unquoted};

/// Strips comments from `lines`, recognising block comments.
///
/// # Examples
///
/// ```rust
/// use toml_lite::strip_comments;
///
/// let lines = strip_comments(["a = 1 # one", "b = \"#2\" /* two", "still */ c = 3"]);
/// assert_eq!(lines, vec!["a = 1 ", "b = \"#2\" ", " c = 3"]);
/// ```
pub fn strip_comments<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strip_comments_with(lines, true)
}

/// Strips comments from `lines`; `/* ... */` is only treated as a comment
/// when `block_comments` is set.
pub fn strip_comments_with<I, S>(lines: I, block_comments: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut quote = Quote::None;
    let mut in_block = false;

    for line in lines {
        let line = line.as_ref();
        let mut kept = String::with_capacity(line.len());
        let mut pos = 0;

        loop {
            if in_block {
                match line[pos..].find("*/") {
                    Some(end) => {
                        pos += end + 2;
                        in_block = false;
                    }
                    None => break,
                }
            }

            let bytes = line.as_bytes();
            let mut scan = Unquoted::resume(line, pos, quote);
            let cut = scan.find(|&(i, b)| {
                b == b'#' || (block_comments && b == b'/' && bytes.get(i + 1) == Some(&b'*'))
            });

            match cut {
                None => {
                    kept.push_str(&line[pos..]);
                    quote = scan.quote().carried();
                    break;
                }
                Some((i, b'#')) => {
                    kept.push_str(&line[pos..i]);
                    quote = Quote::None;
                    break;
                }
                Some((i, _)) => {
                    kept.push_str(&line[pos..i]);
                    quote = Quote::None;
                    in_block = true;
                    pos = i + 2;
                }
            }
        }

        out.push(kept);
    }

    out
}
