//! Configuration options for parsing.
//!
//! This module provides types to customize how a document is read:
//!
//! - [`ParseOptions`]: Main configuration struct
//! - [`DuplicateTables`]: What happens when a `[name]` header appears twice
//!
//! ## Examples
//!
//! ```rust
//! use toml_lite::{parse_with_options, DuplicateTables, ParseOptions};
//!
//! let source = ["[a]", "x = 1", "[a]", "y = 2"];
//!
//! let options = ParseOptions::new().with_duplicate_tables(DuplicateTables::Merge);
//! let doc = parse_with_options(source, options).unwrap();
//! assert_eq!(doc["a"].len(), 2);
//! ```

/// Policy for a `[name]` header whose name was already used by an earlier
/// `[name]` header. Array-of-tables headers (`[[name]]`) always append.
///
/// - **Separate**: Default, each occurrence becomes its own entry
/// - **Merge**: Keys are appended to the first entry; a repeated key is an error
/// - **Reject**: The second header is an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateTables {
    #[default]
    Separate,
    Merge,
    Reject,
}

/// Configuration options for parsing.
///
/// # Examples
///
/// ```rust
/// use toml_lite::{DuplicateTables, ParseOptions};
///
/// let options = ParseOptions::new();
/// assert_eq!(options.duplicate_tables, DuplicateTables::Separate);
/// assert!(options.block_comments);
///
/// let strict = ParseOptions::strict();
/// assert_eq!(strict.duplicate_tables, DuplicateTables::Reject);
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub duplicate_tables: DuplicateTables,
    /// Recognise `/* ... */` block comments. `#` comments are always recognised.
    pub block_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            duplicate_tables: DuplicateTables::default(),
            block_comments: true,
        }
    }
}

impl ParseOptions {
    /// Creates default options (separate duplicate tables, block comments on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options closest to the reference format: duplicate tables are rejected
    /// and only `#` starts a comment.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            duplicate_tables: DuplicateTables::Reject,
            block_comments: false,
        }
    }

    /// Sets the policy for repeated `[name]` headers.
    #[must_use]
    pub fn with_duplicate_tables(mut self, policy: DuplicateTables) -> Self {
        self.duplicate_tables = policy;
        self
    }

    /// Enables or disables `/* ... */` block comments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_lite::{parse_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_block_comments(false);
    /// assert!(parse_with_options(["a = 1 /* note */"], options).is_err());
    /// ```
    #[must_use]
    pub fn with_block_comments(mut self, enabled: bool) -> Self {
        self.block_comments = enabled;
        self
    }
}
