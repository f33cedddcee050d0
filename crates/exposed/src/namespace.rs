//! Dotted namespace paths
//!
//! A namespace is where an exposed value ends up on the client's root object:
//! `"App.Cache.user"` installs the value at `root.App.Cache.user`. Paths are
//! emitted verbatim into generated code, so every segment must be a plain
//! ASCII identifier (`[A-Za-z_$][A-Za-z0-9_$]*`); anything else is rejected
//! at parse time.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{ExposeError, Result};

/// A validated, dot-separated namespace path.
///
/// # Example
///
/// ```
/// use exposed::Namespace;
///
/// let ns: Namespace = "App.yui.seed".parse().unwrap();
/// let parent: Namespace = "App.yui".parse().unwrap();
///
/// assert!(ns.is_covered_by(&parent));
/// assert!(!parent.is_covered_by(&ns));
/// assert_eq!(ns.intermediates().collect::<Vec<_>>(), vec!["App", "App.yui"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Parse and validate a namespace path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNamespace` for an empty path, an empty segment
    /// (leading, trailing or doubled dot), or a segment that is not an
    /// identifier.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(ExposeError::invalid_namespace(path, "namespace is empty"));
        }

        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(ExposeError::invalid_namespace(path, "empty segment"));
            }
            if !is_identifier(segment) {
                return Err(ExposeError::invalid_namespace(
                    path,
                    format!("`{}` is not an identifier", segment),
                ));
            }
        }

        Ok(Namespace(path.to_string()))
    }

    /// The path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path's segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Last segment
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Check if `self` equals `other` or lives underneath it.
    pub fn is_covered_by(&self, other: &Namespace) -> bool {
        covers(other.as_str(), self.as_str())
    }

    /// Check if `other` equals `self` or lives underneath it.
    pub fn covers(&self, other: &Namespace) -> bool {
        covers(self.as_str(), other.as_str())
    }

    /// Strict ancestor paths, shallowest first (`"a.b.c"` → `"a"`, `"a.b"`).
    pub fn intermediates(&self) -> impl Iterator<Item = &str> {
        self.0
            .match_indices('.')
            .map(move |(idx, _)| &self.0[..idx])
    }
}

/// Check if `path` equals `ancestor` or starts with `ancestor + "."`.
pub(crate) fn covers(ancestor: &str, path: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// ASCII subset of JavaScript identifiers: `[A-Za-z_$][A-Za-z0-9_$]*`.
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl FromStr for Namespace {
    type Err = ExposeError;

    fn from_str(s: &str) -> Result<Self> {
        Namespace::parse(s)
    }
}

impl TryFrom<&str> for Namespace {
    type Error = ExposeError;

    fn try_from(s: &str) -> Result<Self> {
        Namespace::parse(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = ExposeError;

    fn try_from(s: String) -> Result<Self> {
        Namespace::parse(&s)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Namespace {
    fn borrow(&self) -> &str {
        &self.0
    }
}
