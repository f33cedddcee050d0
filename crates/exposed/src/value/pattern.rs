//! Regular-expression pattern values

use crate::error::{ExposeError, Result};

/// Flags a regular-expression literal may carry.
const VALID_FLAGS: &str = "dgimsuyv";

/// A regular-expression pattern, emitted as a `/source/flags` literal.
///
/// The source is normalized at construction the way a `RegExp` reports its
/// `source`: an empty pattern becomes `(?:)`, and unescaped `/` characters
/// and line terminators are escaped so the literal stays well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternValue {
    source: String,
    flags: String,
}

impl PatternValue {
    /// Create a pattern, validating its flags.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for unknown or repeated flags, or when both
    /// `u` and `v` are given.
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        validate_flags(flags)?;
        Ok(Self {
            source: normalize_source(source),
            flags: flags.to_string(),
        })
    }

    /// Pattern source, as it appears between the slashes
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pattern flags, in the order given
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// `g` flag
    pub fn global(&self) -> bool {
        self.flags.contains('g')
    }

    /// `i` flag
    pub fn ignore_case(&self) -> bool {
        self.flags.contains('i')
    }

    /// `m` flag
    pub fn multiline(&self) -> bool {
        self.flags.contains('m')
    }

    /// The `/source/flags` literal
    pub fn to_literal(&self) -> String {
        format!("/{}/{}", self.source, self.flags)
    }
}

fn validate_flags(flags: &str) -> Result<()> {
    let invalid = |reason: String| ExposeError::InvalidPattern {
        flags: flags.to_string(),
        reason,
    };

    let mut seen = String::new();
    for flag in flags.chars() {
        if !VALID_FLAGS.contains(flag) {
            return Err(invalid(format!("unknown flag `{}`", flag)));
        }
        if seen.contains(flag) {
            return Err(invalid(format!("repeated flag `{}`", flag)));
        }
        seen.push(flag);
    }

    if seen.contains('u') && seen.contains('v') {
        return Err(invalid("flags `u` and `v` are exclusive".to_string()));
    }
    Ok(())
}

fn normalize_source(source: &str) -> String {
    if source.is_empty() {
        return "(?:)".to_string();
    }

    let mut out = String::with_capacity(source.len());
    let mut escaped = false;
    let mut in_class = false;

    for c in source.chars() {
        if escaped {
            escaped = false;
            push_char(&mut out, c);
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '[' => {
                in_class = true;
                out.push(c);
            }
            ']' => {
                in_class = false;
                out.push(c);
            }
            '/' if !in_class => out.push_str("\\/"),
            _ => push_char(&mut out, c),
        }
    }
    out
}

/// Line terminators can not appear raw inside a literal.
fn push_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        c if c as u32 == 0x2028 || c as u32 == 0x2029 => {
            out.push_str(&format!("\\u{:04x}", c as u32))
        }
        c => out.push(c),
    }
}
