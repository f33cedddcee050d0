//! Serializer: values to embeddable JavaScript literal text
//!
//! Structured data is encoded as JSON. Functions and patterns have no JSON
//! form, so encoding is done in two passes:
//!
//! ```text
//! Value ──[encode]──► JSON with "@__LITERAL_<nonce>_<n>__@" strings
//!       ──[escape]──► <, >, / replaced by \u escapes
//!       ──[substitute]──► placeholders replaced by function/pattern text
//! ```
//!
//! The nonce is drawn fresh for every `serialize` call. Function and pattern
//! text is server-authored code and is substituted after escaping, unchanged.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Number};
use tracing::trace;

use crate::error::Result;
use crate::value::{type_name, Value};

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

static SERIALIZE_CALLS: AtomicU64 = AtomicU64::new(0);

/// Options controlling serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Caller attests the value holds no functions or patterns; the
    /// placeholder pass is skipped. Functions found anyway are dropped like
    /// `undefined`, and patterns encode as `{}`.
    pub is_json: bool,
}

impl SerializeOptions {
    /// Options for plain JSON data
    pub fn json() -> Self {
        Self { is_json: true }
    }
}

/// Serialize a value to literal source text.
///
/// # Example
///
/// ```
/// use exposed::{serialize, FunctionValue, SerializeOptions, Value};
///
/// let value = Value::empty_object()
///     .with_field("name", "</script>")
///     .with_field("greet", FunctionValue::new("", ["n"], "return 'hi ' + n;"));
///
/// let text = serialize(&value, SerializeOptions::default()).unwrap();
/// assert!(text.starts_with("{\"name\":\"\\u003C\\u002Fscript\\u003E\",\"greet\":function (n)"));
/// ```
///
/// # Errors
///
/// Returns `NativeFunction` if any function in `value` has no source text.
pub fn serialize(value: &Value, options: SerializeOptions) -> Result<String> {
    let text = if options.is_json {
        encode_json(value, None)?
    } else {
        match value {
            Value::Function(f) => f.source_text()?.to_string(),
            Value::Pattern(p) => p.to_literal(),
            _ => {
                let mut literals = Literals::new();
                let encoded = encode_json(value, Some(&mut literals))?;
                literals.substitute(&encoded)
            }
        }
    };

    trace!(
        kind = type_name(value),
        is_json = options.is_json,
        len = text.len(),
        "serialized value"
    );
    Ok(text)
}

/// Encode as escaped JSON text, or `undefined` when there is no JSON form.
fn encode_json(value: &Value, literals: Option<&mut Literals>) -> Result<String> {
    match to_json(value, literals)? {
        Some(json) => Ok(escape_html(&serde_json::to_string(&json)?)),
        None => Ok("undefined".to_string()),
    }
}

/// Convert to a JSON tree, following `JSON.stringify` for values it can not
/// represent: `None` means "omitted" (becomes `null` inside arrays).
fn to_json(value: &Value, mut literals: Option<&mut Literals>) -> Result<Option<serde_json::Value>> {
    let json = match value {
        Value::Undefined => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),

        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                let encoded = to_json(item, literals.as_deref_mut())?;
                out.push(encoded.unwrap_or(serde_json::Value::Null));
            }
            serde_json::Value::Array(out)
        }

        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map.iter() {
                if let Some(encoded) = to_json(item, literals.as_deref_mut())? {
                    out.insert(key.clone(), encoded);
                }
            }
            serde_json::Value::Object(out)
        }

        Value::Function(f) => match literals {
            Some(literals) => literals.placeholder(f.source_text()?.to_string()),
            None => return Ok(None),
        },

        Value::Pattern(p) => match literals {
            Some(literals) => literals.placeholder(p.to_literal()),
            None => serde_json::Value::Object(Map::new()),
        },
    };
    Ok(Some(json))
}

fn number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Escape characters that could end an embedding `<script>` element, plus
/// the two line terminators that are legal in JSON but not in older script
/// string literals.
fn escape_html(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' | '>' | '/' => out.push_str(&format!("\\u{:04X}", c as u32)),
            c if c as u32 == 0x2028 || c as u32 == 0x2029 => {
                out.push_str(&format!("\\u{:04X}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}

/// Function and pattern literals collected during encoding.
struct Literals {
    prefix: String,
    texts: Vec<String>,
}

impl Literals {
    fn new() -> Self {
        let call = SERIALIZE_CALLS.fetch_add(1, Ordering::Relaxed);
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(call);
        Self {
            prefix: format!("\"@__LITERAL_{:016x}_", hasher.finish()),
            texts: Vec::new(),
        }
    }

    /// Record `text` and return the JSON string standing in for it.
    fn placeholder(&mut self, text: String) -> serde_json::Value {
        let token = format!("{}{}__@", &self.prefix[1..], self.texts.len());
        self.texts.push(text);
        serde_json::Value::String(token)
    }

    /// Replace every quoted placeholder in `json` with its literal text.
    fn substitute(&self, json: &str) -> String {
        if self.texts.is_empty() {
            return json.to_string();
        }

        let mut out = String::with_capacity(json.len());
        let mut rest = json;
        while let Some(start) = rest.find(&self.prefix) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.prefix.len()..];
            match self.lookup(after) {
                Some((text, consumed)) => {
                    out.push_str(text);
                    rest = &after[consumed..];
                }
                None => {
                    out.push_str(&self.prefix);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Parse `<n>__@"` at the start of `s`.
    fn lookup<'a>(&'a self, s: &str) -> Option<(&'a str, usize)> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        let index: usize = s[..digits].parse().ok()?;
        if !s[digits..].starts_with("__@\"") {
            return None;
        }
        let text = self.texts.get(index)?;
        Some((text.as_str(), digits + 4))
    }
}
