//! Callable values: functions exposed as source text

use crate::error::{ExposeError, Result};

/// A function exposed to the client.
///
/// The function is carried as the exact source text that recreates it when
/// evaluated. There are no captured closure semantics: whatever the source
/// refers to must exist on the client. Native functions have no source and
/// can not be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    /// Function name (empty for anonymous functions)
    pub name: String,

    /// Parameter names
    pub params: Vec<String>,

    /// Source text, `None` for native functions
    pub source: Option<String>,
}

impl FunctionValue {
    /// Create a function declaration from its parts.
    ///
    /// `body` is the statement list without the surrounding braces:
    ///
    /// ```
    /// use exposed::FunctionValue;
    ///
    /// let f = FunctionValue::new("add", ["a", "b"], "return a + b;");
    /// assert_eq!(f.source.as_deref(), Some("function add(a, b) { return a + b; }"));
    ///
    /// let noop = FunctionValue::new("", Vec::<String>::new(), "");
    /// assert_eq!(noop.source.as_deref(), Some("function () {}"));
    /// ```
    pub fn new<I, S>(name: impl Into<String>, params: I, body: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let params: Vec<String> = params.into_iter().map(Into::into).collect();

        let body = body.trim();
        let block = if body.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", body)
        };
        let source = if name.is_empty() {
            format!("function ({}) {}", params.join(", "), block)
        } else {
            format!("function {}({}) {}", name, params.join(", "), block)
        };

        Self {
            name,
            params,
            source: Some(source),
        }
    }

    /// Wrap existing source text verbatim (arrow functions, methods, etc.).
    pub fn from_source<I, S>(name: impl Into<String>, params: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            source: Some(source.into()),
        }
    }

    /// A built-in function with no inspectable source.
    pub fn native(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            source: None,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Check if the function has no name
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Name used in messages (`anonymous` when unnamed)
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "anonymous"
        } else {
            &self.name
        }
    }

    /// Check if the function can not be recreated from source.
    ///
    /// True when there is no source at all, or when the source is the
    /// `{ [native code] }` stub engines print for built-ins.
    pub fn is_native(&self) -> bool {
        match &self.source {
            None => true,
            Some(source) => is_native_stub(source),
        }
    }

    /// The source text to emit, or `NativeFunction` if there is none.
    pub fn source_text(&self) -> Result<&str> {
        match &self.source {
            Some(source) if !is_native_stub(source) => Ok(source),
            _ => Err(ExposeError::NativeFunction {
                name: self.display_name().to_string(),
            }),
        }
    }
}

fn is_native_stub(source: &str) -> bool {
    source
        .trim_end()
        .strip_suffix('}')
        .and_then(|rest| rest.trim_end().strip_suffix("[native code]"))
        .map(|rest| rest.trim_end().ends_with('{'))
        .unwrap_or(false)
}
