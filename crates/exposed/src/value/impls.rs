//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create an array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    /// Create an object value
    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Arc::new(map))
    }

    /// Create an empty object value
    pub fn empty_object() -> Self {
        Value::Object(Arc::new(ObjectMap::new()))
    }

    /// Create a function value
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(Arc::new(f))
    }

    /// Create a pattern value
    pub fn pattern(p: PatternValue) -> Self {
        Value::Pattern(Arc::new(p))
    }

    /// Add a field (builder pattern). Non-object values are returned unchanged.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Check if value is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an array or object
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Check if value is a function
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Check if value contains no functions or patterns at any depth.
    pub fn is_json_safe(&self) -> bool {
        match self {
            Value::Function(_) | Value::Pattern(_) => false,
            Value::Array(items) => items.iter().all(Value::is_json_safe),
            Value::Object(map) => map.values().all(Value::is_json_safe),
            _ => true,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract array items
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Extract object map
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    /// Look up an object member
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    // ═══════════════════════════════════════════════════════════════════
    // In-place Mutation (copy-on-write)
    // ═══════════════════════════════════════════════════════════════════
    /// Set an object member, returning the previous value.
    ///
    /// Does nothing on non-object values.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self {
            Value::Object(map) => Arc::make_mut(map).insert(key.into(), value.into()),
            _ => None,
        }
    }

    /// Get a mutable reference to an object member
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => Arc::make_mut(map).get_mut(key),
            _ => None,
        }
    }

    /// Append to an array. Does nothing on non-array values.
    pub fn push(&mut self, value: impl Into<Value>) {
        if let Value::Array(items) = self {
            Arc::make_mut(items).push(value.into());
        }
    }
}

/// Get a human-readable type name for a value (for messages and logs).
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Function(_) => "function",
        Value::Pattern(_) => "regexp",
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a == b,
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<ObjectMap> for Value {
    fn from(map: ObjectMap) -> Self {
        Value::object(map)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::function(f)
    }
}

impl From<PatternValue> for Value {
    fn from(p: PatternValue) -> Self {
        Value::pattern(p)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::string(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_constructor() {
        let v = Value::string("hello");
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_is_json_safe() {
        let data = Value::from(json!({"a": [1, 2, {"b": null}]}));
        assert!(data.is_json_safe());

        let f = FunctionValue::new("f", Vec::<String>::new(), "");
        let mixed = Value::empty_object().with_field("f", f);
        assert!(!mixed.is_json_safe());
    }

    #[test]
    fn test_insert_is_copy_on_write() {
        let original = Value::empty_object().with_field("bar", "bar");
        let mut copy = original.clone();
        copy.insert("bar", "BAR");

        assert_eq!(original.get("bar"), Some(&Value::from("bar")));
        assert_eq!(copy.get("bar"), Some(&Value::from("BAR")));
    }

    #[test]
    fn test_insert_on_non_object_is_noop() {
        let mut v = Value::from(1);
        assert_eq!(v.insert("a", 2), None);
        assert_eq!(v, Value::Number(1.0));
    }

    #[test]
    fn test_push() {
        let mut v = Value::from(vec![1, 2]);
        v.push(3);
        assert_eq!(v.as_array().map(|items| items.len()), Some(3));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(1)), Value::Number(1.0));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_from_unit_is_undefined() {
        let v: Value = ().into();
        assert!(v.is_undefined());
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let v = Value::from(json!({"z": 1, "a": 2}));
        let keys: Vec<&str> = v
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_from_iterator_builds_object() {
        let v: Value = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(v.get("b"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&Value::Undefined), "undefined");
        assert_eq!(type_name(&Value::empty_object()), "object");
        assert_eq!(
            type_name(&Value::pattern(PatternValue::new("a", "").unwrap())),
            "regexp"
        );
    }

    #[test]
    fn test_partialeq_across_variants() {
        assert_ne!(Value::Null, Value::Undefined);
        assert_ne!(Value::from(0), Value::from(false));
        assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1, 2]));
    }
}
