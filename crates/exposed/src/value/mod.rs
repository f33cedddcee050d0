//! Value representation for exposed state

mod callable;
mod display;
mod impls;
mod pattern;

pub use callable::FunctionValue;
pub use impls::type_name;
pub use pattern::PatternValue;

use indexmap::IndexMap;
use std::sync::Arc;

/// Insertion-ordered, string-keyed map backing object values.
pub type ObjectMap = IndexMap<String, Value>;

/// A value that can be exposed to the client.
///
/// Variants mirror what a JavaScript literal can express:
/// - Primitives: `undefined`, `null`, booleans, numbers, strings
/// - Aggregates: arrays and string-keyed objects (Arc-wrapped, copy-on-write)
/// - Code: functions carrying their source text, and regular-expression patterns
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// Absent value, rendered as `undefined`
    Undefined,

    /// The `null` literal
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Double-precision number (the only numeric type on the client)
    Number(f64),

    /// Heap-allocated string
    String(Arc<String>),

    // ═══════════════════════════════════════════════════════════════════
    // Aggregates
    // ═══════════════════════════════════════════════════════════════════
    /// Ordered list
    Array(Arc<Vec<Value>>),

    /// Mapping with string keys, in insertion order
    Object(Arc<ObjectMap>),

    // ═══════════════════════════════════════════════════════════════════
    // Code
    // ═══════════════════════════════════════════════════════════════════
    /// Function with display name, parameters and source text
    Function(Arc<FunctionValue>),

    /// Regular-expression pattern (source + flags)
    Pattern(Arc<PatternValue>),
}
