//! Template locals and scope branding
//!
//! Hosts hand their templates a table of named locals. One slot, named by
//! [`ExposeConfig::local`](crate::ExposeConfig), holds the scope that will
//! be rendered; other slots hold plain values. Whether a slot holds a scope
//! is decided by its variant tag, never by the shape of what is stored.

use std::sync::Arc;

use crate::scope::{Scope, SharedScope};
use crate::value::Value;

/// A slot in a locals table.
#[derive(Debug, Clone)]
pub enum Local {
    /// A namespace store
    Scope(SharedScope),

    /// Any other template value
    Value(Value),
}

impl Local {
    /// The scope held by this slot, if it holds one
    pub fn as_scope(&self) -> Option<&SharedScope> {
        match self {
            Local::Scope(scope) => Some(scope),
            Local::Value(_) => None,
        }
    }

    /// The value held by this slot, if it is not a scope
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Local::Value(value) => Some(value),
            Local::Scope(_) => None,
        }
    }
}

impl From<SharedScope> for Local {
    fn from(scope: SharedScope) -> Self {
        Local::Scope(scope)
    }
}

impl From<Value> for Local {
    fn from(value: Value) -> Self {
        Local::Value(value)
    }
}

/// Check if `candidate` is a namespace store that can be chained to.
///
/// A plain value never qualifies, even an object whose members look like a
/// store's.
pub fn is_valid_scope(candidate: Option<&Local>) -> bool {
    matches!(candidate, Some(Local::Scope(_)))
}

/// Create a scope, chained to `parent` when it holds one.
///
/// Anything else (no slot, or a slot holding a plain value) yields a fresh
/// root scope.
pub fn create_scope(parent: Option<&Local>) -> SharedScope {
    match parent.and_then(Local::as_scope) {
        Some(parent) => Scope::child_of(parent).into_shared(),
        None => Scope::new().into_shared(),
    }
}

/// Check if two slots hold the same scope instance.
pub fn same_scope(a: &Local, b: &Local) -> bool {
    match (a, b) {
        (Local::Scope(a), Local::Scope(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}
