//! Namespace store: layered, overridable state to expose
//!
//! A [`Scope`] holds an ordered list of exposed namespaces and optionally
//! links to a parent scope. Rendering walks the chain from the root ancestor
//! down, letting entries of more specific scopes shadow ancestor entries at
//! the same path or underneath it. A scope never writes to its parent.
//!
//! ```text
//! ┌──────────────────────┐
//! │ default (app) scope  │  App.yui = {x: 1}
//! └──────────┬───────────┘
//!            │ parent
//! ┌──────────┴───────────┐
//! │ request scope        │  App.yui.seed = 42
//! └──────────────────────┘
//!            │ render()
//!            ↓
//!   root.App.yui = {"x":1};
//!   root.App.yui.seed = 42;
//! ```
//!
//! Parents are shared as [`SharedScope`] so the process-wide scope can keep
//! receiving writes after request scopes were chained to it. Concurrent
//! writers to one shared scope serialize on its lock; sibling request
//! scopes never contend.

mod entry;
mod render;

pub use entry::AddOptions;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::Result;
use crate::namespace::Namespace;
use crate::value::{type_name, Value};
use entry::Entry;

/// A scope shared between its owner and the child scopes chained to it.
pub type SharedScope = Arc<RwLock<Scope>>;

/// Acquire a read guard, recovering from a poisoned lock.
///
/// Scope mutations are single inserts/removals on an `IndexMap`, so a panic
/// while the lock was held can not leave the entries half-written.
pub fn read(scope: &SharedScope) -> RwLockReadGuard<'_, Scope> {
    scope.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from a poisoned lock.
pub fn write(scope: &SharedScope) -> RwLockWriteGuard<'_, Scope> {
    scope.write().unwrap_or_else(PoisonError::into_inner)
}

/// One layer of exposed state.
///
/// # Example
///
/// ```
/// use exposed::{AddOptions, Scope};
///
/// let app = Scope::new().into_shared();
/// exposed::scope::write(&app).add("App.yui", 1, AddOptions::default()).unwrap();
///
/// let mut request = Scope::child_of(&app);
/// request.add("App.user", "ada", AddOptions::default()).unwrap();
///
/// let js = request.render().unwrap();
/// assert!(js.contains("root.App.yui = 1;"));
/// assert!(js.contains("root.App.user = \"ada\";"));
/// ```
#[derive(Debug, Default)]
pub struct Scope {
    /// Own entries, in render order (re-added paths move to the end)
    entries: IndexMap<Namespace, Entry>,

    /// Less specific scope this one shadows
    parent: Option<SharedScope>,
}

impl Scope {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope chained to `parent`.
    ///
    /// Nothing is copied: the parent's entries, including ones it receives
    /// later, are resolved when rendering.
    pub fn child_of(parent: &SharedScope) -> Self {
        Self {
            entries: IndexMap::new(),
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Wrap this scope for sharing with child scopes.
    pub fn into_shared(self) -> SharedScope {
        Arc::new(RwLock::new(self))
    }

    /// The parent scope, if any
    pub fn parent(&self) -> Option<&SharedScope> {
        self.parent.as_ref()
    }

    /// Number of scopes above this one
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.parent.clone();
        while let Some(scope) = parent {
            depth += 1;
            parent = read(&scope).parent.clone();
        }
        depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Exposing Values
    // ═══════════════════════════════════════════════════════════════════

    /// Expose `value` at `path`.
    ///
    /// Existing entries at `path` or underneath it are dropped, since the new
    /// value replaces them wholesale. Entries at ancestor paths are kept. The
    /// new entry goes to the end of the render order, so the last `add` of a
    /// path wins.
    ///
    /// # Errors
    ///
    /// - `InvalidNamespace` if `path` is malformed
    /// - `NativeFunction` if `options.cache` is set and `value` holds a
    ///   function without source
    ///
    /// On error the scope is left unchanged.
    pub fn add(&mut self, path: &str, value: impl Into<Value>, options: AddOptions) -> Result<()> {
        let namespace = Namespace::parse(path)?;
        let entry = Entry::new(value.into(), options)?;

        let before = self.entries.len();
        self.entries
            .retain(|existing, _| !existing.is_covered_by(&namespace));
        let evicted = before - self.entries.len();

        debug!(
            namespace = %namespace,
            kind = type_name(&entry.value),
            cache = options.cache,
            evicted,
            "exposed value"
        );
        self.entries.insert(namespace, entry);
        Ok(())
    }

    /// Expose each top-level member of an object at its own key.
    ///
    /// Values other than objects have no keys to expose under and are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Stops at the first member that [`add`](Self::add) rejects; members
    /// before it stay exposed.
    pub fn add_all(&mut self, value: &Value, options: AddOptions) -> Result<()> {
        match value.as_object() {
            Some(map) => {
                for (key, member) in map.iter() {
                    self.add(key, member.clone(), options)?;
                }
                Ok(())
            }
            None => {
                trace!(kind = type_name(value), "ignored value exposed without namespace");
                Ok(())
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up the live value exposed at exactly `path`, searching this
    /// scope and then its ancestors.
    pub fn get(&self, path: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(path) {
            return Some(entry.value.clone());
        }
        let parent = self.parent.as_ref()?;
        read(parent).get(path)
    }

    /// Get a mutable reference to a value this scope exposes itself.
    ///
    /// Mutations show up in the next render unless the entry was added with
    /// `cache`.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        self.entries.get_mut(path).map(|entry| &mut entry.value)
    }

    /// Check if `path` is exposed by this scope or an ancestor.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Check if `path` is exposed by this scope itself.
    pub fn contains_own(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// This scope's own namespaces, in render order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.entries.keys()
    }

    /// Number of own entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this scope exposes nothing itself
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
