//! Host-facing expose API: app-wide and per-request state
//!
//! An [`App`] holds the process-wide locals table; the scope in its configured
//! slot is the default scope every request inherits from. A [`RequestState`]
//! holds one request's locals and lazily creates its own scope, chained to the
//! app's scope in the same slot.
//!
//! ```text
//! App.locals["state"]      ──parent──┐
//!                                     │
//! RequestState.locals["state"] ───────┘  render() → script fragment
//! ```

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use indexmap::IndexMap;
use tracing::debug;

use crate::config::{ExposeConfig, ExposeOverrides};
use crate::error::Result;
use crate::locals::{create_scope, Local};
use crate::namespace::covers;
use crate::scope::{read, write, AddOptions, Scope, SharedScope};
use crate::value::Value;

/// Prefix marking a namespace as absolute (no root namespace applied).
const ABSOLUTE_PREFIX: &str = "window.";

/// Per-call options for `expose`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposeOptions {
    /// Locals slot to expose into, instead of the configured one
    pub local: Option<String>,

    /// Options passed through to [`Scope::add`]
    pub add: AddOptions,
}

impl ExposeOptions {
    /// Expose into `local` (builder pattern)
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }

    /// Freeze the serialized value at expose time (builder pattern)
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.add.cache = cache;
        self
    }

    /// Mark the value as plain JSON data (builder pattern)
    pub fn with_json(mut self, is_json: bool) -> Self {
        self.add.is_json = is_json;
        self
    }
}

/// Resolve the namespace a value is exposed at.
///
/// - `window.`-prefixed namespaces are absolute: the prefix is stripped and
///   the root namespace is not applied.
/// - Namespaces not already under `root` are prefixed with it.
/// - Without a namespace the root namespace itself is used.
/// - `None` means neither was given: the value's own keys become namespaces.
///
/// ```
/// use exposed::resolve_namespace;
///
/// assert_eq!(resolve_namespace(Some("data"), Some("App")).as_deref(), Some("App.data"));
/// assert_eq!(resolve_namespace(Some("App.data"), Some("App")).as_deref(), Some("App.data"));
/// assert_eq!(resolve_namespace(Some("window.data"), Some("App")).as_deref(), Some("data"));
/// assert_eq!(resolve_namespace(None, Some("App")).as_deref(), Some("App"));
/// assert_eq!(resolve_namespace(None, None), None);
/// ```
pub fn resolve_namespace(namespace: Option<&str>, root: Option<&str>) -> Option<String> {
    let root = root.filter(|r| !r.is_empty());
    let namespace = match namespace.filter(|ns| !ns.is_empty()) {
        Some(namespace) => namespace,
        None => return root.map(str::to_string),
    };

    if let Some(absolute) = namespace.strip_prefix(ABSOLUTE_PREFIX) {
        if !absolute.is_empty() {
            return Some(absolute.to_string());
        }
    }

    match root {
        Some(root) if !covers(root, namespace) => Some(format!("{}.{}", root, namespace)),
        _ => Some(namespace.to_string()),
    }
}

/// Expose into `scope`, resolving the namespace against `root`.
fn expose_into(
    scope: &SharedScope,
    value: Value,
    namespace: Option<&str>,
    root: Option<&str>,
    options: AddOptions,
) -> Result<()> {
    match resolve_namespace(namespace, root) {
        Some(resolved) => write(scope).add(&resolved, value, options),
        None => write(scope).add_all(&value, options),
    }
}

fn render_slot(slot: Option<&Local>) -> Result<String> {
    match slot.and_then(Local::as_scope) {
        Some(scope) => read(scope).render(),
        None => Scope::new().render(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// App (process-wide)
// ═══════════════════════════════════════════════════════════════════════

/// Process-wide exposed state and settings.
///
/// Safe to share between request threads: the locals table is concurrent and
/// each scope sits behind its own lock.
#[derive(Debug, Default)]
pub struct App {
    config: ExposeConfig,
    locals: DashMap<String, Local>,
}

impl App {
    /// Create an app with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an app with explicit settings.
    pub fn with_config(config: ExposeConfig) -> Self {
        Self {
            config,
            locals: DashMap::new(),
        }
    }

    /// Create an app whose settings override the defaults where given.
    pub fn with_settings(settings: &ExposeOverrides) -> Self {
        Self::with_config(ExposeConfig::default().merged(settings))
    }

    /// The process-wide app, created on first use and never torn down.
    pub fn global() -> &'static App {
        static GLOBAL: OnceLock<App> = OnceLock::new();
        GLOBAL.get_or_init(App::new)
    }

    /// This app's settings
    pub fn config(&self) -> &ExposeConfig {
        &self.config
    }

    /// The app-wide locals table
    pub fn locals(&self) -> &DashMap<String, Local> {
        &self.locals
    }

    /// Put a plain template value (or a scope) into a locals slot.
    pub fn set_local(&self, name: impl Into<String>, local: impl Into<Local>) {
        self.locals.insert(name.into(), local.into());
    }

    /// The scope in slot `local`, created when the slot is empty or holds a
    /// plain value.
    pub fn scope(&self, local: &str) -> SharedScope {
        let mut slot = self
            .locals
            .entry(local.to_string())
            .or_insert_with(|| Local::Scope(Scope::new().into_shared()));
        if let Some(scope) = slot.as_scope() {
            return Arc::clone(scope);
        }
        let scope = Scope::new().into_shared();
        *slot = Local::Scope(Arc::clone(&scope));
        scope
    }

    /// The default scope: the one in this app's configured slot.
    pub fn default_scope(&self) -> SharedScope {
        self.scope(&self.config.local)
    }

    /// Expose `value` app-wide, visible to every request.
    ///
    /// # Errors
    ///
    /// Propagates [`Scope::add`] errors for the resolved namespace.
    pub fn expose(
        &self,
        value: impl Into<Value>,
        namespace: Option<&str>,
        options: &ExposeOptions,
    ) -> Result<()> {
        let local = options.local.as_deref().unwrap_or(&self.config.local);
        debug!(local, namespace, "exposing app-wide");
        let scope = self.scope(local);
        expose_into(
            &scope,
            value.into(),
            namespace,
            self.config.namespace.as_deref(),
            options.add,
        )
    }

    /// Render the app-wide scope in slot `local` (the configured slot when
    /// `None`).
    pub fn render(&self, local: Option<&str>) -> Result<String> {
        let local = local.unwrap_or(&self.config.local);
        let slot = self.locals.get(local);
        render_slot(slot.as_deref())
    }

    /// Start per-request state on top of this app.
    pub fn request(&self) -> RequestState<'_> {
        RequestState::new(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RequestState (per request)
// ═══════════════════════════════════════════════════════════════════════

/// One request's locals, layered on an [`App`].
///
/// Dropped when the request ends; nothing it exposes reaches the app.
#[derive(Debug)]
pub struct RequestState<'a> {
    app: &'a App,
    locals: IndexMap<String, Local>,
}

impl<'a> RequestState<'a> {
    /// Create empty request state for `app`.
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            locals: IndexMap::new(),
        }
    }

    /// The request's locals table
    pub fn locals(&self) -> &IndexMap<String, Local> {
        &self.locals
    }

    /// Put a plain template value (or a scope) into a locals slot.
    pub fn set_local(&mut self, name: impl Into<String>, local: impl Into<Local>) {
        self.locals.insert(name.into(), local.into());
    }

    /// The request scope in slot `local`.
    ///
    /// Created on first use, chained to the app's scope in the same slot. An
    /// empty app slot gets a scope first, so later app-wide exposure still
    /// reaches this request; an app slot holding a plain value is not a
    /// parent. A request slot holding a plain value is replaced.
    pub fn scope(&mut self, local: &str) -> SharedScope {
        if let Some(scope) = self.locals.get(local).and_then(Local::as_scope) {
            return Arc::clone(scope);
        }
        let parent = match self.app.locals.get(local) {
            Some(slot) => slot.value().clone(),
            None => Local::Scope(self.app.scope(local)),
        };
        let scope = create_scope(Some(&parent));

        self.locals
            .insert(local.to_string(), Local::Scope(Arc::clone(&scope)));
        scope
    }

    /// Expose `value` for this request only.
    ///
    /// # Errors
    ///
    /// Propagates [`Scope::add`] errors for the resolved namespace.
    pub fn expose(
        &mut self,
        value: impl Into<Value>,
        namespace: Option<&str>,
        options: &ExposeOptions,
    ) -> Result<()> {
        let app = self.app;
        let local = options.local.as_deref().unwrap_or(&app.config.local);
        debug!(local, namespace, "exposing for request");
        let scope = self.scope(local);
        expose_into(
            &scope,
            value.into(),
            namespace,
            app.config.namespace.as_deref(),
            options.add,
        )
    }

    /// Render the script fragment for slot `local` (the configured slot when
    /// `None`).
    ///
    /// Falls back to the app's scope when this request never exposed into the
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns `NativeFunction` if a live value holds a function without
    /// source.
    pub fn render(&self, local: Option<&str>) -> Result<String> {
        let local = local.unwrap_or(&self.app.config.local);
        match self.locals.get(local) {
            Some(slot) if slot.as_scope().is_some() => render_slot(Some(slot)),
            _ => self.app.render(Some(local)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefix_respects_segments() {
        assert_eq!(
            resolve_namespace(Some("Apple"), Some("App")).as_deref(),
            Some("App.Apple")
        );
    }

    #[test]
    fn test_resolve_bare_window_is_relative() {
        assert_eq!(
            resolve_namespace(Some("window."), None).as_deref(),
            Some("window.")
        );
    }

    #[test]
    fn test_resolve_without_root() {
        assert_eq!(resolve_namespace(Some("foo"), None).as_deref(), Some("foo"));
        assert_eq!(resolve_namespace(Some(""), None), None);
    }

    #[test]
    fn test_app_scope_replaces_plain_value_slot() {
        let app = App::new();
        app.set_local("state", Value::from("not a scope"));
        let scope = app.scope("state");
        assert!(app
            .locals()
            .get("state")
            .and_then(|slot| slot.as_scope().map(|s| Arc::ptr_eq(s, &scope)))
            .unwrap_or(false));
    }

    #[test]
    fn test_app_scope_is_stable() {
        let app = App::new();
        assert!(Arc::ptr_eq(&app.scope("state"), &app.scope("state")));
        assert!(Arc::ptr_eq(&app.default_scope(), &app.scope("state")));
    }

    #[test]
    fn test_global_app_is_process_wide() {
        assert!(std::ptr::eq(App::global(), App::global()));
    }

    #[test]
    fn test_request_scope_chains_to_app_scope() {
        let app = App::new();
        let app_scope = app.scope("state");
        let mut request = app.request();
        let scope = request.scope("state");

        let parent = read(&scope).parent().cloned();
        assert!(parent.map(|p| Arc::ptr_eq(&p, &app_scope)).unwrap_or(false));
    }
}
