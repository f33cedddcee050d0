//! Chain resolution and script rendering

use std::collections::HashSet;

use tracing::debug;

use super::{read, Entry, Scope};
use crate::error::Result;
use crate::namespace::{covers, Namespace};

/// Name of the wrapper function's parameter bound to the global object.
const ROOT: &str = "root";

impl Scope {
    /// Own entries as an owned snapshot (values are Arc-backed, so cheap).
    fn snapshot(&self) -> Vec<(Namespace, Entry)> {
        self.entries
            .iter()
            .map(|(ns, entry)| (ns.clone(), entry.clone()))
            .collect()
    }

    /// Snapshots of every scope in the chain, this scope first.
    fn layers(&self) -> Vec<Vec<(Namespace, Entry)>> {
        let mut layers = vec![self.snapshot()];
        let mut parent = self.parent.clone();
        while let Some(scope) = parent {
            let guard = read(&scope);
            layers.push(guard.snapshot());
            parent = guard.parent.clone();
        }
        layers
    }

    /// Entries that reach the rendered output, in render order.
    ///
    /// An ancestor's entry is dropped when a more specific scope exposes the
    /// same path or one of its ancestors. Survivors are ordered by scope,
    /// root ancestor first, and by insertion within a scope. Each survivor is
    /// the nearest owner of its path, so its own cached text (or live value)
    /// is what renders.
    fn resolve(&self) -> Vec<(Namespace, Entry)> {
        let mut claimed: Vec<Namespace> = Vec::new();
        let mut kept_layers = Vec::new();

        for layer in self.layers() {
            let kept: Vec<_> = layer
                .iter()
                .filter(|(ns, _)| !claimed.iter().any(|c| ns.is_covered_by(c)))
                .cloned()
                .collect();
            claimed.extend(layer.into_iter().map(|(ns, _)| ns));
            kept_layers.push(kept);
        }

        kept_layers.into_iter().rev().flatten().collect()
    }

    /// Namespaces that reach the rendered output, in render order.
    pub fn applicable_namespaces(&self) -> Vec<Namespace> {
        self.resolve().into_iter().map(|(ns, _)| ns).collect()
    }

    /// Render the exposed state as a self-executing script fragment.
    ///
    /// The fragment binds the global object to `root`, creates intermediate
    /// namespace objects that do not exist yet, then assigns each applicable
    /// value:
    ///
    /// ```text
    /// (function (root) {
    /// // -- Namespaces --
    /// root.App || (root.App = {});
    ///
    /// // -- Data --
    /// root.App.yui = {"x":1};
    /// root.App.yui.seed || (root.App.yui.seed = {});
    /// root.App.yui.seed.value = 42;
    /// }(this));
    /// ```
    ///
    /// Intermediates that no entry assigns are hoisted into the namespaces
    /// section. An intermediate underneath an assigned path is created right
    /// before its first use, after the assignment that would replace it.
    /// Each intermediate is created at most once.
    ///
    /// # Errors
    ///
    /// Returns `NativeFunction` if a live value holds a function without
    /// source. No partial output is produced.
    pub fn render(&self) -> Result<String> {
        let applicable = self.resolve();

        let assigned = |path: &str| applicable.iter().any(|(ns, _)| covers(ns.as_str(), path));

        let mut created: HashSet<&str> = HashSet::new();
        let mut namespaces = Vec::new();
        for (ns, _) in &applicable {
            for part in ns.intermediates() {
                if !assigned(part) && created.insert(part) {
                    namespaces.push(ensure(part));
                }
            }
        }
        let hoisted = namespaces.len();

        let mut inline = 0;
        let mut data = Vec::with_capacity(applicable.len());
        for (ns, entry) in &applicable {
            for part in ns.intermediates() {
                if created.insert(part) {
                    data.push(ensure(part));
                    inline += 1;
                }
            }
            data.push(format!("{}.{} = {};", ROOT, ns, entry.render()?));
            // Descendants assign into this value instead of a fresh object.
            created.insert(ns.as_str());
        }

        debug!(
            namespaces = applicable.len(),
            hoisted,
            inline,
            "rendered scope"
        );

        let header = format!("(function ({}) {{", ROOT);
        let namespaces = namespaces.join("\n");
        let data = data.join("\n");
        Ok([
            "",
            header.as_str(),
            "// -- Namespaces --",
            namespaces.as_str(),
            "",
            "// -- Data --",
            data.as_str(),
            "}(this));",
            "",
        ]
        .join("\n"))
    }
}

/// `root.a.b || (root.a.b = {});`
fn ensure(path: &str) -> String {
    format!("{root}.{path} || ({root}.{path} = {{}});", root = ROOT, path = path)
}
