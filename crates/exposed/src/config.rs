//! Expose configuration

use serde::Deserialize;

/// Locals slot used when none is configured.
pub const DEFAULT_LOCAL: &str = "state";

/// Settings for where exposed state lives.
///
/// Hosts usually load this from their own configuration:
///
/// ```
/// use exposed::ExposeConfig;
///
/// let config: ExposeConfig = serde_json::from_str(r#"{"namespace": "App"}"#).unwrap();
/// assert_eq!(config.namespace.as_deref(), Some("App"));
/// assert_eq!(config.local, "state");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExposeConfig {
    /// Root namespace prefixed to every exposed path that lacks it
    pub namespace: Option<String>,

    /// Name of the locals slot holding the scope
    pub local: String,
}

impl Default for ExposeConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            local: DEFAULT_LOCAL.to_string(),
        }
    }
}

impl ExposeConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root namespace (builder pattern)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the locals slot name (builder pattern)
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = local.into();
        self
    }

    /// Layer `overrides` on top of this configuration: fields set there win.
    pub fn merged(&self, overrides: &ExposeOverrides) -> ExposeConfig {
        ExposeConfig {
            namespace: overrides
                .namespace
                .clone()
                .or_else(|| self.namespace.clone()),
            local: overrides.local.clone().unwrap_or_else(|| self.local.clone()),
        }
    }
}

/// Partial settings, for app-level settings and per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExposeOverrides {
    /// Root namespace override
    pub namespace: Option<String>,

    /// Locals slot override
    pub local: Option<String>,
}

impl ExposeOverrides {
    /// Override the root namespace (builder pattern)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Override the locals slot (builder pattern)
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }
}
