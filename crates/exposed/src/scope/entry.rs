//! A single exposed value and its per-entry options

use std::sync::Arc;

use crate::error::Result;
use crate::serialize::{serialize, SerializeOptions};
use crate::value::Value;

/// Options accepted by [`Scope::add`](super::Scope::add).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Serialize the value now and reuse that text on every render.
    ///
    /// Later in-place mutation of the value is then not reflected in the
    /// rendered output.
    pub cache: bool,

    /// The value holds plain data only (see [`SerializeOptions::is_json`]).
    pub is_json: bool,
}

impl AddOptions {
    /// Options with `cache` set
    pub fn cached() -> Self {
        Self {
            cache: true,
            ..Default::default()
        }
    }

    /// Options with `is_json` set
    pub fn json() -> Self {
        Self {
            is_json: true,
            ..Default::default()
        }
    }

    /// Set the `cache` flag (builder pattern)
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Set the `is_json` flag (builder pattern)
    pub fn with_json(mut self, is_json: bool) -> Self {
        self.is_json = is_json;
        self
    }

    pub(crate) fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            is_json: self.is_json,
        }
    }
}

/// An exposed value owned by one scope.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) value: Value,
    pub(crate) options: AddOptions,
    /// Text frozen at `add` time when `options.cache` is set
    pub(crate) serialized: Option<Arc<str>>,
}

impl Entry {
    /// Build an entry, serializing right away for cached options.
    pub(crate) fn new(value: Value, options: AddOptions) -> Result<Self> {
        let serialized = if options.cache {
            Some(Arc::from(serialize(&value, options.serialize_options())?))
        } else {
            None
        };
        Ok(Self {
            value,
            options,
            serialized,
        })
    }

    /// Cached text, or a fresh serialization of the live value.
    pub(crate) fn render(&self) -> Result<String> {
        match &self.serialized {
            Some(text) => Ok(text.to_string()),
            None => serialize(&self.value, self.options.serialize_options()),
        }
    }
}
