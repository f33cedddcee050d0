//! # Exposed
//!
//! Server-side state, rendered as a self-contained script fragment that
//! recreates it on the client.
//!
//! While handling a request, code exposes values at dotted namespaces
//! (`"App.user"`). When the page is built, the accumulated state renders to
//! JavaScript that installs each value on the client's global object:
//!
//! ```
//! use exposed::{App, ExposeOptions, FunctionValue, Value};
//!
//! let app = App::new();
//! app.expose(Value::empty_object().with_field("env", "prod"), Some("App.config"), &ExposeOptions::default())
//!     .unwrap();
//!
//! let mut request = app.request();
//! request
//!     .expose(FunctionValue::new("", ["n"], "return n * 2;"), Some("App.double"), &ExposeOptions::default())
//!     .unwrap();
//!
//! let script = request.render(None).unwrap();
//! assert!(script.contains("root.App.config = {\"env\":\"prod\"};"));
//! assert!(script.contains("root.App.double = function (n) { return n * 2; };"));
//! ```
//!
//! ## Architecture
//!
//! - **Serializer** ([`serialize()`]): value → literal source text, escaped for
//!   embedding in a `<script>` element
//! - **Namespace store** ([`Scope`]): ordered namespaces with parent/child
//!   shadowing, rendered to a script fragment
//! - **Expose API** ([`App`], [`RequestState`]): process-wide and per-request
//!   scopes, namespace prefixing and locals naming

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod expose;
pub mod locals;
pub mod namespace;
pub mod scope;
pub mod serialize;
pub mod value;

// Re-export main types
pub use config::{ExposeConfig, ExposeOverrides};
pub use error::{ExposeError, Result};
pub use expose::{resolve_namespace, App, ExposeOptions, RequestState};
pub use locals::{create_scope, is_valid_scope, Local};
pub use namespace::Namespace;
pub use scope::{AddOptions, Scope, SharedScope};
pub use serialize::{serialize, SerializeOptions};
pub use value::{FunctionValue, ObjectMap, PatternValue, Value};

/// Exposed version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
