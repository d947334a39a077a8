//! ctxscope Scope Views
//!
//! Nested variable scopes for template rendering, without copying or merging
//! objects.
//!
//! # Overview
//!
//! - **ScopeView**: wraps a target object; resolves keys through a contextual
//!   overlay, the target, then the parent chain
//! - **Parent**: absent, plain value, or another view
//! - **Value / Object / Array**: the dynamic data model views read and write
//! - **AssignOp**: compound assignment built from one read and one write
//! - **ScopeConfig**: reserved accessor names and the local-variable prefix
//!
//! # Example
//!
//! ```rust
//! use ctx_scope::{Object, ScopeView, Value};
//!
//! let page = Object::from_entries([("index", "outer"), ("title", "Report")]);
//! let outer = ScopeView::new(page).unwrap();
//!
//! // Loop body: `$index` is local to the iteration
//! let row = outer.child(Object::from_entries([("name", "row")])).unwrap();
//! row.set("$index", 3).unwrap();
//!
//! assert_eq!(row.get("$index"), Value::from(3));
//! assert_eq!(row.get("index"), Value::from("outer"));
//! assert_eq!(row.get("title"), Value::from("Report"));
//! assert!(!outer.has("$index"));
//!
//! // `$this` and `$parent` are read-only
//! assert!(row.set("$parent", 1).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod array;
mod config;
mod error;
mod object;
mod ops;
mod parent;
mod value;
mod view;

// Re-exports
pub use array::{Array, LENGTH_KEY};
pub use config::{Reserved, ScopeConfig};
pub use error::{ConfigError, Result, ScopeError};
pub use object::Object;
pub use ops::AssignOp;
pub use parent::Parent;
pub use value::Value;
pub use view::{create_view, ScopeView, ScopeViewBuilder};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for scope view operations
    pub use crate::{
        create_view, Array, AssignOp, Object, Parent, ScopeConfig, ScopeError, ScopeView, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
