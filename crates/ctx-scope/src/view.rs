//! Scope views
//!
//! A [`ScopeView`] wraps a target object and resolves keys through three
//! tiers: its own contextual overlay, then the target, then the parent chain.
//! Reserved accessors (`$this`, `$parent`, `$parents`, `$contextual`) are
//! intercepted before any tier is consulted.
//!
//! # Resolution
//!
//! | Operation | Overlay        | Target          | Parent                         |
//! |-----------|----------------|-----------------|--------------------------------|
//! | `get`     | own keys       | own + inherited | delegated read                 |
//! | `has`     | own keys       | own + inherited | delegated presence test        |
//! | `set`     | existing keys, new local keys | existing keys, new plain keys | existing keys only |
//!
//! Writes never create keys on an ancestor, and never touch an ancestor's
//! overlay unless the key already lives there.

use crate::array::Array;
use crate::config::{Reserved, ScopeConfig};
use crate::error::{Result, ScopeError};
use crate::object::Object;
use crate::ops::AssignOp;
use crate::parent::Parent;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Layered view over a target object
///
/// Cloning is cheap and yields a handle to the same view.
///
/// # Example
/// ```
/// use ctx_scope::{Object, ScopeView, Value};
///
/// let outer = ScopeView::new(Object::from_entries([("title", "Inbox")])).unwrap();
/// let row = outer
///     .child_with_contextual(
///         Object::from_entries([("subject", "hello")]),
///         Object::from_entries([("$index", 0)]),
///     )
///     .unwrap();
///
/// assert_eq!(row.get("subject"), Value::from("hello"));
/// assert_eq!(row.get("title"), Value::from("Inbox"));
/// assert_eq!(row.get("$index"), Value::from(0));
/// assert!(!outer.has("$index"));
/// ```
#[derive(Clone)]
pub struct ScopeView(Arc<ViewInner>);

struct ViewInner {
    target: Target,
    parent: Parent,
    contextual: Object,
    config: Arc<ScopeConfig>,
}

/// Non-primitive value a view can wrap
#[derive(Clone)]
enum Target {
    Object(Object),
    Array(Array),
    View(ScopeView),
}

impl Target {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::Object(object)),
            Value::Array(array) => Ok(Self::Array(array)),
            Value::View(view) => Ok(Self::View(view)),
            other => Err(ScopeError::InvalidTarget {
                kind: other.type_name(),
            }),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Object(object) => Value::Object(object.clone()),
            Self::Array(array) => Value::Array(array.clone()),
            Self::View(view) => Value::View(view.clone()),
        }
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Self::Object(object) => object.get(key),
            Self::Array(array) => array.get(key),
            Self::View(view) => view.has(key).then(|| view.get(key)),
        }
    }

    fn contains(&self, key: &str) -> bool {
        match self {
            Self::Object(object) => object.has(key),
            Self::Array(array) => array.has(key),
            Self::View(view) => view.has(key),
        }
    }

    fn assign(&self, key: &str, value: Value) -> Result<()> {
        match self {
            Self::Object(object) => {
                object.set(key, value);
                Ok(())
            }
            Self::Array(array) => array
                .set(key, value)
                .map_err(|reason| ScopeError::not_assignable(key, reason)),
            Self::View(view) => view.set(key, value),
        }
    }
}

impl ScopeView {
    /// Wrap `target` with no parent and an empty overlay
    ///
    /// # Errors
    /// Returns [`ScopeError::InvalidTarget`] if `target` is a primitive.
    pub fn new(target: impl Into<Value>) -> Result<Self> {
        Self::builder(target).build()
    }

    /// Start building a view over `target`
    #[must_use]
    pub fn builder(target: impl Into<Value>) -> ScopeViewBuilder {
        ScopeViewBuilder::new(target)
    }

    /// Create a child view of this one, sharing its configuration
    ///
    /// # Errors
    /// Returns [`ScopeError::InvalidTarget`] if `target` is a primitive.
    pub fn child(&self, target: impl Into<Value>) -> Result<Self> {
        self.child_builder(target).build()
    }

    /// Create a child view with pre-populated contextual variables
    ///
    /// # Errors
    /// Returns [`ScopeError::InvalidTarget`] if `target` is a primitive.
    pub fn child_with_contextual(&self, target: impl Into<Value>, contextual: Object) -> Result<Self> {
        self.child_builder(target).contextual(contextual).build()
    }

    fn child_builder(&self, target: impl Into<Value>) -> ScopeViewBuilder {
        ScopeViewBuilder::new(target)
            .parent(self)
            .shared_config(Arc::clone(&self.0.config))
    }

    /// The wrapped target, not re-wrapped
    #[must_use]
    pub fn target(&self) -> Value {
        self.0.target.to_value()
    }

    /// Direct parent link
    #[inline]
    #[must_use]
    pub fn parent(&self) -> &Parent {
        &self.0.parent
    }

    /// This view's own contextual overlay
    #[inline]
    #[must_use]
    pub fn contextual(&self) -> &Object {
        &self.0.contextual
    }

    /// Configuration in effect for this view
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScopeConfig {
        &self.0.config
    }

    /// Ancestors, nearest first
    ///
    /// Chained parents contribute their own ancestors; a plain parent ends
    /// the list.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Parent> {
        self.0.parent.chain()
    }

    /// Number of ancestors
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Check if both handles refer to the same view
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &ScopeView) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Resolve `key`
    ///
    /// Reserved accessors first, then the overlay, the target and finally the
    /// parent chain. Missing keys read as [`Value::Undefined`].
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        if let Some(reserved) = self.0.config.reserved(key) {
            return self.reserved_value(reserved);
        }
        if let Some(value) = self.0.contextual.get_own(key) {
            tracing::trace!("Resolved '{}' from contextual overlay", key);
            return value;
        }
        if let Some(value) = self.0.target.lookup(key) {
            tracing::trace!("Resolved '{}' from target", key);
            return value;
        }
        tracing::trace!("Delegating read of '{}' to parent", key);
        self.0.parent.get(key)
    }

    fn reserved_value(&self, reserved: Reserved) -> Value {
        match reserved {
            Reserved::This => self.target(),
            Reserved::Parent => self.0.parent.to_value(),
            Reserved::Parents => Value::Array(
                self.ancestors().iter().map(Parent::to_value).collect(),
            ),
            Reserved::Contextual => Value::Object(self.0.contextual.clone()),
        }
    }

    /// Presence test mirroring [`get`](Self::get)
    ///
    /// The parent accessor is present only when the parent is truthy; the
    /// other reserved accessors are always present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        match self.0.config.reserved(key) {
            Some(Reserved::Parent) => self.0.parent.is_truthy(),
            Some(Reserved::This | Reserved::Parents | Reserved::Contextual) => true,
            None => {
                self.0.contextual.has_own(key)
                    || self.0.target.contains(key)
                    || self.0.parent.has(key)
            }
        }
    }

    /// Assign `value` to `key`
    ///
    /// 1. Existing overlay key: overwrite in the overlay
    /// 2. Existing target key: overwrite on the target
    /// 3. Local-prefixed key: create in this view's overlay
    /// 4. Key visible through the parent: delegate to the parent
    /// 5. Otherwise: create on the target
    ///
    /// # Errors
    /// Returns [`ScopeError::ReservedAssignment`] for reserved accessors and
    /// [`ScopeError::NotAssignable`] when the owning object refuses the key.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if self.0.config.reserved(key).is_some() {
            tracing::debug!("Rejected assignment to reserved accessor '{}'", key);
            return Err(ScopeError::reserved(key));
        }
        if self.0.contextual.has_own(key) {
            tracing::trace!("Assigning '{}' in contextual overlay", key);
            self.0.contextual.set(key, value);
            return Ok(());
        }
        if self.0.target.contains(key) {
            tracing::trace!("Assigning existing '{}' on target", key);
            return self.0.target.assign(key, value);
        }
        if self.0.config.is_local(key) {
            tracing::trace!("Creating local '{}' in contextual overlay", key);
            self.0.contextual.set(key, value);
            return Ok(());
        }
        if self.0.parent.has(key) {
            tracing::trace!("Delegating assignment of '{}' to parent", key);
            return self.0.parent.set(key, value);
        }
        tracing::trace!("Creating '{}' on target", key);
        self.0.target.assign(key, value)
    }

    /// Compound assignment: one [`get`](Self::get), then at most one [`set`](Self::set)
    ///
    /// Returns the value of the expression, which for logical operators that
    /// skip the write is the current value.
    ///
    /// # Errors
    /// Same as [`set`](Self::set).
    pub fn assign_op(&self, key: &str, op: AssignOp, rhs: impl Into<Value>) -> Result<Value> {
        let current = self.get(key);
        if !op.writes(&current) {
            return Ok(current);
        }
        let next = op.apply(&current, rhs.into());
        self.set(key, next.clone())?;
        Ok(next)
    }
}

impl PartialEq for ScopeView {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ScopeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeView")
            .field("target", &self.target())
            .field("contextual", &self.0.contextual)
            .field("depth", &self.depth())
            .finish()
    }
}

/// Builder for [`ScopeView`]
///
/// ```
/// use ctx_scope::{Object, ScopeConfig, ScopeView, Value};
///
/// let parent = Object::from_entries([("user", "ada")]);
/// let view = ScopeView::builder(Object::new())
///     .parent(parent)
///     .contextual(Object::from_entries([("@row", 1)]))
///     .config(ScopeConfig::new().with_local_prefix("@"))
///     .build()
///     .unwrap();
///
/// assert_eq!(view.get("user"), Value::from("ada"));
/// assert_eq!(view.get("@row"), Value::from(1));
/// ```
#[derive(Debug)]
#[must_use]
pub struct ScopeViewBuilder {
    target: Value,
    parent: Parent,
    contextual: Option<Object>,
    config: Option<ConfigSource>,
}

#[derive(Debug)]
enum ConfigSource {
    Owned(ScopeConfig),
    Shared(Arc<ScopeConfig>),
}

impl ScopeViewBuilder {
    /// Start a builder over `target`
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target.into(),
            parent: Parent::None,
            contextual: None,
            config: None,
        }
    }

    /// Link a parent: a view, a plain object, or any value
    pub fn parent(mut self, parent: impl Into<Parent>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Use `contextual` as the overlay instead of a fresh empty one
    pub fn contextual(mut self, contextual: Object) -> Self {
        self.contextual = Some(contextual);
        self
    }

    /// Use a custom configuration; validated on [`build`](Self::build)
    pub fn config(mut self, config: ScopeConfig) -> Self {
        self.config = Some(ConfigSource::Owned(config));
        self
    }

    /// Share an already validated configuration
    pub fn shared_config(mut self, config: Arc<ScopeConfig>) -> Self {
        self.config = Some(ConfigSource::Shared(config));
        self
    }

    /// Build the view
    ///
    /// # Errors
    /// Returns [`ScopeError::InvalidTarget`] if the target is a primitive and
    /// [`ScopeError::Config`] if an owned configuration fails validation.
    pub fn build(self) -> Result<ScopeView> {
        let config = match self.config {
            Some(ConfigSource::Owned(config)) => {
                config.validate()?;
                Arc::new(config)
            }
            Some(ConfigSource::Shared(config)) => config,
            None => Arc::new(ScopeConfig::default()),
        };

        let target = Target::from_value(self.target).map_err(|err| {
            tracing::debug!("Rejected scope target: {}", err);
            err
        })?;

        let view = ScopeView(Arc::new(ViewInner {
            target,
            parent: self.parent,
            contextual: self.contextual.unwrap_or_default(),
            config,
        }));
        tracing::debug!("Created scope view at depth {}", view.depth());
        Ok(view)
    }
}

/// Create a view over `target`
///
/// `parent` may be a view, a plain object, or absent; `contextual` defaults to
/// a fresh empty overlay.
///
/// # Errors
/// Returns [`ScopeError::InvalidTarget`] if `target` is a primitive.
pub fn create_view(
    target: impl Into<Value>,
    parent: impl Into<Parent>,
    contextual: Option<Object>,
) -> Result<ScopeView> {
    let mut builder = ScopeViewBuilder::new(target).parent(parent);
    if let Some(contextual) = contextual {
        builder = builder.contextual(contextual);
    }
    builder.build()
}
