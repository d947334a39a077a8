//! Shared key-value objects
//!
//! Provides [`Object`], the record type scope views wrap and delegate to.
//! Objects are reference values: clones share storage, and equality is
//! identity.

use crate::value::Value;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Shared, interior-mutable string-keyed record
///
/// Properties keep insertion order. An optional prototype supplies
/// inherited properties: reads see them, writes never touch them.
///
/// # Example
/// ```
/// use ctx_scope::{Object, Value};
///
/// let proto = Object::new();
/// proto.set("a", 1);
///
/// let obj = Object::with_proto(proto.clone());
/// assert_eq!(obj.get("a"), Some(Value::from(1)));
/// assert!(!obj.has_own("a"));
///
/// obj.set("a", 2);
/// assert_eq!(proto.get("a"), Some(Value::from(1)));
/// ```
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<ObjectData>>);

#[derive(Default)]
struct ObjectData {
    props: IndexMap<String, Value>,
    proto: Option<Object>,
}

impl Object {
    /// Create empty object without prototype
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty object inheriting from `proto`
    #[must_use]
    pub fn with_proto(proto: Object) -> Self {
        Self(Arc::new(RwLock::new(ObjectData {
            props: IndexMap::new(),
            proto: Some(proto),
        })))
    }

    /// Build an object from key-value pairs
    #[must_use]
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let props = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(Arc::new(RwLock::new(ObjectData { props, proto: None })))
    }

    /// Prototype object, if any
    #[must_use]
    pub fn proto(&self) -> Option<Object> {
        self.0.read().proto.clone()
    }

    /// Own property value
    #[must_use]
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.read().props.get(key).cloned()
    }

    /// Own-or-inherited property value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let next = {
                let data = current.0.read();
                if let Some(value) = data.props.get(key) {
                    return Some(value.clone());
                }
                data.proto.clone()
            };
            current = next?;
        }
    }

    /// Check for an own property
    ///
    /// A property holding [`Value::Undefined`] still counts as present.
    #[must_use]
    pub fn has_own(&self, key: &str) -> bool {
        self.0.read().props.contains_key(key)
    }

    /// Check for an own-or-inherited property
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        let mut current = self.clone();
        loop {
            let next = {
                let data = current.0.read();
                if data.props.contains_key(key) {
                    return true;
                }
                data.proto.clone()
            };
            match next {
                Some(proto) => current = proto,
                None => return false,
            }
        }
    }

    /// Write an own property, returning the previous own value
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.write().props.insert(key.into(), value.into())
    }

    /// Remove an own property
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().props.shift_remove(key)
    }

    /// Own property names in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.read().props.keys().cloned().collect()
    }

    /// Own property pairs in insertion order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .props
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of own properties
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().props.len()
    }

    /// Returns true if there are no own properties
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().props.is_empty()
    }

    /// Check if both handles point at the same object
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Convert own properties to JSON
    ///
    /// Undefined members are omitted.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .0
            .read_recursive()
            .props
            .iter()
            .filter(|(_, v)| !v.is_undefined())
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.read_recursive();
        f.debug_map().entries(data.props.iter()).finish()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Object {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_entries(map.into_iter().map(|(k, v)| (k, Value::from(v))))
    }
}
