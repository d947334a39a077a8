//! Parent links
//!
//! A view's parent is either absent, a plain value, or another view. Only a
//! chained view contributes its own ancestors to `$parents`. A falsy plain
//! parent is kept as given but takes no part in lookups.

use crate::error::{Result, ScopeError};
use crate::value::Value;
use crate::view::ScopeView;

/// Link from a view to its direct ancestor
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Parent {
    /// No parent; lookups end at the target
    #[default]
    None,

    /// Plain value; final link of the chain, inert when falsy
    Plain(Value),

    /// Another view, which carries its own ancestors
    Chained(ScopeView),
}

impl Parent {
    /// Returns true if a parent is linked
    #[inline]
    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns true if the parent takes part in lookups
    ///
    /// Falsy plain parents (`null`, `false`, `0`, `NaN`, `""`) do not.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Plain(value) => value.is_truthy(),
            Self::Chained(_) => true,
        }
    }

    /// Linked view, whether chained or held as a plain value
    fn as_view(&self) -> Option<&ScopeView> {
        match self {
            Self::Plain(Value::View(view)) | Self::Chained(view) => Some(view),
            _ => None,
        }
    }

    /// Parent as a value; `undefined` when absent
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::None => Value::Undefined,
            Self::Plain(value) => value.clone(),
            Self::Chained(view) => Value::View(view.clone()),
        }
    }

    /// Delegated read
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match self {
            Self::None => Value::Undefined,
            Self::Plain(value) => value.get_property(key),
            Self::Chained(view) => view.get(key),
        }
    }

    /// Delegated presence test
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        match self {
            Self::None => false,
            Self::Plain(value) => value.has_property(key),
            Self::Chained(view) => view.has(key),
        }
    }

    /// Delegated write
    ///
    /// # Errors
    /// Returns error if there is no parent, or the parent refuses the key.
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        match self {
            Self::None => Err(ScopeError::not_assignable(key, "no parent scope")),
            Self::Plain(Value::Object(object)) => {
                object.set(key, value);
                Ok(())
            }
            Self::Plain(Value::Array(array)) => array
                .set(key, value)
                .map_err(|reason| ScopeError::not_assignable(key, reason)),
            Self::Plain(Value::View(view)) | Self::Chained(view) => view.set(key, value),
            Self::Plain(other) => Err(ScopeError::not_assignable(
                key,
                format!("parent is a {}", other.type_name()),
            )),
        }
    }

    /// Ancestors starting with this parent, nearest first
    ///
    /// Empty when the parent is absent or falsy.
    #[must_use]
    pub fn chain(&self) -> Vec<Parent> {
        let mut chain = Vec::new();
        let mut current = self.clone();
        while current.is_truthy() {
            let next = current
                .as_view()
                .map_or(Self::None, |view| view.parent().clone());
            chain.push(current);
            current = next;
        }
        chain
    }
}

impl From<Value> for Parent {
    /// `undefined` means "no parent"; views chain; anything else is kept as is
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined => Self::None,
            Value::View(view) => Self::Chained(view),
            other => Self::Plain(other),
        }
    }
}

impl From<ScopeView> for Parent {
    fn from(view: ScopeView) -> Self {
        Self::Chained(view)
    }
}

impl From<&ScopeView> for Parent {
    fn from(view: &ScopeView) -> Self {
        Self::Chained(view.clone())
    }
}

impl From<crate::object::Object> for Parent {
    fn from(object: crate::object::Object) -> Self {
        Self::Plain(Value::Object(object))
    }
}

impl<T: Into<Parent>> From<Option<T>> for Parent {
    fn from(parent: Option<T>) -> Self {
        parent.map_or(Self::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    #[test]
    fn undefined_means_no_parent() {
        assert_eq!(Parent::from(Value::Undefined), Parent::None);
        assert!(Parent::None.chain().is_empty());
    }

    #[test]
    fn falsy_values_are_kept_but_inert() {
        for v in [Value::Null, Value::from(false), Value::from(0), Value::from("")] {
            let parent = Parent::from(v.clone());
            assert_eq!(parent, Parent::Plain(v.clone()));
            assert!(parent.is_some());
            assert!(!parent.is_truthy());
            assert_eq!(parent.to_value(), v);
            assert!(parent.chain().is_empty());
            assert!(!parent.has("a"));
        }
    }

    #[test]
    fn view_held_as_plain_value_still_chains() {
        let root = ScopeView::new(Object::new()).unwrap();
        let mid = ScopeView::builder(Object::new()).parent(&root).build().unwrap();
        let parent = Parent::Plain(Value::View(mid.clone()));

        let chain = parent.chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].to_value(), Value::View(mid));
        assert_eq!(chain[1], Parent::Chained(root));
    }

    #[test]
    fn plain_parent_is_final_link() {
        let obj = Object::from_entries([("a", 1)]);
        let parent = Parent::from(obj.clone());
        assert!(parent.is_some());
        assert_eq!(parent.get("a"), Value::from(1));
        assert!(parent.has("a"));
        assert!(!parent.has("b"));
        assert_eq!(parent.chain(), vec![Parent::Plain(Value::Object(obj))]);
    }

    #[test]
    fn primitive_parent_refuses_writes() {
        let parent = Parent::from(Value::from(7));
        assert_eq!(parent.get("a"), Value::Undefined);
        assert!(parent.set("a", Value::from(1)).is_err());
        assert!(Parent::None.set("a", Value::from(1)).is_err());
    }
}
