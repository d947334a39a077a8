//! Shared array values
//!
//! [`Array`] exposes its elements under canonical decimal index keys plus
//! `length`, so it can stand in as a scope target or parent.

use crate::value::Value;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Key exposing the element count
pub const LENGTH_KEY: &str = "length";

/// Largest valid index; one below the maximum array length of `2^32 - 1`
pub const MAX_INDEX: usize = 4_294_967_294;

/// Most `undefined` slots a single write may add
///
/// Storage is dense, so holes are materialised. Writes that would pad more
/// than this are refused instead of allocating gigabytes of `undefined`.
pub const MAX_PADDING: usize = 1 << 16;

/// Shared, interior-mutable list of values
#[derive(Clone, Default)]
pub struct Array(Arc<RwLock<Vec<Value>>>);

impl Array {
    /// Create empty array
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element count
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// Returns true if the array has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Element at `index`
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Append element
    pub fn push(&self, value: impl Into<Value>) {
        self.0.write().push(value.into());
    }

    /// Snapshot of the elements
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    /// Property read by key (`length` or a canonical index)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == LENGTH_KEY {
            return Some(Value::from(self.len()));
        }
        parse_index(key).and_then(|i| self.get_index(i))
    }

    /// Property presence by key
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        key == LENGTH_KEY || parse_index(key).is_some_and(|i| i < self.len())
    }

    /// Property write by key
    ///
    /// Writing past the end pads with [`Value::Undefined`]. Writing `length`
    /// truncates or pads. Padding is bounded by [`MAX_PADDING`].
    ///
    /// # Errors
    /// Returns a reason when the key is not an index or `length`, when
    /// `length` is not a valid count, or when the write would pad too far.
    pub fn set(&self, key: &str, value: Value) -> Result<(), String> {
        if key == LENGTH_KEY {
            let len = value
                .as_index()
                .ok_or_else(|| format!("invalid array length: {value}"))?;
            let mut items = self.0.write();
            check_padding(items.len(), len)?;
            items.resize(len, Value::Undefined);
            return Ok(());
        }
        let index = parse_index(key).ok_or_else(|| format!("'{key}' is not an array index"))?;
        let mut items = self.0.write();
        if index >= items.len() {
            let len = index
                .checked_add(1)
                .ok_or_else(|| format!("array index {index} out of range"))?;
            check_padding(items.len(), len)?;
            items.resize(len, Value::Undefined);
        }
        items[index] = value;
        Ok(())
    }

    /// Check if both handles point at the same array
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Convert to JSON; undefined elements become `null`
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.0.read_recursive().iter().map(Value::to_json).collect())
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.read_recursive().iter()).finish()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(Arc::new(RwLock::new(iter.into_iter().map(Into::into).collect())))
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(items)))
    }
}

fn check_padding(current: usize, new_len: usize) -> Result<(), String> {
    if new_len.saturating_sub(current) > MAX_PADDING {
        return Err(format!(
            "growing array from {current} to {new_len} exceeds {MAX_PADDING} padded slots"
        ));
    }
    Ok(())
}

/// Parse a canonical array index: digits only, no leading zeros, at most
/// [`MAX_INDEX`]
fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok().filter(|&index| index <= MAX_INDEX)
}
