//! Scope view configuration
//!
//! [`ScopeConfig`] names the reserved accessors and the local-variable prefix.
//! The defaults match the `$this` / `$parent` / `$parents` / `$contextual`
//! convention used by template engines.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Reserved accessor kinds
///
/// Reserved keys are intercepted before any overlay, target or parent lookup
/// and are never assignable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    /// The wrapped target, not re-wrapped
    This,
    /// The direct parent
    Parent,
    /// Ancestors, nearest first
    Parents,
    /// The view's own contextual overlay
    Contextual,
}

/// Configuration shared by a view and the children it creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Prefix marking local variables created in the writing view's overlay
    pub local_prefix: String,
    /// Accessor returning the wrapped target
    pub this_key: String,
    /// Accessor returning the direct parent
    pub parent_key: String,
    /// Accessor returning the ancestor list
    pub parents_key: String,
    /// Accessor returning the contextual overlay; `None` leaves it unexposed
    pub contextual_key: Option<String>,
}

impl ScopeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or the result fails [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// With local variable prefix
    #[inline]
    #[must_use]
    pub fn with_local_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.local_prefix = prefix.into();
        self
    }

    /// With target accessor name
    #[inline]
    #[must_use]
    pub fn with_this_key(mut self, key: impl Into<String>) -> Self {
        self.this_key = key.into();
        self
    }

    /// With parent accessor name
    #[inline]
    #[must_use]
    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = key.into();
        self
    }

    /// With ancestor list accessor name
    #[inline]
    #[must_use]
    pub fn with_parents_key(mut self, key: impl Into<String>) -> Self {
        self.parents_key = key.into();
        self
    }

    /// With contextual overlay accessor name, or `None` to hide the overlay
    #[inline]
    #[must_use]
    pub fn with_contextual_key(mut self, key: Option<String>) -> Self {
        self.contextual_key = key;
        self
    }

    /// Check names are usable
    ///
    /// # Errors
    /// Returns error if the prefix or any reserved name is empty, or two
    /// reserved names collide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        let mut names: Vec<(&'static str, &str)> = vec![
            ("this_key", self.this_key.as_str()),
            ("parent_key", self.parent_key.as_str()),
            ("parents_key", self.parents_key.as_str()),
        ];
        if let Some(key) = &self.contextual_key {
            names.push(("contextual_key", key.as_str()));
        }

        for (i, (field, name)) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::EmptyName { field: *field });
            }
            if names[..i].iter().any(|(_, other)| other == name) {
                return Err(ConfigError::DuplicateName((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Classify `key` as a reserved accessor
    #[must_use]
    pub fn reserved(&self, key: &str) -> Option<Reserved> {
        if key == self.this_key {
            Some(Reserved::This)
        } else if key == self.parent_key {
            Some(Reserved::Parent)
        } else if key == self.parents_key {
            Some(Reserved::Parents)
        } else if self.contextual_key.as_deref() == Some(key) {
            Some(Reserved::Contextual)
        } else {
            None
        }
    }

    /// Returns true if `key` follows the local-variable naming convention
    #[inline]
    #[must_use]
    pub fn is_local(&self, key: &str) -> bool {
        key.starts_with(self.local_prefix.as_str())
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            local_prefix: "$".to_string(),
            this_key: "$this".to_string(),
            parent_key: "$parent".to_string(),
            parents_key: "$parents".to_string(),
            contextual_key: Some("$contextual".to_string()),
        }
    }
}
