//! Error types for scope views
//!
//! Provides error handling for:
//! - View construction (invalid targets, invalid configuration)
//! - Assignment (reserved accessors, keys a target cannot hold)
//! - Configuration loading

/// Errors raised by scope view operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScopeError {
    /// Target is a primitive value and cannot be wrapped
    #[error("cannot bind primitive value as scope target: {kind}")]
    InvalidTarget {
        /// Type name of the rejected value
        kind: &'static str,
    },

    /// Attempt to assign to a reserved accessor
    #[error("cannot assign to read-only accessor '{key}'")]
    ReservedAssignment {
        /// Reserved key that was written
        key: String,
    },

    /// The object that owns the key refused the write
    #[error("cannot assign '{key}': {reason}")]
    NotAssignable {
        /// Key that was written
        key: String,
        /// Why the write was refused
        reason: String,
    },

    /// View configuration is invalid
    #[error("invalid scope configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ScopeError {
    /// Create reserved assignment error
    pub fn reserved(key: impl Into<String>) -> Self {
        Self::ReservedAssignment { key: key.into() }
    }

    /// Create not-assignable error
    pub fn not_assignable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotAssignable {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if error comes from writing a reserved accessor
    #[inline]
    #[must_use]
    pub fn is_reserved_assignment(&self) -> bool {
        matches!(self, Self::ReservedAssignment { .. })
    }
}

/// Errors while loading or validating a [`ScopeConfig`](crate::ScopeConfig)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Local variable prefix is empty
    #[error("local variable prefix must not be empty")]
    EmptyPrefix,

    /// A reserved accessor name is empty
    #[error("reserved name '{field}' must not be empty")]
    EmptyName {
        /// Config field holding the empty name
        field: &'static str,
    },

    /// Two reserved accessors share a name
    #[error("reserved name '{0}' is used more than once")]
    DuplicateName(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for scope operations
pub type Result<T, E = ScopeError> = std::result::Result<T, E>;
