//! Error types for dictionary and alias operations.
//!
//! Every error names the offending key or alias exactly as the caller gave it,
//! rendered in literal form (text quoted) so `1` and `'1'` stay distinguishable.

use thiserror::Error;

use crate::Key;

/// Structured error types for [`AliasDict`](crate::AliasDict) and
/// [`AliasTable`](crate::dict::AliasTable) operations.
///
/// Failing operations leave the dictionary exactly as it was.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DictError {
    /// A read or delete referenced a key or alias that is not bound
    #[error("Key not found: {}", .key.repr())]
    NotFound { key: Key },

    /// An alias is already bound to a different canonical key
    #[error(
        "Alias {} is already bound to {}, cannot bind it to {}",
        .alias.repr(),
        .existing.repr(),
        .requested.repr()
    )]
    KeyConflict {
        alias: Key,
        existing: Key,
        requested: Key,
    },

    /// A canonical key was passed to alias deletion
    #[error("Cannot delete key {} through alias deletion; delete the item instead", .key.repr())]
    ImmutableKeyDeletion { key: Key },

    /// A member read or delete found neither an item nor a direct attribute
    #[error("No member named '{name}'")]
    AttributeNotFound { name: String },
}

impl DictError {
    /// Check if this error indicates a missing key, alias or member
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DictError::NotFound { .. } | DictError::AttributeNotFound { .. }
        )
    }

    /// Check if this error is an alias conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, DictError::KeyConflict { .. })
    }

    /// Check if this error rejected the deletion of a canonical key
    pub fn is_immutable_key(&self) -> bool {
        matches!(self, DictError::ImmutableKeyDeletion { .. })
    }

    /// Get the offending key or alias, if the error carries one
    pub fn key(&self) -> Option<&Key> {
        match self {
            DictError::NotFound { key } | DictError::ImmutableKeyDeletion { key } => Some(key),
            DictError::KeyConflict { alias, .. } => Some(alias),
            DictError::AttributeNotFound { .. } => None,
        }
    }
}

// Conversion from DictError to the main Error type
impl From<DictError> for crate::Error {
    fn from(err: DictError) -> Self {
        crate::Error::Dict(err)
    }
}
