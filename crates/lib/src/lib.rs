//!
//! aliasdict: a dictionary whose items answer to many names.
//! Every item can be read and written by key, by any of its aliases, or by a
//! member name derived from the key.
//!
//! ## Core Concepts
//!
//! * **Keys (`key::Key`)**: Hashable values grouped into equivalence classes, so
//!   `true`, `1` and `1.0` are the same key.
//! * **Normalization (`normalize::normalize`)**: Turns any key into a valid
//!   member name (`"who are you?"` becomes `who_are_you_`).
//! * **Aliases (`dict::AliasTable`)**: Extra names bound to a canonical key.
//!   Each key brings its own derived aliases while expansion is on.
//! * **Expansion (`expansion::ExpansionScope`)**: A shared switch controlling
//!   whether new keys acquire derived aliases, held for a region with a guard.
//! * **Container (`dict::AliasDict`)**: Stores each value once under its
//!   canonical key and keeps the alias table consistent on every mutation.
//! * **Persistence (`persist::Persistence`)**: A per-instance hook notified
//!   after each successful change.
//! * **Export (`export`)**: JSON output with item filters, and the matching
//!   import.

pub mod dict;
pub mod expansion;
pub mod export;
pub mod key;
pub mod normalize;
pub mod persist;

pub use dict::{AliasDict, MemberAccess};
pub use expansion::{ExpansionGuard, ExpansionScope};
pub use key::{IntoKeys, Key};

/// Result type used throughout the aliasdict library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the aliasdict library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured dictionary errors from the dict module
    #[error(transparent)]
    Dict(dict::DictError),

    /// Structured export errors from the export module
    #[error(transparent)]
    Export(export::ExportError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Dict(_) => "dict",
            Error::Export(_) => "export",
        }
    }

    /// Check if this error indicates a key, alias or member was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Dict(dict_err) => dict_err.is_not_found(),
            Error::Export(_) => false,
        }
    }

    /// Check if this error indicates an alias conflict.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Dict(dict_err) => dict_err.is_conflict(),
            Error::Export(_) => false,
        }
    }

    /// Check if this error rejected the deletion of a canonical key.
    pub fn is_immutable_key(&self) -> bool {
        match self {
            Error::Dict(dict_err) => dict_err.is_immutable_key(),
            Error::Export(_) => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Export(export_err) => export_err.is_serialization_error(),
            Error::Dict(_) => false,
        }
    }
}
