//! Expansion mode: whether new keys automatically acquire derived aliases.
//!
//! The mode is a boolean shared by every [`AliasDict`](crate::AliasDict)
//! attached to the same [`ExpansionScope`]. Dictionaries created with
//! [`AliasDict::new`](crate::AliasDict::new) share the process-wide
//! [`ExpansionScope::global`] scope; independent sessions can create their own
//! with [`ExpansionScope::new`] and attach it with
//! [`AliasDict::with_scope`](crate::AliasDict::with_scope).
//!
//! The mode is changed for a lexical region with an [`ExpansionGuard`], which
//! restores the previous value when dropped, including during unwinding.
//!
//! # Example
//!
//! ```
//! use aliasdict::{AliasDict, ExpansionScope};
//!
//! let scope = ExpansionScope::new();
//! let mut dict: AliasDict<i64> = AliasDict::new().with_scope(scope.clone());
//!
//! {
//!     let _plain = scope.enter(false);
//!     dict.set(1, 10)?;
//! } // expansion restored here
//! dict.set(2, 20)?;
//!
//! assert!(dict.get("_1").is_err());
//! assert_eq!(dict.get("_2")?, &20);
//! # Ok::<(), aliasdict::Error>(())
//! ```

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// A shared, mutable expansion flag.
///
/// Cloning the scope clones the handle, not the flag: all clones observe and
/// change the same value. The flag sits behind a single mutex, so scopes can be
/// shared across threads, but guards entered concurrently on one scope restore
/// in drop order and can still interleave. Give each logical session its own
/// scope when that matters.
#[derive(Debug, Clone)]
pub struct ExpansionScope {
    enabled: Arc<Mutex<bool>>,
}

static GLOBAL: OnceLock<ExpansionScope> = OnceLock::new();

impl ExpansionScope {
    /// Create an independent scope with expansion turned on.
    pub fn new() -> Self {
        Self::with_mode(true)
    }

    /// Create an independent scope with the given initial mode.
    pub fn with_mode(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(Mutex::new(enabled)),
        }
    }

    /// The process-wide scope used by dictionaries that were not given one.
    pub fn global() -> Self {
        GLOBAL.get_or_init(ExpansionScope::new).clone()
    }

    /// Returns the current mode.
    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a new mode, returning the previous one.
    pub fn set(&self, enabled: bool) -> bool {
        let mut current = self.enabled.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, enabled);
        tracing::trace!(previous, enabled, "Expansion mode changed");
        previous
    }

    /// Install `enabled` until the returned guard is dropped.
    ///
    /// Guards nest: each one restores exactly the value it replaced.
    ///
    /// ```
    /// # use aliasdict::ExpansionScope;
    /// let scope = ExpansionScope::new();
    /// {
    ///     let _off = scope.enter(false);
    ///     {
    ///         let _on = scope.enter(true);
    ///         assert!(scope.is_enabled());
    ///     }
    ///     assert!(!scope.is_enabled());
    /// }
    /// assert!(scope.is_enabled());
    /// ```
    pub fn enter(&self, enabled: bool) -> ExpansionGuard {
        let previous = self.set(enabled);
        ExpansionGuard {
            scope: self.clone(),
            previous,
        }
    }

    /// Returns true if both handles refer to the same flag.
    pub fn same_scope(&self, other: &ExpansionScope) -> bool {
        Arc::ptr_eq(&self.enabled, &other.enabled)
    }
}

impl Default for ExpansionScope {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that holds an expansion mode on an [`ExpansionScope`].
///
/// The guard owns a handle to its scope rather than borrowing it, so the
/// dictionary that shares the scope stays mutably usable while the guard lives.
#[must_use = "the previous mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ExpansionGuard {
    scope: ExpansionScope,
    previous: bool,
}

impl ExpansionGuard {
    /// The mode that will be restored on drop.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for ExpansionGuard {
    fn drop(&mut self) {
        self.scope.set(self.previous);
    }
}

/// Turn expansion on in the global scope until the guard is dropped.
pub fn enabled() -> ExpansionGuard {
    ExpansionScope::global().enter(true)
}

/// Turn expansion off in the global scope until the guard is dropped.
///
/// ```
/// use aliasdict::{AliasDict, expansion};
///
/// let mut dict: AliasDict<i64> = AliasDict::new();
/// {
///     let _plain = expansion::disabled();
///     dict.set("a b", 1)?;
/// }
/// assert!(dict.get("a_b").is_err());
/// assert!(expansion::ExpansionScope::global().is_enabled());
/// # Ok::<(), aliasdict::Error>(())
/// ```
pub fn disabled() -> ExpansionGuard {
    ExpansionScope::global().enter(false)
}
