//! Persistence hooks for dictionary changes.
//!
//! An [`AliasDict`](crate::AliasDict) notifies its [`Persistence`] strategy
//! after every successful mutation, which lets callers mirror changes into a
//! database, a log or a file without subclassing anything. The strategy is
//! injected per instance; dictionaries never share hooks implicitly.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use aliasdict::{AliasDict, Key, persist::Journal};
//!
//! let journal = Arc::new(Journal::<i64>::new());
//! let mut dict: AliasDict<i64> = AliasDict::new().with_persistence(journal.clone());
//! dict.set("total weight", 6)?;
//! dict.set("total_weight", 7)?;
//!
//! // Saves report the canonical key, whichever alias was written through.
//! assert_eq!(
//!     journal.saved(),
//!     vec![(Key::from("total weight"), 6), (Key::from("total weight"), 7)]
//! );
//! # Ok::<(), aliasdict::Error>(())
//! ```

use std::{
    fmt::Debug,
    sync::{Mutex, PoisonError},
};

use crate::{Key, Result};

/// Strategy notified after each successful dictionary mutation.
///
/// `key` is always the canonical key the item is stored under, not the alias
/// the caller happened to use. Alias-only changes (`add_alias`, `delete_alias`,
/// `clear`) call `save(None, None)`, which means "the alias layout changed,
/// recompute whatever depends on it".
///
/// Hook failures do not roll back the in-memory change; the dictionary logs
/// them and carries on.
pub trait Persistence<V>: Send + Sync + Debug {
    /// Called after an item is created or overwritten, or with `(None, None)`
    /// after an alias-only change.
    fn save(&self, key: Option<&Key>, value: Option<&V>) -> Result<()>;

    /// Called after an item is deleted.
    fn delete(&self, key: Option<&Key>) -> Result<()>;
}

/// The default strategy: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl<V> Persistence<V> for NoPersistence {
    fn save(&self, _key: Option<&Key>, _value: Option<&V>) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _key: Option<&Key>) -> Result<()> {
        Ok(())
    }
}

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent<V> {
    Save { key: Option<Key>, value: Option<V> },
    Delete { key: Option<Key> },
}

/// A strategy that records every hook call in memory.
///
/// Useful as an audit trail and for asserting on the exact sequence of saves a
/// series of operations produced.
#[derive(Debug)]
pub struct Journal<V> {
    events: Mutex<Vec<JournalEvent<V>>>,
}

impl<V> Journal<V> {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return every recorded event.
    pub fn take(&self) -> Vec<JournalEvent<V>> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<JournalEvent<V>>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Journal<V> {
    /// A copy of every recorded event, oldest first.
    pub fn events(&self) -> Vec<JournalEvent<V>> {
        self.lock().clone()
    }

    /// The `(key, value)` pairs of item saves, oldest first.
    ///
    /// Alias-only notifications and deletions are skipped.
    pub fn saved(&self) -> Vec<(Key, V)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                JournalEvent::Save {
                    key: Some(key),
                    value: Some(value),
                } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }
}

impl<V> Default for Journal<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Debug> Persistence<V> for Journal<V> {
    fn save(&self, key: Option<&Key>, value: Option<&V>) -> Result<()> {
        self.lock().push(JournalEvent::Save {
            key: key.cloned(),
            value: value.cloned(),
        });
        Ok(())
    }

    fn delete(&self, key: Option<&Key>) -> Result<()> {
        self.lock().push(JournalEvent::Delete { key: key.cloned() });
        Ok(())
    }
}
