//! The dual-access dictionary.
//!
//! [`AliasDict`] stores each value once, under its canonical key, and lets it
//! be reached through any alias bound to that key. New keys acquire their
//! derived aliases automatically while expansion is on (see
//! [`expansion`](crate::expansion)), so an item stored under `"short name"` is
//! also reachable as `short_name`, and an item stored under `1` as `_1` and
//! `_True`.
//!
//! # Usage
//!
//! ```
//! use aliasdict::{AliasDict, MemberAccess};
//!
//! let mut dict: AliasDict<String> = AliasDict::new();
//! dict.set("who are you?", "Brian".to_string())?;
//! dict.set(1, "one".to_string())?;
//! dict.set(true, "truth".to_string())?;
//!
//! assert_eq!(dict.get("who_are_you_")?, "Brian");
//! assert_eq!(dict.get_member("_True")?, "truth");
//! assert_eq!(dict.get(1)?, "truth");
//! assert_eq!(dict.len(), 2);
//! # Ok::<(), aliasdict::Error>(())
//! ```
//!
//! # Consistency
//!
//! Every mutating operation either succeeds completely or leaves the items and
//! the alias table untouched. The persistence strategy is notified only after
//! a successful change.

use std::{fmt, ops::Index, sync::Arc};

use indexmap::IndexMap;

use crate::{
    ExpansionScope, IntoKeys, Key, Result,
    normalize::{is_member_name, normalize},
    persist::{NoPersistence, Persistence},
};

pub mod alias;
pub mod errors;
pub mod member;


pub use alias::AliasTable;
pub use errors::DictError;
pub use member::MemberAccess;

/// A dictionary whose items can be reached by key, by alias and by member name.
///
/// `V` defaults to [`serde_json::Value`] so heterogeneous values can be stored
/// side by side; any other type works as well.
///
/// Besides items, the dictionary carries *direct attributes*: named values that
/// bypass keys and aliases entirely. They take part in equality and in full
/// exports, but are never treated as items.
#[derive(Debug, Clone)]
pub struct AliasDict<V = serde_json::Value> {
    data: IndexMap<Key, V>,
    aliases: AliasTable,
    direct: IndexMap<String, V>,
    scope: ExpansionScope,
    persistence: Arc<dyn Persistence<V>>,
}

impl<V> AliasDict<V> {
    /// Create an empty dictionary on the global expansion scope, without
    /// persistence.
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
            aliases: AliasTable::new(),
            direct: IndexMap::new(),
            scope: ExpansionScope::global(),
            persistence: Arc::new(NoPersistence),
        }
    }

    /// Attach the dictionary to an expansion scope.
    pub fn with_scope(mut self, scope: ExpansionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Install the strategy notified after every mutation.
    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence<V>>) -> Self {
        self.persistence = persistence;
        self
    }

    /// Build a dictionary from `(key, value)` pairs, in order.
    ///
    /// Later pairs overwrite earlier ones that resolve to the same item.
    pub fn from_pairs<K, I>(items: I) -> Result<Self>
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dict = Self::new();
        dict.update(items)?;
        Ok(dict)
    }

    /// Build a dictionary holding the same value under each of `keys`.
    pub fn from_keys(keys: impl IntoKeys, value: V) -> Result<Self>
    where
        V: Clone,
    {
        let mut dict = Self::new();
        for key in keys.into_keys() {
            dict.set(key, value.clone())?;
        }
        Ok(dict)
    }

    /// The expansion scope this dictionary follows.
    pub fn scope(&self) -> &ExpansionScope {
        &self.scope
    }

    /// Store `value` under `key`.
    ///
    /// If `key` already resolves (directly, through an alias, or as a member
    /// of the same numeric class) the existing item is overwritten and keeps
    /// its canonical key. Otherwise `key` becomes a new canonical key and, when
    /// expansion is on, acquires its derived aliases. Fails with
    /// [`DictError::KeyConflict`] if one of those aliases already belongs to
    /// another item.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> Result<()> {
        let expand = self.scope.is_enabled();
        self.set_with(key.into(), value, expand)
    }

    /// [`set`](Self::set) with an explicit expansion mode.
    pub(crate) fn set_with(&mut self, key: Key, value: V, expand: bool) -> Result<()> {
        let canonical = match self.aliases.lookup(&key) {
            Some(canonical) => {
                tracing::trace!(key = %key.repr(), canonical = %canonical.repr(), "Overwriting item");
                canonical.clone()
            }
            None => {
                let candidates = AliasTable::all_candidates(&key, expand);
                for candidate in &candidates {
                    self.aliases.check(&key, candidate)?;
                }
                for candidate in candidates {
                    self.aliases.register(&key, candidate)?;
                }
                tracing::debug!(key = %key.repr(), expand, "Inserted new key");
                key
            }
        };

        self.data.insert(canonical.clone(), value);
        self.notify_save(Some(&canonical), self.data.get(&canonical));
        Ok(())
    }

    /// Store every pair in order, stopping at the first failure.
    ///
    /// Pairs before the failing one stay applied.
    pub fn update<K, I>(&mut self, items: I) -> Result<()>
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in items {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Look up a value by key or alias.
    ///
    /// A key that is not bound is retried in its normalized form, so a value
    /// stored under `None` is found by `"None"` as well as by `"_None"`.
    pub fn get(&self, key: impl Into<Key>) -> Result<&V> {
        let key = key.into();
        match self.resolve_for_read(&key).and_then(|c| self.data.get(c)) {
            Some(value) => Ok(value),
            None => Err(DictError::NotFound { key }.into()),
        }
    }

    /// Mutable access to a value by key or alias.
    ///
    /// Changes made through the returned reference do not reach the
    /// persistence strategy; use [`set`](Self::set) for that.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Result<&mut V> {
        let key = key.into();
        if let Some(canonical) = self.resolve_for_read(&key).cloned()
            && let Some(value) = self.data.get_mut(&canonical)
        {
            return Ok(value);
        }
        Err(DictError::NotFound { key }.into())
    }

    /// Returns true if `key` reaches an item.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.resolve_for_read(&key.into()).is_some()
    }

    /// The canonical key an alias resolves to.
    pub fn canonical_key(&self, key: impl Into<Key>) -> Result<&Key> {
        self.aliases.resolve(&key.into())
    }

    /// Every alias of the item `key` resolves to, its canonical key first.
    pub fn aliases_of(&self, key: impl Into<Key>) -> Result<&[Key]> {
        let canonical = self.aliases.resolve(&key.into())?;
        Ok(self.aliases.aliases_of(canonical))
    }

    /// Remove the item `key` resolves to, along with all of its aliases.
    ///
    /// Any bound alias can be used, not only the canonical key.
    pub fn delete(&mut self, key: impl Into<Key>) -> Result<V> {
        let key = key.into();
        let canonical = self.aliases.resolve(&key)?.clone();
        let value = self
            .data
            .shift_remove(&canonical)
            .ok_or(DictError::NotFound { key })?;
        let removed = self.aliases.remove_canonical(&canonical);

        tracing::debug!(key = %canonical.repr(), aliases = removed.len(), "Deleted key");
        self.notify_delete(Some(&canonical));
        Ok(value)
    }

    /// Bind one or more new aliases to the item `key` resolves to.
    ///
    /// Each alias brings its own derived aliases along while expansion is on.
    /// Nothing is bound if any of them already belongs to another item.
    pub fn add_alias(&mut self, key: impl Into<Key>, aliases: impl IntoKeys) -> Result<()> {
        let expand = self.scope.is_enabled();
        let canonical = self.aliases.resolve(&key.into())?.clone();

        let mut candidates: Vec<Key> = Vec::new();
        for alias in aliases.into_keys() {
            for candidate in AliasTable::all_candidates(&alias, expand) {
                self.aliases.check(&canonical, &candidate)?;
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
        for candidate in candidates {
            self.aliases.register(&canonical, candidate)?;
        }

        self.notify_save(None, None);
        Ok(())
    }

    /// Remove one or more aliases.
    ///
    /// Canonical keys cannot be removed this way and fail with
    /// [`DictError::ImmutableKeyDeletion`]; delete the item instead. All
    /// aliases are validated before any is removed.
    pub fn delete_alias(&mut self, aliases: impl IntoKeys) -> Result<()> {
        let expand = self.scope.is_enabled();
        let aliases = aliases.into_keys();

        for alias in &aliases {
            let canonical = self.aliases.resolve(alias)?;
            if alias == canonical {
                return Err(DictError::ImmutableKeyDeletion { key: alias.clone() }.into());
            }
        }
        for alias in &aliases {
            // An earlier alias in the list may already have cascaded this one away.
            if self.aliases.contains(alias) {
                self.aliases.unregister(alias, expand)?;
            }
        }

        self.notify_save(None, None);
        Ok(())
    }

    /// Remove every item and alias. Direct attributes are kept.
    pub fn clear(&mut self) {
        self.data.clear();
        self.aliases.clear();
        self.notify_save(None, None);
    }

    /// Set a direct attribute, returning the previous value.
    ///
    /// Direct attributes never touch the alias table and never notify the
    /// persistence strategy.
    pub fn set_direct(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.direct.insert(name.into(), value)
    }

    /// Read a direct attribute.
    pub fn get_direct(&self, name: &str) -> Result<&V> {
        self.direct.get(name).ok_or_else(|| {
            DictError::AttributeNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Remove a direct attribute.
    pub fn delete_direct(&mut self, name: &str) -> Result<V> {
        self.direct.shift_remove(name).ok_or_else(|| {
            DictError::AttributeNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Returns true if `name` is a direct attribute.
    pub fn is_direct(&self, name: &str) -> bool {
        self.direct.contains_key(name)
    }

    /// Iterate over direct attributes in insertion order.
    pub fn direct_attrs(&self) -> impl Iterator<Item = (&String, &V)> {
        self.direct.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over `(canonical key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &V)> {
        self.data.iter()
    }

    /// Iterate over canonical keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.data.keys()
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.data.values()
    }

    /// Read-only view of the alias table.
    pub fn alias_table(&self) -> &AliasTable {
        &self.aliases
    }

    /// Bind `alias` to the item `canonical` resolves to, without deriving
    /// further aliases.
    pub(crate) fn restore_alias(&mut self, canonical: &Key, alias: Key) -> Result<()> {
        let canonical = self.aliases.resolve(canonical)?.clone();
        self.aliases.register(&canonical, alias)?;
        Ok(())
    }

    fn resolve_for_read(&self, key: &Key) -> Option<&Key> {
        self.aliases
            .lookup(key)
            .or_else(|| self.aliases.lookup(&Key::Text(normalize(key))))
    }

    fn notify_save(&self, key: Option<&Key>, value: Option<&V>) {
        if let Err(e) = self.persistence.save(key, value) {
            tracing::error!("Persistence save hook failed: {e}");
        }
    }

    fn notify_delete(&self, key: Option<&Key>) {
        if let Err(e) = self.persistence.delete(key) {
            tracing::error!("Persistence delete hook failed: {e}");
        }
    }
}

impl<V> Default for AliasDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality compares items and direct attributes; aliases are not compared.
impl<V: PartialEq> PartialEq for AliasDict<V> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.direct == other.direct
    }
}

/// Map-style lookup.
///
/// # Panics
///
/// Panics if the key does not reach an item. Use [`AliasDict::get`] for a
/// fallible lookup.
impl<V, K: Into<Key>> Index<K> for AliasDict<V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        let key = key.into();
        match self.get(key.clone()) {
            Ok(value) => value,
            Err(_) => panic!("key not found: {}", key.repr()),
        }
    }
}

/// Lists every way each item can be reached, one item per line.
///
/// ```text
/// AliasDict
///     x['a b'] == x['a_b'] == x.a_b == 1
///     x.store == []
/// ```
impl<V: fmt::Debug> fmt::Display for AliasDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AliasDict")?;
        for (key, value) in &self.data {
            write!(f, "\n    ")?;
            let aliases = self.aliases.aliases_of(key);
            for alias in aliases {
                write!(f, "x[{}] == ", alias.repr())?;
            }
            for name in aliases.iter().filter_map(Key::as_text) {
                if is_member_name(name) {
                    write!(f, "x.{name} == ")?;
                }
            }
            write!(f, "{value:?}")?;
        }
        for (name, value) in &self.direct {
            write!(f, "\n    x.{name} == {value:?}")?;
        }
        Ok(())
    }
}
