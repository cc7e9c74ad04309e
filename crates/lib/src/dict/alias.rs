//! Alias bookkeeping for [`AliasDict`](crate::AliasDict).
//!
//! An [`AliasTable`] binds aliases to canonical keys. Every canonical key is an
//! alias of itself, and every alias points at exactly one canonical key. The
//! table is kept in both directions so the aliases of one key can be listed and
//! cascaded without scanning the whole table.

use indexmap::IndexMap;

use crate::{Key, Result, dict::DictError, normalize::normalize};

/// Bidirectional alias → canonical key mapping, insertion ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    /// alias -> canonical key
    forward: IndexMap<Key, Key>,
    /// canonical key -> its aliases, the canonical key first
    reverse: IndexMap<Key, Vec<Key>>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alias a key acquires on its own, in registration order.
    ///
    /// The key itself always comes first. With `expand` set, the list also
    /// holds the numeric aliases (`_1` for anything equal to 1, plus `_True` or
    /// `_False` for the values 1 and 0) and the normalized member name.
    ///
    /// ```
    /// # use aliasdict::{Key, dict::AliasTable};
    /// let keys = |k: Key| AliasTable::all_candidates(&k, true);
    /// assert_eq!(keys(Key::from(1)), vec![Key::from(1), Key::from("_1"), Key::from("_True")]);
    /// assert_eq!(keys(Key::from("a b")), vec![Key::from("a b"), Key::from("a_b")]);
    /// assert_eq!(keys(Key::from("plain")), vec![Key::from("plain")]);
    /// assert_eq!(AliasTable::all_candidates(&Key::from(1), false), vec![Key::from(1)]);
    /// ```
    pub fn all_candidates(key: &Key, expand: bool) -> Vec<Key> {
        let mut candidates = vec![key.clone()];
        if !expand {
            return candidates;
        }

        if let Some(n) = key.numeric_identity() {
            candidates.push(Key::Text(format!("_{n}")));
            match n {
                0 => candidates.push(Key::from("_False")),
                1 => candidates.push(Key::from("_True")),
                _ => {}
            }
        }

        let normalized = Key::Text(normalize(key));
        if !candidates.contains(&normalized) {
            candidates.push(normalized);
        }
        candidates
    }

    /// Resolve an alias to its canonical key.
    pub fn resolve(&self, alias: &Key) -> Result<&Key> {
        self.forward.get(alias).ok_or_else(|| {
            DictError::NotFound {
                key: alias.clone(),
            }
            .into()
        })
    }

    /// Resolve an alias, returning `None` when it is unbound.
    pub fn lookup(&self, alias: &Key) -> Option<&Key> {
        self.forward.get(alias)
    }

    /// Returns true if `alias` is bound to any canonical key.
    pub fn contains(&self, alias: &Key) -> bool {
        self.forward.contains_key(alias)
    }

    /// Check that `alias` could be bound to `canonical` without a conflict.
    pub fn check(&self, canonical: &Key, alias: &Key) -> Result<()> {
        match self.forward.get(alias) {
            Some(existing) if existing != canonical => Err(DictError::KeyConflict {
                alias: alias.clone(),
                existing: existing.clone(),
                requested: canonical.clone(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// Bind `alias` to `canonical`.
    ///
    /// Binding an alias to the key it already points at is a no-op and returns
    /// `Ok(false)`. Binding it to a different key fails with
    /// [`DictError::KeyConflict`].
    pub fn register(&mut self, canonical: &Key, alias: Key) -> Result<bool> {
        self.check(canonical, &alias)?;
        if self.forward.contains_key(&alias) {
            return Ok(false);
        }

        tracing::debug!(alias = %alias.repr(), canonical = %canonical.repr(), "Registered alias");
        self.reverse
            .entry(canonical.clone())
            .or_default()
            .push(alias.clone());
        self.forward.insert(alias, canonical.clone());
        Ok(true)
    }

    /// The aliases bound to `canonical`, the canonical key first.
    ///
    /// Returns an empty slice for keys that are not canonical.
    pub fn aliases_of(&self, canonical: &Key) -> &[Key] {
        self.reverse
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Remove one alias binding, returning every alias that was removed.
    ///
    /// With `expand` set, the other members of `all_candidates(alias)` that
    /// still point at the same canonical key go with it. The canonical key is
    /// never removed this way: naming it directly fails with
    /// [`DictError::ImmutableKeyDeletion`].
    pub fn unregister(&mut self, alias: &Key, expand: bool) -> Result<Vec<Key>> {
        let canonical = self.resolve(alias)?.clone();
        if *alias == canonical {
            return Err(DictError::ImmutableKeyDeletion { key: alias.clone() }.into());
        }

        let mut removed = Vec::new();
        for candidate in Self::all_candidates(alias, expand) {
            if candidate == canonical || self.forward.get(&candidate) != Some(&canonical) {
                continue;
            }
            self.unbind(&canonical, &candidate);
            removed.push(candidate);
        }
        tracing::debug!(
            alias = %alias.repr(),
            canonical = %canonical.repr(),
            removed = removed.len(),
            "Unregistered alias"
        );
        Ok(removed)
    }

    /// Drop a canonical key together with all of its aliases.
    pub fn remove_canonical(&mut self, canonical: &Key) -> Vec<Key> {
        let aliases = self.reverse.shift_remove(canonical).unwrap_or_default();
        for alias in &aliases {
            self.forward.shift_remove(alias);
        }
        aliases
    }

    /// Number of bound aliases, canonical self-aliases included.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if no alias is bound.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over `(alias, canonical)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Key)> {
        self.forward.iter()
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    fn unbind(&mut self, canonical: &Key, alias: &Key) {
        self.forward.shift_remove(alias);
        if let Some(aliases) = self.reverse.get_mut(canonical) {
            aliases.retain(|a| a != alias);
        }
    }
}
