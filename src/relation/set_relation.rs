//! Bidirectional set-valued mapping.
//!
//! This module provides [`SetRelation`], a mapping from keys to sets of items
//! that maintains a reverse index from every item back to the set of keys
//! whose value sets contain it. Both sides stay consistent under every
//! mutation, and the reverse index never retains an item with an empty
//! key set.

use crate::debug_invariants::DebugInvariants;
use crate::error::RelsetError;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::hash_map;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// A mapping from keys to sets of items with a maintained reverse index.
///
/// # Type Parameters
/// - `K`: The key type. Must be hashable; `Debug` feeds error messages.
/// - `I`: The item type stored in the value sets. Same bounds as `K`.
///
/// The reverse index is derived state: it is rebuilt incrementally as the
/// forward mapping is mutated and is never exposed for direct mutation.
#[derive(Clone, Debug)]
pub struct SetRelation<K, I> {
    /// Forward mapping from each key to its set of items.
    forward: HashMap<K, HashSet<I>>,
    /// Reverse mapping from each item to the non-empty set of keys
    /// whose value sets contain it.
    reverse: HashMap<I, HashSet<K>>,
}

impl<K, I> Default for SetRelation<K, I> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }
}

impl<K, I> SetRelation<K, I>
where
    K: Clone + Eq + Hash + fmt::Debug,
    I: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates a new, empty `SetRelation`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `SetRelation` with forward capacity for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(capacity),
            reverse: HashMap::new(),
        }
    }

    /// Constructs a `SetRelation` from an iterator of (key, set) pairs.
    ///
    /// Duplicate keys are last-write-wins, exactly as repeated [`insert`]
    /// calls would behave.
    ///
    /// [`insert`]: SetRelation::insert
    ///
    /// # Example
    /// ```rust
    /// use relset::relation::set_relation::SetRelation;
    /// use std::collections::HashSet;
    /// let rel = SetRelation::from_pairs([("a", HashSet::from([1, 2])), ("b", HashSet::from([1]))]);
    /// assert_eq!(rel.item_keys(&1).map(|keys| keys.len()), Some(2));
    /// ```
    pub fn from_pairs<T: IntoIterator<Item = (K, HashSet<I>)>>(pairs: T) -> Self {
        let mut rel = Self::default();
        for (key, items) in pairs {
            rel.insert(key, items);
        }
        rel
    }

    /// Records `key` in `item`'s reverse entry, creating the entry if absent.
    #[inline]
    fn link(&mut self, key: &K, item: &I) {
        self.reverse
            .entry(item.clone())
            .or_default()
            .insert(key.clone());
    }

    /// Removes `key` from `item`'s reverse entry, dropping the entry
    /// entirely once it no longer maps to any keys.
    #[inline]
    fn unlink(&mut self, item: &I, key: &K) {
        if let Some(keys) = self.reverse.get_mut(item) {
            keys.remove(key);
            if keys.is_empty() {
                self.reverse.remove(item);
            }
        }
    }

    /// Sets the value set for `key`, replacing any existing set.
    ///
    /// Mirrors of items present in the old set but absent from the new one
    /// are scrubbed from the reverse index; every item of the new set gains
    /// a reverse entry for `key`. Returns the displaced set, if any.
    ///
    /// # Example
    /// ```rust
    /// use relset::relation::set_relation::SetRelation;
    /// use std::collections::HashSet;
    /// let mut rel = SetRelation::new();
    /// rel.insert("a", HashSet::from([1, 2]));
    /// rel.insert("a", HashSet::from([2, 3]));
    /// assert!(!rel.contains_item(&1));
    /// assert!(rel.contains_item(&3));
    /// ```
    pub fn insert(&mut self, key: K, items: HashSet<I>) -> Option<HashSet<I>> {
        let displaced = self.forward.remove(&key);
        if let Some(old) = &displaced {
            for item in old.difference(&items) {
                self.unlink(item, &key);
            }
        }
        for item in &items {
            self.link(&key, item);
        }
        self.forward.insert(key, items);
        self.debug_assert_invariants();
        displaced
    }

    /// Removes `key` and its value set, scrubbing the key from every
    /// member item's reverse entry.
    ///
    /// Returns the removed set, or [`RelsetError::MissingKey`] if `key`
    /// is absent.
    pub fn remove(&mut self, key: &K) -> Result<HashSet<I>, RelsetError> {
        let items = self
            .forward
            .remove(key)
            .ok_or_else(|| RelsetError::MissingKey(format!("{key:?}")))?;
        for item in &items {
            self.unlink(item, key);
        }
        self.debug_assert_invariants();
        Ok(items)
    }

    /// Returns the value set for `key`, if present.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&HashSet<I>> {
        self.forward.get(key)
    }

    /// Returns the value set for `key`, or [`RelsetError::MissingKey`].
    pub fn try_get(&self, key: &K) -> Result<&HashSet<I>, RelsetError> {
        self.forward
            .get(key)
            .ok_or_else(|| RelsetError::MissingKey(format!("{key:?}")))
    }

    /// Whether `key` is present in the forward mapping.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Number of keys in the forward mapping.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the relation holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Empties both the forward mapping and the reverse index.
    pub fn clear(&mut self) {
        self.reverse.clear();
        self.forward.clear();
    }

    /// Adds `item` to the set belonging to `key`.
    ///
    /// Returns [`RelsetError::MissingKey`] if `key` is absent; the
    /// structure is untouched in that case.
    pub fn add_item(&mut self, key: &K, item: I) -> Result<(), RelsetError> {
        let items = self
            .forward
            .get_mut(key)
            .ok_or_else(|| RelsetError::MissingKey(format!("{key:?}")))?;
        items.insert(item.clone());
        self.reverse.entry(item).or_default().insert(key.clone());
        self.debug_assert_invariants();
        Ok(())
    }

    /// Removes `item` from the set belonging to `key`.
    ///
    /// Returns [`RelsetError::MissingKey`] if `key` is absent, or
    /// [`RelsetError::ItemNotInKey`] if the set does not contain `item`.
    /// Neither failure mutates the structure.
    pub fn remove_item(&mut self, key: &K, item: &I) -> Result<(), RelsetError> {
        let items = self
            .forward
            .get_mut(key)
            .ok_or_else(|| RelsetError::MissingKey(format!("{key:?}")))?;
        if !items.remove(item) {
            return Err(RelsetError::ItemNotInKey {
                item: format!("{item:?}"),
                key: format!("{key:?}"),
            });
        }
        self.unlink(item, key);
        self.debug_assert_invariants();
        Ok(())
    }

    /// Removes `item` from the value set of every key that contains it and
    /// deletes its reverse entry.
    ///
    /// Keys keep their (possibly now empty) forward sets. Returns
    /// [`RelsetError::MissingItem`] if `item` has no reverse entry.
    ///
    /// # Example
    /// ```rust
    /// use relset::relation::set_relation::SetRelation;
    /// use std::collections::HashSet;
    /// let mut rel = SetRelation::from_pairs([("a", HashSet::from([1, 2])), ("b", HashSet::from([1]))]);
    /// rel.remove_item_from_all(&1).unwrap();
    /// assert_eq!(rel.get(&"b"), Some(&HashSet::new()));
    /// assert!(!rel.contains_item(&1));
    /// ```
    pub fn remove_item_from_all(&mut self, item: &I) -> Result<(), RelsetError> {
        let keys = self
            .reverse
            .remove(item)
            .ok_or_else(|| RelsetError::MissingItem(format!("{item:?}")))?;
        for key in &keys {
            if let Some(items) = self.forward.get_mut(key) {
                items.remove(item);
            }
        }
        self.debug_assert_invariants();
        Ok(())
    }

    /// Whether `item` appears in at least one key's value set.
    ///
    /// A reverse lookup; never fails.
    #[inline]
    pub fn contains_item(&self, item: &I) -> bool {
        self.reverse.contains_key(item)
    }

    /// Returns the set of keys whose value sets contain `item`, if any.
    #[inline]
    pub fn item_keys(&self, item: &I) -> Option<&HashSet<K>> {
        self.reverse.get(item)
    }

    /// Returns the set of keys whose value sets contain `item`, or
    /// [`RelsetError::MissingItem`] if `item` has no reverse entry.
    pub fn try_item_keys(&self, item: &I) -> Result<&HashSet<K>, RelsetError> {
        self.reverse
            .get(item)
            .ok_or_else(|| RelsetError::MissingItem(format!("{item:?}")))
    }

    /// Whether `item`'s reverse entry contains `key`.
    ///
    /// Returns [`RelsetError::MissingItem`] if `item` is absent from every
    /// value set; a missing `key` is an ordinary `false`.
    pub fn item_in_key(&self, item: &I, key: &K) -> Result<bool, RelsetError> {
        Ok(self.try_item_keys(item)?.contains(key))
    }

    /// Iterates over (key, value set) pairs of the forward mapping.
    pub fn iter(&self) -> hash_map::Iter<'_, K, HashSet<I>> {
        self.forward.iter()
    }

    /// Iterates over the keys of the forward mapping.
    pub fn keys(&self) -> hash_map::Keys<'_, K, HashSet<I>> {
        self.forward.keys()
    }

    /// Iterates over the value sets of the forward mapping.
    pub fn values(&self) -> hash_map::Values<'_, K, HashSet<I>> {
        self.forward.values()
    }

    /// Number of distinct items across all value sets.
    #[inline]
    pub fn reverse_len(&self) -> usize {
        self.reverse.len()
    }

    /// Iterates over (item, key set) pairs of the reverse index.
    pub fn reverse_iter(&self) -> hash_map::Iter<'_, I, HashSet<K>> {
        self.reverse.iter()
    }

    /// Iterates over the items of the reverse index.
    ///
    /// These are the items found in the value sets of the forward mapping.
    pub fn reverse_keys(&self) -> hash_map::Keys<'_, I, HashSet<K>> {
        self.reverse.keys()
    }

    /// Iterates over the key sets of the reverse index.
    ///
    /// These are sets of keys of the forward mapping; none is empty.
    pub fn reverse_values(&self) -> hash_map::Values<'_, I, HashSet<K>> {
        self.reverse.values()
    }
}

impl<K, I> DebugInvariants for SetRelation<K, I>
where
    K: Clone + Eq + Hash + fmt::Debug,
    I: Clone + Eq + Hash + fmt::Debug,
{
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "SetRelation");
    }

    fn validate_invariants(&self) -> Result<(), RelsetError> {
        for (key, items) in &self.forward {
            for item in items {
                let ok = self
                    .reverse
                    .get(item)
                    .map_or(false, |keys| keys.contains(key));
                if !ok {
                    return Err(RelsetError::CorruptReverseIndex(format!(
                        "missing mirror for ({key:?} -> {item:?})"
                    )));
                }
            }
        }
        for (item, keys) in &self.reverse {
            if keys.is_empty() {
                return Err(RelsetError::CorruptReverseIndex(format!(
                    "empty key set retained for item {item:?}"
                )));
            }
            for key in keys {
                let ok = self
                    .forward
                    .get(key)
                    .map_or(false, |items| items.contains(item));
                if !ok {
                    return Err(RelsetError::CorruptReverseIndex(format!(
                        "stale mirror for ({key:?} -> {item:?})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Equality compares the forward mapping only; the reverse index is a
/// deterministic function of it.
impl<K, I> PartialEq for SetRelation<K, I>
where
    K: Eq + Hash,
    I: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<K, I> Eq for SetRelation<K, I>
where
    K: Eq + Hash,
    I: Eq + Hash,
{
}

impl<K, I> FromIterator<(K, HashSet<I>)> for SetRelation<K, I>
where
    K: Clone + Eq + Hash + fmt::Debug,
    I: Clone + Eq + Hash + fmt::Debug,
{
    fn from_iter<T: IntoIterator<Item = (K, HashSet<I>)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, I> Extend<(K, HashSet<I>)> for SetRelation<K, I>
where
    K: Clone + Eq + Hash + fmt::Debug,
    I: Clone + Eq + Hash + fmt::Debug,
{
    fn extend<T: IntoIterator<Item = (K, HashSet<I>)>>(&mut self, iter: T) {
        for (key, items) in iter {
            self.insert(key, items);
        }
    }
}

impl<'a, K, I> IntoIterator for &'a SetRelation<K, I> {
    type Item = (&'a K, &'a HashSet<I>);
    type IntoIter = hash_map::Iter<'a, K, HashSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.iter()
    }
}

impl<K, I> IntoIterator for SetRelation<K, I> {
    type Item = (K, HashSet<I>);
    type IntoIter = hash_map::IntoIter<K, HashSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.into_iter()
    }
}

/// Serializes the forward mapping only; the reverse index is derived state.
impl<K, I> Serialize for SetRelation<K, I>
where
    K: Serialize,
    I: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.forward.serialize(serializer)
    }
}

/// Deserializes forward (key, set) pairs and rebuilds the reverse index by
/// replaying insertions.
impl<'de, K, I> Deserialize<'de> for SetRelation<K, I>
where
    K: Deserialize<'de> + Clone + Eq + Hash + fmt::Debug,
    I: Deserialize<'de> + Clone + Eq + Hash + fmt::Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let forward = HashMap::<K, HashSet<I>>::deserialize(deserializer)?;
        Ok(Self::from_pairs(forward))
    }
}
