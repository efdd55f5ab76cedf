//! Mapping with order-insensitive composite keys.
//!
//! [`CanonicalKeyMap`] canonicalizes every key by sorting its elements
//! before lookup and storage, so keys that are permutations of one another
//! resolve to the same entry. The total order required for sorting is a
//! compile-time bound on the element type.

use crate::error::RelsetError;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A mapping whose composite keys are treated as order-independent.
///
/// # Example
/// ```rust
/// use relset::relation::canonical::CanonicalKeyMap;
/// let mut map = CanonicalKeyMap::new();
/// map.insert(["b", "a"], 1);
/// assert_eq!(map.get(["a", "b"]), Some(&1));
/// assert_eq!(map.get(["b", "a"]), Some(&1));
/// ```
#[derive(Clone, Debug)]
pub struct CanonicalKeyMap<E, V> {
    /// Storage keyed by canonical (sorted) element sequences.
    store: HashMap<Vec<E>, V>,
}

impl<E, V> Default for CanonicalKeyMap<E, V> {
    fn default() -> Self {
        Self {
            store: HashMap::new(),
        }
    }
}

impl<E, V> CanonicalKeyMap<E, V>
where
    E: Eq + Hash + Ord + fmt::Debug,
{
    /// Creates a new, empty `CanonicalKeyMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with capacity for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: HashMap::with_capacity(capacity),
        }
    }

    /// Rewrites a key into its canonical sorted form.
    fn canonicalize<T: IntoIterator<Item = E>>(key: T) -> Vec<E> {
        let mut elements: Vec<E> = key.into_iter().collect();
        elements.sort_unstable();
        elements
    }

    /// Inserts `value` under the canonical form of `key`, returning the
    /// displaced value if any permutation of `key` was already present.
    pub fn insert<T: IntoIterator<Item = E>>(&mut self, key: T, value: V) -> Option<V> {
        self.store.insert(Self::canonicalize(key), value)
    }

    /// Returns the value stored under any permutation of `key`.
    pub fn get<T: IntoIterator<Item = E>>(&self, key: T) -> Option<&V> {
        self.store.get(&Self::canonicalize(key))
    }

    /// Returns the value stored under any permutation of `key`, or
    /// [`RelsetError::MissingKey`].
    pub fn try_get<T: IntoIterator<Item = E>>(&self, key: T) -> Result<&V, RelsetError> {
        let canonical = Self::canonicalize(key);
        self.store
            .get(&canonical)
            .ok_or_else(|| RelsetError::MissingKey(format!("{canonical:?}")))
    }

    /// Removes the entry stored under any permutation of `key`.
    pub fn remove<T: IntoIterator<Item = E>>(&mut self, key: T) -> Option<V> {
        self.store.remove(&Self::canonicalize(key))
    }

    /// Whether any permutation of `key` has an entry.
    pub fn contains_key<T: IntoIterator<Item = E>>(&self, key: T) -> bool {
        self.store.contains_key(&Self::canonicalize(key))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Iterates over (canonical key, value) pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, Vec<E>, V> {
        self.store.iter()
    }

    /// Iterates over the canonical keys.
    pub fn keys(&self) -> hash_map::Keys<'_, Vec<E>, V> {
        self.store.keys()
    }

    /// Iterates over the values.
    pub fn values(&self) -> hash_map::Values<'_, Vec<E>, V> {
        self.store.values()
    }
}

impl<E, V> PartialEq for CanonicalKeyMap<E, V>
where
    E: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl<E, V> Eq for CanonicalKeyMap<E, V>
where
    E: Eq + Hash,
    V: Eq,
{
}

impl<E, V, T> FromIterator<(T, V)> for CanonicalKeyMap<E, V>
where
    E: Eq + Hash + Ord + fmt::Debug,
    T: IntoIterator<Item = E>,
{
    fn from_iter<It: IntoIterator<Item = (T, V)>>(iter: It) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<E, V, T> Extend<(T, V)> for CanonicalKeyMap<E, V>
where
    E: Eq + Hash + Ord + fmt::Debug,
    T: IntoIterator<Item = E>,
{
    fn extend<It: IntoIterator<Item = (T, V)>>(&mut self, iter: It) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, E, V> IntoIterator for &'a CanonicalKeyMap<E, V> {
    type Item = (&'a Vec<E>, &'a V);
    type IntoIter = hash_map::Iter<'a, Vec<E>, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}

impl<E, V> IntoIterator for CanonicalKeyMap<E, V> {
    type Item = (Vec<E>, V);
    type IntoIter = hash_map::IntoIter<Vec<E>, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_iter()
    }
}

/// Serialized as a sequence of (key, value) pairs; composite keys do not
/// fit formats that restrict map keys to strings.
impl<E, V> Serialize for CanonicalKeyMap<E, V>
where
    E: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.store.iter())
    }
}

/// Deserialized keys are re-canonicalized, so hand-edited or foreign data
/// with unsorted keys still lands on canonical entries.
impl<'de, E, V> Deserialize<'de> for CanonicalKeyMap<E, V>
where
    E: Deserialize<'de> + Eq + Hash + Ord + fmt::Debug,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(Vec<E>, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod canonical_tests {
    use super::CanonicalKeyMap;
    use crate::error::RelsetError;

    #[test]
    fn permutations_resolve_to_the_same_entry() {
        let mut map = CanonicalKeyMap::new();
        map.insert([2, 1, 3], "x");
        assert_eq!(map.get([1, 2, 3]), Some(&"x"));
        assert_eq!(map.get([3, 2, 1]), Some(&"x"));
        assert!(map.contains_key([2, 3, 1]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insertion_under_a_permutation_overwrites() {
        let mut map = CanonicalKeyMap::new();
        map.insert(["a", "b"], 1);
        let displaced = map.insert(["b", "a"], 2);
        assert_eq!(displaced, Some(1));
        assert_eq!(map.get(["a", "b"]), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn removal_accepts_any_permutation() {
        let mut map = CanonicalKeyMap::new();
        map.insert([1, 2], "x");
        assert_eq!(map.remove([2, 1]), Some("x"));
        assert!(map.is_empty());
        assert_eq!(map.remove([1, 2]), None);
    }

    #[test]
    fn try_get_reports_missing_canonical_key() {
        let map: CanonicalKeyMap<u32, &str> = CanonicalKeyMap::new();
        assert!(matches!(
            map.try_get([1, 2]),
            Err(RelsetError::MissingKey(_))
        ));
    }

    #[test]
    fn construction_canonicalizes_each_pair_independently() {
        let map: CanonicalKeyMap<u32, &str> =
            [(vec![2, 1], "first"), (vec![1, 2], "second"), (vec![3, 1], "other")]
                .into_iter()
                .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get([1, 2]), Some(&"second"));
        assert_eq!(map.get([1, 3]), Some(&"other"));
    }

    #[test]
    fn iteration_yields_canonical_keys() {
        let mut map = CanonicalKeyMap::new();
        map.insert([3, 1], ());
        map.insert([9, 4], ());
        let mut keys: Vec<Vec<u32>> = map.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec![vec![1, 3], vec![4, 9]]);
    }

    #[test]
    fn serde_round_trip_preserves_entries() {
        let mut map = CanonicalKeyMap::new();
        map.insert([2u32, 1], 10i64);
        let encoded = serde_json::to_vec(&map).unwrap();
        let decoded: CanonicalKeyMap<u32, i64> = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, map);
    }
}
