/*!
 * Ordered Dictionary
 * Key-ordered map; lookups of absent keys fail with `KeyNotFound`
 */

use std::borrow::Borrow;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::core::{KlError, KlResult};
use crate::memory::Array;

#[derive(Clone, PartialEq, Eq)]
pub struct Dict<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Dict<K, V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build from key/value pairs; later pairs overwrite earlier ones
    pub fn from_pairs(pairs: Array<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Insert or overwrite
    #[inline]
    pub fn add(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    pub fn get<Q>(&self, key: &Q) -> KlResult<&V>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.entries
            .get(key)
            .ok_or_else(|| KlError::key_not_found(key))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> KlResult<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.entries
            .get_mut(key)
            .ok_or_else(|| KlError::key_not_found(key))
    }

    /// Value for `key`, or `fallback` when absent
    pub fn get_or<'a, Q>(&'a self, key: &Q, fallback: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key).unwrap_or(fallback)
    }

    #[inline]
    pub fn get_opt<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    /// Remove `key`; absent keys are ignored
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.remove(key)
    }

    #[inline]
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, K, V> {
        self.entries.iter_mut()
    }
}

impl<K: Ord + Clone, V> Dict<K, V> {
    /// Keys in ascending order
    pub fn keys(&self) -> Array<K> {
        let mut keys = Array::with_capacity(self.len());
        keys.extend(self.entries.keys().cloned());
        keys
    }
}

impl<K: Ord, V: Clone> Dict<K, V> {
    /// Values in key order
    pub fn values(&self) -> Array<V> {
        let mut values = Array::with_capacity(self.len());
        values.extend(self.entries.values().cloned());
        values
    }
}

impl<K: Ord, V> Default for Dict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Dict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a Dict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_add_overwrites() {
        let mut d = Dict::new();
        d.add("a", 1);
        d.add("a", 2);
        assert_eq!(d.len(), 1);
        assert_eq!(*d.get("a").unwrap(), 2);
    }

    #[test]
    fn test_missing_key() {
        let d: Dict<&str, i32> = Dict::new();
        let err = d.get("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(err.to_string().contains("nope"));
        assert_eq!(*d.get_or("nope", &7), 7);
        assert!(d.get_opt("nope").is_none());
    }

    #[test]
    fn test_keys_values_ordered() {
        let d = Dict::from_pairs(Array::from([(3, 'c'), (1, 'a'), (2, 'b')]));
        assert_eq!(d.keys().as_slice(), &[1, 2, 3]);
        assert_eq!(d.values().as_slice(), &['a', 'b', 'c']);
    }
}
