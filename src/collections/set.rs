/*!
 * Ordered Set
 */

use std::borrow::Borrow;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

use crate::memory::Array;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Set<T: Ord> {
    items: BTreeSet<T>,
}

impl<T: Ord> Set<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }

    /// Insert `value`; returns whether it was new
    #[inline]
    pub fn add(&mut self, value: T) -> bool {
        self.items.insert(value)
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.items.extend(values);
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.remove(value)
    }

    #[inline]
    pub fn has<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.contains(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Ord + Clone> Set<T> {
    /// Elements in ascending order
    pub fn to_array(&self) -> Array<T> {
        let mut out = Array::with_capacity(self.len());
        out.extend(self.items.iter().cloned());
        out
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Set<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T: Ord> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_order() {
        let mut s = Set::from([3, 1, 2]);
        assert!(!s.add(2));
        s.add_all(Array::from([5, 4]));
        assert_eq!(s.to_array().as_slice(), &[1, 2, 3, 4, 5]);
        assert!(s.remove(&1));
        assert!(!s.has(&1));
    }
}
