/*!
 * Growable Array
 *
 * Contiguous, exclusively owned storage with amortized O(1) append.
 *
 * # Layout
 *
 * Slots `[0, len)` hold live values, `[len, capacity)` are uninitialized.
 * `len <= capacity` holds after every operation. Capacity only grows.
 *
 * # Growth
 *
 * A full array grows by `max(capacity, max(MIN_GROWTH, needed - capacity))`
 * slots: 8 on the first push, doubling afterwards, and more when a single
 * bulk append needs it.
 *
 * # Construction
 *
 * | Constructor           | len | capacity | slots            |
 * |-----------------------|-----|----------|------------------|
 * | `new`                 | 0   | 0        | no allocation    |
 * | `build`/`build_with`  | n   | n        | constructed      |
 * | `new_uninit`          | n   | n        | `MaybeUninit<T>` |
 * | `with_capacity`       | 0   | n        | uninitialized    |
 * | `from([..])`          | n   | n        | moved in         |
 */

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Index as IndexOp, IndexMut};
use std::ptr;
use std::slice;

use super::cursor::Cursor;
use super::raw::{capacity_overflow, RawSlots};
use crate::core::limits::MIN_GROWTH;
use crate::core::{resolve_strict, Addressing, Index, KlResult};

pub struct Array<T> {
    slots: RawSlots<T>,
    len: usize,
}

impl<T> Array<T> {
    /// Empty array without any allocation
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: RawSlots::dangling(),
            len: 0,
        }
    }

    /// Empty array with room for `capacity` values
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: RawSlots::allocate(capacity),
            len: 0,
        }
    }

    /// `len` values produced by `f(position)`, capacity exactly `len`
    pub fn build_with<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut array = Self::with_capacity(len);
        for position in 0..len {
            // SAFETY: capacity is `len` and slot `position` is past the live prefix
            unsafe { array.slots.construct(position, f(position)) };
            array.len += 1;
        }
        array
    }

    /// `len` uninitialized slots, all counted as live `MaybeUninit<T>` values
    ///
    /// Write every slot, then call [`Array::assume_init`].
    pub fn new_uninit(len: usize) -> Array<MaybeUninit<T>> {
        Array {
            slots: RawSlots::allocate(len),
            len,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of live values (same as [`Array::len`])
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of allocated slots (same as [`Array::capacity`])
    #[inline(always)]
    pub fn reserved(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are live
        unsafe { self.slots.slice(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [0, len) are live
        unsafe { self.slots.slice_mut(self.len) }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Element at `index`; negative values count back from the end
    #[inline]
    pub fn get(&self, index: Index) -> KlResult<&T> {
        let position = self.resolve(Addressing::Relative, index)?;
        Ok(&self.as_slice()[position])
    }

    #[inline]
    pub fn get_mut(&mut self, index: Index) -> KlResult<&mut T> {
        let position = self.resolve(Addressing::Relative, index)?;
        Ok(&mut self.as_mut_slice()[position])
    }

    /// Element at exactly `index`; negative values are out of range
    #[inline]
    pub fn at(&self, index: Index) -> KlResult<&T> {
        let position = self.resolve(Addressing::Strict, index)?;
        Ok(&self.as_slice()[position])
    }

    #[inline]
    pub fn at_mut(&mut self, index: Index) -> KlResult<&mut T> {
        let position = self.resolve(Addressing::Strict, index)?;
        Ok(&mut self.as_mut_slice()[position])
    }

    /// Slot position of `index` under `addressing`
    #[inline]
    pub fn resolve(&self, addressing: Addressing, index: Index) -> KlResult<usize> {
        addressing.resolve(index, self.len)
    }

    /// Cursor on the first position
    #[inline]
    pub fn first(&self) -> Cursor {
        Cursor::new(0)
    }

    /// Cursor on the last position (`-1` when empty, hence never valid)
    #[inline]
    pub fn last(&self) -> Cursor {
        Cursor::new(self.len as Index - 1)
    }

    /// Whether `cursor` designates a live element right now
    #[inline]
    pub fn valid(&self, cursor: Cursor) -> bool {
        resolve_strict(cursor.position(), self.len).is_ok()
    }

    #[inline]
    pub fn get_at(&self, cursor: Cursor) -> KlResult<&T> {
        self.at(cursor.position())
    }

    #[inline]
    pub fn get_at_mut(&mut self, cursor: Cursor) -> KlResult<&mut T> {
        self.at_mut(cursor.position())
    }

    /// Append `value`, growing when full
    pub fn push(&mut self, value: T) {
        self.grow_for(1);
        // SAFETY: grow_for guarantees len < capacity
        unsafe { self.slots.construct(self.len, value) };
        self.len += 1;
    }

    /// Append the value produced by `make`, constructed directly in its slot
    ///
    /// Growth happens before `make` runs, so a panicking `make` leaves the
    /// array's contents untouched.
    pub fn emplace_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.grow_for(1);
        let position = self.len;
        // SAFETY: grow_for guarantees position < capacity
        unsafe { self.slots.construct(position, make()) };
        self.len += 1;
        &mut self.as_mut_slice()[position]
    }

    /// Ensure room for exactly `capacity` values; never shrinks
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            // SAFETY: [0, len) are live and len <= capacity
            unsafe { self.slots.relocate(self.len, capacity) };
        }
    }

    /// Remove and return the last value
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now past len
        Some(unsafe { self.slots.take(self.len) })
    }

    /// Remove the value at `index` (relative), shifting the tail left
    pub fn remove_at(&mut self, index: Index) -> KlResult<T> {
        let position = self.resolve(Addressing::Relative, index)?;
        // SAFETY: position < len; the tail move keeps [0, len - 1) live
        unsafe {
            let value = self.slots.take(position);
            let base = self.slots.as_ptr();
            ptr::copy(base.add(position + 1), base.add(position), self.len - position - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Drop every value, keeping the allocation
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: [0, len) were live; len is already 0 so a panicking drop leaks instead of double-dropping
        unsafe { self.slots.destroy_range(0, len) };
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Remove every value equal to `value`, keeping the order of the rest
    ///
    /// Returns how many values were removed.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.len;
        self.retain(|item| item != value);
        before - self.len
    }

    /// Remove up to `count` values starting at `position`
    ///
    /// The range is clamped to the end; a `position` past the end removes nothing.
    pub fn remove_range(&mut self, position: usize, count: usize) {
        if position >= self.len || count == 0 {
            return;
        }
        let end = position.saturating_add(count).min(self.len);
        let tail = self.len - end;
        // A panicking drop leaks the tail rather than dropping it twice
        self.len = position;
        // SAFETY: [position, end) are live and dropped once; the tail is moved down into them
        unsafe {
            self.slots.destroy_range(position, end);
            let base = self.slots.as_ptr();
            ptr::copy(base.add(end), base.add(position), tail);
        }
        self.len = position + tail;
    }

    /// Keep only the values for which `keep` returns true, in order
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = mem::replace(&mut self.len, 0);
        let base = self.slots.as_ptr();
        let mut kept = 0;
        for position in 0..len {
            // SAFETY: slots [position, len) are still live, [0, kept) hold the survivors;
            // with len at 0 a panic leaks the unvisited values instead of double-dropping
            unsafe {
                let slot = base.add(position);
                if keep(&*slot) {
                    if kept != position {
                        ptr::copy_nonoverlapping(slot, base.add(kept), 1);
                    }
                    kept += 1;
                } else {
                    ptr::drop_in_place(slot);
                }
            }
        }
        self.len = kept;
    }

    /// Whether `pred` holds for every value (true when empty)
    #[inline]
    pub fn all<F: FnMut(&T) -> bool>(&self, pred: F) -> bool {
        self.iter().all(pred)
    }

    /// Whether `pred` holds for at least one value
    #[inline]
    pub fn any<F: FnMut(&T) -> bool>(&self, pred: F) -> bool {
        self.iter().any(pred)
    }

    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.as_mut_slice().sort_by(compare);
        self
    }

    /// Ascending stable sort; returns `self` for chaining
    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.as_mut_slice().sort();
        self
    }

    /// Grow, if full, so that `additional` more values fit
    fn grow_for(&mut self, additional: usize) {
        let needed = match self.len.checked_add(additional) {
            Some(needed) => needed,
            None => capacity_overflow(),
        };
        let capacity = self.capacity();
        if needed <= capacity {
            return;
        }
        let step = capacity.max(MIN_GROWTH.max(needed - capacity));
        let new_capacity = match capacity.checked_add(step) {
            Some(new_capacity) => new_capacity,
            None => capacity_overflow(),
        };
        // SAFETY: [0, len) are live and len < new_capacity
        unsafe { self.slots.relocate(self.len, new_capacity) };
    }
}

impl<T: Clone> Array<T> {
    /// Copies of the values for which `pred` holds
    pub fn select<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| pred(value)).cloned().collect()
    }

    /// `len` copies of `value`, capacity exactly `len`
    pub fn build(len: usize, value: T) -> Self {
        Self::build_with(len, |_| value.clone())
    }

    /// Copy of `values`, capacity exactly `values.len()`
    pub fn from_slice(values: &[T]) -> Self {
        Self::build_with(values.len(), |position| values[position].clone())
    }

    /// Append clones of `values` using at most one growth step
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.grow_for(values.len());
        for value in values {
            // SAFETY: grow_for reserved room for every value
            unsafe { self.slots.construct(self.len, value.clone()) };
            self.len += 1;
        }
    }
}

impl<T: Default> Array<T> {
    /// `len` default-constructed values
    pub fn build_default(len: usize) -> Self {
        Self::build_with(len, |_| T::default())
    }
}

impl<T> Array<MaybeUninit<T>> {
    /// Reinterpret the array as holding initialized values
    ///
    /// # Safety
    ///
    /// Every slot in `[0, len)` must have been written.
    pub unsafe fn assume_init(self) -> Array<T> {
        let this = ManuallyDrop::new(self);
        let slots = ptr::read(&this.slots);
        Array {
            slots: slots.into_init(),
            len: this.len,
        }
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live; the block is released by RawSlots
        unsafe { self.slots.destroy_range(0, self.len) };
    }
}

impl<T> Default for Array<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T> AsRef<[T]> for Array<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Array<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Hash> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> IndexOp<Index> for Array<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: Index) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<Index> for Array<T> {
    #[track_caller]
    fn index_mut(&mut self, index: Index) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexOp<Cursor> for Array<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, cursor: Cursor) -> &T {
        match self.get_at(cursor) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<Cursor> for Array<T> {
    #[track_caller]
    fn index_mut(&mut self, cursor: Cursor) -> &mut T {
        match self.get_at_mut(cursor) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        for value in values {
            array.push(value);
        }
        array
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.grow_for(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: ownership of the slots moves into the iterator
        let slots = unsafe { ptr::read(&this.slots) };
        IntoIter {
            slots,
            head: 0,
            tail: this.len,
        }
    }
}

/// Owning iterator over the values of an [`Array`]
pub struct IntoIter<T> {
    slots: RawSlots<T>,
    head: usize,
    tail: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: [head, tail) are live
        let value = unsafe { self.slots.take(self.head) };
        self.head += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        // SAFETY: [head, tail] were live
        Some(unsafe { self.slots.take(self.tail) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: [head, tail) are still live
        unsafe { self.slots.destroy_range(self.head, self.tail) };
    }
}
