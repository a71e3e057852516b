/*!
 * Shared Ownership Handles
 *
 * Copyable references to an [`RcCell`]. The cell lives as long as the last
 * handle referencing it.
 *
 * - [`SharedMut`]: may be empty, reassigned, or moved out of (`take`)
 * - [`Shared`]: always references a cell; only cloning creates new holders,
 *   so every live instance observes the same value
 *
 * Neither handle is `Send` or `Sync`: counts are plain integers. Cycles
 * between handles are never collected and leak.
 */

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::Deref;
use std::ptr::NonNull;

use super::rc_cell::RcCell;
use crate::core::{KlError, KlResult};

/// Nullable, reassignable shared handle
pub struct SharedMut<T> {
    cell: Option<NonNull<RcCell<T>>>,
    _marker: PhantomData<RcCell<T>>,
}

impl<T> SharedMut<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            cell: Some(RcCell::allocate(value)),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn null() -> Self {
        Self {
            cell: None,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.cell.is_none()
    }

    /// Number of handles sharing the cell; 0 when empty
    #[inline]
    pub fn ref_count(&self) -> usize {
        // SAFETY: a held cell is live
        self.cell
            .map_or(0, |cell| unsafe { cell.as_ref() }.count().max(0) as usize)
    }

    #[inline]
    pub fn value(&self) -> KlResult<&T> {
        match self.cell {
            // SAFETY: a held cell is live while this handle exists
            Some(cell) => Ok(unsafe { cell.as_ref() }.value()),
            None => Err(KlError::NullReference),
        }
    }

    /// Mutable access, granted only while this is the sole handle
    pub fn value_mut(&mut self) -> KlResult<&mut T> {
        let cell = self.cell.ok_or(KlError::NullReference)?;
        // SAFETY: a held cell is live
        if unsafe { cell.as_ref() }.count() != 1 {
            return Err(KlError::operation_not_supported(
                "value_mut",
                "value is shared with other handles",
            ));
        }
        // SAFETY: count is 1, so no other handle can observe the value
        Ok(unsafe { RcCell::value_mut(cell) })
    }

    /// Transfer the reference out, leaving this handle empty; counts are untouched
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Release the current reference and share `other`'s cell instead
    pub fn assign(&mut self, other: &Self) {
        if self.ptr_eq(other) {
            return;
        }
        *self = other.clone();
    }

    /// Drop this handle's reference; idempotent
    pub fn reset(&mut self) {
        if let Some(cell) = self.cell.take() {
            // SAFETY: this handle owned one reference to a live cell
            unsafe { RcCell::release(cell) };
        }
    }

    /// Whether both handles reference the same cell (two empties compare equal)
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }
}

impl<T> Clone for SharedMut<T> {
    fn clone(&self) -> Self {
        if let Some(cell) = self.cell {
            // SAFETY: a held cell is live
            unsafe { cell.as_ref() }.retain();
        }
        Self {
            cell: self.cell,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for SharedMut<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for SharedMut<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Shared<T>> for SharedMut<T> {
    /// The reference held by `shared` moves over unchanged
    fn from(shared: Shared<T>) -> Self {
        let cell = shared.cell;
        mem::forget(shared);
        Self {
            cell: Some(cell),
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedMut<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(value) => f
                .debug_struct("SharedMut")
                .field("refs", &self.ref_count())
                .field("value", value)
                .finish(),
            Err(_) => f.write_str("SharedMut(null)"),
        }
    }
}

/// Never-null shared handle
///
/// There is no way to empty a `Shared`: no null constructor, no `take`, no
/// `reset`. A moved-from binding is statically unusable.
pub struct Shared<T> {
    cell: NonNull<RcCell<T>>,
    _marker: PhantomData<RcCell<T>>,
}

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            cell: RcCell::allocate(value),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn ref_count(&self) -> usize {
        self.cell_ref().count().max(0) as usize
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }

    #[inline(always)]
    fn cell_ref(&self) -> &RcCell<T> {
        // SAFETY: the cell stays live while any handle exists
        unsafe { self.cell.as_ref() }
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        self.cell_ref().value()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        self.cell_ref().retain();
        Self {
            cell: self.cell,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        // SAFETY: this handle owns one reference to a live cell
        unsafe { RcCell::release(self.cell) };
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("refs", &self.ref_count())
            .field("value", &**self)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// Allocate `value` behind a fresh [`Shared`]
#[inline]
pub fn make_shareable<T>(value: T) -> Shared<T> {
    Shared::new(value)
}

/// Allocate `value` behind a fresh [`SharedMut`]
#[inline]
pub fn make_mutable_shareable<T>(value: T) -> SharedMut<T> {
    SharedMut::new(value)
}
