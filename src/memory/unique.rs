/*!
 * Exclusive Ownership Pointers
 *
 * Single-owner handles to one heap allocation. Ownership moves, never copies.
 * The destruction strategy runs at most once: the pointer is cleared before
 * the strategy is invoked, so repeated `reset` calls and the final drop
 * cannot reach it twice.
 *
 * # Example
 *
 * ```ignore
 * let mut ptr = make_ptr(Widget::new());
 * ptr.value()?.draw();
 * ptr.reset();                       // Widget dropped here
 * assert!(ptr.value().is_err());     // NullReference
 * ```
 */

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use super::deleter::{DefaultDeleter, Deleter};
use crate::core::{resolve_strict, Index, KlError, KlResult};

/// Exclusive owner of a single heap value
pub struct UniquePtr<T: ?Sized, D: Deleter<T> = DefaultDeleter> {
    ptr: Option<NonNull<T>>,
    deleter: D,
    _owns: PhantomData<T>,
}

// SAFETY: exclusive ownership, same reasoning as Box
unsafe impl<T: ?Sized + Send, D: Deleter<T> + Send> Send for UniquePtr<T, D> {}
unsafe impl<T: ?Sized + Sync, D: Deleter<T> + Sync> Sync for UniquePtr<T, D> {}

impl<T> UniquePtr<T> {
    /// Box `value` and take ownership of it
    #[inline]
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }
}

impl<T: ?Sized> UniquePtr<T> {
    #[inline]
    pub fn from_box(boxed: Box<T>) -> Self {
        Self {
            ptr: Some(NonNull::from(Box::leak(boxed))),
            deleter: DefaultDeleter,
            _owns: PhantomData,
        }
    }

    /// Hand the value back as a `Box`, leaving nothing to destroy
    pub fn into_box(mut self) -> Option<Box<T>> {
        // SAFETY: DefaultDeleter pointers always come from Box::leak
        self.release().map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> UniquePtr<T, D> {
    #[inline]
    pub fn null() -> Self {
        Self::null_with(D::default())
    }

    /// Adopt a raw allocation; a null `ptr` yields an empty pointer
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be exclusively owned and destroyable by `D`.
    #[inline]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self::from_raw_with(ptr, D::default())
    }

    /// Move ownership out, leaving this pointer empty
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }
}

impl<T: ?Sized, D: Deleter<T>> UniquePtr<T, D> {
    #[inline]
    pub fn null_with(deleter: D) -> Self {
        Self {
            ptr: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// # Safety
    ///
    /// A non-null `ptr` must be exclusively owned and destroyable by `deleter`.
    #[inline]
    pub unsafe fn from_raw_with(ptr: *mut T, deleter: D) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    #[inline]
    pub fn as_non_null(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    #[inline]
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Shared access to the owned value
    #[inline]
    pub fn value(&self) -> KlResult<&T> {
        match self.ptr {
            // SAFETY: a held pointer is live and exclusively ours
            Some(ptr) => Ok(unsafe { ptr.as_ref() }),
            None => Err(KlError::NullReference),
        }
    }

    #[inline]
    pub fn value_mut(&mut self) -> KlResult<&mut T> {
        match self.ptr {
            // SAFETY: a held pointer is live and exclusively ours
            Some(mut ptr) => Ok(unsafe { ptr.as_mut() }),
            None => Err(KlError::NullReference),
        }
    }

    /// Give up ownership without running the destruction strategy
    #[inline]
    #[must_use = "the released allocation leaks unless it is destroyed"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Destroy the owned value, if any; idempotent
    pub fn reset(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: the pointer was owned and is no longer reachable from self
            unsafe { self.deleter.delete(ptr) };
        }
    }

    /// Destroy the current value and adopt `other`'s allocation
    pub fn replace(&mut self, other: Self) {
        *self = other;
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + fmt::Debug, D: Deleter<T>> fmt::Debug for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(value) => f.debug_tuple("UniquePtr").field(&value).finish(),
            Err(_) => f.write_str("UniquePtr(null)"),
        }
    }
}

/// Box `value` into a fresh [`UniquePtr`]
#[inline]
pub fn make_ptr<T>(value: T) -> UniquePtr<T> {
    UniquePtr::new(value)
}

/// Exclusive owner of a heap array with strictly bounds-checked indexing
pub struct UniqueArrayPtr<T, D: Deleter<[T]> = DefaultDeleter> {
    inner: UniquePtr<[T], D>,
}

impl<T> UniqueArrayPtr<T> {
    #[inline]
    pub fn from_box(values: Box<[T]>) -> Self {
        Self {
            inner: UniquePtr::from_box(values),
        }
    }
}

impl<T, D: Deleter<[T]> + Default> UniqueArrayPtr<T, D> {
    #[inline]
    pub fn null() -> Self {
        Self {
            inner: UniquePtr::null(),
        }
    }

    /// Adopt `len` values starting at `ptr`
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must own `len` initialized values destroyable by `D`.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        let ptr = if ptr.is_null() {
            ptr::null_mut::<[T; 0]>() as *mut [T]
        } else {
            ptr::slice_from_raw_parts_mut(ptr, len)
        };
        Self {
            inner: UniquePtr::from_raw(ptr),
        }
    }

    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }
}

impl<T, D: Deleter<[T]>> UniqueArrayPtr<T, D> {
    /// Number of owned elements; 0 once released or reset
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.as_non_null().map_or(0, |ptr| ptr.len())
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.inner.is_null()
    }

    #[inline]
    pub fn as_slice(&self) -> KlResult<&[T]> {
        self.inner.value()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> KlResult<&mut [T]> {
        self.inner.value_mut()
    }

    /// Element at exactly `index`; negative values are out of range
    pub fn get(&self, index: Index) -> KlResult<&T> {
        let values = self.inner.value()?;
        let position = resolve_strict(index, values.len())?;
        Ok(&values[position])
    }

    pub fn get_mut(&mut self, index: Index) -> KlResult<&mut T> {
        let values = self.inner.value_mut()?;
        let position = resolve_strict(index, values.len())?;
        Ok(&mut values[position])
    }

    #[inline]
    #[must_use = "the released allocation leaks unless it is destroyed"]
    pub fn release(&mut self) -> Option<NonNull<[T]>> {
        self.inner.release()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[inline]
    pub fn replace(&mut self, other: Self) {
        self.inner.replace(other.inner);
    }
}

impl<T, D: Deleter<[T]> + Default> Default for UniqueArrayPtr<T, D> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Vec<T>> for UniqueArrayPtr<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_box(values.into_boxed_slice())
    }
}

impl<T: fmt::Debug, D: Deleter<[T]>> fmt::Debug for UniqueArrayPtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice() {
            Ok(values) => f.debug_tuple("UniqueArrayPtr").field(&values).finish(),
            Err(_) => f.write_str("UniqueArrayPtr(null)"),
        }
    }
}

/// `len` default-constructed values in a fresh [`UniqueArrayPtr`]
pub fn make_array_ptr<T: Default>(len: usize) -> UniqueArrayPtr<T> {
    UniqueArrayPtr::from_box((0..len).map(|_| T::default()).collect())
}
