/*!
 * Shared Array
 *
 * Reference-counted contiguous array living in a single allocation:
 *
 * ```text
 * [count: isize][len: usize][pad][T; len]
 * ```
 *
 * The block is raw memory, not a typed array allocation, so elements are
 * constructed in place on creation and destroyed one by one (in order) by
 * the release that brings the count to zero.
 *
 * A zero-length request yields the empty handle and allocates nothing.
 */

use std::alloc::{self, Layout};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ptr::{self, NonNull};
use std::slice;
use tracing::trace;

use super::raw::capacity_overflow;
use crate::core::{resolve_relative, Index, KlError, KlResult};

#[repr(C)]
struct ArrayHeader {
    count: Cell<isize>,
    len: usize,
}

/// Layout of the whole block and the byte offset of the first element
fn block_layout<T>(len: usize) -> (Layout, usize) {
    let items = match Layout::array::<T>(len) {
        Ok(items) => items,
        Err(_) => capacity_overflow(),
    };
    match Layout::new::<ArrayHeader>().extend(items) {
        Ok((layout, offset)) => (layout.pad_to_align(), offset),
        Err(_) => capacity_overflow(),
    }
}

/// Allocate a block for `len` elements with count 1; elements uninitialized
fn allocate_block<T>(len: usize) -> NonNull<ArrayHeader> {
    let (layout, _) = block_layout::<T>(len);
    // SAFETY: the header gives the layout a non-zero size
    let raw = unsafe { alloc::alloc(layout) } as *mut ArrayHeader;
    let header = match NonNull::new(raw) {
        Some(header) => header,
        None => alloc::handle_alloc_error(layout),
    };
    // SAFETY: freshly allocated and suitably aligned for the header
    unsafe {
        ptr::write(
            header.as_ptr(),
            ArrayHeader {
                count: Cell::new(1),
                len,
            },
        )
    };
    trace!(len, bytes = layout.size(), "shared array allocated");
    header
}

/// # Safety
///
/// `header` must be a live block allocated for elements of type `T`.
#[inline]
unsafe fn items_ptr<T>(header: NonNull<ArrayHeader>) -> *mut T {
    let (_, offset) = block_layout::<T>(header.as_ref().len);
    (header.as_ptr() as *mut u8).add(offset) as *mut T
}

/// Frees a partially constructed block if element construction panics
struct PartialInit<T> {
    header: NonNull<ArrayHeader>,
    done: usize,
    _marker: PhantomData<T>,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `done` leading elements were constructed
        unsafe {
            let items = items_ptr::<T>(self.header);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(items, self.done));
            let (layout, _) = block_layout::<T>(self.header.as_ref().len);
            alloc::dealloc(self.header.as_ptr() as *mut u8, layout);
        }
    }
}

pub struct SharedArray<T> {
    header: Option<NonNull<ArrayHeader>>,
    _marker: PhantomData<T>,
}

impl<T> SharedArray<T> {
    /// The empty handle
    #[inline]
    pub const fn null() -> Self {
        Self {
            header: None,
            _marker: PhantomData,
        }
    }

    /// `len` elements produced by `f(position)`, constructed in place
    pub fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        if len == 0 {
            return Self::null();
        }
        let mut guard = PartialInit::<T> {
            header: allocate_block::<T>(len),
            done: 0,
            _marker: PhantomData,
        };
        // SAFETY: the block holds `len` slots; each is written exactly once
        unsafe {
            let items = items_ptr::<T>(guard.header);
            while guard.done < len {
                ptr::write(items.add(guard.done), f(guard.done));
                guard.done += 1;
            }
        }
        let header = guard.header;
        mem::forget(guard);
        Self {
            header: Some(header),
            _marker: PhantomData,
        }
    }

    /// `len` uninitialized elements
    ///
    /// Write every element through [`SharedArray::as_mut_slice`], then call
    /// [`SharedArray::assume_init`].
    pub fn new_uninit(len: usize) -> SharedArray<MaybeUninit<T>> {
        if len == 0 {
            return SharedArray::null();
        }
        SharedArray {
            header: Some(allocate_block::<MaybeUninit<T>>(len)),
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.header.is_none()
    }

    /// Element count; 0 for the empty handle
    #[inline]
    pub fn len(&self) -> usize {
        // SAFETY: a held header is live
        self.header.map_or(0, |header| unsafe { header.as_ref() }.len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of handles sharing the block; 0 when empty
    #[inline]
    pub fn ref_count(&self) -> usize {
        // SAFETY: a held header is live
        self.header
            .map_or(0, |header| unsafe { header.as_ref() }.count.get().max(0) as usize)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.header {
            // SAFETY: all `len` elements are constructed while the block is live
            Some(header) => unsafe {
                slice::from_raw_parts(items_ptr::<T>(header), header.as_ref().len)
            },
            None => &[],
        }
    }

    /// Mutable view, granted only while this is the sole handle
    pub fn as_mut_slice(&mut self) -> KlResult<&mut [T]> {
        let header = self.unique_header("as_mut_slice")?;
        // SAFETY: count is 1, so no other handle can observe the elements
        Ok(unsafe { slice::from_raw_parts_mut(items_ptr::<T>(header), header.as_ref().len) })
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Element at `index`; negative values count back from the end
    pub fn get(&self, index: Index) -> KlResult<&T> {
        if self.header.is_none() {
            return Err(KlError::NullReference);
        }
        let values = self.as_slice();
        let position = resolve_relative(index, values.len())?;
        Ok(&values[position])
    }

    pub fn get_mut(&mut self, index: Index) -> KlResult<&mut T> {
        let values = self.as_mut_slice()?;
        let position = resolve_relative(index, values.len())?;
        Ok(&mut values[position])
    }

    /// Transfer the reference out, leaving this handle empty
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Drop this handle's reference; idempotent
    pub fn reset(&mut self) {
        if let Some(header) = self.header.take() {
            // SAFETY: this handle owned one reference to a live block
            unsafe { Self::release(header) };
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.header == other.header
    }

    fn unique_header(&self, op: &str) -> KlResult<NonNull<ArrayHeader>> {
        let header = self.header.ok_or(KlError::NullReference)?;
        // SAFETY: a held header is live
        if unsafe { header.as_ref() }.count.get() != 1 {
            return Err(KlError::operation_not_supported(
                op,
                "elements are shared with other handles",
            ));
        }
        Ok(header)
    }

    /// # Safety
    ///
    /// `header` must be live and the caller must own one of its references.
    unsafe fn release(header: NonNull<ArrayHeader>) {
        let (remaining, len) = {
            let h = header.as_ref();
            h.count.set(h.count.get() - 1);
            (h.count.get(), h.len)
        };
        if remaining > 0 {
            return;
        }
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(items_ptr::<T>(header), len));
        let (layout, _) = block_layout::<T>(len);
        alloc::dealloc(header.as_ptr() as *mut u8, layout);
        trace!(len, "shared array freed");
    }
}

impl<T: Default> SharedArray<T> {
    /// `len` default-constructed elements
    pub fn new(len: usize) -> Self {
        Self::from_fn(len, |_| T::default())
    }
}

impl<T: Clone> SharedArray<T> {
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_fn(values.len(), |position| values[position].clone())
    }
}

impl<T> SharedArray<MaybeUninit<T>> {
    /// # Safety
    ///
    /// Every element must have been written.
    pub unsafe fn assume_init(self) -> SharedArray<T> {
        let this = ManuallyDrop::new(self);
        SharedArray {
            header: this.header,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        if let Some(header) = self.header {
            // SAFETY: a held header is live
            let count = &unsafe { header.as_ref() }.count;
            count.set(count.get() + 1);
        }
        Self {
            header: self.header,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for SharedArray<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for SharedArray<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: PartialEq> PartialEq for SharedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SharedArray<T> {}

impl<T: fmt::Debug> fmt::Debug for SharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
