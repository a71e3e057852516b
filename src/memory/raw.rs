/*!
 * Raw Slots
 *
 * Uninitialized, exclusively owned storage for `cap` values of `T`.
 * Construction and destruction of individual slots are explicit; the block
 * itself never drops its contents, only releases memory.
 */

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ptr::{self, NonNull};
use tracing::trace;

pub struct RawSlots<T> {
    ptr: NonNull<T>,
    cap: usize,
    _owns: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawSlots<T> {}
unsafe impl<T: Sync> Sync for RawSlots<T> {}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> RawSlots<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Empty storage; no allocation
    #[inline]
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate room for `cap` values, all slots uninitialized
    ///
    /// Allocation failure is fatal and routed through `handle_alloc_error`.
    pub fn allocate(cap: usize) -> Self {
        if cap == 0 {
            return Self::dangling();
        }
        if Self::IS_ZST {
            return Self {
                ptr: NonNull::dangling(),
                cap,
                _owns: PhantomData,
            };
        }

        let layout = Self::layout(cap);
        // SAFETY: layout has non-zero size
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = match NonNull::new(raw as *mut T) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        };
        trace!(cap, bytes = layout.size(), "slots allocated");

        Self {
            ptr,
            cap,
            _owns: PhantomData,
        }
    }

    #[inline]
    fn layout(cap: usize) -> Layout {
        match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Write `value` into slot `index`
    ///
    /// # Safety
    ///
    /// `index < capacity()` and the slot must not hold a live value.
    #[inline]
    pub unsafe fn construct(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        ptr::write(self.ptr.as_ptr().add(index), value);
    }

    /// Move the value out of slot `index`, leaving it uninitialized
    ///
    /// # Safety
    ///
    /// The slot must hold a live value.
    #[inline]
    pub unsafe fn take(&mut self, index: usize) -> T {
        debug_assert!(index < self.cap);
        ptr::read(self.ptr.as_ptr().add(index))
    }

    /// Drop the values in slots `[start, end)` in order
    ///
    /// # Safety
    ///
    /// Every slot in the range must hold a live value.
    #[inline]
    pub unsafe fn destroy_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.cap);
        let first = self.ptr.as_ptr().add(start);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, end - start));
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must hold live values.
    #[inline]
    pub unsafe fn slice(&self, len: usize) -> &[T] {
        std::slice::from_raw_parts(self.ptr.as_ptr(), len)
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must hold live values.
    #[inline]
    pub unsafe fn slice_mut(&mut self, len: usize) -> &mut [T] {
        std::slice::from_raw_parts_mut(self.ptr.as_ptr(), len)
    }

    /// Move the first `len` live values into a fresh block of `new_cap` slots
    ///
    /// The new block is fully populated before the old one is released, and a
    /// Rust move is a bitwise copy that cannot fail, so no interleaving of moved
    /// and destroyed values is ever observable.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must hold live values and `len <= new_cap`.
    pub unsafe fn relocate(&mut self, len: usize, new_cap: usize) {
        debug_assert!(len <= self.cap && len <= new_cap);
        let fresh = Self::allocate(new_cap);
        ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), len);
        trace!(len, from = self.cap, to = new_cap, "slots relocated");
        // Old block is released without touching the moved-out values
        drop(mem::replace(self, fresh));
    }

    fn release_block(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            let layout = Self::layout(self.cap);
            // SAFETY: ptr was obtained from `alloc` with this exact layout
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            trace!(cap = self.cap, "slots released");
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> RawSlots<MaybeUninit<T>> {
    /// Reinterpret uninitialized slots as slots of `T`
    ///
    /// `MaybeUninit<T>` has the layout of `T`, so the block is released with
    /// the same layout it was allocated with.
    #[inline]
    pub fn into_init(self) -> RawSlots<T> {
        let this = ManuallyDrop::new(self);
        RawSlots {
            ptr: this.ptr.cast::<T>(),
            cap: this.cap,
            _owns: PhantomData,
        }
    }
}

impl<T> Drop for RawSlots<T> {
    fn drop(&mut self) {
        self.release_block();
    }
}
