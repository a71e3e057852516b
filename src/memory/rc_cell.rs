/*!
 * Reference-Counted Cell
 *
 * One heap block pairing a plain (non-atomic) count with a value. The cell is
 * freed by the decrement that brings the count to zero or below.
 *
 * Counting is single-threaded by contract; handles built on this cell hold a
 * raw pointer and are therefore neither `Send` nor `Sync`.
 */

use std::cell::Cell;
use std::ptr::NonNull;
use tracing::trace;

pub struct RcCell<T> {
    count: Cell<isize>,
    value: T,
}

impl<T> RcCell<T> {
    /// Allocate a cell holding `value` with a count of 1
    pub fn allocate(value: T) -> NonNull<Self> {
        let cell = Box::new(RcCell {
            count: Cell::new(1),
            value,
        });
        NonNull::from(Box::leak(cell))
    }

    #[inline(always)]
    pub fn count(&self) -> isize {
        self.count.get()
    }

    #[inline(always)]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// # Safety
    ///
    /// The caller must be the only handle able to observe the value, and `'a`
    /// must not outlive that handle's borrow.
    #[inline(always)]
    pub unsafe fn value_mut<'a>(cell: NonNull<Self>) -> &'a mut T {
        &mut (*cell.as_ptr()).value
    }

    #[inline]
    pub fn retain(&self) {
        self.count.set(self.count.get() + 1);
    }

    /// Drop one reference; frees the cell when none remain
    ///
    /// Returns `true` when the cell was freed.
    ///
    /// # Safety
    ///
    /// `cell` must be live and the caller must own one of its references.
    pub unsafe fn release(cell: NonNull<Self>) -> bool {
        let remaining = {
            let this = cell.as_ref();
            this.count.set(this.count.get() - 1);
            this.count.get()
        };
        if remaining > 0 {
            return false;
        }
        drop(Box::from_raw(cell.as_ptr()));
        trace!("rc cell freed");
        true
    }
}
