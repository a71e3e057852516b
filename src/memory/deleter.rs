/*!
 * Destruction Strategies
 *
 * A [`Deleter`] decides how an exclusively owned allocation is torn down.
 * Owners call it at most once per allocation.
 */

use std::ptr::NonNull;

pub trait Deleter<T: ?Sized> {
    /// Destroy the value behind `ptr` and release its memory
    ///
    /// # Safety
    ///
    /// `ptr` must be live, owned by the caller, and compatible with this
    /// strategy (e.g. produced by `Box::into_raw` for [`DefaultDeleter`]).
    unsafe fn delete(&mut self, ptr: NonNull<T>);
}

/// Drops the value as the `Box` it was allocated as
///
/// Works for single values and for slices (`Box<[T]>`) alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDeleter;

impl<T: ?Sized> Deleter<T> for DefaultDeleter {
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        drop(Box::from_raw(ptr.as_ptr()));
    }
}

/// Strategy backed by a closure
pub struct FnDeleter<F>(pub F);

impl<T: ?Sized, F> Deleter<T> for FnDeleter<F>
where
    F: FnMut(NonNull<T>),
{
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        (self.0)(ptr)
    }
}
