/*!
 * Memory Module
 * Hand-built ownership and allocation primitives
 *
 * - **Array**: growable contiguous storage with relative and strict indexing
 * - **Cursor**: stable position into an Array, checked on demand
 * - **UniquePtr / UniqueArrayPtr**: exclusive ownership with a pluggable destruction strategy
 * - **Shared / SharedMut**: reference-counted handles over an `RcCell`
 * - **SharedArray**: reference-counted array in a single header+elements block
 *
 * # Threading
 *
 * Reference counts are plain integers. Every counted handle is `!Send + !Sync`,
 * so sharing across threads is rejected at compile time.
 */

mod array;
mod cursor;
mod deleter;
mod raw;
mod rc_cell;
mod shared;
mod shared_array;
mod unique;

pub use array::{Array, IntoIter};
pub use cursor::Cursor;
pub use deleter::{DefaultDeleter, Deleter, FnDeleter};
pub use raw::RawSlots;
pub use rc_cell::RcCell;
pub use shared::{make_mutable_shareable, make_shareable, Shared, SharedMut};
pub use shared_array::SharedArray;
pub use unique::{make_array_ptr, make_ptr, UniqueArrayPtr, UniquePtr};
