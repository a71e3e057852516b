/*!
 * kl-core Library
 * Memory-management primitives and the thin layers built on them
 *
 * - [`memory`]: growable arrays, cursors, unique and shared ownership handles
 * - [`text`]: shared byte-text buffers with zero-copy views
 * - [`collections`]: ordered dictionary and set
 * - [`cli`]: argument registry with help rendering
 * - [`monitoring`]: tracing setup
 */

pub mod cli;
pub mod collections;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod text;

// Re-exports
pub use crate::core::{ErrorKind, Index, KlError, KlResult};
pub use cli::{Argument, ArgumentParser};
pub use collections::{Dict, Set};
pub use memory::{
    make_array_ptr, make_mutable_shareable, make_ptr, make_shareable, Array, Cursor, Shared,
    SharedArray, SharedMut, UniqueArrayPtr, UniquePtr,
};
pub use monitoring::{init_tracing, span_operation};
pub use text::{Text, TextBuffer};
