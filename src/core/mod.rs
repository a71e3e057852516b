/*!
 * Core Module
 * Error taxonomy, index resolution and compile-time limits
 */

pub mod errors;
pub mod index;
pub mod limits;

// Re-export for convenience
pub use errors::*;
pub use index::{resolve_relative, resolve_strict, Addressing, Index};
