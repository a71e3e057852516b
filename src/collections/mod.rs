/*!
 * Collections
 * Ordered dictionary and set with Array-returning accessors
 */

mod dict;
mod set;

pub use dict::Dict;
pub use set::Set;
