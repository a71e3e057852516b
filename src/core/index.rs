/*!
 * Index Resolution
 *
 * Single place where positions are validated against a container length.
 *
 * - **Relative**: a negative index counts back from the end (`-1` is the last element)
 * - **Strict**: the index is taken as an exact position, negatives are rejected
 *
 * Errors always report the index as the caller passed it, not the wrapped value.
 */

use super::errors::{KlError, KlResult};

/// Signed position type accepted by every indexable container
pub type Index = isize;

/// Addressing mode used to turn an [`Index`] into a slot position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    Relative,
    Strict,
}

impl Addressing {
    #[inline]
    pub fn resolve(self, index: Index, len: usize) -> KlResult<usize> {
        match self {
            Addressing::Relative => resolve_relative(index, len),
            Addressing::Strict => resolve_strict(index, len),
        }
    }
}

/// Resolve `index` against `len`, wrapping one negative lap
#[inline]
pub fn resolve_relative(index: Index, len: usize) -> KlResult<usize> {
    if index < 0 {
        let back = index.unsigned_abs();
        if back <= len {
            return Ok(len - back);
        }
        return Err(KlError::out_of_range(index, len));
    }
    resolve_strict(index, len)
}

/// Resolve `index` against `len` without wrapping
#[inline]
pub fn resolve_strict(index: Index, len: usize) -> KlResult<usize> {
    if index >= 0 && (index as usize) < len {
        Ok(index as usize)
    } else {
        Err(KlError::out_of_range(index, len))
    }
}
