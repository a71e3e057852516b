/*!
 * Positional Cursor
 *
 * A plain position into an indexable container. Cursors never borrow the
 * container, so they survive reallocation; whether a cursor still designates
 * a live element must be asked of the container (`valid`).
 */

use crate::core::Index;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    position: Index,
}

impl Cursor {
    #[inline]
    pub const fn new(position: Index) -> Self {
        Self { position }
    }

    #[inline(always)]
    pub const fn position(&self) -> Index {
        self.position
    }

    /// Move one step toward the end
    #[inline]
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Move one step toward the start
    #[inline]
    pub fn retreat(&mut self) {
        self.position -= 1;
    }

    /// Cursor `delta` positions away from this one
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: Index) -> Self {
        Self::new(self.position + delta)
    }
}

impl From<Index> for Cursor {
    #[inline]
    fn from(position: Index) -> Self {
        Self::new(position)
    }
}
