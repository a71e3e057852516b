/*!
 * Text Buffers
 *
 * Byte storage behind every [`Text`](super::Text) view. Two states, chosen
 * at construction and fixed for the buffer's lifetime:
 *
 * - **Static**: `'static` data (string literals). Cloning and dropping touch
 *   no counter and the bytes are never freed.
 * - **Counted**: a [`SharedArray<u8>`] whose count starts at 1 and frees the
 *   block when the last reference is dropped.
 *
 * The "immortal" behaviour is a property of the variant, not of a magic
 * count value.
 */

use tracing::trace;

use crate::core::limits::MAX_TEXT_SIZE;
use crate::core::{KlError, KlResult};
use crate::memory::SharedArray;

#[derive(Clone)]
pub enum TextBuffer {
    Static(&'static [u8]),
    Counted(SharedArray<u8>),
}

impl TextBuffer {
    /// The canonical empty buffer
    pub const EMPTY: TextBuffer = TextBuffer::Static(b"");

    /// Buffer over compile-time data
    #[inline]
    pub const fn literal(text: &'static str) -> Self {
        TextBuffer::Static(text.as_bytes())
    }

    /// Copy `bytes` into a freshly counted buffer
    ///
    /// Empty and oversized payloads are rejected; callers map empty input to
    /// [`TextBuffer::EMPTY`] themselves.
    pub fn allocate(bytes: &[u8]) -> KlResult<Self> {
        if bytes.is_empty() {
            return Err(KlError::invalid_input_data("0", "payload size > 0"));
        }
        if bytes.len() > MAX_TEXT_SIZE {
            return Err(KlError::invalid_input_data(
                &bytes.len().to_string(),
                "payload size <= i32::MAX",
            ));
        }
        trace!(bytes = bytes.len(), "text buffer allocated");
        Ok(TextBuffer::Counted(SharedArray::from_slice(bytes)))
    }

    /// Payload size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TextBuffer::Static(bytes) => bytes,
            TextBuffer::Counted(array) => array.as_slice(),
        }
    }

    #[inline]
    pub fn is_immortal(&self) -> bool {
        matches!(self, TextBuffer::Static(_))
    }

    /// Live references to a counted buffer; `None` for static data
    #[inline]
    pub fn ref_count(&self) -> Option<usize> {
        match self {
            TextBuffer::Static(_) => None,
            TextBuffer::Counted(array) => Some(array.ref_count()),
        }
    }

    /// Whether both buffers are the same storage (not merely equal bytes)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextBuffer::Static(a), TextBuffer::Static(b)) => {
                a.as_ptr() == b.as_ptr() && a.len() == b.len()
            }
            (TextBuffer::Counted(a), TextBuffer::Counted(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Default for TextBuffer {
    #[inline]
    fn default() -> Self {
        TextBuffer::EMPTY
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.ref_count() {
            None => "immortal".to_string(),
            Some(refs) => format!("refs={}", refs),
        };
        write!(
            f,
            "TextBuffer({}, {:?})",
            state,
            String::from_utf8_lossy(self.as_bytes())
        )
    }
}
