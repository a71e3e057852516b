/*!
 * Text Views
 *
 * A [`Text`] is a `(buffer, start, end)` window over a [`TextBuffer`] with
 * `start <= end <= buffer.size()`. Several views may share one buffer;
 * `subtext` narrows the window without copying.
 *
 * Equality, ordering and hashing compare the viewed bytes, never buffer
 * identity: two texts built from different buffers with the same content
 * are equal.
 */

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use tracing::warn;

use super::buffer::TextBuffer;
use crate::core::limits::MAX_TEXT_SIZE;
use crate::core::{KlError, KlResult};

#[derive(Clone)]
pub struct Text {
    buffer: TextBuffer,
    start: usize,
    end: usize,
}

impl Text {
    /// The canonical empty text; allocates nothing
    #[inline]
    pub const fn new() -> Self {
        Self {
            buffer: TextBuffer::EMPTY,
            start: 0,
            end: 0,
        }
    }

    /// View over compile-time data; never counted, never freed
    #[inline]
    pub const fn literal(text: &'static str) -> Self {
        Self {
            buffer: TextBuffer::literal(text),
            start: 0,
            end: text.len(),
        }
    }

    /// Copy `bytes` into a new counted buffer (empty input gives the empty text)
    ///
    /// Oversized payloads fail with `InvalidInputData`; the `From` conversions
    /// truncate them instead.
    pub fn from_bytes_slice(bytes: &[u8]) -> KlResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        let buffer = TextBuffer::allocate(bytes)?;
        Ok(Self::from_buffer_owned(buffer))
    }

    /// First `len` bytes of `bytes`
    pub fn from_bytes(bytes: &[u8], len: usize) -> KlResult<Self> {
        match bytes.get(..len) {
            Some(prefix) => Self::from_bytes_slice(prefix),
            None => Err(KlError::invalid_input_data(
                &len.to_string(),
                &format!("length <= {}", bytes.len()),
            )),
        }
    }

    /// Bytes up to (not including) the first NUL, or all of them if there is none
    pub fn from_nul_terminated(bytes: &[u8]) -> KlResult<Self> {
        let len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Self::from_bytes_slice(&bytes[..len])
    }

    /// Copy of a C string; `None` (a null pointer) gives the empty text
    pub fn from_c_str(c_str: Option<&CStr>) -> KlResult<Self> {
        match c_str {
            Some(c_str) => Self::from_bytes_slice(c_str.to_bytes()),
            None => Ok(Self::new()),
        }
    }

    /// Full view of an existing buffer, taking a reference to it
    #[inline]
    pub fn from_buffer(buffer: &TextBuffer) -> Self {
        Self::from_buffer_owned(buffer.clone())
    }

    #[inline]
    fn from_buffer_owned(buffer: TextBuffer) -> Self {
        let end = buffer.size();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Number of viewed bytes
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_bytes()[self.start..self.end]
    }

    /// Viewed bytes as UTF-8
    pub fn to_str(&self) -> KlResult<&str> {
        std::str::from_utf8(self.as_bytes()).map_err(|e| {
            KlError::invalid_input_data(
                &format!("invalid UTF-8 at byte {}", e.valid_up_to()),
                "UTF-8 text",
            )
        })
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    pub fn is_immortal(&self) -> bool {
        self.buffer.is_immortal()
    }

    #[inline]
    pub fn ref_count(&self) -> Option<usize> {
        self.buffer.ref_count()
    }

    /// Move the view out, leaving the canonical empty text behind
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Zero-copy view of bytes `[start, end)` of this text
    ///
    /// The result shares this text's buffer.
    pub fn subtext(&self, start: usize, end: usize) -> KlResult<Self> {
        let size = self.size();
        if end > size {
            return Err(KlError::out_of_range(end as isize, size));
        }
        if start > end {
            return Err(KlError::out_of_range(start as isize, end));
        }
        Ok(Self {
            buffer: self.buffer.clone(),
            start: self.start + start,
            end: self.start + end,
        })
    }
}

impl Default for Text {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<char> for Text {
    fn from(c: char) -> Self {
        let mut utf8 = [0u8; 4];
        let encoded = c.encode_utf8(&mut utf8);
        Self::from_clamped(encoded.as_bytes(), encoded.len())
    }
}

/// Longest prefix of `s` no longer than `max` bytes that ends on a char boundary
fn clamp_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl Text {
    /// Infallible construction for the `From` impls; `kept` is already within limits
    fn from_clamped(kept: &[u8], original: usize) -> Self {
        if kept.len() < original {
            warn!(
                original,
                kept = kept.len(),
                "text truncated to MAX_TEXT_SIZE; use from_bytes_slice to reject instead"
            );
        }
        match Self::from_bytes_slice(kept) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "text allocation rejected, using empty text");
                Self::new()
            }
        }
    }
}

impl From<&str> for Text {
    /// Payloads beyond `MAX_TEXT_SIZE` are cut at the last char boundary
    /// within the limit, with a warning
    fn from(s: &str) -> Self {
        let kept = clamp_str(s, MAX_TEXT_SIZE);
        Self::from_clamped(kept.as_bytes(), s.len())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&String> for Text {
    fn from(s: &String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&[u8]> for Text {
    /// Payloads beyond `MAX_TEXT_SIZE` are cut to the limit, with a warning
    fn from(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_TEXT_SIZE);
        Self::from_clamped(&bytes[..len], bytes.len())
    }
}

impl From<&TextBuffer> for Text {
    #[inline]
    fn from(buffer: &TextBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl Borrow<[u8]> for Text {
    #[inline]
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Text {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}
