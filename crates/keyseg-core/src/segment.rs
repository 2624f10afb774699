use std::fmt;
use std::ops::Deref;

use crate::error::KeysegError;

/// Non-owning view over a contiguous run of a backing block.
///
/// A segment is the triple `(backing, offset, len)` with
/// `offset + len <= backing.len()`. It never owns the backing block; the
/// borrow keeps the block alive for as long as any view derived from it, and
/// any number of segments may alias the same block.
pub struct Segment<'a, T> {
    backing: &'a [T],
    offset: usize,
    len: usize,
}

impl<'a, T> Segment<'a, T> {
    /// Describe `len` elements of `backing` starting at `offset`.
    pub fn new(backing: &'a [T], offset: usize, len: usize) -> Result<Self, KeysegError> {
        match offset.checked_add(len) {
            Some(end) if end <= backing.len() => Ok(Self {
                backing,
                offset,
                len,
            }),
            _ => Err(KeysegError::OutOfRange {
                position: isize::try_from(offset).unwrap_or(isize::MAX),
                count: len,
                len: backing.len(),
            }),
        }
    }

    /// View covering the whole backing block.
    pub fn whole(backing: &'a [T]) -> Self {
        Self {
            backing,
            offset: 0,
            len: backing.len(),
        }
    }

    /// The block this view points into.
    pub fn backing(&self) -> &'a [T] {
        self.backing
    }

    /// Start of the view within the backing block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the viewed elements. The returned slice lives as long as the
    /// backing block, not as long as this view.
    pub fn as_slice(&self) -> &'a [T] {
        &self.backing[self.offset..self.offset + self.len]
    }

    /// Narrow this view to `len` elements starting `start` elements in.
    ///
    /// The result still indexes the original backing block.
    pub(crate) fn narrow(&self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        Self {
            backing: self.backing,
            offset: self.offset + start,
            len,
        }
    }
}

impl<T> Clone for Segment<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Segment<'_, T> {}

impl<T> Deref for Segment<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Segment<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> From<&'a [T]> for Segment<'a, T> {
    fn from(backing: &'a [T]) -> Self {
        Segment::whole(backing)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Segment<'a, T> {
    fn from(backing: &'a [T; N]) -> Self {
        Segment::whole(backing.as_slice())
    }
}

impl<T: fmt::Debug> fmt::Debug for Segment<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("elements", &self.as_slice())
            .finish()
    }
}
