use std::fmt;
use std::str::FromStr;

use crate::error::KeysegError;
use crate::segment::Segment;

/// Reference point for [`SegmentedWindowReader::seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
    Begin,
    Current,
    End,
}

impl SeekOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeekOrigin::Begin => "begin",
            SeekOrigin::Current => "current",
            SeekOrigin::End => "end",
        }
    }
}

impl fmt::Display for SeekOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeekOrigin {
    type Err = KeysegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "begin" => Ok(SeekOrigin::Begin),
            "current" => Ok(SeekOrigin::Current),
            "end" => Ok(SeekOrigin::End),
            _ => Err(KeysegError::unknown_value("seek origin", s)),
        }
    }
}

impl TryFrom<u8> for SeekOrigin {
    type Error = KeysegError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SeekOrigin::Begin),
            1 => Ok(SeekOrigin::Current),
            2 => Ok(SeekOrigin::End),
            other => Err(KeysegError::unknown_value("seek origin", other)),
        }
    }
}

/// Cursor that carves successive windows out of one source segment.
///
/// Every window returned by [`read`](Self::read) borrows the source's backing
/// block, so decoding a blob of fixed-size fields never copies element data.
/// Only `read` checks bounds: [`seek`](Self::seek) is plain arithmetic and may
/// leave the cursor before the start or past the end, in which case the next
/// `read` fails.
///
/// The reader holds mutable cursor state without any locking; share it
/// between threads only behind the caller's own synchronisation.
#[derive(Debug)]
pub struct SegmentedWindowReader<'a, T> {
    source: Segment<'a, T>,
    position: isize,
}

impl<'a, T> SegmentedWindowReader<'a, T> {
    pub fn new(source: Segment<'a, T>) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// The segment being read. Fixed for the reader's lifetime.
    pub fn source(&self) -> Segment<'a, T> {
        self.source
    }

    pub fn position(&self) -> isize {
        self.position
    }

    /// Elements left between the cursor and the end of the source, or 0 when
    /// the cursor is out of range.
    pub fn remaining(&self) -> usize {
        usize::try_from(self.position)
            .ok()
            .and_then(|p| self.source.len().checked_sub(p))
            .unwrap_or(0)
    }

    /// `true` once no further `read` can succeed from the current position.
    pub fn is_exhausted(&self) -> bool {
        self.readable_start().is_none()
    }

    /// Return the next `count` elements as a view and advance past them.
    ///
    /// Fails with [`KeysegError::OutOfRange`] when the cursor is not strictly
    /// inside the source (so even `read(0)` at the very end is rejected) or
    /// when fewer than `count` elements remain. A failed read leaves the
    /// cursor untouched.
    pub fn read(&mut self, count: usize) -> Result<Segment<'a, T>, KeysegError> {
        match self.readable_start() {
            Some(start) if count <= self.source.len() - start => {
                let window = self.source.narrow(start, count);
                self.position = to_isize(start + count);
                Ok(window)
            }
            _ => Err(KeysegError::OutOfRange {
                position: self.position,
                count,
                len: self.source.len(),
            }),
        }
    }

    /// Move the cursor relative to `origin` and return the new position.
    ///
    /// No bounds are enforced here. Arithmetic saturates at the `isize`
    /// limits.
    pub fn seek(&mut self, offset: isize, origin: SeekOrigin) -> isize {
        let base = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => self.position,
            SeekOrigin::End => to_isize(self.source.len()),
        };
        self.position = base.saturating_add(offset);
        self.position
    }

    fn readable_start(&self) -> Option<usize> {
        usize::try_from(self.position)
            .ok()
            .filter(|&p| p < self.source.len())
    }
}

fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<u32> {
        (0..10).collect()
    }

    #[test]
    fn drains_ten_elements_in_three_windows() {
        let block = ten();
        let mut reader = SegmentedWindowReader::new(Segment::whole(&block));
        assert_eq!(reader.position(), 0);

        assert_eq!(reader.read(4).unwrap().as_slice(), &[0, 1, 2, 3]);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read(3).unwrap().as_slice(), &[4, 5, 6]);
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.read(3).unwrap().as_slice(), &[7, 8, 9]);
        assert_eq!(reader.position(), 10);
        assert!(reader.is_exhausted());

        let err = reader.read(1).unwrap_err();
        assert!(matches!(err, KeysegError::OutOfRange { position: 10, .. }));
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn read_zero_at_end_is_rejected() {
        let block = ten();
        let mut reader = SegmentedWindowReader::new(Segment::whole(&block));
        reader.seek(0, SeekOrigin::End);
        assert!(reader.read(0).is_err());

        reader.seek(9, SeekOrigin::Begin);
        let window = reader.read(0).unwrap();
        assert!(window.is_empty());
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn overrun_leaves_position_unchanged() {
        let block = ten();
        let mut reader = SegmentedWindowReader::new(Segment::whole(&block));
        reader.read(6).unwrap();
        let before = reader.position();
        assert!(reader.read(5).is_err());
        assert_eq!(reader.position(), before);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn zero_length_source_cannot_be_read() {
        let block: [u8; 0] = [];
        let mut reader = SegmentedWindowReader::new(Segment::from(&block));
        assert!(reader.is_exhausted());
        assert!(reader.read(0).is_err());
    }

    #[test]
    fn windows_are_relative_to_a_sub_segment() {
        let block = ten();
        let source = Segment::new(&block, 3, 5).unwrap();
        let mut reader = SegmentedWindowReader::new(source);

        let window = reader.read(2).unwrap();
        assert_eq!(window.offset(), 3);
        assert_eq!(window.as_slice(), &[3, 4]);
        assert!(std::ptr::eq(window.backing(), block.as_slice()));

        assert!(reader.read(4).is_err());
        assert_eq!(reader.read(3).unwrap().as_slice(), &[5, 6, 7]);
    }

    #[test]
    fn seek_is_unchecked_arithmetic() {
        let block = ten();
        let mut reader = SegmentedWindowReader::new(Segment::whole(&block));

        assert_eq!(reader.seek(-3, SeekOrigin::Begin), -3);
        assert!(reader.read(1).is_err());
        assert_eq!(reader.remaining(), 0);

        assert_eq!(reader.seek(5, SeekOrigin::End), 15);
        assert!(reader.read(0).is_err());

        // peek past the end, then step back in
        assert_eq!(reader.seek(-8, SeekOrigin::Current), 7);
        assert_eq!(reader.read(3).unwrap().as_slice(), &[7, 8, 9]);

        assert_eq!(reader.seek(isize::MAX, SeekOrigin::Current), isize::MAX);
    }

    #[test]
    fn origins_parse_from_names_and_codes() {
        assert_eq!("begin".parse::<SeekOrigin>().unwrap(), SeekOrigin::Begin);
        assert_eq!(" End ".parse::<SeekOrigin>().unwrap(), SeekOrigin::End);
        assert_eq!(SeekOrigin::try_from(1u8).unwrap(), SeekOrigin::Current);

        assert!(matches!(
            "middle".parse::<SeekOrigin>(),
            Err(KeysegError::UnknownEnumerationValue { kind: "seek origin", .. })
        ));
        assert!(SeekOrigin::try_from(3u8).is_err());
    }
}
