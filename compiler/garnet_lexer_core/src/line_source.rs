//! Line-at-a-time input.

use std::io::{self, BufRead};

/// A sequential source of physical lines.
pub trait LineSource {
    /// Append the next line, including its line terminator if it has one,
    /// to `buf`.
    ///
    /// Returns `Ok(false)` at end of input, in which case nothing was
    /// appended.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool>;
}

/// In-memory source.
#[derive(Clone, Debug)]
pub struct StrSource {
    bytes: Vec<u8>,
    pos: usize,
}

impl StrSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        StrSource {
            bytes: bytes.into(),
            pos: 0,
        }
    }
}

impl LineSource for StrSource {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        let remaining = self.bytes.get(self.pos..).unwrap_or_default();
        if remaining.is_empty() {
            return Ok(false);
        }
        let len = memchr::memchr(b'\n', remaining).map_or(remaining.len(), |i| i + 1);
        buf.extend_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(true)
    }
}

/// Streaming source over any buffered reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        let read = self.reader.read_until(b'\n', buf)?;
        Ok(read > 0)
    }
}
