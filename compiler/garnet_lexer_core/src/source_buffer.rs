//! Append-only line storage.
//!
//! Lines are pulled from a [`LineSource`] on demand and appended to a single
//! byte vector. Offsets handed out by the buffer are absolute and never move,
//! so spans recorded early in a scan remain valid after later lines load.

use std::fmt;
use std::io;

use crate::LineSource;

/// Byte order mark found at the start of the first line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bom {
    /// `EF BB BF`.
    Utf8,
    /// `FF FE`.
    Utf16Le,
    /// `FE FF`.
    Utf16Be,
}

impl Bom {
    /// Length of the mark in bytes.
    pub fn byte_len(self) -> usize {
        match self {
            Bom::Utf8 => 3,
            Bom::Utf16Le | Bom::Utf16Be => 2,
        }
    }

    /// Detect a mark at the start of `bytes`.
    pub fn detect(bytes: &[u8]) -> Option<Bom> {
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            Some(Bom::Utf8)
        } else if bytes.starts_with(&[0xFF, 0xFE]) {
            Some(Bom::Utf16Le)
        } else if bytes.starts_with(&[0xFE, 0xFF]) {
            Some(Bom::Utf16Be)
        } else {
            None
        }
    }
}

pub struct SourceBuffer {
    bytes: Vec<u8>,
    /// Start offset of every line loaded so far.
    line_starts: Vec<usize>,
    /// `None` once the source reported end of input or failed.
    source: Option<Box<dyn LineSource>>,
    bom: Option<Bom>,
    io_error: Option<io::Error>,
}

impl SourceBuffer {
    pub fn new(source: impl LineSource + 'static) -> Self {
        SourceBuffer {
            bytes: Vec::new(),
            line_starts: Vec::new(),
            source: Some(Box::new(source)),
            bom: None,
            io_error: None,
        }
    }

    /// Number of lines loaded so far.
    #[inline]
    pub fn loaded_lines(&self) -> usize {
        self.line_starts.len()
    }

    /// Whether the underlying source is exhausted.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.source.is_none()
    }

    /// Load lines until `index` is available.
    ///
    /// Returns `false` if the input ends first.
    pub fn ensure_line(&mut self, index: usize) -> bool {
        while self.line_starts.len() <= index {
            if !self.fetch_line() {
                return false;
            }
        }
        true
    }

    /// Load every remaining line.
    pub fn load_all(&mut self) {
        while self.fetch_line() {}
    }

    fn fetch_line(&mut self) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        let start = self.bytes.len();
        match source.read_line(&mut self.bytes) {
            Ok(true) if self.bytes.len() > start => {
                if start == 0 {
                    self.bom = Bom::detect(&self.bytes);
                }
                self.line_starts.push(start);
                true
            }
            Ok(_) => {
                self.source = None;
                false
            }
            Err(err) => {
                self.bytes.truncate(start);
                self.io_error = Some(err);
                self.source = None;
                false
            }
        }
    }

    /// Byte range of a loaded line, terminator included.
    pub fn line_range(&self, index: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.bytes.len());
        Some((start, end))
    }

    /// Index of the line containing `offset`.
    ///
    /// Offsets past the end map to the last loaded line.
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(insert) => insert.saturating_sub(1),
        }
    }

    /// 1-based line and 0-based byte column of `offset`.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let index = self.line_index(offset);
        let start = self.line_starts.get(index).copied().unwrap_or(0);
        let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let column = u32::try_from(offset.saturating_sub(start)).unwrap_or(u32::MAX);
        (line, column)
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes in `[start, end)`, clamped to what is loaded.
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.bytes.len());
        self.bytes.get(start.min(end)..end).unwrap_or_default()
    }

    #[inline]
    pub fn bom(&self) -> Option<Bom> {
        self.bom
    }

    /// Take the read error that ended the input, if any.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }
}

impl fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("len", &self.bytes.len())
            .field("lines", &self.line_starts.len())
            .field("exhausted", &self.source.is_none())
            .field("bom", &self.bom)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
