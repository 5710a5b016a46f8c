//! Byte cursor over the current physical line.
//!
//! The cursor always sits on one loaded line, `[line_start, line_end)`,
//! terminator included. Reading past the end of that line pulls in the next
//! one, unless a heredoc body was consumed ahead of time, in which case the
//! line after the heredoc terminator is loaded instead.
//!
//! # Line terminators
//!
//! `\r\n` is read as a single `\n`. A lone `\r` is returned unchanged and
//! left for the caller to interpret.

use crate::SourceBuffer;

/// Saved position inside a line, restored after a heredoc body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineSnapshot {
    line: usize,
    pos: usize,
}

impl LineSnapshot {
    /// Index (0-based) of the saved line.
    #[inline]
    pub fn line(self) -> usize {
        self.line
    }

    /// Absolute offset of the saved position.
    #[inline]
    pub fn pos(self) -> usize {
        self.pos
    }
}

#[derive(Debug)]
pub struct Cursor {
    buf: SourceBuffer,
    line: usize,
    line_start: usize,
    line_end: usize,
    pos: usize,
    /// Last line consumed by a heredoc body started on the current line.
    heredoc_end: Option<usize>,
}

impl Cursor {
    /// Create a cursor positioned at the start of the first line.
    pub fn new(mut buf: SourceBuffer) -> Self {
        let (line_start, line_end) = if buf.ensure_line(0) {
            buf.line_range(0).unwrap_or((0, 0))
        } else {
            (0, 0)
        };
        Cursor {
            buf,
            line: 0,
            line_start,
            line_end,
            pos: line_start,
            heredoc_end: None,
        }
    }

    // === Position ===

    /// Absolute byte offset of the next unread byte.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Index (0-based) of the current line.
    #[inline]
    pub fn line_index(&self) -> usize {
        self.line
    }

    /// 1-based number of the current line.
    #[inline]
    pub fn line_no(&self) -> u32 {
        u32::try_from(self.line + 1).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    #[inline]
    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// Nothing left to read on the current line.
    #[inline]
    pub fn at_eol(&self) -> bool {
        self.pos >= self.line_end
    }

    /// The cursor is at the first byte of the line.
    #[inline]
    pub fn is_bol(&self) -> bool {
        self.pos == self.line_start
    }

    /// Exactly one byte of the line has been consumed.
    #[inline]
    pub fn was_bol(&self) -> bool {
        self.pos == self.line_start + 1
    }

    /// Last line already consumed by a pending heredoc body.
    #[inline]
    pub fn heredoc_end(&self) -> Option<usize> {
        self.heredoc_end
    }

    /// 1-based line and 0-based column of an absolute offset.
    #[inline]
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        self.buf.line_col(offset)
    }

    #[inline]
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buf
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut SourceBuffer {
        &mut self.buf
    }

    // === Reading ===

    /// Consume one character, loading the next line when the current one is
    /// exhausted. Returns `None` at end of input.
    ///
    /// Callers that track token extents across lines should advance with
    /// [`Cursor::advance_line`] themselves and use [`Cursor::next_in_line`].
    pub fn next_char(&mut self) -> Option<u8> {
        if self.at_eol() && !self.advance_line() {
            return None;
        }
        self.next_in_line()
    }

    /// Consume one character from the current line only.
    pub fn next_in_line(&mut self) -> Option<u8> {
        if self.at_eol() {
            return None;
        }
        let bytes = self.buf.bytes();
        let c = bytes[self.pos];
        self.pos += 1;
        if c == b'\r' && self.pos < self.line_end && bytes[self.pos] == b'\n' {
            self.pos += 1;
            return Some(b'\n');
        }
        Some(c)
    }

    /// Un-consume the character most recently returned.
    ///
    /// `None` (end of input) is a no-op, as is pushing back past the start
    /// of the current line.
    pub fn pushback(&mut self, c: Option<u8>) {
        let Some(c) = c else {
            return;
        };
        if self.pos <= self.line_start {
            return;
        }
        let crlf = c == b'\n'
            && self.pos >= self.line_start + 2
            && self.buf.slice(self.pos - 2, self.pos) == b"\r\n";
        self.pos -= if crlf { 2 } else { 1 };
    }

    /// Next raw byte on the current line without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Raw byte `n` positions ahead on the current line.
    #[inline]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        let at = self.pos + n;
        if at < self.line_end {
            self.buf.bytes().get(at).copied()
        } else {
            None
        }
    }

    /// Whether the next raw byte is `c`.
    #[inline]
    pub fn peek_is(&self, c: u8) -> bool {
        self.peek() == Some(c)
    }

    /// Next character with `\r\n` read as `\n`.
    pub fn peek_char(&self) -> Option<u8> {
        match self.peek() {
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => Some(b'\n'),
            other => other,
        }
    }

    /// Consume `n` bytes of the current line.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.line_end);
    }

    /// Move to the end of the current line.
    #[inline]
    pub fn goto_eol(&mut self) {
        self.pos = self.line_end;
    }

    /// Move the cursor to an absolute offset within the current line.
    pub fn seek_in_line(&mut self, pos: usize) {
        self.pos = pos.clamp(self.line_start, self.line_end);
    }

    /// Offset of the next `needle` on the current line, if any.
    pub fn find_in_line(&self, needle: u8) -> Option<usize> {
        let rest = self.rest_of_line();
        memchr::memchr(needle, rest).map(|i| self.pos + i)
    }

    // === Slices ===

    /// Whole current line, terminator included.
    #[inline]
    pub fn line_bytes(&self) -> &[u8] {
        self.buf.slice(self.line_start, self.line_end)
    }

    /// Unread part of the current line.
    #[inline]
    pub fn rest_of_line(&self) -> &[u8] {
        self.buf.slice(self.pos, self.line_end)
    }

    /// Bytes in `[start, end)` of the loaded source.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        self.buf.slice(start, end)
    }

    // === Lines ===

    fn next_line_index(&self) -> usize {
        self.heredoc_end.map_or(self.line + 1, |end| end + 1)
    }

    /// Load the next line, skipping any heredoc body already consumed.
    ///
    /// Returns `false` at end of input. The cursor then sits at the end of
    /// the current line, or of the last heredoc body line when a body
    /// already consumed the rest of the input.
    pub fn advance_line(&mut self) -> bool {
        let next = self.next_line_index();
        if !self.buf.ensure_line(next) {
            if let Some(last) = self.heredoc_end.take() {
                if let Some((start, end)) = self.buf.line_range(last) {
                    self.line = last;
                    self.line_start = start;
                    self.line_end = end;
                }
            }
            self.pos = self.line_end;
            return false;
        }
        let Some((start, end)) = self.buf.line_range(next) else {
            return false;
        };
        self.line = next;
        self.line_start = start;
        self.line_end = end;
        self.pos = start;
        self.heredoc_end = None;
        true
    }

    /// The line [`Cursor::advance_line`] would load, without moving.
    pub fn next_line(&mut self) -> Option<&[u8]> {
        let next = self.next_line_index();
        if !self.buf.ensure_line(next) {
            return None;
        }
        let (start, end) = self.buf.line_range(next)?;
        Some(self.buf.slice(start, end))
    }

    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            line: self.line,
            pos: self.pos,
        }
    }

    /// Return to a saved line after a heredoc body.
    ///
    /// `heredoc_end` is the last line the body consumed; the next
    /// [`Cursor::advance_line`] continues after it.
    pub fn restore(&mut self, snapshot: LineSnapshot, heredoc_end: usize) {
        if let Some((start, end)) = self.buf.line_range(snapshot.line) {
            self.line = snapshot.line;
            self.line_start = start;
            self.line_end = end;
            self.pos = snapshot.pos.clamp(start, end);
        }
        self.heredoc_end = Some(heredoc_end.max(snapshot.line));
    }

    /// Consume everything after the current line.
    ///
    /// Returns the byte range of the consumed lines, or `None` when there
    /// was nothing left. The cursor ends up at end of input.
    pub fn skip_to_end(&mut self) -> Option<(usize, usize)> {
        self.pos = self.line_end;
        let first = self.next_line_index();
        if !self.buf.ensure_line(first) {
            return None;
        }
        let (start, _) = self.buf.line_range(first)?;
        self.buf.load_all();
        let last = self.buf.loaded_lines().saturating_sub(1);
        let (line_start, end) = self.buf.line_range(last)?;
        self.line = last;
        self.line_start = line_start;
        self.line_end = end;
        self.pos = end;
        self.heredoc_end = None;
        Some((start, end))
    }
}

#[cfg(test)]
mod tests;
