//! Event emission.
//!
//! Grammar tokens are emitted with the expression state already updated,
//! so every token records the state that follows it. Literal content is
//! emitted by [`Lexer::flush_content`], which splits the cooked bytes back
//! into one event per contiguous source run.

use garnet_ir::{
    Event, SourceEncoding, Span, StrLit, Token, TokenKind, TokenValue, Trivia, TriviaKind,
};
use smallvec::smallvec;
use tracing::trace;

use crate::delayed::Piece;
use crate::Lexer;

const TAB_WIDTH: usize = 8;

/// Encoding facts gathered while cooking one run of literal content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LiteralEncoding {
    /// Encoding fixed by the content so far (`\u` forces UTF-8, a raw
    /// non-ASCII byte fixes the source encoding).
    pub fixed: Option<SourceEncoding>,
    pub non_ascii: bool,
    pub regexp: bool,
}

impl Lexer {
    pub(crate) fn emit(&mut self, kind: TokenKind) {
        self.emit_value(kind, TokenValue::None);
    }

    /// Emit a grammar token covering `[tok_start, pos)` plus any parked
    /// run that ends where it starts.
    pub(crate) fn emit_value(&mut self, kind: TokenKind, value: TokenValue) {
        let end = self.cursor.pos();
        let mut start = self.tok_start;
        self.tok_start = end;
        if !self.delayed.is_empty() {
            let mut pieces = self.delayed.take();
            if pieces.last().is_some_and(|p| p.end == start) {
                if let Some(last) = pieces.pop() {
                    start = last.start;
                }
            }
            for piece in pieces {
                self.push_trivia(TriviaKind::Space, piece.start, piece.end);
            }
        }
        self.push_token(kind, start, end, value);
        self.after_token(kind);
    }

    /// Emit trivia covering `[tok_start, pos)`.
    pub(crate) fn ignore(&mut self, kind: TriviaKind) {
        let end = self.cursor.pos();
        let start = self.tok_start;
        self.tok_start = end;
        self.push_trivia(kind, start, end);
    }

    pub(crate) fn push_trivia(&mut self, kind: TriviaKind, start: usize, end: usize) {
        let (line, column) = self.cursor.line_col(start);
        trace!(?kind, start, end, "trivia");
        self.out.push_back(Event::Ignored(Trivia {
            kind,
            span: Span::from_range(start..end),
            line,
            column,
        }));
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize, value: TokenValue) {
        let (line, column) = self.cursor.line_col(start);
        let delayed = line != self.cursor.line_no();
        let token = Token {
            kind,
            span: Span::from_range(start..end),
            line,
            column,
            state: self.state,
            value,
        };
        trace!(?kind, start, end, state = %self.state, delayed, "token");
        self.out.push_back(if delayed {
            Event::Delayed(token)
        } else {
            Event::Token(token)
        });
    }

    /// Emit the literal content cooked so far, one event per contiguous
    /// source run. `marks` are offsets into the cooked bytes; they come back
    /// as `(event index, offset within that event)`.
    pub(crate) fn flush_content(&mut self, marks: &[usize]) -> Vec<(usize, usize)> {
        let pos = self.cursor.pos();
        self.delayed.push(self.tok_start, pos, self.tokbuf.len());
        self.tok_start = pos;
        let mut pieces = self.delayed.take();
        let cooked = std::mem::take(&mut self.tokbuf);
        let encoding = self.literal_encoding();
        self.lit = LiteralEncoding::default();

        let mut resolved = Vec::new();
        if pieces.is_empty() {
            if cooked.is_empty() {
                return resolved;
            }
            pieces = smallvec![Piece {
                start: pos,
                end: pos,
                cooked: cooked.len(),
            }];
        }
        let last = pieces.len() - 1;
        let mut from = 0;
        for (i, piece) in pieces.iter().enumerate() {
            let to = if i == last {
                cooked.len()
            } else {
                piece.cooked.clamp(from, cooked.len())
            };
            for &mark in marks {
                if mark >= from && (mark < to || (i == last && mark == to)) {
                    resolved.push((self.out.len(), mark - from));
                }
            }
            let bytes = cooked.get(from..to).map(<[u8]>::to_vec).unwrap_or_default();
            self.push_token(
                TokenKind::StringContent,
                piece.start,
                piece.end,
                TokenValue::Str(StrLit { bytes, encoding }),
            );
            from = to;
        }
        resolved
    }

    /// Encoding of the content cooked so far.
    pub(crate) fn literal_encoding(&self) -> SourceEncoding {
        let encoding = self.lit.fixed.unwrap_or(self.encoding);
        if !self.lit.regexp && self.lit.non_ascii && encoding == SourceEncoding::UsAscii {
            SourceEncoding::Binary
        } else {
            encoding
        }
    }

    /// Strip `width` columns of indentation at each marked line start.
    pub(crate) fn dedent_marked(&mut self, marks: &[(usize, usize)], width: usize) {
        if width == 0 {
            return;
        }
        for &(index, offset) in marks.iter().rev() {
            if let Some(Event::Token(token) | Event::Delayed(token)) = self.out.get_mut(index) {
                if let TokenValue::Str(lit) = &mut token.value {
                    dedent_at(&mut lit.bytes, offset, width);
                }
            }
        }
    }
}

/// Remove up to `width` columns of leading blanks starting at `offset`.
/// A tab that would cross `width` stops the removal.
pub(crate) fn dedent_at(bytes: &mut Vec<u8>, offset: usize, width: usize) {
    let Some(line) = bytes.get(offset..) else {
        return;
    };
    let mut col = 0;
    let mut cut = 0;
    for &b in line {
        if col >= width {
            break;
        }
        match b {
            b' ' => col += 1,
            b'\t' => {
                let next = TAB_WIDTH * (col / TAB_WIDTH + 1);
                if next > width {
                    break;
                }
                col = next;
            }
            _ => break,
        }
        cut += 1;
    }
    bytes.drain(offset..offset + cut);
}

/// Indentation width of a line prefix, or `None` for a blank line.
pub(crate) fn indent_width(line: &[u8]) -> Option<usize> {
    let mut col = 0;
    for &b in line {
        match b {
            b' ' => col += 1,
            b'\t' => col = TAB_WIDTH * (col / TAB_WIDTH + 1),
            b'\n' | b'\r' => return None,
            _ => return Some(col),
        }
    }
    None
}
