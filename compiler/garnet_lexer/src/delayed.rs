//! Content that belongs to a token not emitted yet.
//!
//! A literal that runs over several physical lines cannot be emitted line
//! by line: its bytes are parked here every time the cursor moves to a new
//! line and released with the token that finally closes the run. Adjacent
//! pieces merge, so a literal spanning lines in order is one piece; pieces
//! only stay apart when a heredoc body sits between them.

use smallvec::SmallVec;

/// A parked byte range and how much cooked content it produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Piece {
    pub start: usize,
    pub end: usize,
    /// Length of the cooked buffer at the end of this piece.
    pub cooked: usize,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct DelayedBuf {
    pieces: SmallVec<[Piece; 4]>,
}

impl DelayedBuf {
    pub fn push(&mut self, start: usize, end: usize, cooked: usize) {
        if start >= end {
            return;
        }
        if let Some(last) = self.pieces.last_mut() {
            if last.end == start {
                last.end = end;
                last.cooked = cooked;
                return;
            }
        }
        self.pieces.push(Piece { start, end, cooked });
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn take(&mut self) -> SmallVec<[Piece; 4]> {
        std::mem::take(&mut self.pieces)
    }
}
