//! Low-level source access for the Garnet lexer.
//!
//! Three layers, leaf first:
//! - [`LineSource`]: hands out one physical line at a time (in-memory text or
//!   any `BufRead`), so a streaming input only blocks when the lexer actually
//!   needs the next line.
//! - [`SourceBuffer`]: append-only storage of every line fetched so far, with
//!   absolute offsets that stay valid for the whole scan.
//! - [`Cursor`]: byte-at-a-time reads with one-byte pushback, CRLF
//!   normalization, beginning-of-line tracking and save/restore of the
//!   current line for heredoc bodies.

mod cursor;
mod line_source;
mod source_buffer;

pub use cursor::{Cursor, LineSnapshot};
pub use line_source::{LineSource, ReaderSource, StrSource};
pub use source_buffer::{Bom, SourceBuffer};
