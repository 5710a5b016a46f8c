//! Sub-lexer terms: what the lexer is in the middle of.
//!
//! While a term is active, every scan step belongs to that sub-lexer
//! instead of the top-level dispatcher. A quoted literal ends at its closing
//! delimiter; a heredoc ends at its terminator line. Interpolation suspends
//! the active term on the interpolation stack and resumes it afterwards.

use bitflags::bitflags;
use garnet_ir::{ExprState, HeredocIndent};
use garnet_lexer_core::LineSnapshot;

use crate::stack_state::BitStack;

bitflags! {
    /// How a literal's body is scanned.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub(crate) struct StrFunc: u16 {
        /// Keep escapes raw (regexp source).
        const ESCAPE = 1 << 0;
        /// Interpolation and escape processing.
        const EXPAND = 1 << 1;
        const REGEXP = 1 << 2;
        /// Whitespace separates words.
        const QWORDS = 1 << 3;
        const SYMBOL = 1 << 4;
        /// Heredoc with `-` or `~`: terminator may be indented.
        const INDENT = 1 << 5;
        /// A closing quote followed by `:` ends a label.
        const LABEL = 1 << 6;
        /// Word list that has not emitted its first separator yet.
        const LIST = 1 << 7;
        /// Terminator already seen; the next step emits the end token.
        const TERM = 1 << 8;
    }
}

impl StrFunc {
    pub const SQUOTE: Self = Self::empty();
    pub const DQUOTE: Self = Self::EXPAND;
    pub const XQUOTE: Self = Self::EXPAND;
    pub const REGEXP_LIT: Self =
        Self::from_bits_truncate(Self::REGEXP.bits() | Self::ESCAPE.bits() | Self::EXPAND.bits());
    pub const SWORD: Self = Self::from_bits_truncate(Self::QWORDS.bits() | Self::LIST.bits());
    pub const DWORD: Self = Self::from_bits_truncate(
        Self::QWORDS.bits() | Self::EXPAND.bits() | Self::LIST.bits(),
    );
    pub const SSYM: Self = Self::SYMBOL;
    pub const DSYM: Self = Self::from_bits_truncate(Self::SYMBOL.bits() | Self::EXPAND.bits());
}

/// A delimited literal: string, symbol, regexp, word list or command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct QuoteTerm {
    pub func: StrFunc,
    /// Opening bracket for nesting delimiters, `0` when the delimiter does
    /// not nest.
    pub open: u8,
    pub close: u8,
    pub nest: u32,
    /// Offset of the opening token, for diagnostics.
    pub start: usize,
    /// Raw non-ASCII content was seen (regexp encoding checks).
    pub non_ascii: bool,
}

impl QuoteTerm {
    pub fn new(func: StrFunc, open: u8, close: u8, start: usize) -> Self {
        QuoteTerm {
            func,
            open,
            close,
            nest: 0,
            start,
            non_ascii: false,
        }
    }
}

/// A heredoc whose body is being read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeredocTerm {
    pub marker: Vec<u8>,
    pub func: StrFunc,
    pub indent: HeredocIndent,
    /// Where scanning resumes on the opening line once the body ends.
    pub resume: LineSnapshot,
    /// Smallest indentation of a non-blank body line (`<<~` only).
    pub min_indent: Option<usize>,
    /// The previous body line ended in an escaped newline.
    pub continuation: bool,
    pub id: u32,
    /// Body line starts in flushed events: `(event index, byte offset)`.
    pub marks: Vec<(usize, usize)>,
    /// Body line starts in the content not yet flushed.
    pub line_marks: Vec<usize>,
}

impl HeredocTerm {
    pub fn is_squiggly(&self) -> bool {
        self.indent == HeredocIndent::Squiggly
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Term {
    Quote(QuoteTerm),
    Heredoc(HeredocTerm),
}

/// Kind of interpolation found after a `#`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Interp {
    /// `#{`
    Block,
    /// `#@ivar`, `#@@cvar`, `#$gvar`
    Variable,
}

/// A literal suspended by interpolation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InterpFrame {
    /// `#{ ... }`: ends at the matching `}`.
    Block {
        term: Term,
        state: ExprState,
        brace_nest: i32,
        cond: BitStack,
        cmdarg: BitStack,
    },
    /// `#@x`: ends after the next token.
    Variable { term: Term },
}

impl InterpFrame {
    pub fn into_term(self) -> Term {
        match self {
            InterpFrame::Block { term, .. } | InterpFrame::Variable { term } => term,
        }
    }
}

#[cfg(test)]
mod tests;
