//! Expression state: where in an expression the lexer currently is.
//!
//! The same characters lex differently depending on whether a value, an
//! operator, a method name or a label is expected next. The lexer records
//! that as a small bitset; combinations such as `END | LABEL` are legal and
//! common, but only one of the primary position flags describes the
//! grammatical position at any time.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Lexer expression state after (or before) a token.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ExprState: u16 {
        // === Primary positions ===

        /// Beginning of an expression: a value is expected.
        const BEG = 1 << 0;
        /// End of an expression: an operator is expected.
        const END = 1 << 1;
        /// Closing paren of a parenthesized command argument.
        const ENDARG = 1 << 2;
        /// End of a method name or definition header.
        const ENDFN = 1 << 3;
        /// After a method name that may take arguments.
        const ARG = 1 << 4;
        /// After a method name in command position.
        const CMDARG = 1 << 5;
        /// After `return`, `break`, `next` and `rescue`.
        const MID = 1 << 6;
        /// Method name position after `def`, `alias` and `undef`.
        const FNAME = 1 << 7;
        /// Right after `.`, `&.` or `::`.
        const DOT = 1 << 8;
        /// Right after `class`.
        const CLASS = 1 << 9;

        // === Modifiers ===

        /// A label is allowed here.
        const LABEL = 1 << 10;
        /// A label was just lexed.
        const LABELED = 1 << 11;
        /// Symbol position of `alias`/`undef` items.
        const FITEM = 1 << 12;
    }
}

impl ExprState {
    /// A value is expected; same bits as `BEG`.
    pub const VALUE: Self = Self::BEG;
    /// Any position where an expression can start.
    pub const BEG_ANY: Self =
        Self::from_bits_truncate(Self::BEG.bits() | Self::MID.bits() | Self::CLASS.bits());
    /// Any argument position.
    pub const ARG_ANY: Self = Self::from_bits_truncate(Self::ARG.bits() | Self::CMDARG.bits());
    /// Any position after a complete operand.
    pub const END_ANY: Self =
        Self::from_bits_truncate(Self::END.bits() | Self::ENDARG.bits() | Self::ENDFN.bits());

    /// Flag names in declaration order, for display.
    const NAMES: [(&'static str, ExprState); 13] = [
        ("BEG", Self::BEG),
        ("END", Self::END),
        ("ENDARG", Self::ENDARG),
        ("ENDFN", Self::ENDFN),
        ("ARG", Self::ARG),
        ("CMDARG", Self::CMDARG),
        ("MID", Self::MID),
        ("FNAME", Self::FNAME),
        ("DOT", Self::DOT),
        ("CLASS", Self::CLASS),
        ("LABEL", Self::LABEL),
        ("LABELED", Self::LABELED),
        ("FITEM", Self::FITEM),
    ];

    /// True if any flag of `other` is set in `self`.
    #[inline]
    pub const fn any(self, other: ExprState) -> bool {
        self.intersects(other)
    }

    /// True if every flag of `other` is set in `self`.
    #[inline]
    pub const fn all_of(self, other: ExprState) -> bool {
        self.contains(other)
    }
}

impl fmt::Display for ExprState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (name, flag) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
