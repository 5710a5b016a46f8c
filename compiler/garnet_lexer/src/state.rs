//! Expression-state predicates and per-token bookkeeping.
//!
//! The predicates read the state left by the previous token; the
//! bookkeeping in [`Lexer::after_token`] runs once a token's identity and
//! follow state are fixed.

use garnet_ir::{ExprState, Keyword, TokenKind};

use crate::lex_error::LexWarningKind;
use crate::term::InterpFrame;
use crate::Lexer;

/// Loop header the lexer is tracking on behalf of a grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoopHint {
    /// `for` seen at this paren depth, `in` not yet.
    AwaitIn(i32),
    /// Inside a loop condition opened at this paren depth.
    Cond(i32),
}

#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Identifier byte: ASCII alphanumeric, `_`, or any non-ASCII byte.
#[inline]
pub(crate) fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || !c.is_ascii()
}

impl Lexer {
    // === Predicates ===

    /// A value may start here.
    pub(crate) fn is_beg(&self) -> bool {
        self.state.any(ExprState::BEG_ANY)
            || self.state.all_of(ExprState::ARG | ExprState::LABELED)
    }

    /// A complete operand was just read.
    pub(crate) fn is_end(&self) -> bool {
        self.state.any(ExprState::END_ANY)
    }

    /// After a method name that may take arguments without parentheses.
    pub(crate) fn is_arg(&self) -> bool {
        self.state.any(ExprState::ARG_ANY)
    }

    /// After `def`, `alias`, `.` or `::`: operators read as method names.
    pub(crate) fn is_after_operator(&self) -> bool {
        self.state.any(ExprState::FNAME | ExprState::DOT)
    }

    /// `foo -x`: argument position, preceded by space, not followed by it.
    pub(crate) fn is_spcarg(&self, next: Option<u8>) -> bool {
        self.is_arg() && self.space_seen && !next.is_some_and(is_space)
    }

    pub(crate) fn label_possible(&self, cmd_state: bool) -> bool {
        (self.state.any(ExprState::LABEL | ExprState::ENDFN) && !cmd_state) || self.is_arg()
    }

    /// `:` at `n` bytes ahead that is not part of `::`.
    pub(crate) fn label_suffix(&self, n: usize) -> bool {
        self.cursor.peek_at(n) == Some(b':') && self.cursor.peek_at(n + 1) != Some(b':')
    }

    /// The next `{` or `do` opens a lambda body.
    pub(crate) fn lambda_beginning(&self) -> bool {
        self.lpar_beg == self.paren_nest
    }

    /// Follow state of most operators: `ARG` when the operator is itself a
    /// method name, `BEG` otherwise.
    pub(crate) fn operator_state(&self) -> ExprState {
        if self.is_after_operator() {
            ExprState::ARG
        } else {
            ExprState::BEG
        }
    }

    // === Ambiguity warnings ===

    /// `x -1` style spacing where `x` reads as an operand.
    pub(crate) fn warn_balanced(
        &mut self,
        op: &'static str,
        syn: &'static str,
        next: Option<u8>,
        last_state: ExprState,
    ) {
        let name_position =
            ExprState::CLASS | ExprState::DOT | ExprState::FNAME | ExprState::ENDFN;
        if !last_state.any(name_position) && self.space_seen && !next.is_some_and(is_space) {
            self.warn(LexWarningKind::AmbiguousOperator { op, syn });
        }
    }

    pub(crate) fn arg_ambiguous(&mut self, op: char) -> bool {
        self.warn(LexWarningKind::AmbiguousFirstArgument { op });
        true
    }

    // === Nesting ===

    pub(crate) fn open_nesting(&mut self, opener: TokenKind) {
        self.paren_nest += 1;
        self.cond.push(false);
        self.cmdarg.push(false);
        self.openers.push(opener);
    }

    /// Close the innermost bracket, returning the kind that opened it.
    pub(crate) fn close_nesting(&mut self) -> Option<TokenKind> {
        self.paren_nest = (self.paren_nest - 1).max(0);
        self.cond.pop();
        self.cmdarg.pop();
        self.openers.pop()
    }

    // === After every grammar token ===

    pub(crate) fn after_token(&mut self, kind: TokenKind) {
        if kind != TokenKind::Newline {
            self.token_seen = true;
        }
        self.space_seen = false;
        if self.literal {
            return;
        }
        match kind {
            TokenKind::Lambda => {
                self.lpar_saved.push(self.lpar_beg);
                self.lpar_beg = self.paren_nest;
            }
            TokenKind::LambdaBeg | TokenKind::Keyword(Keyword::DoLambda) => {
                self.lpar_beg = self.lpar_saved.pop().unwrap_or(-1);
            }
            _ => {}
        }
        if self.config.loop_condition_hints {
            self.track_loop_header(kind);
        }
        if matches!(self.interp.last(), Some(InterpFrame::Variable { .. })) {
            if let Some(frame) = self.interp.pop() {
                self.term = Some(frame.into_term());
            }
        }
    }

    fn track_loop_header(&mut self, kind: TokenKind) {
        let depth = self.paren_nest;
        match kind {
            TokenKind::Keyword(Keyword::While | Keyword::Until) => {
                self.loop_hints.push(LoopHint::Cond(depth));
                self.cond.push(true);
            }
            TokenKind::Keyword(Keyword::For) => self.loop_hints.push(LoopHint::AwaitIn(depth)),
            TokenKind::Keyword(Keyword::In) => {
                if let Some(hint) = self.loop_hints.last_mut() {
                    if *hint == LoopHint::AwaitIn(depth) {
                        *hint = LoopHint::Cond(depth);
                        self.cond.push(true);
                    }
                }
            }
            TokenKind::Keyword(Keyword::DoCond) | TokenKind::Newline | TokenKind::Semicolon => {
                match self.loop_hints.last() {
                    Some(&LoopHint::Cond(d)) if d == depth => {
                        self.loop_hints.pop();
                        self.cond.pop();
                    }
                    Some(&LoopHint::AwaitIn(d)) if d == depth && kind != TokenKind::Keyword(Keyword::DoCond) => {
                        self.loop_hints.pop();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
