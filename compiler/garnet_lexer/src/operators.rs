//! Operators and brackets.
//!
//! Most operators read the same in every state; what changes is the state
//! they leave behind and, for `* & - + / % : [ ( {`, which token the
//! character is. An operator in method-name position (`def +@`, `a.-`)
//! leaves `ARG`, everywhere else `BEG`.

use garnet_ir::{ExprState, TokenKind, TokenValue};
use tracing::debug;

use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::state::{is_ident_char, is_space};
use crate::term::{InterpFrame, StrFunc};
use crate::Lexer;

impl Lexer {
    fn op_assign(&mut self, op: &'static str) {
        self.state = ExprState::BEG;
        self.emit_value(TokenKind::OpAssign, TokenValue::Operator(op));
    }

    /// Consume `c` if it is next on the line.
    fn accept(&mut self, c: u8) -> bool {
        if self.cursor.peek_is(c) {
            self.cursor.skip(1);
            true
        } else {
            false
        }
    }

    pub(crate) fn star(&mut self, last_state: ExprState) {
        let kind = if self.accept(b'*') {
            if self.accept(b'=') {
                return self.op_assign("**");
            }
            let next = self.cursor.peek_char();
            if self.is_spcarg(next) {
                self.warn_verbose(LexWarningKind::ArgumentPrefix { op: "**" });
                TokenKind::DSplat
            } else if self.is_beg() {
                TokenKind::DSplat
            } else {
                self.warn_balanced("**", "argument prefix", next, last_state);
                TokenKind::Pow
            }
        } else {
            if self.accept(b'=') {
                return self.op_assign("*");
            }
            let next = self.cursor.peek_char();
            if self.is_spcarg(next) {
                self.warn_verbose(LexWarningKind::ArgumentPrefix { op: "*" });
                TokenKind::Splat
            } else if self.is_beg() {
                TokenKind::Splat
            } else {
                self.warn_balanced("*", "argument prefix", next, last_state);
                TokenKind::Star
            }
        };
        self.state = self.operator_state();
        self.emit(kind);
    }

    pub(crate) fn bang(&mut self) {
        if self.is_after_operator() {
            self.state = ExprState::ARG;
            if self.accept(b'@') {
                return self.emit(TokenKind::Bang);
            }
        } else {
            self.state = ExprState::BEG;
        }
        let kind = if self.accept(b'=') {
            TokenKind::Neq
        } else if self.accept(b'~') {
            TokenKind::NMatch
        } else {
            TokenKind::Bang
        };
        self.emit(kind);
    }

    pub(crate) fn equals(&mut self) {
        self.state = self.operator_state();
        let kind = if self.accept(b'=') {
            if self.accept(b'=') {
                TokenKind::Eqq
            } else {
                TokenKind::EqEq
            }
        } else if self.accept(b'~') {
            TokenKind::Match
        } else if self.accept(b'>') {
            TokenKind::Assoc
        } else {
            TokenKind::Assign
        };
        self.emit(kind);
    }

    pub(crate) fn less_than(&mut self, last_state: ExprState) {
        if self.cursor.peek_is(b'<')
            && !self.state.any(ExprState::DOT | ExprState::CLASS)
            && !self.is_end()
            && (!self.is_arg() || self.state.any(ExprState::LABELED) || self.space_seen)
        {
            let second = self.cursor.pos();
            self.cursor.skip(1);
            if self.heredoc_identifier() {
                return;
            }
            self.cursor.seek_in_line(second);
        }
        if self.is_after_operator() {
            self.state = ExprState::ARG;
        } else {
            if self.state.any(ExprState::CLASS) {
                self.command_start = true;
            }
            self.state = ExprState::BEG;
        }
        let kind = if self.accept(b'=') {
            if self.accept(b'>') {
                TokenKind::Cmp
            } else {
                TokenKind::Leq
            }
        } else if self.accept(b'<') {
            if self.accept(b'=') {
                return self.op_assign("<<");
            }
            let next = self.cursor.peek_char();
            self.warn_balanced("<<", "here document", next, last_state);
            TokenKind::LShift
        } else {
            TokenKind::Lt
        };
        self.emit(kind);
    }

    pub(crate) fn greater_than(&mut self) {
        self.state = self.operator_state();
        let kind = if self.accept(b'=') {
            TokenKind::Geq
        } else if self.accept(b'>') {
            if self.accept(b'=') {
                return self.op_assign(">>");
            }
            TokenKind::RShift
        } else {
            TokenKind::Gt
        };
        self.emit(kind);
    }

    pub(crate) fn ampersand(&mut self, last_state: ExprState) {
        if self.accept(b'&') {
            self.state = ExprState::BEG;
            if self.accept(b'=') {
                return self.op_assign("&&");
            }
            return self.emit(TokenKind::AndOp);
        }
        if self.accept(b'=') {
            return self.op_assign("&");
        }
        if self.accept(b'.') {
            self.state = ExprState::DOT;
            return self.emit(TokenKind::AndDot);
        }
        let next = self.cursor.peek_char();
        let kind = if self.is_spcarg(next) {
            // `&:sym` and `&:"sym"` are the idiomatic block-pass forms.
            let symbol_arg = next == Some(b':')
                && self
                    .cursor
                    .peek_at(1)
                    .is_some_and(|c| c == b'\'' || c == b'"' || is_ident_char(c));
            if !symbol_arg {
                self.warn_verbose(LexWarningKind::ArgumentPrefix { op: "&" });
            }
            TokenKind::BlockArg
        } else if self.is_beg() {
            TokenKind::BlockArg
        } else {
            self.warn_balanced("&", "argument prefix", next, last_state);
            TokenKind::Amper
        };
        self.state = self.operator_state();
        self.emit(kind);
    }

    pub(crate) fn pipe(&mut self, last_state: ExprState) {
        if self.cursor.peek_is(b'|') {
            self.state = ExprState::BEG;
            // `||` right after `{` or `do` is an empty block parameter list.
            if self.cursor.peek_at(1) != Some(b'=') && last_state.any(ExprState::BEG) {
                return self.emit(TokenKind::Pipe);
            }
            self.cursor.skip(1);
            if self.accept(b'=') {
                return self.op_assign("||");
            }
            return self.emit(TokenKind::OrOp);
        }
        if self.accept(b'=') {
            return self.op_assign("|");
        }
        self.state = if self.is_after_operator() {
            ExprState::ARG
        } else {
            ExprState::BEG | ExprState::LABEL
        };
        self.emit(TokenKind::Pipe);
    }

    /// `+` or `-`, including unary forms, `->` and signed numbers.
    pub(crate) fn plus_minus(&mut self, c: u8, last_state: ExprState) {
        let minus = c == b'-';
        if self.is_after_operator() {
            self.state = ExprState::ARG;
            let kind = match (minus, self.accept(b'@')) {
                (false, true) => TokenKind::UPlus,
                (true, true) => TokenKind::UMinus,
                (false, false) => TokenKind::Plus,
                (true, false) => TokenKind::Minus,
            };
            return self.emit(kind);
        }
        if self.accept(b'=') {
            return self.op_assign(if minus { "-" } else { "+" });
        }
        if minus && self.accept(b'>') {
            self.state = ExprState::ENDFN;
            return self.emit(TokenKind::Lambda);
        }
        let next = self.cursor.peek_char();
        let op = if minus { '-' } else { '+' };
        if self.is_beg() || (self.is_spcarg(next) && self.arg_ambiguous(op)) {
            self.state = ExprState::BEG;
            let digit = next.is_some_and(|b| b.is_ascii_digit());
            if digit && !minus {
                return self.scan_number(b'+');
            }
            let kind = match (minus, digit) {
                (true, true) => TokenKind::UMinusNum,
                (true, false) => TokenKind::UMinus,
                (false, _) => TokenKind::UPlus,
            };
            return self.emit(kind);
        }
        self.state = ExprState::BEG;
        let (spelled, kind) = if minus {
            ("-", TokenKind::Minus)
        } else {
            ("+", TokenKind::Plus)
        };
        self.warn_balanced(spelled, "unary operator", next, last_state);
        self.emit(kind);
    }

    pub(crate) fn dot(&mut self, last_state: ExprState) {
        let is_beg = self.is_beg();
        self.state = ExprState::BEG;
        if self.accept(b'.') {
            if self.accept(b'.') {
                if self.paren_nest == 0 && self.looking_at_eol() {
                    self.warn(LexWarningKind::DotsAtEol);
                } else if self.lpar_beg >= 0
                    && self.lpar_beg + 1 == self.paren_nest
                    && last_state.any(ExprState::LABEL)
                {
                    return self.emit(TokenKind::Dot3);
                }
                return self.emit(if is_beg { TokenKind::BDot3 } else { TokenKind::Dot3 });
            }
            return self.emit(if is_beg { TokenKind::BDot2 } else { TokenKind::Dot2 });
        }
        if self.cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
            let dot = self.cursor.pos() - 1;
            let after_digit = dot > self.cursor.line_start()
                && self.cursor.slice(dot - 1, dot).first().is_some_and(u8::is_ascii_digit);
            let kind = if after_digit {
                LexErrorKind::FractionAfterNumeric
            } else {
                LexErrorKind::NoLeadingDigit
            };
            self.error(kind);
        }
        self.state = ExprState::DOT;
        self.emit(TokenKind::Dot);
    }

    /// Only blanks, then a newline, a comment or the end of input.
    fn looking_at_eol(&self) -> bool {
        self.cursor
            .rest_of_line()
            .iter()
            .find(|&&b| !is_space(b) || b == b'\n')
            .map_or(true, |&b| b == b'\n' || b == b'#')
    }

    // === Closing brackets ===

    pub(crate) fn close_paren(&mut self) {
        let opener = self.close_nesting();
        self.state = if opener == Some(TokenKind::LParenArg) {
            ExprState::ENDARG
        } else {
            ExprState::ENDFN
        };
        self.emit(TokenKind::RParen);
    }

    pub(crate) fn close_bracket(&mut self) {
        self.close_nesting();
        self.state = ExprState::END;
        self.emit(TokenKind::RBracket);
    }

    pub(crate) fn close_brace(&mut self) {
        if self.brace_nest == 0 && matches!(self.interp.last(), Some(InterpFrame::Block { .. })) {
            return self.end_interpolation();
        }
        self.brace_nest = (self.brace_nest - 1).max(0);
        self.close_nesting();
        self.state = ExprState::END;
        self.emit(TokenKind::RBrace);
    }

    /// `}` closing `#{`: resume the suspended literal.
    fn end_interpolation(&mut self) {
        let Some(InterpFrame::Block {
            term,
            state,
            brace_nest,
            cond,
            cmdarg,
        }) = self.interp.pop()
        else {
            return;
        };
        debug!(depth = self.interp.len(), "interpolation closed");
        self.state = state;
        self.brace_nest = brace_nest;
        self.cond = cond;
        self.cmdarg = cmdarg;
        self.emit(TokenKind::StringDEnd);
        self.term = Some(term);
    }

    // === Opening brackets ===

    pub(crate) fn open_paren(&mut self) {
        let kind = if self.is_beg() {
            TokenKind::LParenBeg
        } else if !self.space_seen {
            TokenKind::LParen
        } else if self.is_arg() || self.state.all_of(ExprState::END | ExprState::LABEL) {
            TokenKind::LParenArg
        } else {
            if self.state.any(ExprState::ENDFN) && !self.lambda_beginning() {
                self.warn_verbose(LexWarningKind::ParenAfterMethodName);
            }
            TokenKind::LParen
        };
        self.open_nesting(kind);
        self.state = ExprState::BEG | ExprState::LABEL;
        self.emit(kind);
    }

    pub(crate) fn open_bracket(&mut self) {
        if self.is_after_operator() {
            if self.accept(b']') {
                self.state = ExprState::ARG;
                let kind = if self.accept(b'=') {
                    TokenKind::Aset
                } else {
                    TokenKind::Aref
                };
                return self.emit(kind);
            }
            self.open_nesting(TokenKind::LBracket);
            self.state = ExprState::ARG | ExprState::LABEL;
            return self.emit(TokenKind::LBracket);
        }
        let kind = if self.is_beg()
            || (self.is_arg() && (self.space_seen || self.state.any(ExprState::LABELED)))
        {
            TokenKind::LBracketBeg
        } else {
            TokenKind::LBracket
        };
        self.open_nesting(kind);
        self.state = ExprState::BEG | ExprState::LABEL;
        self.emit(kind);
    }

    pub(crate) fn open_brace(&mut self) {
        self.brace_nest += 1;
        let kind = if self.lambda_beginning() {
            TokenKind::LambdaBeg
        } else if self.state.any(ExprState::LABELED) {
            TokenKind::LBraceHash
        } else if self.state.any(ExprState::ARG_ANY | ExprState::END | ExprState::ENDFN) {
            TokenKind::LBrace
        } else if self.state.any(ExprState::ENDARG) {
            TokenKind::LBraceArg
        } else {
            TokenKind::LBraceHash
        };
        if kind == TokenKind::LBraceHash {
            self.state = ExprState::BEG | ExprState::LABEL;
        } else {
            self.command_start = true;
            self.state = ExprState::BEG;
        }
        self.open_nesting(kind);
        self.emit(kind);
    }

    // === The rest ===

    pub(crate) fn colon(&mut self, last_state: ExprState) {
        if self.accept(b':') {
            if self.is_beg() || self.state.any(ExprState::CLASS) || self.is_spcarg(None) {
                self.state = ExprState::BEG;
                return self.emit(TokenKind::Colon3);
            }
            self.state = ExprState::DOT;
            return self.emit(TokenKind::Colon2);
        }
        let next = self.cursor.peek_char();
        if self.is_end() || next.is_some_and(|b| is_space(b) || b == b'#') {
            self.warn_balanced(":", "symbol literal", next, last_state);
            self.state = ExprState::BEG;
            return self.emit(TokenKind::Colon);
        }
        let quoted = match next {
            Some(b'\'') => Some(StrFunc::SSYM),
            Some(b'"') => Some(StrFunc::DSYM),
            _ => None,
        };
        let start = self.tok_start;
        if quoted.is_some() {
            self.cursor.skip(1);
        }
        self.state = ExprState::FNAME;
        self.emit(TokenKind::SymBeg);
        if let (Some(func), Some(close)) = (quoted, next) {
            self.open_quote(func, close, start);
        }
    }

    pub(crate) fn slash(&mut self, last_state: ExprState) {
        if self.is_beg() {
            return self.regexp_start();
        }
        if self.accept(b'=') {
            return self.op_assign("/");
        }
        let next = self.cursor.peek_char();
        if self.is_spcarg(next) {
            self.arg_ambiguous('/');
            return self.regexp_start();
        }
        self.state = self.operator_state();
        self.warn_balanced("/", "regexp literal", next, last_state);
        self.emit(TokenKind::Slash);
    }

    pub(crate) fn caret(&mut self) {
        if self.accept(b'=') {
            return self.op_assign("^");
        }
        self.state = self.operator_state();
        self.emit(TokenKind::Caret);
    }

    pub(crate) fn tilde(&mut self) {
        if self.is_after_operator() {
            self.accept(b'@');
            self.state = ExprState::ARG;
        } else {
            self.state = ExprState::BEG;
        }
        self.emit(TokenKind::Tilde);
    }

    pub(crate) fn percent(&mut self, last_state: ExprState) {
        if self.is_beg() {
            return self.percent_literal();
        }
        if self.accept(b'=') {
            return self.op_assign("%");
        }
        let next = self.cursor.peek_char();
        if self.is_spcarg(next) || (self.state.any(ExprState::FITEM) && next == Some(b's')) {
            return self.percent_literal();
        }
        self.state = self.operator_state();
        self.warn_balanced("%", "string literal", next, last_state);
        self.emit(TokenKind::Percent);
    }
}
