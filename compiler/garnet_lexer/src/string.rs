//! Quoted literals: strings, symbols, regexps, word lists, commands and
//! character literals.
//!
//! A literal is opened by the top-level dispatcher, which installs a
//! [`QuoteTerm`]. Each following scan step produces one piece of the body:
//! a content run, a word separator, an interpolation opener, or the closing
//! token.

use garnet_ir::{ExprState, RegexpOptions, SourceEncoding, StrLit, TokenKind, TokenValue};
use tracing::debug;

use crate::escape::{is_simple_re_meta, EscapeFlags};
use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::output::LiteralEncoding;
use crate::state::{is_ident_char, is_space};
use crate::term::{Interp, InterpFrame, QuoteTerm, StrFunc, Term};
use crate::Lexer;

/// Why a run of literal content stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StrStop {
    /// The closing delimiter is next.
    Term,
    /// `#` opening an interpolation is next.
    Interp,
    /// Whitespace between list words is next.
    Space,
    /// End of input.
    Eof,
    /// Backslash-newline inside an indented heredoc.
    Continuation,
}

/// Punctuation that forms a complete global name after `$`.
fn is_global_punct(c: u8) -> bool {
    matches!(
        c,
        b'~' | b'*'
            | b'$'
            | b'?'
            | b'!'
            | b'@'
            | b'/'
            | b'\\'
            | b';'
            | b','
            | b'.'
            | b'='
            | b':'
            | b'<'
            | b'>'
            | b'"'
            | b'&'
            | b'`'
            | b'\''
            | b'+'
            | b'0'
    )
}

/// Escape letter for a blank that `?` cannot take literally.
fn escaped_control_code(c: u8) -> Option<char> {
    match c {
        b' ' => Some('s'),
        b'\n' => Some('n'),
        b'\t' => Some('t'),
        0x0b => Some('v'),
        b'\r' => Some('r'),
        0x0c => Some('f'),
        _ => None,
    }
}

impl Lexer {
    // === Openers ===

    pub(crate) fn open_quote(&mut self, func: StrFunc, close: u8, start: usize) {
        self.term = Some(Term::Quote(QuoteTerm::new(func, 0, close, start)));
    }

    /// `"` or `'` in expression position.
    pub(crate) fn quote_start(&mut self, c: u8, cmd_state: bool) {
        let mut func = if c == b'"' {
            StrFunc::DQUOTE
        } else {
            StrFunc::SQUOTE
        };
        if self.label_possible(cmd_state) {
            func |= StrFunc::LABEL;
        }
        let start = self.tok_start;
        self.emit(TokenKind::StringBeg);
        self.open_quote(func, c, start);
    }

    /// `` ` `` is a method name after `def` or `.`, a command string
    /// otherwise.
    pub(crate) fn backtick(&mut self, cmd_state: bool) {
        if self.state.any(ExprState::FNAME) {
            self.state = ExprState::ENDFN;
            return self.emit(TokenKind::Backtick);
        }
        if self.state.any(ExprState::DOT) {
            self.state = if cmd_state {
                ExprState::CMDARG
            } else {
                ExprState::ARG
            };
            return self.emit(TokenKind::Backtick);
        }
        let start = self.tok_start;
        self.emit(TokenKind::XStringBeg);
        self.open_quote(StrFunc::XQUOTE, b'`', start);
    }

    pub(crate) fn regexp_start(&mut self) {
        let start = self.tok_start;
        self.emit(TokenKind::RegexpBeg);
        self.open_quote(StrFunc::REGEXP_LIT, b'/', start);
    }

    /// `%` opening a percent literal; the type letter (if any) is next.
    pub(crate) fn percent_literal(&mut self) {
        let Some(c) = self.cursor.next_in_line() else {
            self.error(LexErrorKind::UnterminatedQuote);
            return self.emit(TokenKind::Error);
        };
        let (letter, delimiter) = if c.is_ascii_alphanumeric() {
            let Some(delimiter) = self.cursor.next_in_line() else {
                self.error(LexErrorKind::UnterminatedQuote);
                return self.emit(TokenKind::Error);
            };
            if is_ident_char(delimiter) {
                self.skip_char_tail(delimiter);
                self.error(LexErrorKind::UnknownPercentType);
                return self.emit(TokenKind::Error);
            }
            (c, delimiter)
        } else if !c.is_ascii() {
            self.skip_char_tail(c);
            self.error(LexErrorKind::UnknownPercentType);
            return self.emit(TokenKind::Error);
        } else {
            (b'Q', c)
        };
        let (open, close) = match delimiter {
            b'(' => (b'(', b')'),
            b'[' => (b'[', b']'),
            b'{' => (b'{', b'}'),
            b'<' => (b'<', b'>'),
            _ => (0, delimiter),
        };
        let (func, kind) = match letter {
            b'Q' => (StrFunc::DQUOTE, TokenKind::StringBeg),
            b'q' => (StrFunc::SQUOTE, TokenKind::StringBeg),
            b'W' => (StrFunc::DWORD, TokenKind::WordsBeg),
            b'w' => (StrFunc::SWORD, TokenKind::QWordsBeg),
            b'I' => (StrFunc::DWORD, TokenKind::SymbolsBeg),
            b'i' => (StrFunc::SWORD, TokenKind::QSymbolsBeg),
            b'x' => (StrFunc::XQUOTE, TokenKind::XStringBeg),
            b'r' => (StrFunc::REGEXP_LIT, TokenKind::RegexpBeg),
            b's' => (StrFunc::SSYM, TokenKind::SymBeg),
            _ => {
                self.error(LexErrorKind::UnknownPercentType);
                return self.emit(TokenKind::Error);
            }
        };
        if letter == b's' {
            self.state = ExprState::FNAME | ExprState::FITEM;
        }
        let start = self.tok_start;
        self.emit(kind);
        self.term = Some(Term::Quote(QuoteTerm::new(func, open, close, start)));
    }

    // === Body ===

    /// One step inside a quoted literal.
    pub(crate) fn scan_quote(&mut self, mut q: QuoteTerm) {
        let func = q.func;
        if func.contains(StrFunc::TERM) {
            if func.contains(StrFunc::QWORDS) {
                self.nextc();
            }
            self.state = ExprState::END;
            let kind = if func.contains(StrFunc::REGEXP) {
                TokenKind::RegexpEnd
            } else {
                TokenKind::StringEnd
            };
            return self.emit(kind);
        }

        let mut c = self.nextc();
        let mut space = false;
        if func.contains(StrFunc::QWORDS) && c.is_some_and(is_space) {
            while c.is_some_and(is_space) {
                c = self.nextc();
            }
            space = true;
        }
        if func.contains(StrFunc::LIST) {
            q.func.remove(StrFunc::LIST);
            space = true;
        }
        if c == Some(q.close) && q.nest == 0 {
            if func.contains(StrFunc::QWORDS) {
                q.func.insert(StrFunc::TERM);
                self.cursor.pushback(c);
                self.emit(TokenKind::WordsSep);
                self.term = Some(Term::Quote(q));
                return;
            }
            return self.string_term(&q);
        }
        if space {
            self.cursor.pushback(c);
            self.emit(TokenKind::WordsSep);
            self.term = Some(Term::Quote(q));
            return;
        }

        if func.contains(StrFunc::EXPAND) && c == Some(b'#') {
            if let Some(kind) = self.interpolation_at(0) {
                return self.begin_interpolation(Term::Quote(q), kind);
            }
            self.tokbuf.push(b'#');
            c = self.nextc();
        }
        self.cursor.pushback(c);

        self.lit.regexp = func.contains(StrFunc::REGEXP);
        let (close, open) = (q.close, q.open);
        let stop = self.tokadd_string(q.func, close, open, &mut q.nest);
        if stop == StrStop::Eof {
            let what = if func.contains(StrFunc::QWORDS) {
                "list"
            } else if func.contains(StrFunc::REGEXP) {
                "regexp"
            } else {
                "string"
            };
            self.error_at(LexErrorKind::UnterminatedLiteral { what }, q.start);
            q.func.insert(StrFunc::TERM);
        }
        if self.lit.non_ascii {
            q.non_ascii = true;
        }
        self.flush_content(&[]);
        self.term = Some(Term::Quote(q));
    }

    /// The closing delimiter is next.
    fn string_term(&mut self, q: &QuoteTerm) {
        if q.func.contains(StrFunc::REGEXP) {
            let options = self.regexp_options(q);
            self.state = ExprState::END;
            return self.emit_value(TokenKind::RegexpEnd, TokenValue::RegexpOptions(options));
        }
        if q.func.contains(StrFunc::LABEL) && self.label_suffix(0) {
            self.cursor.skip(1);
            self.state = ExprState::BEG | ExprState::LABEL;
            return self.emit(TokenKind::LabelEnd);
        }
        self.state = ExprState::END;
        self.emit(TokenKind::StringEnd);
    }

    fn regexp_options(&mut self, q: &QuoteTerm) -> RegexpOptions {
        let mut options = RegexpOptions::default();
        let mut unknown = String::new();
        while let Some(c) = self.cursor.peek().filter(u8::is_ascii_alphabetic) {
            self.cursor.skip(1);
            match c {
                b'i' => options.ignore_case = true,
                b'x' => options.extended = true,
                b'm' => options.multiline = true,
                b'o' => options.once = true,
                b'n' | b'e' | b's' | b'u' => options.encoding = Some(c),
                _ => unknown.push(char::from(c)),
            }
        }
        if !unknown.is_empty() {
            self.error(LexErrorKind::UnknownRegexpOption { options: unknown });
        }
        if let Some(option) = options.encoding {
            let wanted = match option {
                b'e' => SourceEncoding::EucJp,
                b's' => SourceEncoding::Windows31J,
                b'u' => SourceEncoding::Utf8,
                _ => SourceEncoding::Binary,
            };
            if q.non_ascii && wanted != self.encoding {
                self.error(LexErrorKind::RegexpEncodingMismatch {
                    option: char::from(option),
                    encoding: self.encoding,
                });
            }
        }
        options
    }

    /// Cook literal content into the token buffer until something other
    /// than content is next. `paren` is the nesting opener, `0` for none.
    pub(crate) fn tokadd_string(
        &mut self,
        func: StrFunc,
        term: u8,
        paren: u8,
        nest: &mut u32,
    ) -> StrStop {
        while let Some(c) = self.nextc() {
            if paren != 0 && c == paren {
                *nest += 1;
            } else if c == term {
                if *nest == 0 {
                    self.cursor.pushback(Some(c));
                    return StrStop::Term;
                }
                *nest -= 1;
            } else if func.contains(StrFunc::EXPAND)
                && c == b'#'
                && matches!(self.cursor.peek(), Some(b'$' | b'@' | b'{'))
            {
                self.cursor.pushback(Some(c));
                return StrStop::Interp;
            } else if c == b'\\' {
                let Some(e) = self.nextc() else {
                    return StrStop::Eof;
                };
                if let Some(stop) = self.tokadd_backslash(func, e, term, paren) {
                    return stop;
                }
                continue;
            } else if !c.is_ascii() {
                self.note_non_ascii();
                self.tokadd_mbchar(c);
                continue;
            } else if func.contains(StrFunc::QWORDS) && is_space(c) {
                self.cursor.pushback(Some(c));
                return StrStop::Space;
            }
            self.tokbuf.push(c);
        }
        StrStop::Eof
    }

    /// The escaped character `e` after a backslash.
    fn tokadd_backslash(&mut self, func: StrFunc, e: u8, term: u8, paren: u8) -> Option<StrStop> {
        match e {
            b'\n' => {
                if func.contains(StrFunc::QWORDS) {
                    self.tokbuf.push(e);
                    return None;
                }
                if func.contains(StrFunc::EXPAND) {
                    if !func.contains(StrFunc::INDENT) {
                        return None;
                    }
                    if term == b'\n' {
                        return Some(StrStop::Continuation);
                    }
                }
                self.tokbuf.extend_from_slice(b"\\\n");
            }
            b'\\' => {
                if func.contains(StrFunc::ESCAPE) {
                    self.tokbuf.push(e);
                }
                self.tokbuf.push(e);
            }
            b'u' if func.contains(StrFunc::EXPAND) => {
                self.tokadd_utf8(Some(term), func.contains(StrFunc::REGEXP));
            }
            b'u' => self.tokbuf.extend_from_slice(b"\\u"),
            _ if !e.is_ascii() => {
                if !func.contains(StrFunc::EXPAND) {
                    self.tokbuf.push(b'\\');
                }
                self.note_non_ascii();
                self.tokadd_mbchar(e);
            }
            _ if func.contains(StrFunc::REGEXP) => match e {
                b'c' | b'C' | b'M' => {
                    self.cursor.pushback(Some(e));
                    let byte = self.read_escape(EscapeFlags::empty());
                    self.tokbuf
                        .extend_from_slice(format!("\\x{byte:02X}").as_bytes());
                }
                _ if e == term && !is_simple_re_meta(e) => self.tokbuf.push(e),
                _ => {
                    self.cursor.pushback(Some(e));
                    self.tokadd_escape();
                }
            },
            _ if func.contains(StrFunc::EXPAND) => {
                self.cursor.pushback(Some(e));
                let byte = self.read_escape(EscapeFlags::empty());
                if !byte.is_ascii() {
                    self.note_non_ascii();
                }
                self.tokbuf.push(byte);
            }
            _ if func.contains(StrFunc::QWORDS) && is_space(e) => self.tokbuf.push(e),
            _ if e != term && !(paren != 0 && e == paren) => {
                self.tokbuf.push(b'\\');
                self.cursor.pushback(Some(e));
            }
            _ => self.tokbuf.push(e),
        }
        None
    }

    // === Interpolation ===

    /// Interpolation starting `offset` bytes ahead (just after a `#`).
    pub(crate) fn interpolation_at(&self, offset: usize) -> Option<Interp> {
        let peek = |n: usize| self.cursor.peek_at(offset + n);
        let c = peek(0)?;
        peek(1)?;
        let name_start = match c {
            b'{' => return Some(Interp::Block),
            b'$' => match peek(1)? {
                b'-' => peek(2)?,
                d if is_global_punct(d) || d.is_ascii_digit() => return Some(Interp::Variable),
                d => d,
            },
            b'@' => match peek(1)? {
                b'@' => peek(2)?,
                d => d,
            },
            _ => return None,
        };
        (!name_start.is_ascii() || name_start == b'_' || name_start.is_ascii_alphabetic())
            .then_some(Interp::Variable)
    }

    /// Suspend `term` and start lexing an interpolation. The `#` has been
    /// read; for a block the `{` is next.
    pub(crate) fn begin_interpolation(&mut self, term: Term, kind: Interp) {
        match kind {
            Interp::Block => {
                self.cursor.skip(1);
                self.interp.push(InterpFrame::Block {
                    term,
                    state: self.state,
                    brace_nest: self.brace_nest,
                    cond: self.cond,
                    cmdarg: self.cmdarg,
                });
                self.state = ExprState::BEG;
                self.brace_nest = 0;
                self.cond.push(false);
                self.cmdarg.push(false);
                self.command_start = true;
                debug!(depth = self.interp.len(), "interpolation opened");
                self.emit(TokenKind::StringDBeg);
            }
            Interp::Variable => {
                self.state = ExprState::BEG;
                self.emit(TokenKind::StringDVar);
                self.interp.push(InterpFrame::Variable { term });
            }
        }
    }

    // === Character literals ===

    /// `?` is either the ternary operator or a character literal.
    pub(crate) fn question(&mut self) {
        if self.is_end() {
            self.state = ExprState::BEG;
            return self.emit(TokenKind::Question);
        }
        let Some(c) = self.cursor.next_in_line() else {
            self.error(LexErrorKind::IncompleteCharSyntax);
            return self.emit(TokenKind::Error);
        };
        if is_space(c) {
            if !self.is_arg() {
                if let Some(escape) = escaped_control_code(c) {
                    self.warn(LexWarningKind::InvalidCharSyntax { escape });
                }
            }
            self.cursor.pushback(Some(c));
            self.state = ExprState::BEG;
            return self.emit(TokenKind::Question);
        }

        self.tokbuf.clear();
        self.lit = LiteralEncoding::default();
        if !c.is_ascii() {
            self.note_non_ascii();
            self.tokadd_mbchar(c);
        } else if (c.is_ascii_alphanumeric() || c == b'_')
            && self.cursor.peek().is_some_and(is_ident_char)
        {
            if self.space_seen {
                let start = self.cursor.pos() - 1;
                self.skip_ident_run();
                let text = String::from_utf8_lossy(self.cursor.slice(start, self.cursor.pos()))
                    .into_owned();
                self.cursor.seek_in_line(start);
                self.warn(LexWarningKind::QuestionBeforeIdentifier { text });
            } else {
                self.cursor.pushback(Some(c));
            }
            self.state = ExprState::BEG;
            return self.emit(TokenKind::Question);
        } else if c == b'\\' {
            // The escape may run into end of input; keep `?\` in the token.
            self.literal = true;
            if self.cursor.peek_is(b'u') {
                self.cursor.skip(1);
                self.lit.fixed = Some(SourceEncoding::Utf8);
                self.tokadd_utf8(None, false);
            } else if let Some(lead) = self.cursor.peek().filter(|b| !b.is_ascii()) {
                self.cursor.skip(1);
                self.note_non_ascii();
                self.tokadd_mbchar(lead);
            } else {
                let byte = self.read_escape(EscapeFlags::empty());
                if !byte.is_ascii() {
                    self.note_non_ascii();
                }
                self.tokbuf.push(byte);
            }
            self.literal = false;
        } else {
            self.tokbuf.push(c);
        }
        let bytes = std::mem::take(&mut self.tokbuf);
        let encoding = self.literal_encoding();
        self.lit = LiteralEncoding::default();
        self.state = ExprState::END;
        self.emit_value(TokenKind::Char, TokenValue::Str(StrLit { bytes, encoding }));
    }
}

#[cfg(test)]
mod tests;
