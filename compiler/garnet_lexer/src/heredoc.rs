//! Here documents.
//!
//! `<<ID` only opens the heredoc; the body starts on the next line. The
//! opening line is bookmarked, the body is scanned up to its terminator
//! line, and scanning then resumes on the opening line right after the
//! marker. Lines consumed by the body are skipped when the cursor later
//! moves past the opening line.
//!
//! A `<<~` body is dedented by the smallest indentation of its non-blank
//! lines. That width is only known once the terminator is found, so events
//! are held back until then and the line starts recorded in `marks` are
//! rewritten in place.

use garnet_ir::{ExprState, HeredocIndent, HeredocInfo, HeredocQuote, TokenKind, TokenValue};
use tracing::debug;

use crate::lex_error::LexErrorKind;
use crate::output::indent_width;
use crate::state::{is_ident_char, is_space};
use crate::string::StrStop;
use crate::term::{HeredocTerm, StrFunc, Term};
use crate::Lexer;

impl Lexer {
    /// `<<` was just read. Returns `false`, leaving the cursor where it was,
    /// when no heredoc marker follows.
    pub(crate) fn heredoc_identifier(&mut self) -> bool {
        let start = self.cursor.pos();
        let indent = match self.cursor.peek() {
            Some(b'-') => HeredocIndent::Dash,
            Some(b'~') => HeredocIndent::Squiggly,
            _ => HeredocIndent::None,
        };
        if indent != HeredocIndent::None {
            self.cursor.skip(1);
        }

        let (quote, marker) = match self.cursor.peek() {
            Some(q @ (b'\'' | b'"' | b'`')) => {
                self.cursor.skip(1);
                let body = self.cursor.pos();
                loop {
                    match self.cursor.next_in_line() {
                        Some(c) if c == q => break,
                        c @ (None | Some(b'\r' | b'\n')) => {
                            self.cursor.pushback(c);
                            self.error(LexErrorKind::UnterminatedHeredocId);
                            self.emit(TokenKind::Error);
                            return true;
                        }
                        Some(_) => {}
                    }
                }
                let marker = self.cursor.slice(body, self.cursor.pos() - 1).to_vec();
                let quote = match q {
                    b'\'' => HeredocQuote::Single,
                    b'`' => HeredocQuote::Backtick,
                    _ => HeredocQuote::Double,
                };
                (quote, marker)
            }
            Some(c) if is_ident_char(c) => {
                let body = self.cursor.pos();
                self.skip_ident_run();
                (HeredocQuote::Bare, self.cursor.slice(body, self.cursor.pos()).to_vec())
            }
            _ => {
                self.cursor.seek_in_line(start);
                return false;
            }
        };

        let mut func = match quote {
            HeredocQuote::Single => StrFunc::SQUOTE,
            HeredocQuote::Backtick => StrFunc::XQUOTE,
            HeredocQuote::Bare | HeredocQuote::Double => StrFunc::DQUOTE,
        };
        if indent != HeredocIndent::None {
            func |= StrFunc::INDENT;
        }
        self.emit_value(
            TokenKind::HeredocBeg,
            TokenValue::Heredoc(HeredocInfo {
                marker: marker.clone(),
                quote,
                indent,
            }),
        );

        let resume = self.cursor.snapshot();
        self.cursor.goto_eol();
        self.tok_start = self.cursor.pos();
        self.heredoc_seq += 1;
        let here = HeredocTerm {
            marker,
            func,
            indent,
            resume,
            min_indent: None,
            continuation: false,
            id: self.heredoc_seq,
            marks: Vec::new(),
            line_marks: Vec::new(),
        };
        if here.is_squiggly() {
            self.hold += 1;
        }
        debug!(
            id = here.id,
            marker = %String::from_utf8_lossy(&here.marker),
            line = self.cursor.line_no(),
            "heredoc opened"
        );
        self.term = Some(Term::Heredoc(here));
        true
    }

    /// One step inside a heredoc body: content up to the terminator line or
    /// an interpolation.
    pub(crate) fn scan_heredoc(&mut self, mut here: HeredocTerm) {
        let expand = here.func.contains(StrFunc::EXPAND);
        loop {
            if self.cursor.at_eol() && !self.advance_line() {
                return self.heredoc_eof(here);
            }
            if self.cursor.is_bol() {
                if here.continuation {
                    here.continuation = false;
                } else {
                    if self.at_heredoc_terminator(&here) {
                        return self.heredoc_end(here);
                    }
                    if here.is_squiggly() {
                        if let Some(width) = indent_width(self.cursor.rest_of_line()) {
                            here.min_indent =
                                Some(here.min_indent.map_or(width, |min| min.min(width)));
                        }
                        here.line_marks.push(self.tokbuf.len());
                    }
                }
            }

            if !expand {
                self.copy_raw_line();
                continue;
            }

            if self.cursor.peek_is(b'#') {
                if let Some(kind) = self.interpolation_at(1) {
                    let marks = std::mem::take(&mut here.line_marks);
                    let resolved = self.flush_content(&marks);
                    here.marks.extend(resolved);
                    self.cursor.skip(1);
                    return self.begin_interpolation(Term::Heredoc(here), kind);
                }
                self.cursor.skip(1);
                self.tokbuf.push(b'#');
            }
            let mut nest = 0;
            match self.tokadd_string(here.func, b'\n', 0, &mut nest) {
                StrStop::Term => {
                    self.cursor.next_in_line();
                    self.tokbuf.push(b'\n');
                }
                StrStop::Continuation => here.continuation = true,
                StrStop::Eof => return self.heredoc_eof(here),
                StrStop::Interp | StrStop::Space => {}
            }
        }
    }

    /// A line of a non-interpolating body, `\r\n` read as `\n`.
    fn copy_raw_line(&mut self) {
        let line = self.cursor.rest_of_line();
        let body = match line {
            [head @ .., b'\r', b'\n'] => [head, b"\n"].concat(),
            _ => line.to_vec(),
        };
        if !body.is_ascii() {
            self.note_non_ascii();
        }
        self.tokbuf.extend_from_slice(&body);
        self.cursor.goto_eol();
    }

    /// The current line is exactly the marker, indented if allowed.
    fn at_heredoc_terminator(&self, here: &HeredocTerm) -> bool {
        let mut line = self.cursor.line_bytes();
        if here.func.contains(StrFunc::INDENT) {
            let blanks = line.iter().take_while(|&&b| is_space(b)).count();
            line = &line[blanks..];
        }
        line.strip_prefix(here.marker.as_slice())
            .is_some_and(|rest| matches!(rest, [] | [b'\n'] | [b'\r', b'\n']))
    }

    fn heredoc_end(&mut self, mut here: HeredocTerm) {
        let marks = std::mem::take(&mut here.line_marks);
        let resolved = self.flush_content(&marks);
        here.marks.extend(resolved);
        self.cursor.goto_eol();
        self.state = ExprState::END;
        self.emit(TokenKind::HeredocEnd);
        self.resume_after_heredoc(&here);
    }

    fn heredoc_eof(&mut self, mut here: HeredocTerm) {
        self.error_at(
            LexErrorKind::UnterminatedHeredoc {
                marker: String::from_utf8_lossy(&here.marker).into_owned(),
            },
            here.resume.pos(),
        );
        let marks = std::mem::take(&mut here.line_marks);
        let resolved = self.flush_content(&marks);
        here.marks.extend(resolved);
        self.state = ExprState::END;
        self.emit(TokenKind::HeredocEnd);
        self.resume_after_heredoc(&here);
    }

    /// Jump back to the opening line and apply any `<<~` dedent.
    fn resume_after_heredoc(&mut self, here: &HeredocTerm) {
        let last_line = self.cursor.line_index();
        self.cursor.restore(here.resume, last_line);
        self.tok_start = self.cursor.pos();
        if here.is_squiggly() {
            let width = here.min_indent.unwrap_or(0);
            self.dedent_marked(&here.marks, width);
            self.hold = self.hold.saturating_sub(1);
        }
        debug!(id = here.id, resume_line = self.cursor.line_no(), "heredoc closed");
    }
}
