//! Top-level dispatch: one scan step outside any literal.
//!
//! Layout characters (blanks, newlines, comments, line continuations) are
//! handled here; everything else is routed by its first byte to the
//! operator, literal and identifier scanners.

use garnet_ir::{ExprState, TokenKind, TriviaKind};
use tracing::debug;

use crate::lex_error::LexWarningKind;
use crate::Lexer;

impl Lexer {
    pub(crate) fn scan_token(&mut self) {
        let last_state = self.state;
        let Some(c) = self.cursor.next_in_line() else {
            if !self.advance_line() {
                self.end_of_input();
            }
            return;
        };
        match c {
            0 | 0x04 | 0x1a => self.end_of_script(),
            b' ' | b'\t' | 0x0c | 0x0b | b'\r' => self.whitespace(c),
            b'#' => self.comment(),
            b'\n' => self.newline(false),
            b'\\' if self.cursor.peek_char() == Some(b'\n') => {
                self.cursor.next_in_line();
                self.space_seen = true;
                self.ignore(TriviaKind::Space);
            }
            b'=' if self.cursor.was_bol() && self.at_embdoc_begin() => self.embdoc(),
            b'_' if self.cursor.was_bol() && self.at_end_marker() => self.end_marker(),
            _ => {
                let cmd_state = std::mem::replace(&mut self.command_start, false);
                self.dispatch(c, cmd_state, last_state);
            }
        }
    }

    fn dispatch(&mut self, c: u8, cmd_state: bool, last_state: ExprState) {
        match c {
            b'*' => self.star(last_state),
            b'!' => self.bang(),
            b'=' => self.equals(),
            b'<' => self.less_than(last_state),
            b'>' => self.greater_than(),
            b'"' => self.quote_start(c, cmd_state),
            b'\'' => self.quote_start(c, cmd_state),
            b'`' => self.backtick(cmd_state),
            b'?' => self.question(),
            b'&' => self.ampersand(last_state),
            b'|' => self.pipe(last_state),
            b'+' | b'-' => self.plus_minus(c, last_state),
            b'.' => self.dot(last_state),
            b'0'..=b'9' => self.scan_number(c),
            b')' => self.close_paren(),
            b']' => self.close_bracket(),
            b'}' => self.close_brace(),
            b':' => self.colon(last_state),
            b'/' => self.slash(last_state),
            b'^' => self.caret(),
            b';' => {
                self.state = ExprState::BEG;
                self.command_start = true;
                self.emit(TokenKind::Semicolon);
            }
            b',' => {
                self.state = ExprState::BEG | ExprState::LABEL;
                self.emit(TokenKind::Comma);
            }
            b'~' => self.tilde(),
            b'(' => self.open_paren(),
            b'[' => self.open_bracket(),
            b'{' => self.open_brace(),
            b'\\' => self.emit(TokenKind::Backslash),
            b'%' => self.percent(last_state),
            b'$' => self.dollar(last_state),
            b'@' => self.at_sign(last_state),
            _ => self.identifier(c, cmd_state, last_state),
        }
    }

    // === Layout ===

    fn whitespace(&mut self, first: u8) {
        let mut cr = first == b'\r';
        while let Some(b) = self.cursor.peek() {
            match b {
                b' ' | b'\t' | 0x0c | 0x0b => self.cursor.skip(1),
                b'\r' if self.cursor.peek_at(1) != Some(b'\n') => {
                    cr = true;
                    self.cursor.skip(1);
                }
                _ => break,
            }
        }
        if cr && !self.cr_seen {
            self.cr_seen = true;
            self.warn(LexWarningKind::CarriageReturn);
        }
        self.space_seen = true;
        self.ignore(TriviaKind::Space);
    }

    /// A newline ends the statement unless the expression clearly
    /// continues. `after_comment` means the newline was already consumed as
    /// part of a comment, so any newline token is zero-length.
    pub(crate) fn newline(&mut self, after_comment: bool) {
        let beg_like = self.state.any(
            ExprState::BEG | ExprState::CLASS | ExprState::FNAME | ExprState::DOT,
        ) && !self.state.any(ExprState::LABELED);
        if beg_like || self.state.all_of(ExprState::ARG | ExprState::LABELED) {
            if !beg_like && self.in_kwarg {
                self.statement_newline();
                return;
            }
            if !after_comment {
                self.ignore(TriviaKind::IgnoredNewline);
            }
            return;
        }
        if self.next_line_continues() {
            if !after_comment {
                self.ignore(TriviaKind::IgnoredNewline);
            }
            return;
        }
        self.statement_newline();
    }

    fn statement_newline(&mut self) {
        self.command_start = true;
        self.state = ExprState::BEG;
        self.emit(TokenKind::Newline);
    }

    /// The next line starts with a comment or a method call on the
    /// previous value (`.meth`, `&.meth`).
    fn next_line_continues(&mut self) -> bool {
        let Some(line) = self.cursor.next_line() else {
            return false;
        };
        let text = line
            .iter()
            .position(|&b| !matches!(b, b' ' | b'\t' | 0x0c | b'\r' | 0x0b))
            .map_or(&[][..], |i| &line[i..]);
        match text {
            [b'#', ..] | [b'&', b'.', ..] => true,
            [b'.', rest @ ..] => rest.first() != Some(&b'.'),
            _ => false,
        }
    }

    // === End of input ===

    pub(crate) fn end_of_input(&mut self) {
        if let Some(frame) = self.interp.pop() {
            debug!(depth = self.interp.len(), "interpolation closed by end of input");
            self.term = Some(frame.into_term());
            return;
        }
        self.emit_eof();
    }

    fn emit_eof(&mut self) {
        self.tok_start = self.cursor.pos();
        self.eof_emitted = true;
        self.emit(TokenKind::Eof);
    }

    /// NUL, `^D` or `^Z`: the rest of the input is data.
    pub(crate) fn end_of_script(&mut self) {
        self.cursor.goto_eol();
        self.ignore(TriviaKind::DataSection);
        self.skip_data();
        self.end_of_input();
    }

    fn at_end_marker(&self) -> bool {
        let rest = self.cursor.line_bytes();
        let Some(tail) = rest.strip_prefix(b"__END__") else {
            return false;
        };
        matches!(tail, [] | [b'\n'] | [b'\r', b'\n'])
    }

    fn end_marker(&mut self) {
        self.cursor.goto_eol();
        self.ignore(TriviaKind::EndMarker);
        self.skip_data();
        debug!(line = self.cursor.line_no(), "__END__");
        self.end_of_input();
    }

    fn skip_data(&mut self) {
        if let Some((start, end)) = self.cursor.skip_to_end() {
            self.push_trivia(TriviaKind::DataSection, start, end);
            self.tok_start = end;
        }
    }
}

#[cfg(test)]
mod tests;
