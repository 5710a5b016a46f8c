//! Identifiers, reserved words and sigiled variables.

use garnet_ir::{ExprState, Keyword, SourceEncoding, TokenKind};

use crate::keywords;
use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::state::{is_ident_char, is_space};
use crate::Lexer;

/// Largest `$n` that still refers to a match group.
const NTH_REF_MAX: u64 = 0x3FFF_FFFF;

/// Byte length of the character starting with `lead` in `encoding`.
pub(crate) fn mbc_len(encoding: SourceEncoding, lead: u8) -> usize {
    if lead.is_ascii() {
        return 1;
    }
    match encoding {
        SourceEncoding::Utf8 => match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        },
        SourceEncoding::Windows31J => {
            if matches!(lead, 0x81..=0x9F | 0xE0..=0xFC) {
                2
            } else {
                1
            }
        }
        SourceEncoding::EucJp => match lead {
            0x8F => 3,
            0x8E | 0xA1..=0xFE => 2,
            _ => 1,
        },
        _ => 1,
    }
}

/// Whether a name starts with an uppercase letter (and so names a
/// constant).
fn starts_uppercase(encoding: SourceEncoding, name: &[u8]) -> bool {
    match name.first() {
        Some(b) if b.is_ascii() => b.is_ascii_uppercase(),
        Some(_) if encoding == SourceEncoding::Utf8 => {
            let len = name.len().min(4);
            let head = (1..=len).find_map(|n| std::str::from_utf8(&name[..n]).ok());
            head.and_then(|s| s.chars().next())
                .is_some_and(char::is_uppercase)
        }
        _ => false,
    }
}

impl Lexer {
    /// Skip the trailing bytes of a multibyte character whose lead byte was
    /// just consumed.
    pub(crate) fn skip_char_tail(&mut self, lead: u8) {
        self.cursor.skip(mbc_len(self.encoding, lead) - 1);
    }

    /// Consume identifier characters following the current position.
    pub(crate) fn skip_ident_run(&mut self) {
        while let Some(b) = self.cursor.peek() {
            if !is_ident_char(b) {
                break;
            }
            self.cursor.skip(1);
            self.skip_char_tail(b);
        }
    }

    fn token_text(&self) -> Vec<u8> {
        self.cursor.slice(self.tok_start, self.cursor.pos()).to_vec()
    }

    pub(crate) fn identifier(&mut self, c: u8, cmd_state: bool, last_state: ExprState) {
        if !is_ident_char(c) {
            self.error(LexErrorKind::InvalidChar { byte: c });
            return self.emit(TokenKind::Error);
        }
        self.skip_char_tail(c);
        self.skip_ident_run();

        let mut kind = TokenKind::Constant;
        let mut setter = false;
        match self.cursor.peek() {
            Some(b'!' | b'?') if self.cursor.peek_at(1) != Some(b'=') => {
                self.cursor.skip(1);
                kind = TokenKind::FuncName;
            }
            // `==` and `=~` are never part of a name; `=>` only after `foo==`.
            Some(b'=')
                if self.state.any(ExprState::FNAME)
                    && !matches!(self.cursor.peek_at(1), Some(b'~' | b'>'))
                    && (self.cursor.peek_at(1) != Some(b'=')
                        || self.cursor.peek_at(2) == Some(b'>')) =>
            {
                self.cursor.skip(1);
                kind = TokenKind::Identifier;
                setter = true;
            }
            _ => {}
        }

        if self.label_possible(cmd_state) && self.label_suffix(0) {
            self.cursor.skip(1);
            self.state = ExprState::ARG | ExprState::LABELED;
            return self.emit(TokenKind::Label);
        }

        let text = self.token_text();
        if !self.state.any(ExprState::DOT) {
            if let Some(entry) = keywords::lookup(&text) {
                return self.keyword(entry.keyword, entry.state);
            }
        }

        self.state = if self.state.any(ExprState::BEG_ANY | ExprState::ARG_ANY | ExprState::DOT) {
            if cmd_state {
                ExprState::CMDARG
            } else {
                ExprState::ARG
            }
        } else if self.state == ExprState::FNAME {
            ExprState::ENDFN
        } else {
            ExprState::END
        };

        if kind == TokenKind::Constant && (setter || !starts_uppercase(self.encoding, &text)) {
            kind = TokenKind::Identifier;
        }
        if kind == TokenKind::Identifier
            && !last_state.any(ExprState::DOT | ExprState::FNAME)
            && self.scope.is_local(&text)
        {
            self.state = ExprState::END | ExprState::LABEL;
        }
        self.emit(kind);
    }

    fn keyword(&mut self, keyword: Keyword, next_state: ExprState) {
        let prior = self.state;
        if prior.any(ExprState::FNAME) {
            self.state = ExprState::ENDFN;
            return self.emit(TokenKind::Keyword(keyword));
        }
        self.state = next_state;
        if self.state.any(ExprState::BEG) {
            self.command_start = true;
        }
        if keyword == Keyword::DoBlock {
            let resolved = if self.lambda_beginning() {
                Keyword::DoLambda
            } else if self.cond.is_set() {
                Keyword::DoCond
            } else if self.cmdarg.is_set() && !prior.any(ExprState::CMDARG) {
                Keyword::DoCommand
            } else {
                Keyword::DoBlock
            };
            return self.emit(TokenKind::Keyword(resolved));
        }
        if prior.any(ExprState::BEG | ExprState::LABELED) || !keyword.has_modifier_form() {
            return self.emit(TokenKind::Keyword(keyword));
        }
        self.state = ExprState::BEG | ExprState::LABEL;
        self.emit(TokenKind::Modifier(keyword))
    }

    // === Sigiled variables ===

    /// `$` was just read.
    pub(crate) fn dollar(&mut self, last_state: ExprState) {
        self.state = ExprState::END;
        let Some(c) = self.cursor.next_in_line() else {
            self.error(LexErrorKind::GlobalWithoutName);
            return self.emit(TokenKind::GVar);
        };
        match c {
            b'_' if self.cursor.peek().is_some_and(is_ident_char) => {
                self.skip_ident_run();
                self.emit(TokenKind::GVar);
            }
            b'_' | b'~' | b'*' | b'$' | b'?' | b'!' | b'@' | b'/' | b'\\' | b';' | b',' | b'.'
            | b'=' | b':' | b'<' | b'>' | b'"' => self.emit(TokenKind::GVar),
            b'-' => {
                let Some(name) = self.cursor.peek().filter(|&b| is_ident_char(b)) else {
                    self.cursor.pushback(Some(c));
                    return self.emit(TokenKind::Dollar);
                };
                self.cursor.skip(1);
                self.skip_char_tail(name);
                self.emit(TokenKind::GVar);
            }
            b'&' | b'`' | b'\'' | b'+' => {
                if last_state.any(ExprState::FNAME) {
                    self.emit(TokenKind::GVar);
                } else {
                    self.emit(TokenKind::BackRef);
                }
            }
            b'1'..=b'9' => {
                while self.cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.cursor.skip(1);
                }
                if last_state.any(ExprState::FNAME) {
                    return self.emit(TokenKind::GVar);
                }
                let text = self.token_text();
                let digits = &text[1..];
                let too_big = std::str::from_utf8(digits)
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map_or(true, |n| n > NTH_REF_MAX);
                if too_big {
                    self.warn(LexWarningKind::NthRefTooBig {
                        name: String::from_utf8_lossy(&text).into_owned(),
                    });
                }
                self.emit(TokenKind::NthRef);
            }
            b'0' => {
                self.skip_ident_run();
                self.emit(TokenKind::GVar);
            }
            _ if is_ident_char(c) => {
                self.skip_char_tail(c);
                self.skip_ident_run();
                self.emit(TokenKind::GVar);
            }
            _ => {
                self.cursor.pushback(Some(c));
                let kind = if is_space(c) {
                    LexErrorKind::GlobalWithoutName
                } else {
                    LexErrorKind::InvalidGlobal { ch: char::from(c) }
                };
                self.error(kind);
                self.emit(TokenKind::GVar);
            }
        }
    }

    /// `@` was just read.
    pub(crate) fn at_sign(&mut self, last_state: ExprState) {
        let class_var = self.cursor.peek_is(b'@');
        if class_var {
            self.cursor.skip(1);
        }
        let kind = if class_var { TokenKind::CVar } else { TokenKind::IVar };
        self.state = if last_state.any(ExprState::FNAME) {
            ExprState::ENDFN
        } else {
            ExprState::END
        };
        match self.cursor.peek() {
            Some(d) if d.is_ascii_digit() => {
                let digit = char::from(d);
                self.error(if class_var {
                    LexErrorKind::CvarStartsWithDigit { digit }
                } else {
                    LexErrorKind::IvarStartsWithDigit { digit }
                });
                self.state = ExprState::END;
            }
            Some(b) if is_ident_char(b) => self.skip_ident_run(),
            _ => {
                self.error(if class_var {
                    LexErrorKind::CvarWithoutName
                } else {
                    LexErrorKind::IvarWithoutName
                });
                self.state = ExprState::END;
            }
        }
        self.emit(kind);
    }
}

#[cfg(test)]
mod tests;
