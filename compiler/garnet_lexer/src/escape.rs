//! Backslash escapes inside literals.
//!
//! Cooked escapes (`\n`, `\x41`, `\C-a`, `\u{1F600}`) are decoded into the
//! token buffer. Regexp literals keep most escapes in source form for the
//! regexp engine; only `\c`, `\C-` and `\M-` are normalised to `\xHH`.

use bitflags::bitflags;
use garnet_ir::SourceEncoding;

use crate::ident::mbc_len;
use crate::lex_error::LexErrorKind;
use crate::state::is_space;
use crate::Lexer;

bitflags! {
    /// Modifiers already applied by an enclosing escape.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub(crate) struct EscapeFlags: u8 {
        const META = 1 << 0;
        const CONTROL = 1 << 1;
    }
}

/// Regexp metacharacters that keep their backslash even when escaping the
/// closing delimiter.
pub(crate) fn is_simple_re_meta(c: u8) -> bool {
    matches!(
        c,
        b'$' | b'*' | b'+' | b'.' | b'?' | b'^' | b'|' | b')' | b']' | b'}' | b'>'
    )
}

impl Lexer {
    /// Report an error at the cursor rather than at the token start.
    pub(crate) fn error_here(&mut self, kind: LexErrorKind) {
        self.error_at(kind, self.cursor.pos());
    }

    fn invalid_escape(&mut self) -> u8 {
        self.error_here(LexErrorKind::InvalidEscape);
        0
    }

    /// Decode the escape after a backslash into a single byte.
    pub(crate) fn read_escape(&mut self, flags: EscapeFlags) -> u8 {
        let Some(c) = self.nextc() else {
            return self.invalid_escape();
        };
        match c {
            b'\\' => c,
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'f' => 0x0c,
            b'v' => 0x0b,
            b'a' => 0x07,
            b'e' => 0x1b,
            b'b' => 0x08,
            b's' => b' ',
            b'0'..=b'7' => {
                let mut value = u32::from(c - b'0');
                for _ in 0..2 {
                    match self.cursor.peek() {
                        Some(d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            self.cursor.skip(1);
                        }
                        _ => break,
                    }
                }
                value.to_le_bytes()[0]
            }
            b'x' => self.read_hex_escape().unwrap_or(0),
            b'M' => {
                if flags.contains(EscapeFlags::META) || !self.cursor.peek_is(b'-') {
                    return self.invalid_escape();
                }
                self.cursor.skip(1);
                match self.nextc() {
                    Some(b'\\') => {
                        if matches!(self.cursor.peek(), Some(b'u' | b'U')) {
                            self.cursor.skip(1);
                            return self.invalid_escape();
                        }
                        self.read_escape(flags | EscapeFlags::META) | 0x80
                    }
                    Some(c) if c.is_ascii() => c | 0x80,
                    _ => self.invalid_escape(),
                }
            }
            b'C' | b'c' => {
                if c == b'C' {
                    if !self.cursor.peek_is(b'-') {
                        return self.invalid_escape();
                    }
                    self.cursor.skip(1);
                }
                if flags.contains(EscapeFlags::CONTROL) {
                    return self.invalid_escape();
                }
                let c = match self.nextc() {
                    Some(b'\\') => {
                        if matches!(self.cursor.peek(), Some(b'u' | b'U')) {
                            self.cursor.skip(1);
                            return self.invalid_escape();
                        }
                        self.read_escape(flags | EscapeFlags::CONTROL)
                    }
                    Some(b'?') => return 0x7f,
                    Some(c) if c.is_ascii() => c,
                    _ => return self.invalid_escape(),
                };
                c & 0x9f
            }
            _ => c,
        }
    }

    /// Up to two hex digits after `\x`.
    fn read_hex_escape(&mut self) -> Option<u8> {
        let digits = self.hex_run(2);
        if digits.is_empty() {
            self.error_here(LexErrorKind::InvalidHexEscape);
            return None;
        }
        u8::from_str_radix(&digits, 16).ok()
    }

    /// Consume up to `max` hex digits of the current line.
    fn hex_run(&mut self, max: usize) -> String {
        let mut digits = String::new();
        while digits.len() < max {
            match self.cursor.peek() {
                Some(d) if d.is_ascii_hexdigit() => {
                    digits.push(char::from(d));
                    self.cursor.skip(1);
                }
                _ => break,
            }
        }
        digits
    }

    /// Copy an escape into a regexp body in source form.
    pub(crate) fn tokadd_escape(&mut self) {
        let Some(c) = self.nextc() else {
            self.error_here(LexErrorKind::InvalidEscape);
            return;
        };
        match c {
            b'\n' => {}
            b'0'..=b'7' => {
                self.tokbuf.extend_from_slice(&[b'\\', c]);
                for _ in 0..2 {
                    match self.cursor.peek() {
                        Some(d @ b'0'..=b'7') => {
                            self.tokbuf.push(d);
                            self.cursor.skip(1);
                        }
                        _ => break,
                    }
                }
            }
            b'x' => {
                let digits = self.hex_run(2);
                if digits.is_empty() {
                    self.error_here(LexErrorKind::InvalidHexEscape);
                    return;
                }
                self.tokbuf.extend_from_slice(b"\\x");
                self.tokbuf.extend_from_slice(digits.as_bytes());
            }
            _ => self.tokbuf.extend_from_slice(&[b'\\', c]),
        }
    }

    /// `\u` was just read. `term` is the literal's closing delimiter, or
    /// `None` in a character literal, which takes a single codepoint.
    pub(crate) fn tokadd_utf8(&mut self, term: Option<u8>, regexp: bool) {
        if regexp {
            self.tokbuf.extend_from_slice(b"\\u");
        }
        if !self.cursor.peek_is(b'{') {
            self.tokadd_codepoint(regexp, false);
            return;
        }
        self.cursor.skip(1);
        if regexp {
            // The regexp engine validates braces itself, and extended
            // regexps may carry anything inside comments.
            self.tokbuf.push(b'{');
            while let Some(c) = self.cursor.peek() {
                if c == b'}' {
                    self.tokbuf.push(c);
                    self.cursor.skip(1);
                    return;
                }
                if Some(c) == term {
                    return;
                }
                self.cursor.skip(1);
                self.tokbuf.push(c);
                if c == b'\\' {
                    if let Some(next) = self.cursor.peek() {
                        self.tokbuf.push(next);
                        self.cursor.skip(1);
                    }
                }
            }
            return;
        }

        self.skip_escape_blanks();
        let mut count = 0;
        let mut second = None;
        let closed = loop {
            match self.cursor.peek() {
                None => break false,
                Some(b'}') => break true,
                Some(c) if Some(c) == term => break false,
                Some(_) => {}
            }
            if count == 1 && term.is_none() {
                second = Some(self.cursor.pos());
            }
            if !self.tokadd_codepoint(false, true) {
                break false;
            }
            count += 1;
            self.skip_escape_blanks();
        };
        if !closed {
            self.error_here(LexErrorKind::UnterminatedUnicodeEscape);
            return;
        }
        self.cursor.skip(1);
        if let Some(at) = second {
            self.error_at(LexErrorKind::MultipleCodepoints, at);
        }
    }

    fn skip_escape_blanks(&mut self) {
        while self
            .cursor
            .peek()
            .is_some_and(|b| is_space(b) && b != b'\n')
        {
            self.cursor.skip(1);
        }
    }

    /// One codepoint: exactly four hex digits, or one to six inside braces.
    /// Returns whether scanning of a braced list may continue.
    fn tokadd_codepoint(&mut self, regexp: bool, wide: bool) -> bool {
        let digits = self.hex_run(if wide { usize::MAX } else { 4 });
        let len = digits.len();
        if (wide && (len == 0 || len > 6)) || (!wide && len < 4) {
            self.error_here(LexErrorKind::InvalidUnicodeEscape);
            return wide && len > 0;
        }
        let Ok(codepoint) = u32::from_str_radix(&digits, 16) else {
            self.error_here(LexErrorKind::InvalidUnicodeEscape);
            return wide;
        };
        if codepoint > 0x10_FFFF {
            self.error_here(LexErrorKind::CodepointTooLarge);
            return wide;
        }
        if codepoint & 0xFFFF_F800 == 0xD800 {
            self.error_here(LexErrorKind::InvalidCodepoint);
            return wide;
        }
        if regexp {
            self.tokbuf.extend_from_slice(digits.as_bytes());
            return true;
        }
        let Some(ch) = char::from_u32(codepoint) else {
            self.error_here(LexErrorKind::InvalidCodepoint);
            return wide;
        };
        if !ch.is_ascii() {
            if let Some(fixed) = self.lit.fixed.filter(|&e| e != SourceEncoding::Utf8) {
                self.error_here(LexErrorKind::MixedEncoding {
                    literal: SourceEncoding::Utf8,
                    source_encoding: fixed,
                });
                return wide;
            }
            self.lit.fixed = Some(SourceEncoding::Utf8);
            self.lit.non_ascii = true;
        }
        let mut buf = [0; 4];
        self.tokbuf
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        true
    }

    /// A raw non-ASCII byte fixes the literal to the source encoding.
    /// Reports content already fixed to another encoding.
    pub(crate) fn note_non_ascii(&mut self) {
        self.lit.non_ascii = true;
        match self.lit.fixed {
            None => self.lit.fixed = Some(self.encoding),
            Some(fixed) if fixed == self.encoding => {}
            Some(fixed) => self.error_here(LexErrorKind::MixedEncoding {
                literal: fixed,
                source_encoding: self.encoding,
            }),
        }
    }

    /// Copy a multibyte character whose lead byte was just read.
    pub(crate) fn tokadd_mbchar(&mut self, lead: u8) {
        self.tokbuf.push(lead);
        let start = self.cursor.pos();
        self.cursor.skip(mbc_len(self.encoding, lead) - 1);
        let tail = self.cursor.slice(start, self.cursor.pos()).to_vec();
        self.tokbuf.extend_from_slice(&tail);
    }
}
