//! Comments, embedded documents, magic comments and the byte order mark.

use garnet_ir::{SourceEncoding, TriviaKind};
use garnet_lexer_core::Bom;
use tracing::debug;

use crate::hooks::{EncodingRejection, MagicComment};
use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::state::is_space;
use crate::Lexer;

/// One `name: value` pair of a magic comment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MagicPair<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

impl Lexer {
    /// `#` was just read: the comment runs to end of line, newline included.
    pub(crate) fn comment(&mut self) {
        let hash = self.tok_start;
        let body_start = self.cursor.pos();
        self.cursor.goto_eol();
        let body = self.cursor.slice(body_start, self.cursor.pos()).to_vec();
        let at_top = self.comment_at_top(hash);
        match parse_magic_comment(&body) {
            Some(pairs) => {
                for pair in pairs {
                    self.apply_magic_comment(pair, at_top);
                }
            }
            None if at_top => {
                if let Some(name) = vim_coding(&body) {
                    self.set_source_encoding(name);
                }
            }
            None => {}
        }
        self.ignore(TriviaKind::Comment);
        self.newline(true);
    }

    /// Only the first line (second after a shebang) may declare the source
    /// encoding, and only when nothing but blanks precede the `#`.
    fn comment_at_top(&self, hash: usize) -> bool {
        let expected = usize::from(self.has_shebang());
        if self.cursor.line_index() != expected {
            return false;
        }
        let mut start = self.cursor.line_start();
        if expected == 0 {
            start += self.cursor.buffer().bom().map_or(0, Bom::byte_len);
        }
        self.cursor.slice(start, hash).iter().all(|&b| is_space(b))
    }

    fn has_shebang(&self) -> bool {
        let Some((start, end)) = self.cursor.buffer().line_range(0) else {
            return false;
        };
        let bom = self.cursor.buffer().bom().map_or(0, Bom::byte_len);
        self.cursor.slice(start + bom, end).starts_with(b"#!")
    }

    fn apply_magic_comment(&mut self, pair: MagicPair<'_>, at_top: bool) {
        let name = String::from_utf8_lossy(pair.name).replace('-', "_");
        let value = String::from_utf8_lossy(pair.value).into_owned();
        match name.to_ascii_lowercase().as_str() {
            "coding" | "encoding" => {
                if !at_top {
                    return;
                }
                self.set_source_encoding(strip_newline_convention(pair.value));
            }
            "frozen_string_literal" => {
                if self.token_seen {
                    self.warn(LexWarningKind::MagicCommentAfterTokens { name });
                    return;
                }
                if let Some(flag) = self.magic_bool(&name, &value) {
                    self.frozen_string_literal = Some(flag);
                }
            }
            "warn_indent" => {
                if let Some(flag) = self.magic_bool(&name, &value) {
                    self.warn_indent = Some(flag);
                }
            }
            "shareable_constant_value" => {
                if self.token_seen {
                    self.warn(LexWarningKind::MagicCommentAfterTokens { name });
                    return;
                }
                let known = ["none", "literal", "experimental_everything", "experimental_copy"];
                if !known.iter().any(|k| k.eq_ignore_ascii_case(&value)) {
                    self.warn(LexWarningKind::InvalidMagicValue { name, value });
                    return;
                }
            }
            _ => return,
        }
        debug!(%name, %value, "magic comment");
        self.magic_comments.push(MagicComment {
            name,
            value,
            line: self.cursor.line_no(),
        });
    }

    fn magic_bool(&mut self, name: &str, value: &str) -> Option<bool> {
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            self.warn(LexWarningKind::InvalidMagicValue {
                name: name.to_owned(),
                value: value.to_owned(),
            });
            None
        }
    }

    fn set_source_encoding(&mut self, name: &[u8]) {
        let name = String::from_utf8_lossy(name).into_owned();
        match self.encodings.resolve(&name) {
            Ok(encoding) => {
                debug!(from = %self.encoding, to = %encoding, "source encoding");
                self.encoding = encoding;
            }
            Err(EncodingRejection::Unknown) => self.error(LexErrorKind::UnknownEncoding { name }),
            Err(EncodingRejection::NotAsciiCompatible(encoding)) => {
                self.error(LexErrorKind::NotAsciiCompatible {
                    name: encoding.name().to_owned(),
                });
            }
        }
    }

    // === Byte order mark ===

    /// Skip a byte order mark at offset zero. Returns whether one was found.
    pub(crate) fn scan_bom(&mut self) -> bool {
        let Some(bom) = self.cursor.buffer().bom() else {
            return false;
        };
        self.cursor.skip(bom.byte_len());
        self.ignore(TriviaKind::ByteOrderMark);
        match bom {
            Bom::Utf8 => self.encoding = SourceEncoding::Utf8,
            Bom::Utf16Le | Bom::Utf16Be => {
                let encoding = if bom == Bom::Utf16Le {
                    SourceEncoding::Utf16Le
                } else {
                    SourceEncoding::Utf16Be
                };
                self.error(LexErrorKind::NotAsciiCompatible {
                    name: encoding.name().to_owned(),
                });
                self.end_of_script();
            }
        }
        true
    }

    // === Embedded documents ===

    /// `=` at the start of a line followed by `begin` and a blank.
    pub(crate) fn at_embdoc_begin(&self) -> bool {
        word_at_line_start(self.cursor.rest_of_line(), b"begin")
    }

    pub(crate) fn embdoc(&mut self) {
        let begin = self.tok_start;
        self.cursor.goto_eol();
        self.ignore(TriviaKind::EmbdocBeg);
        loop {
            if !self.advance_line() {
                self.error_at(LexErrorKind::UnterminatedEmbdoc, begin);
                return;
            }
            let line = self.cursor.line_bytes();
            let is_end = line.first() == Some(&b'=') && word_at_line_start(&line[1..], b"end");
            self.cursor.goto_eol();
            if is_end {
                self.ignore(TriviaKind::EmbdocEnd);
                return;
            }
            self.ignore(TriviaKind::Embdoc);
        }
    }
}

/// `word` followed by a blank or the end of the line.
fn word_at_line_start(rest: &[u8], word: &[u8]) -> bool {
    rest.strip_prefix(word)
        .is_some_and(|tail| tail.first().map_or(true, |&b| is_space(b)))
}

fn find_emacs_marker(s: &[u8]) -> Option<usize> {
    s.windows(3).position(|w| w == b"-*-").map(|i| i + 3)
}

fn is_pair_separator(b: u8) -> bool {
    matches!(b, b'\'' | b'"' | b':' | b';')
}

fn trim_start_blanks(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|&&b| is_space(b)).count();
    &s[n..]
}

/// Split a comment body into `name: value` pairs.
///
/// Either the whole body is one `name: value` pair, or an emacs-style
/// `-*- name: value; name: value -*-` section holds several. Returns `None`
/// when the comment is not a magic comment at all.
pub(crate) fn parse_magic_comment(text: &[u8]) -> Option<Vec<MagicPair<'_>>> {
    if text.len() <= 7 {
        return None;
    }
    let (mut s, emacs) = match find_emacs_marker(text) {
        Some(beg) => {
            let len = find_emacs_marker(&text[beg..])?;
            (&text[beg..beg + len - 3], true)
        }
        None => (text, false),
    };
    let mut pairs = Vec::new();
    while !s.is_empty() {
        let skip = s
            .iter()
            .take_while(|&&b| is_pair_separator(b) || is_space(b))
            .count();
        s = &s[skip..];
        let name_len = s
            .iter()
            .take_while(|&&b| !is_pair_separator(b) && !is_space(b))
            .count();
        let name = &s[..name_len];
        s = trim_start_blanks(&s[name_len..]);
        let Some(&next) = s.first() else {
            break;
        };
        if next != b':' {
            if !emacs {
                return None;
            }
            continue;
        }
        s = trim_start_blanks(&s[1..]);
        if s.is_empty() {
            break;
        }
        let value;
        if s[0] == b'"' {
            let body = &s[1..];
            let mut i = 0;
            while i < body.len() && body[i] != b'"' {
                i += if body[i] == b'\\' { 2 } else { 1 };
            }
            let end = i.min(body.len());
            value = &body[..end];
            s = body.get(end + 1..).unwrap_or_default();
        } else {
            let n = s
                .iter()
                .take_while(|&&b| b != b'"' && b != b';' && !is_space(b))
                .count();
            value = &s[..n];
            s = &s[n..];
        }
        if emacs {
            let n = s.iter().take_while(|&&b| b == b';' || is_space(b)).count();
            s = &s[n..];
        } else {
            s = trim_start_blanks(s);
            if !s.is_empty() {
                return None;
            }
        }
        pairs.push(MagicPair { name, value });
    }
    Some(pairs)
}

/// Vim-style `coding=name` / `coding: name` anywhere in the comment.
pub(crate) fn vim_coding(text: &[u8]) -> Option<&[u8]> {
    let mut from = 0;
    while let Some(i) = text[from..]
        .windows(6)
        .position(|w| w.eq_ignore_ascii_case(b"coding"))
    {
        let after = from + i + 6;
        from = after;
        let rest = trim_start_blanks(&text[after..]);
        let Some(rest) = rest.strip_prefix(b":").or_else(|| rest.strip_prefix(b"=")) else {
            continue;
        };
        let rest = trim_start_blanks(rest);
        let n = rest
            .iter()
            .take_while(|&&b| b == b'-' || b == b'_' || b.is_ascii_alphanumeric())
            .count();
        if n > 0 {
            return Some(strip_newline_convention(&rest[..n]));
        }
    }
    None
}

/// Drop an editor newline-convention suffix (`-unix`, `-dos`, `-mac`).
pub(crate) fn strip_newline_convention(name: &[u8]) -> &[u8] {
    let len = name.len();
    if len > 5 && name[len - 5] == b'-' && name[len - 4..].eq_ignore_ascii_case(b"unix") {
        return &name[..len - 5];
    }
    if len > 4 && name[len - 4] == b'-' {
        let tail = &name[len - 3..];
        let utf8_mac = len == 8 && name[..5].eq_ignore_ascii_case(b"utf8-");
        if tail.eq_ignore_ascii_case(b"dos") || (tail.eq_ignore_ascii_case(b"mac") && !utf8_mac) {
            return &name[..len - 4];
        }
    }
    name
}
