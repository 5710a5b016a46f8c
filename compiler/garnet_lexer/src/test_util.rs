//! Helpers shared by the scanner tests.

use garnet_ir::{Event, Token, TokenKind, TokenValue};

use crate::{LexOutput, Lexer, LocalScope};

pub(crate) fn lex(src: &str) -> LexOutput {
    crate::tokenize(src)
}

/// Lex with `locals` known as local variables.
pub(crate) fn lex_with_locals(src: &str, locals: &[&str]) -> LexOutput {
    Lexer::for_text(src)
        .with_scope(locals.iter().copied().collect::<LocalScope>())
        .tokenize()
}

/// Grammar token kinds, without the final `Eof`.
pub(crate) fn kinds(src: &str) -> Vec<TokenKind> {
    kinds_of(&lex(src))
}

pub(crate) fn kinds_of(out: &LexOutput) -> Vec<TokenKind> {
    out.tokens()
        .map(|t| t.kind)
        .filter(|&k| k != TokenKind::Eof)
        .collect()
}

pub(crate) fn tokens(src: &str) -> Vec<Token> {
    lex(src)
        .tokens()
        .filter(|t| t.kind != TokenKind::Eof)
        .cloned()
        .collect()
}

/// Cooked bytes of every content token, concatenated.
pub(crate) fn content(out: &LexOutput) -> Vec<u8> {
    out.tokens()
        .filter_map(|t| match &t.value {
            TokenValue::Str(lit) if t.kind == TokenKind::StringContent => Some(lit.bytes.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Diagnostic codes in report order.
pub(crate) fn codes(out: &LexOutput) -> Vec<&'static str> {
    out.diagnostics.iter().map(|d| d.code.as_str()).collect()
}

/// Source text covered by a token.
pub(crate) fn text<'a>(src: &'a str, token: &Token) -> &'a str {
    &src[token.span.to_range()]
}

/// Every event's span, in emission order.
pub(crate) fn spans(out: &LexOutput) -> Vec<std::ops::Range<usize>> {
    out.events.iter().map(|e| Event::span(e).to_range()).collect()
}
