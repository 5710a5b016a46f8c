//! Garnet IR - shared lexical vocabulary.
//!
//! This crate holds the plain data types that flow out of the lexer:
//! - Spans for source locations
//! - The expression-state bitset the lexer uses to disambiguate
//! - Keywords, token kinds, trivia kinds and their payloads
//! - The `Event` protocol (immediate token, delayed token, ignored trivia)
//!
//! Nothing in here scans source text; it only describes what a scan produced.

mod encoding;
mod expr_state;
mod keyword;
mod span;
mod token;

pub use encoding::SourceEncoding;
pub use expr_state::ExprState;
pub use keyword::Keyword;
pub use span::Span;
pub use token::{
    Event, HeredocIndent, HeredocInfo, HeredocQuote, NumberLit, NumberSuffix, RegexpOptions,
    StrLit, Token, TokenKind, TokenValue, Trivia, TriviaKind,
};
