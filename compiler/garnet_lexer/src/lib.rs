//! Context-sensitive lexer for Garnet source.
//!
//! The lexer is hand-written because Garnet's token boundaries depend on
//! context: whether `/` starts a regexp, `<<` a heredoc, or `-1` a negative
//! literal is decided by the expression state left by the previous token,
//! by whether a blank came before, and by whether a name is a known local
//! variable.
//!
//! # Layout
//!
//! - `lexer`: the [`Lexer`] itself, the event loop and the consumer API
//! - `scan`: top-level dispatch, newlines, end of input
//! - `operators`, `ident`, `number`: token scanners
//! - `string`, `escape`, `heredoc`: literal sub-lexers
//! - `comments`: comments, `=begin` documents, magic comments, byte order mark
//! - `state`, `stack_state`: expression-state predicates and bit stacks
//! - `output`, `delayed`: event emission and multi-line content
//! - `hooks`: local-variable scope and encoding collaborators

mod comments;
mod config;
mod delayed;
mod escape;
mod heredoc;
mod hooks;
mod ident;
mod keywords;
mod lex_error;
mod lexer;
mod number;
mod operators;
mod output;
mod scan;
mod stack_state;
mod state;
mod string;
mod term;
#[cfg(test)]
mod test_util;

pub use config::LexerConfig;
pub use hooks::{
    EncodingHook, EncodingRejection, LocalScope, MagicComment, NoLocals, ScopeOracle,
    StandardEncodings,
};
pub use lex_error::{LexErrorKind, LexWarningKind};
pub use lexer::{LexOutput, Lexer};
pub use stack_state::BitStack;

/// Lex an in-memory source with the default configuration.
pub fn tokenize(text: impl Into<Vec<u8>>) -> LexOutput {
    Lexer::for_text(text).tokenize()
}
