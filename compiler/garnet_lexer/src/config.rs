//! Lexer configuration.

use garnet_ir::SourceEncoding;

/// Knobs that change what the lexer reports, never how it tokenizes valid
/// input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Report warnings that are only shown in verbose mode.
    pub verbose: bool,
    /// Track `while`/`until`/`for` headers so `do` after a loop condition
    /// resolves without a parser driving the condition stack.
    pub loop_condition_hints: bool,
    /// Encoding assumed until a magic comment or BOM says otherwise.
    pub default_encoding: SourceEncoding,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            verbose: false,
            loop_condition_hints: true,
            default_encoding: SourceEncoding::Utf8,
        }
    }
}

impl LexerConfig {
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_loop_condition_hints(mut self, enabled: bool) -> Self {
        self.loop_condition_hints = enabled;
        self
    }

    #[must_use]
    pub fn with_default_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }
}
