//! Error codes for lexer diagnostics.
//!
//! Each code is a unique identifier (e.g. `E0001`). `E0xxx` codes are fatal
//! lexical errors, `W0xxx` codes are advisory warnings.

use std::fmt;

/// Error codes for all lexer diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// String, regexp, word list or symbol not closed before end of input
    E0001,
    /// Heredoc terminator not found before end of input
    E0002,
    /// `=begin` without matching `=end`
    E0003,
    /// Character that cannot start any token
    E0004,
    /// Malformed numeric literal
    E0005,
    /// Rational literal too large to represent exactly
    E0006,
    /// Invalid escape sequence
    E0007,
    /// Invalid global, instance or class variable name
    E0008,
    /// Unknown `%` literal type
    E0009,
    /// Unterminated quoted heredoc identifier
    E0010,
    /// Unknown regexp option
    E0011,
    /// Literal encoding conflicts with the source encoding
    E0012,
    /// Unknown or unusable magic-comment encoding
    E0013,
    /// `?` at end of input
    E0014,
    /// Float literal without a leading digit (`.5`)
    E0015,
    /// Source could not be read
    E0016,

    // Lexer Warnings (W0xxx)
    /// Operator spacing suggests a different reading
    W0001,
    /// Ambiguous first argument of a command call
    W0002,
    /// Float literal out of range
    W0003,
    /// Carriage return in the middle of a line
    W0004,
    /// Whitespace after `?` character syntax
    W0005,
    /// Operator interpreted as an argument prefix
    W0006,
    /// `...` at end of line
    W0007,
    /// Parentheses after a method name
    W0008,
    /// Numbered reference too big
    W0009,
    /// Magic comment ignored or malformed
    W0010,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E0012,
        ErrorCode::E0013,
        ErrorCode::E0014,
        ErrorCode::E0015,
        ErrorCode::E0016,
        ErrorCode::W0001,
        ErrorCode::W0002,
        ErrorCode::W0003,
        ErrorCode::W0004,
        ErrorCode::W0005,
        ErrorCode::W0006,
        ErrorCode::W0007,
        ErrorCode::W0008,
        ErrorCode::W0009,
        ErrorCode::W0010,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E0012 => "E0012",
            ErrorCode::E0013 => "E0013",
            ErrorCode::E0014 => "E0014",
            ErrorCode::E0015 => "E0015",
            ErrorCode::E0016 => "E0016",
            ErrorCode::W0001 => "W0001",
            ErrorCode::W0002 => "W0002",
            ErrorCode::W0003 => "W0003",
            ErrorCode::W0004 => "W0004",
            ErrorCode::W0005 => "W0005",
            ErrorCode::W0006 => "W0006",
            ErrorCode::W0007 => "W0007",
            ErrorCode::W0008 => "W0008",
            ErrorCode::W0009 => "W0009",
            ErrorCode::W0010 => "W0010",
        }
    }

    /// Check if this is a warning code (W prefix).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    /// Short description, for `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated literal",
            ErrorCode::E0002 => "unterminated heredoc",
            ErrorCode::E0003 => "unterminated embedded document",
            ErrorCode::E0004 => "invalid character",
            ErrorCode::E0005 => "malformed numeric literal",
            ErrorCode::E0006 => "rational literal out of range",
            ErrorCode::E0007 => "invalid escape sequence",
            ErrorCode::E0008 => "invalid variable name",
            ErrorCode::E0009 => "unknown percent literal",
            ErrorCode::E0010 => "unterminated heredoc identifier",
            ErrorCode::E0011 => "unknown regexp option",
            ErrorCode::E0012 => "encoding mismatch",
            ErrorCode::E0013 => "unknown source encoding",
            ErrorCode::E0014 => "incomplete character syntax",
            ErrorCode::E0015 => "float literal without leading digit",
            ErrorCode::E0016 => "source read failure",
            ErrorCode::W0001 => "ambiguous operator",
            ErrorCode::W0002 => "ambiguous first argument",
            ErrorCode::W0003 => "float out of range",
            ErrorCode::W0004 => "carriage return in line",
            ErrorCode::W0005 => "invalid character syntax",
            ErrorCode::W0006 => "argument prefix",
            ErrorCode::W0007 => "range at end of line",
            ErrorCode::W0008 => "parentheses after method name",
            ErrorCode::W0009 => "numbered reference too big",
            ErrorCode::W0010 => "magic comment ignored",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
