//! Lexical error and warning conditions.
//!
//! Each condition is a typed variant whose `Display` is the user-facing
//! message. The lexer turns a condition into a [`Diagnostic`] the moment it
//! is detected, so callers only ever see diagnostics; the kinds exist to keep
//! message text and error codes in one place.

use garnet_diagnostic::{Diagnostic, ErrorCode};
use garnet_ir::{SourceEncoding, Span};

/// A fatal lexical error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Unterminated constructs ===
    #[error("unterminated {what} meets end of file")]
    UnterminatedLiteral { what: &'static str },
    #[error("unterminated quoted string meets end of file")]
    UnterminatedQuote,
    #[error("can't find string \"{marker}\" anywhere before EOF")]
    UnterminatedHeredoc { marker: String },
    #[error("unterminated here document identifier")]
    UnterminatedHeredocId,
    #[error("embedded document meets end of file")]
    UnterminatedEmbdoc,

    // === Characters ===
    #[error("Invalid char '\\{byte:03o}' ('{}') in expression", char::from(*byte))]
    InvalidChar { byte: u8 },
    #[error("incomplete character syntax")]
    IncompleteCharSyntax,

    // === Numbers ===
    #[error("{message}")]
    NumberWithoutDigits { message: &'static str },
    #[error("Trailing '_' in number.")]
    TrailingUnderscore,
    #[error("Illegal octal digit.")]
    IllegalOctalDigit,
    #[error("Rational ({numerator}/{denominator}) out of range.")]
    RationalOutOfRange {
        numerator: String,
        denominator: String,
    },
    #[error("unexpected fraction part after numeric literal")]
    FractionAfterNumeric,
    #[error("no .<digit> floating literal anymore; put 0 before dot")]
    NoLeadingDigit,

    // === Escapes ===
    #[error("Invalid escape character syntax")]
    InvalidEscape,
    #[error("invalid hex escape")]
    InvalidHexEscape,
    #[error("invalid Unicode escape")]
    InvalidUnicodeEscape,
    #[error("invalid Unicode codepoint (too large)")]
    CodepointTooLarge,
    #[error("invalid Unicode codepoint")]
    InvalidCodepoint,
    #[error("unterminated Unicode escape")]
    UnterminatedUnicodeEscape,
    #[error("Multiple codepoints at single character literal")]
    MultipleCodepoints,

    // === Variables ===
    #[error("'$' without identifiers is not allowed as a global variable name")]
    GlobalWithoutName,
    #[error("'${ch}' is not allowed as a global variable name")]
    InvalidGlobal { ch: char },
    #[error("'@' without identifiers is not allowed as an instance variable name")]
    IvarWithoutName,
    #[error("'@@' without identifiers is not allowed as a class variable name")]
    CvarWithoutName,
    #[error("'@{digit}' is not allowed as an instance variable name")]
    IvarStartsWithDigit { digit: char },
    #[error("'@@{digit}' is not allowed as a class variable name")]
    CvarStartsWithDigit { digit: char },

    // === Literals ===
    #[error("unknown type of %string")]
    UnknownPercentType,
    #[error("unknown regexp option{} - {options}", if options.len() > 1 { "s" } else { "" })]
    UnknownRegexpOption { options: String },
    #[error("regexp encoding option '{option}' differs from source encoding '{encoding}'")]
    RegexpEncodingMismatch {
        option: char,
        encoding: SourceEncoding,
    },
    #[error("{literal} mixed within {source_encoding} source")]
    MixedEncoding {
        literal: SourceEncoding,
        source_encoding: SourceEncoding,
    },

    // === Source ===
    #[error("unknown encoding name: {name}")]
    UnknownEncoding { name: String },
    #[error("{name} is not ASCII compatible")]
    NotAsciiCompatible { name: String },
    #[error("cannot read source: {message}")]
    SourceRead { message: String },
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedLiteral { .. } | LexErrorKind::UnterminatedQuote => {
                ErrorCode::E0001
            }
            LexErrorKind::UnterminatedHeredoc { .. } => ErrorCode::E0002,
            LexErrorKind::UnterminatedEmbdoc => ErrorCode::E0003,
            LexErrorKind::InvalidChar { .. } => ErrorCode::E0004,
            LexErrorKind::NumberWithoutDigits { .. }
            | LexErrorKind::TrailingUnderscore
            | LexErrorKind::IllegalOctalDigit => ErrorCode::E0005,
            LexErrorKind::RationalOutOfRange { .. } => ErrorCode::E0006,
            LexErrorKind::InvalidEscape
            | LexErrorKind::InvalidHexEscape
            | LexErrorKind::InvalidUnicodeEscape
            | LexErrorKind::CodepointTooLarge
            | LexErrorKind::InvalidCodepoint
            | LexErrorKind::UnterminatedUnicodeEscape
            | LexErrorKind::MultipleCodepoints => ErrorCode::E0007,
            LexErrorKind::GlobalWithoutName
            | LexErrorKind::InvalidGlobal { .. }
            | LexErrorKind::IvarWithoutName
            | LexErrorKind::CvarWithoutName
            | LexErrorKind::IvarStartsWithDigit { .. }
            | LexErrorKind::CvarStartsWithDigit { .. } => ErrorCode::E0008,
            LexErrorKind::UnknownPercentType => ErrorCode::E0009,
            LexErrorKind::UnterminatedHeredocId => ErrorCode::E0010,
            LexErrorKind::UnknownRegexpOption { .. } => ErrorCode::E0011,
            LexErrorKind::RegexpEncodingMismatch { .. } | LexErrorKind::MixedEncoding { .. } => {
                ErrorCode::E0012
            }
            LexErrorKind::UnknownEncoding { .. } | LexErrorKind::NotAsciiCompatible { .. } => {
                ErrorCode::E0013
            }
            LexErrorKind::IncompleteCharSyntax => ErrorCode::E0014,
            LexErrorKind::FractionAfterNumeric | LexErrorKind::NoLeadingDigit => ErrorCode::E0015,
            LexErrorKind::SourceRead { .. } => ErrorCode::E0016,
        }
    }

    /// Build the diagnostic for this error at a source position.
    pub fn to_diagnostic(&self, span: Span, line: u32, column: u32) -> Diagnostic {
        Diagnostic::new(self.code())
            .with_message(self.to_string())
            .at(span, line, column)
    }
}

/// A non-fatal lexical warning.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexWarningKind {
    #[error("'{op}' after local variable or literal is interpreted as binary operator even though it seems like {syn}")]
    AmbiguousOperator {
        op: &'static str,
        syn: &'static str,
    },
    #[error("ambiguous first argument; put parentheses or a space even after '{op}' operator")]
    AmbiguousFirstArgument { op: char },
    #[error("Float {text} out of range.")]
    FloatOutOfRange { text: String },
    #[error("encountered \\r in middle of line, treated as a mere space")]
    CarriageReturn,
    #[error("invalid character syntax; use ?\\{escape}")]
    InvalidCharSyntax { escape: char },
    #[error("'?' just followed by '{text}' is interpreted as a conditional operator, put a space after '?'")]
    QuestionBeforeIdentifier { text: String },
    #[error("'{op}' interpreted as argument prefix")]
    ArgumentPrefix { op: &'static str },
    #[error("... at EOL, should be parenthesized?")]
    DotsAtEol,
    #[error("parentheses after method name is interpreted as an argument list, not a decomposed argument")]
    ParenAfterMethodName,
    #[error("'{name}' is too big for a number variable, always nil")]
    NthRefTooBig { name: String },
    #[error("'{name}' is ignored after any tokens")]
    MagicCommentAfterTokens { name: String },
    #[error("invalid value for {name}: {value}")]
    InvalidMagicValue { name: String, value: String },
}

impl LexWarningKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexWarningKind::AmbiguousOperator { .. } => ErrorCode::W0001,
            LexWarningKind::AmbiguousFirstArgument { .. } => ErrorCode::W0002,
            LexWarningKind::FloatOutOfRange { .. } => ErrorCode::W0003,
            LexWarningKind::CarriageReturn => ErrorCode::W0004,
            LexWarningKind::InvalidCharSyntax { .. }
            | LexWarningKind::QuestionBeforeIdentifier { .. } => ErrorCode::W0005,
            LexWarningKind::ArgumentPrefix { .. } => ErrorCode::W0006,
            LexWarningKind::DotsAtEol => ErrorCode::W0007,
            LexWarningKind::ParenAfterMethodName => ErrorCode::W0008,
            LexWarningKind::NthRefTooBig { .. } => ErrorCode::W0009,
            LexWarningKind::MagicCommentAfterTokens { .. }
            | LexWarningKind::InvalidMagicValue { .. } => ErrorCode::W0010,
        }
    }

    pub fn to_diagnostic(&self, span: Span, line: u32, column: u32) -> Diagnostic {
        Diagnostic::new(self.code())
            .with_message(self.to_string())
            .at(span, line, column)
    }
}
