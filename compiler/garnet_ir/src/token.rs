//! Tokens, trivia and the event protocol.
//!
//! A scan produces a sequence of [`Event`]s. Grammar-significant tokens come
//! either immediately ([`Event::Token`]) or as a flush of content that was
//! accumulated across several scan steps ([`Event::Delayed`]); whitespace,
//! comments and embedded documents arrive as [`Event::Ignored`] trivia.
//!
//! Every event carries the raw byte span it covers, so a consumer that keeps
//! the trivia can rebuild the source byte for byte.

use std::fmt;

use crate::{ExprState, Keyword, SourceEncoding, Span};

/// Grammar-significant token kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // === Names ===
    Identifier,
    Constant,
    /// Method name ending in `?` or `!`.
    FuncName,
    /// `name:` in label position.
    Label,
    IVar,
    CVar,
    GVar,
    /// `$&`, `` $` ``, `$'`, `$+`
    BackRef,
    /// `$1`, `$2`, ...
    NthRef,
    Keyword(Keyword),
    /// Trailing modifier form of `if`, `unless`, `while`, `until`, `rescue`.
    Modifier(Keyword),

    // === Literals ===
    Integer,
    Float,
    Rational,
    Imaginary,
    /// `?a` character literal.
    Char,

    // === String machinery ===
    StringBeg,
    XStringBeg,
    RegexpBeg,
    /// `%W(`
    WordsBeg,
    /// `%w(`
    QWordsBeg,
    /// `%I(`
    SymbolsBeg,
    /// `%i(`
    QSymbolsBeg,
    /// `:` before a quoted symbol, or `%s(`
    SymBeg,
    StringContent,
    /// `#{`
    StringDBeg,
    /// `#` before `@ivar`, `@@cvar` or `$gvar` inside a string.
    StringDVar,
    /// `}` closing an interpolation.
    StringDEnd,
    StringEnd,
    RegexpEnd,
    /// `":` closing a string used as a label.
    LabelEnd,
    /// Separator inside a word list.
    WordsSep,
    HeredocBeg,
    HeredocEnd,

    // === Operators ===
    /// `+=`, `||=`, ... (the operator is in the token value)
    OpAssign,
    Plus,
    Minus,
    Star,
    Pow,
    Slash,
    Percent,
    Caret,
    Amper,
    Pipe,
    Bang,
    Tilde,
    UPlus,
    UMinus,
    /// Unary minus directly followed by a digit.
    UMinusNum,
    Lt,
    Gt,
    Leq,
    Geq,
    EqEq,
    Eqq,
    Neq,
    Match,
    NMatch,
    Cmp,
    AndOp,
    OrOp,
    LShift,
    RShift,
    Assign,
    Assoc,
    Question,
    Colon,
    /// `::` after an operand.
    Colon2,
    /// `::` at the start of an expression.
    Colon3,
    Semicolon,
    Comma,
    Dot,
    AndDot,
    Dot2,
    Dot3,
    /// Beginless `..`
    BDot2,
    /// Beginless `...`
    BDot3,
    /// `*` as splat.
    Splat,
    /// `**` as double splat.
    DSplat,
    /// `&` as block-pass prefix.
    BlockArg,
    /// `->`
    Lambda,
    /// `[]` as a method name.
    Aref,
    /// `[]=` as a method name.
    Aset,
    Backtick,
    Backslash,
    /// A lone `$` not followed by a variable name.
    Dollar,

    // === Brackets ===
    LParen,
    /// `(` at the start of an expression.
    LParenBeg,
    /// `(` after a space in argument position.
    LParenArg,
    RParen,
    LBracket,
    /// `[` starting an array literal.
    LBracketBeg,
    RBracket,
    /// `{` opening a block.
    LBrace,
    /// `{` opening a block after a parenthesized command argument.
    LBraceArg,
    /// `{` opening a hash literal.
    LBraceHash,
    /// `{` opening a lambda body.
    LambdaBeg,
    RBrace,

    // === Control ===
    Newline,
    /// Best-effort token produced alongside a fatal diagnostic.
    Error,
    Eof,
}

impl TokenKind {
    /// Whether this kind closes a string-like literal.
    pub fn is_string_end(self) -> bool {
        matches!(
            self,
            TokenKind::StringEnd | TokenKind::RegexpEnd | TokenKind::LabelEnd | TokenKind::HeredocEnd
        )
    }

    /// Whether this kind opens a string-like literal.
    pub fn is_string_beg(self) -> bool {
        matches!(
            self,
            TokenKind::StringBeg
                | TokenKind::XStringBeg
                | TokenKind::RegexpBeg
                | TokenKind::WordsBeg
                | TokenKind::QWordsBeg
                | TokenKind::SymbolsBeg
                | TokenKind::QSymbolsBeg
                | TokenKind::SymBeg
                | TokenKind::HeredocBeg
        )
    }
}

/// Non-grammar spans reported as ignored events.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TriviaKind {
    /// Run of blanks, or a backslash-newline continuation.
    Space,
    /// `#` comment, including its trailing newline.
    Comment,
    /// `=begin` line.
    EmbdocBeg,
    /// Body line of an embedded document.
    Embdoc,
    /// `=end` line.
    EmbdocEnd,
    /// Newline that does not terminate a statement.
    IgnoredNewline,
    /// `__END__` line.
    EndMarker,
    /// Everything after `__END__` (or after an end-of-script byte).
    DataSection,
    /// UTF-8 byte order mark at offset zero.
    ByteOrderMark,
}

/// Cooked bytes of a string-like literal fragment.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StrLit {
    pub bytes: Vec<u8>,
    pub encoding: SourceEncoding,
}

impl StrLit {
    /// Lossy UTF-8 view, for display and tests.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Trailing `r`/`i` on a numeric literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum NumberSuffix {
    #[default]
    None,
    Rational,
    Imaginary,
    RationalImaginary,
}

impl NumberSuffix {
    pub fn is_rational(self) -> bool {
        matches!(self, NumberSuffix::Rational | NumberSuffix::RationalImaginary)
    }

    pub fn is_imaginary(self) -> bool {
        matches!(self, NumberSuffix::Imaginary | NumberSuffix::RationalImaginary)
    }
}

/// A numeric literal's digits, with prefix and `_` separators removed.
///
/// The lexer only fixes the literal's boundaries and shape; turning the text
/// into a runtime value is left to the consumer (`to_u64`/`to_f64` cover the
/// common cases).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumberLit {
    /// Cleaned digits, e.g. `"1F"` for `0x1_F`, `"10.5e10"` for `1_0.5e1_0`.
    pub text: String,
    pub radix: u32,
    pub float: bool,
    pub suffix: NumberSuffix,
    /// Exact `numerator/denominator` for a float with an `r` suffix.
    pub fraction: Option<(i64, i64)>,
}

impl NumberLit {
    /// Integer value, if it is an integer that fits in `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        if self.float {
            return None;
        }
        u64::from_str_radix(&self.text, self.radix).ok()
    }

    /// Floating-point value (integers are converted too).
    pub fn to_f64(&self) -> Option<f64> {
        if self.float || self.radix == 10 {
            self.text.parse().ok()
        } else {
            self.to_u64().map(|v| v as f64)
        }
    }
}

/// Flags following a regexp's closing delimiter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct RegexpOptions {
    pub ignore_case: bool,
    pub extended: bool,
    pub multiline: bool,
    pub once: bool,
    /// Encoding option letter (`n`, `e`, `s` or `u`), last one wins.
    pub encoding: Option<u8>,
}

/// How a heredoc marker was quoted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HeredocQuote {
    /// `<<EOS`, interpolating.
    Bare,
    /// `<<"EOS"`, interpolating.
    Double,
    /// `<<'EOS'`, raw.
    Single,
    /// `` <<`EOS` ``, command string.
    Backtick,
}

/// Indentation handling of a heredoc.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HeredocIndent {
    /// `<<EOS`: terminator must start the line.
    None,
    /// `<<-EOS`: terminator may be indented.
    Dash,
    /// `<<~EOS`: terminator may be indented and the body is dedented.
    Squiggly,
}

/// Description of a heredoc opener.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct HeredocInfo {
    pub marker: Vec<u8>,
    pub quote: HeredocQuote,
    pub indent: HeredocIndent,
}

/// Payload attached to a token.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// Cooked content of a string fragment or character literal.
    Str(StrLit),
    Number(NumberLit),
    /// Operator of an `OpAssign` token, e.g. `"+"` for `+=`.
    Operator(&'static str),
    RegexpOptions(RegexpOptions),
    Heredoc(HeredocInfo),
}

/// A grammar-significant token.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw bytes covered in the source.
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 0-based byte column of the first byte.
    pub column: u32,
    /// Expression state right after this token.
    pub state: ExprState,
    pub value: TokenValue,
}

impl Token {
    /// Cooked string content, if this token carries one.
    pub fn str_value(&self) -> Option<&StrLit> {
        match &self.value {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn number_value(&self) -> Option<&NumberLit> {
        match &self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{}) [{}]",
            self.kind, self.span, self.line, self.column, self.state
        )
    }
}

/// A span the grammar never sees.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

/// One unit of lexer output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Event {
    /// Token emitted as soon as it was recognized.
    Token(Token),
    /// Content accumulated over several scan steps; its position is where
    /// accumulation began, not where the flush happened.
    Delayed(Token),
    /// Whitespace, comments and other trivia.
    Ignored(Trivia),
}

impl Event {
    pub fn span(&self) -> Span {
        match self {
            Event::Token(t) | Event::Delayed(t) => t.span,
            Event::Ignored(t) => t.span,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Event::Token(t) | Event::Delayed(t) => t.line,
            Event::Ignored(t) => t.line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            Event::Token(t) | Event::Delayed(t) => t.column,
            Event::Ignored(t) => t.column,
        }
    }

    /// The grammar token, for token and delayed events.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Event::Token(t) | Event::Delayed(t) => Some(t),
            Event::Ignored(_) => None,
        }
    }

    pub fn into_token(self) -> Option<Token> {
        match self {
            Event::Token(t) | Event::Delayed(t) => Some(t),
            Event::Ignored(_) => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Event::Ignored(_))
    }
}

#[cfg(test)]
mod tests;
