use std::fmt;

/// Reserved words.
///
/// `do` has four grammatical identities; the lexer picks one from the
/// nesting context (lambda body, loop condition, command arguments, block).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Alias,
    And,
    Begin,
    /// `BEGIN`
    BeginUpper,
    Break,
    Case,
    Class,
    Def,
    Defined,
    /// `do` opening a block attached to a call.
    DoBlock,
    /// `do` closing a `while`/`until`/`for` condition.
    DoCond,
    /// `do` opening a block of a command call without parentheses.
    DoCommand,
    /// `do` opening a lambda body after `->`.
    DoLambda,
    Else,
    Elsif,
    End,
    /// `END`
    EndUpper,
    Ensure,
    False,
    For,
    If,
    In,
    Module,
    Next,
    Nil,
    Not,
    Or,
    Redo,
    Rescue,
    Retry,
    Return,
    SelfValue,
    Super,
    Then,
    True,
    Undef,
    Unless,
    Until,
    When,
    While,
    Yield,
    /// `__FILE__`
    File,
    /// `__LINE__`
    Line,
    /// `__ENCODING__`
    Encoding,
}

impl Keyword {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Alias => "alias",
            Keyword::And => "and",
            Keyword::Begin => "begin",
            Keyword::BeginUpper => "BEGIN",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Class => "class",
            Keyword::Def => "def",
            Keyword::Defined => "defined?",
            Keyword::DoBlock | Keyword::DoCond | Keyword::DoCommand | Keyword::DoLambda => "do",
            Keyword::Else => "else",
            Keyword::Elsif => "elsif",
            Keyword::End => "end",
            Keyword::EndUpper => "END",
            Keyword::Ensure => "ensure",
            Keyword::False => "false",
            Keyword::For => "for",
            Keyword::If => "if",
            Keyword::In => "in",
            Keyword::Module => "module",
            Keyword::Next => "next",
            Keyword::Nil => "nil",
            Keyword::Not => "not",
            Keyword::Or => "or",
            Keyword::Redo => "redo",
            Keyword::Rescue => "rescue",
            Keyword::Retry => "retry",
            Keyword::Return => "return",
            Keyword::SelfValue => "self",
            Keyword::Super => "super",
            Keyword::Then => "then",
            Keyword::True => "true",
            Keyword::Undef => "undef",
            Keyword::Unless => "unless",
            Keyword::Until => "until",
            Keyword::When => "when",
            Keyword::While => "while",
            Keyword::Yield => "yield",
            Keyword::File => "__FILE__",
            Keyword::Line => "__LINE__",
            Keyword::Encoding => "__ENCODING__",
        }
    }

    /// Whether this keyword has a trailing modifier form (`x if y`).
    pub fn has_modifier_form(self) -> bool {
        matches!(
            self,
            Keyword::If | Keyword::Unless | Keyword::While | Keyword::Until | Keyword::Rescue
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
