//! Reserved word table.
//!
//! Every reserved word maps to its keyword identity and the expression
//! state the lexer moves to after it. The table is a compile-time `match`
//! bucketed by length: reserved words are 2-12 bytes of ASCII, so anything
//! outside that range is rejected before any comparison.
//!
//! `do` is listed once as [`Keyword::DoBlock`]; the lexer picks the final
//! `do` identity from the nesting stacks.

use garnet_ir::{ExprState, Keyword};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeywordEntry {
    pub keyword: Keyword,
    /// State after the keyword.
    pub state: ExprState,
}

const fn entry(keyword: Keyword, state: ExprState) -> Option<KeywordEntry> {
    Some(KeywordEntry { keyword, state })
}

const BEG: ExprState = ExprState::BEG;
const END: ExprState = ExprState::END;
const MID: ExprState = ExprState::MID;
const ARG: ExprState = ExprState::ARG;
const FNAME: ExprState = ExprState::FNAME;
const FNAME_FITEM: ExprState =
    ExprState::from_bits_truncate(ExprState::FNAME.bits() | ExprState::FITEM.bits());

/// Look up a reserved word by its exact text.
pub(crate) fn lookup(text: &[u8]) -> Option<KeywordEntry> {
    if !(2..=12).contains(&text.len()) || !text.is_ascii() {
        return None;
    }
    match text.len() {
        2 => match text {
            b"do" => entry(Keyword::DoBlock, BEG),
            b"if" => entry(Keyword::If, BEG),
            b"in" => entry(Keyword::In, BEG),
            b"or" => entry(Keyword::Or, BEG),
            _ => None,
        },
        3 => match text {
            b"and" => entry(Keyword::And, BEG),
            b"def" => entry(Keyword::Def, FNAME),
            b"end" => entry(Keyword::End, END),
            b"END" => entry(Keyword::EndUpper, END),
            b"for" => entry(Keyword::For, BEG),
            b"nil" => entry(Keyword::Nil, END),
            b"not" => entry(Keyword::Not, ARG),
            _ => None,
        },
        4 => match text {
            b"case" => entry(Keyword::Case, BEG),
            b"else" => entry(Keyword::Else, BEG),
            b"next" => entry(Keyword::Next, MID),
            b"redo" => entry(Keyword::Redo, END),
            b"self" => entry(Keyword::SelfValue, END),
            b"then" => entry(Keyword::Then, BEG),
            b"true" => entry(Keyword::True, END),
            b"when" => entry(Keyword::When, BEG),
            _ => None,
        },
        5 => match text {
            b"alias" => entry(Keyword::Alias, FNAME_FITEM),
            b"begin" => entry(Keyword::Begin, BEG),
            b"BEGIN" => entry(Keyword::BeginUpper, END),
            b"break" => entry(Keyword::Break, MID),
            b"class" => entry(Keyword::Class, ExprState::CLASS),
            b"elsif" => entry(Keyword::Elsif, BEG),
            b"false" => entry(Keyword::False, END),
            b"retry" => entry(Keyword::Retry, END),
            b"super" => entry(Keyword::Super, ARG),
            b"undef" => entry(Keyword::Undef, FNAME_FITEM),
            b"until" => entry(Keyword::Until, BEG),
            b"while" => entry(Keyword::While, BEG),
            b"yield" => entry(Keyword::Yield, ARG),
            _ => None,
        },
        6 => match text {
            b"ensure" => entry(Keyword::Ensure, BEG),
            b"module" => entry(Keyword::Module, BEG),
            b"rescue" => entry(Keyword::Rescue, MID),
            b"return" => entry(Keyword::Return, MID),
            b"unless" => entry(Keyword::Unless, BEG),
            _ => None,
        },
        8 => match text {
            b"defined?" => entry(Keyword::Defined, ARG),
            b"__LINE__" => entry(Keyword::Line, END),
            b"__FILE__" => entry(Keyword::File, END),
            _ => None,
        },
        12 => match text {
            b"__ENCODING__" => entry(Keyword::Encoding, END),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests;
