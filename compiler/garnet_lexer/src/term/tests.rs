use super::*;

#[test]
fn test_presets() {
    assert!(StrFunc::SQUOTE.is_empty());
    assert!(StrFunc::DQUOTE.contains(StrFunc::EXPAND));
    assert!(StrFunc::REGEXP_LIT.contains(StrFunc::REGEXP | StrFunc::ESCAPE | StrFunc::EXPAND));
    assert!(StrFunc::SWORD.contains(StrFunc::QWORDS | StrFunc::LIST));
    assert!(!StrFunc::SWORD.contains(StrFunc::EXPAND));
    assert!(StrFunc::DWORD.contains(StrFunc::EXPAND));
    assert!(StrFunc::DSYM.contains(StrFunc::SYMBOL | StrFunc::EXPAND));
}

#[test]
fn test_frame_releases_term() {
    let term = Term::Quote(QuoteTerm::new(StrFunc::DQUOTE, 0, b'"', 4));
    let frame = InterpFrame::Block {
        term: term.clone(),
        state: ExprState::BEG,
        brace_nest: 2,
        cond: BitStack::new(),
        cmdarg: BitStack::new(),
    };
    assert_eq!(frame.into_term(), term);
    let frame = InterpFrame::Variable { term: term.clone() };
    assert_eq!(frame.into_term(), term);
}
