use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_lookup_keywords() {
    let def = lookup(b"def").map(|e| (e.keyword, e.state));
    assert_eq!(def, Some((Keyword::Def, ExprState::FNAME)));

    let alias = lookup(b"alias").map(|e| e.state);
    assert_eq!(alias, Some(ExprState::FNAME | ExprState::FITEM));

    let rescue = lookup(b"rescue").map(|e| (e.keyword, e.state));
    assert_eq!(rescue, Some((Keyword::Rescue, ExprState::MID)));

    let enc = lookup(b"__ENCODING__").map(|e| e.keyword);
    assert_eq!(enc, Some(Keyword::Encoding));
}

#[test]
fn test_lookup_rejects_non_keywords() {
    assert_eq!(lookup(b"x"), None);
    assert_eq!(lookup(b"foo"), None);
    assert_eq!(lookup(b"If"), None);
    assert_eq!(lookup(b"defined"), None);
    assert_eq!(lookup(b"__ENCODING__x"), None);
    assert_eq!(lookup("déf".as_bytes()), None);
}

#[test]
fn test_every_keyword_spelling_round_trips() {
    let words: &[&str] = &[
        "alias", "and", "begin", "BEGIN", "break", "case", "class", "def", "defined?", "do",
        "else", "elsif", "end", "END", "ensure", "false", "for", "if", "in", "module", "next",
        "nil", "not", "or", "redo", "rescue", "retry", "return", "self", "super", "then", "true",
        "undef", "unless", "until", "when", "while", "yield", "__FILE__", "__LINE__",
        "__ENCODING__",
    ];
    for word in words {
        let found = lookup(word.as_bytes()).map(|e| e.keyword.as_str());
        assert_eq!(found, Some(*word), "keyword {word}");
    }
}

#[test]
fn test_modifier_forms() {
    for word in ["if", "unless", "while", "until", "rescue"] {
        let kw = lookup(word.as_bytes()).map(|e| e.keyword);
        assert!(kw.is_some_and(Keyword::has_modifier_form), "{word}");
    }
    let kw = lookup(b"case").map(|e| e.keyword);
    assert!(!kw.is_some_and(Keyword::has_modifier_form));
}
