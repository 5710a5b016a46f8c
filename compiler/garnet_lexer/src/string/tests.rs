use super::*;
use crate::test_util::{codes, content, kinds, kinds_of, lex, text, tokens};
use garnet_ir::Token;
use pretty_assertions::assert_eq;

fn str_values(out: &crate::LexOutput) -> Vec<String> {
    out.tokens()
        .filter(|t| t.kind == TokenKind::StringContent)
        .filter_map(Token::str_value)
        .map(StrLit::text)
        .collect()
}

#[test]
fn test_double_quoted_string() {
    let src = r#"x = "hello""#;
    let toks = tokens(src);
    let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(text(src, &toks[3]), "hello");
    assert_eq!(toks[4].state, ExprState::END);
}

#[test]
fn test_empty_string() {
    assert_eq!(kinds("''"), vec![TokenKind::StringBeg, TokenKind::StringEnd]);
}

#[test]
fn test_block_interpolation() {
    let out = lex(r#""a#{b}c""#);
    assert_eq!(
        kinds_of(&out),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringDBeg,
            TokenKind::Identifier,
            TokenKind::StringDEnd,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(str_values(&out), vec!["a", "c"]);
}

#[test]
fn test_nested_braces_in_interpolation() {
    assert_eq!(
        kinds(r##""#{ {a: 1} }""##),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringDBeg,
            TokenKind::LBraceHash,
            TokenKind::Label,
            TokenKind::Integer,
            TokenKind::RBrace,
            TokenKind::StringDEnd,
            TokenKind::StringEnd,
        ]
    );
}

#[test]
fn test_variable_interpolation() {
    assert_eq!(
        kinds(r##""#@x!""##),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringDVar,
            TokenKind::IVar,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(kinds(r##""#$1""##)[2], TokenKind::NthRef);
    // `#` not followed by a name is plain content.
    let out = lex(r##""#@1 #""##);
    assert_eq!(content(&out), b"#@1 #");
}

#[test]
fn test_single_quotes_do_not_interpolate() {
    let out = lex(r"'#{a}\n\'\\'");
    assert_eq!(
        kinds_of(&out),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(content(&out), br"#{a}\n'\");
}

#[test]
fn test_multiline_string_is_one_delayed_piece() {
    let out = lex("\"a\nb\"\n");
    let content_event = out
        .events
        .iter()
        .find(|e| e.token().is_some_and(|t| t.kind == TokenKind::StringContent));
    assert!(matches!(content_event, Some(garnet_ir::Event::Delayed(_))));
    assert_eq!(content(&out), b"a\nb");
}

#[test]
fn test_word_lists() {
    let out = lex("%w(a b)");
    assert_eq!(
        kinds_of(&out),
        vec![
            TokenKind::QWordsBeg,
            TokenKind::WordsSep,
            TokenKind::StringContent,
            TokenKind::WordsSep,
            TokenKind::StringContent,
            TokenKind::WordsSep,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(str_values(&out), vec!["a", "b"]);
    assert_eq!(kinds("%W[a]")[0], TokenKind::WordsBeg);
    assert_eq!(kinds("%i<a>")[0], TokenKind::QSymbolsBeg);
    assert_eq!(kinds("%I{a}")[0], TokenKind::SymbolsBeg);
}

#[test]
fn test_word_list_escaped_space() {
    let out = lex(r"%w(a\ b)");
    assert_eq!(str_values(&out), vec!["a b"]);
}

#[test]
fn test_percent_strings() {
    assert_eq!(
        kinds("%q(a)"),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(kinds("%Q|a|")[0], TokenKind::StringBeg);
    assert_eq!(kinds("%(a)")[0], TokenKind::StringBeg);
    assert_eq!(kinds("%x(ls)")[0], TokenKind::XStringBeg);
    assert_eq!(kinds("%s(a)")[0], TokenKind::SymBeg);
}

#[test]
fn test_percent_literal_nesting() {
    let out = lex("%q((a))");
    assert_eq!(content(&out), b"(a)");
    assert!(codes(&out).is_empty());
}

#[test]
fn test_unknown_percent_type() {
    let out = lex("%z(a)");
    assert_eq!(codes(&out), vec!["E0009"]);
    assert_eq!(kinds_of(&out)[0], TokenKind::Error);
    assert_eq!(codes(&lex("%")), vec!["E0001"]);
}

#[test]
fn test_regexp_options() {
    let out = lex("%r(a)ix");
    let end = out.tokens().find(|t| t.kind == TokenKind::RegexpEnd).cloned();
    let options = match end.map(|t| t.value) {
        Some(TokenValue::RegexpOptions(options)) => options,
        other => panic!("no options: {other:?}"),
    };
    assert!(options.ignore_case && options.extended);
    assert!(!options.multiline && !options.once);
    assert_eq!(options.encoding, None);

    let out = lex("/a/mou");
    assert!(codes(&out).is_empty());
}

#[test]
fn test_unknown_regexp_option() {
    let out = lex("/a/iz");
    assert_eq!(codes(&out), vec!["E0011"]);
}

#[test]
fn test_regexp_encoding_mismatch() {
    let out = lex("/é/n");
    assert_eq!(codes(&out), vec!["E0012"]);
}

#[test]
fn test_regexp_keeps_escapes() {
    let out = lex(r"/\d+\/\\/");
    assert_eq!(content(&out), br"\d+/\\");
}

#[test]
fn test_label_end() {
    assert_eq!(
        kinds(r#"{"a": 1}"#),
        vec![
            TokenKind::LBraceHash,
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::LabelEnd,
            TokenKind::Integer,
            TokenKind::RBrace,
        ]
    );
}

#[test]
fn test_quoted_symbol() {
    assert_eq!(
        kinds(r#":"a b""#),
        vec![
            TokenKind::SymBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let out = lex("\"abc");
    assert_eq!(codes(&out), vec!["E0001"]);
    assert_eq!(
        kinds_of(&out),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(out.diagnostics[0].column, 1);
}

#[test]
fn test_unterminated_list() {
    let out = lex("%w(a");
    assert_eq!(codes(&out), vec!["E0001"]);
    assert_eq!(kinds_of(&out).last(), Some(&TokenKind::StringEnd));
}

#[test]
fn test_backticks() {
    assert_eq!(
        kinds("`ls`"),
        vec![
            TokenKind::XStringBeg,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(kinds("def `(c); end")[1], TokenKind::Backtick);
    assert_eq!(kinds("a.`")[2], TokenKind::Backtick);
}

#[test]
fn test_char_literals() {
    let toks = tokens("?a");
    assert_eq!(toks[0].kind, TokenKind::Char);
    assert_eq!(toks[0].str_value().map(StrLit::text).as_deref(), Some("a"));
    assert_eq!(toks[0].state, ExprState::END);

    let toks = tokens(r"?\n");
    assert_eq!(toks[0].str_value().map(|s| s.bytes.clone()), Some(b"\n".to_vec()));

    let toks = tokens("?é");
    assert_eq!(toks[0].str_value().map(StrLit::text).as_deref(), Some("é"));
}

#[test]
fn test_char_escape_at_end_of_input() {
    let src = "x = ?\\";
    let out = lex(src);
    assert_eq!(codes(&out), vec!["E0007"]);
    let ch = out.tokens().find(|t| t.kind == TokenKind::Char);
    assert_eq!(ch.map(|t| text(src, t)), Some("?\\"));
    let trivia: Vec<_> = out
        .events
        .iter()
        .filter(|e| matches!(e, garnet_ir::Event::Ignored(_)))
        .map(|e| e.span().to_range())
        .collect();
    assert_eq!(trivia, vec![1..2, 3..4]);
}

#[test]
fn test_question_before_identifier() {
    assert_eq!(
        kinds("?ab"),
        vec![TokenKind::Question, TokenKind::Identifier]
    );
    let out = lex("x ?ab : c");
    assert_eq!(codes(&out), vec!["W0005"]);
}

#[test]
fn test_question_with_space() {
    let out = lex("? ");
    assert_eq!(kinds_of(&out), vec![TokenKind::Question]);
    assert_eq!(codes(&out), vec!["W0005"]);
    assert_eq!(codes(&lex("?")), vec!["E0014"]);
}

#[test]
fn test_ternary_question() {
    assert_eq!(
        kinds("a ?b :c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Char,
            TokenKind::Colon,
            TokenKind::Identifier,
        ]
    );
    let locals = crate::test_util::lex_with_locals("a ? b : c", &["a"]);
    assert_eq!(kinds_of(&locals)[1], TokenKind::Question);
}
