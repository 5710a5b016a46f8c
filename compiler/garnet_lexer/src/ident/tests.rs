use super::*;
use crate::test_util::{codes, kinds, kinds_of, lex, lex_with_locals, text, tokens};
use pretty_assertions::assert_eq;

#[test]
fn test_mbc_len() {
    assert_eq!(mbc_len(SourceEncoding::Utf8, b'a'), 1);
    assert_eq!(mbc_len(SourceEncoding::Utf8, 0xC3), 2);
    assert_eq!(mbc_len(SourceEncoding::Utf8, 0xE3), 3);
    assert_eq!(mbc_len(SourceEncoding::Utf8, 0xF0), 4);
    assert_eq!(mbc_len(SourceEncoding::Windows31J, 0x82), 2);
    assert_eq!(mbc_len(SourceEncoding::EucJp, 0x8F), 3);
    assert_eq!(mbc_len(SourceEncoding::Binary, 0xE3), 1);
}

#[test]
fn test_starts_uppercase() {
    assert!(starts_uppercase(SourceEncoding::Utf8, b"Foo"));
    assert!(!starts_uppercase(SourceEncoding::Utf8, b"foo"));
    assert!(!starts_uppercase(SourceEncoding::Utf8, b"_Foo"));
    assert!(starts_uppercase(SourceEncoding::Utf8, "Ärger".as_bytes()));
    assert!(!starts_uppercase(SourceEncoding::Utf8, "ärger".as_bytes()));
}

#[test]
fn test_identifiers_and_constants() {
    assert_eq!(
        kinds("foo Bar baz?"),
        vec![TokenKind::Identifier, TokenKind::Constant, TokenKind::FuncName]
    );
    assert_eq!(kinds("save!"), vec![TokenKind::FuncName]);
    assert_eq!(
        kinds("a!=b"),
        vec![TokenKind::Identifier, TokenKind::Neq, TokenKind::Identifier]
    );
}

#[test]
fn test_multibyte_identifier() {
    let src = "日本 = 1";
    let toks = tokens(src);
    assert_eq!(toks[0].kind, TokenKind::Identifier);
    assert_eq!(text(src, &toks[0]), "日本");
}

#[test]
fn test_command_start_selects_cmdarg() {
    let toks = tokens("foo bar");
    assert_eq!(toks[0].state, ExprState::CMDARG);
    assert_eq!(toks[1].state, ExprState::ARG);
}

#[test]
fn test_local_variable_state() {
    let out = lex_with_locals("x", &["x"]);
    let tok = out.tokens().next().cloned();
    assert_eq!(
        tok.map(|t| t.state),
        Some(ExprState::END | ExprState::LABEL)
    );
}

#[test]
fn test_labels() {
    let toks = tokens("{a: 1, b?: 2}");
    assert_eq!(toks[1].kind, TokenKind::Label);
    assert_eq!(toks[1].state, ExprState::ARG | ExprState::LABELED);
    assert_eq!(toks[4].kind, TokenKind::Label);
    // `::` is never a label suffix.
    assert_eq!(kinds("f(A::B)")[2], TokenKind::Constant);
}

#[test]
fn test_ternary_colon_is_not_a_label() {
    assert_eq!(
        kinds("x ? a : b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Question,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_keyword_states() {
    let toks = tokens("def foo; end");
    assert_eq!(toks[0].kind, TokenKind::Keyword(Keyword::Def));
    assert_eq!(toks[0].state, ExprState::FNAME);
    assert_eq!(toks[1].kind, TokenKind::Identifier);
    assert_eq!(toks[1].state, ExprState::ENDFN);
}

#[test]
fn test_keyword_after_def_is_method_name() {
    let toks = tokens("def end; end");
    assert_eq!(toks[1].kind, TokenKind::Keyword(Keyword::End));
    assert_eq!(toks[1].state, ExprState::ENDFN);
}

#[test]
fn test_keyword_after_dot_is_identifier() {
    assert_eq!(
        kinds("a.class"),
        vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier]
    );
}

#[test]
fn test_modifier_keywords() {
    assert_eq!(
        kinds("a if b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Modifier(Keyword::If),
            TokenKind::Identifier,
        ]
    );
    assert_eq!(
        kinds("if b"),
        vec![TokenKind::Keyword(Keyword::If), TokenKind::Identifier]
    );
    assert_eq!(
        kinds("x rescue nil"),
        vec![
            TokenKind::Identifier,
            TokenKind::Modifier(Keyword::Rescue),
            TokenKind::Keyword(Keyword::Nil),
        ]
    );
}

#[test]
fn test_do_after_loop_condition() {
    assert_eq!(
        kinds("while cond do\nend\n")[2],
        TokenKind::Keyword(Keyword::DoCond)
    );
    assert_eq!(
        kinds("until x do end")[2],
        TokenKind::Keyword(Keyword::DoCond)
    );
    assert_eq!(
        kinds("for a in b do end")[4],
        TokenKind::Keyword(Keyword::DoCond)
    );
}

#[test]
fn test_do_after_call_is_block() {
    assert_eq!(
        kinds("foo(1) do\nend\n")[4],
        TokenKind::Keyword(Keyword::DoBlock)
    );
}

#[test]
fn test_do_in_loop_body_is_block() {
    let kinds = kinds("while x\n  foo do end\nend\n");
    assert!(kinds.contains(&TokenKind::Keyword(Keyword::DoBlock)));
    assert!(!kinds.contains(&TokenKind::Keyword(Keyword::DoCond)));
}

#[test]
fn test_do_for_command_argument() {
    let mut lexer = Lexer::for_text("foo 1 do end");
    lexer.cmdarg_push(true);
    let kinds: Vec<_> = std::iter::from_fn(|| lexer.next_token())
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds[2], TokenKind::Keyword(Keyword::DoCommand));
}

#[test]
fn test_do_for_lambda() {
    assert_eq!(
        kinds("->(x) do end")[4],
        TokenKind::Keyword(Keyword::DoLambda)
    );
}

#[test]
fn test_loop_hints_can_be_disabled() {
    let out = Lexer::for_text("while cond do end")
        .with_config(crate::LexerConfig::default().with_loop_condition_hints(false))
        .tokenize();
    assert_eq!(kinds_of(&out)[2], TokenKind::Keyword(Keyword::DoBlock));
}

#[test]
fn test_setter_method_name() {
    let src = "def foo=(v); end";
    let toks = tokens(src);
    assert_eq!(toks[1].kind, TokenKind::Identifier);
    assert_eq!(text(src, &toks[1]), "foo=");
    // `==` after a method name is an operator.
    assert_eq!(kinds("def ==(o); end")[1], TokenKind::EqEq);
}

#[test]
fn test_defined_keyword() {
    assert_eq!(
        kinds("defined?(x)")[0],
        TokenKind::Keyword(Keyword::Defined)
    );
}

#[test]
fn test_global_variables() {
    for src in ["$foo", "$_", "$~", "$!", "$0", "$-w", "$stdout", "$_x"] {
        assert_eq!(kinds(src), vec![TokenKind::GVar], "{src}");
    }
    assert_eq!(kinds("$&"), vec![TokenKind::BackRef]);
    assert_eq!(kinds("$1"), vec![TokenKind::NthRef]);
    assert_eq!(kinds("$12"), vec![TokenKind::NthRef]);
}

#[test]
fn test_match_reference_as_method_name() {
    let mut lexer = Lexer::for_text("$1");
    lexer.set_state(ExprState::FNAME);
    assert_eq!(lexer.next_token().map(|t| t.kind), Some(TokenKind::GVar));
}

#[test]
fn test_nth_ref_too_big() {
    let out = lex("$99999999999");
    assert_eq!(kinds_of(&out), vec![TokenKind::NthRef]);
    assert_eq!(codes(&out), vec!["W0009"]);
}

#[test]
fn test_invalid_global_names() {
    let out = lex("$ ");
    assert_eq!(codes(&out), vec!["E0008"]);
    let out = lex("$%");
    assert_eq!(codes(&out), vec!["E0008"]);
    assert!(out.has_errors());
}

#[test]
fn test_dollar_dash_without_name() {
    assert_eq!(kinds("$- x")[0], TokenKind::Dollar);
}

#[test]
fn test_instance_and_class_variables() {
    assert_eq!(
        kinds("@a @@b"),
        vec![TokenKind::IVar, TokenKind::CVar]
    );
    let out = lex("@1");
    assert_eq!(codes(&out), vec!["E0008"]);
    let out = lex("@@");
    assert_eq!(codes(&out), vec!["E0008"]);
    assert_eq!(kinds_of(&out), vec![TokenKind::CVar]);
}

#[test]
fn test_invalid_character() {
    let out = lex("a \u{7} b");
    assert_eq!(codes(&out), vec!["E0004"]);
    assert!(kinds_of(&out).contains(&TokenKind::Error));
}
