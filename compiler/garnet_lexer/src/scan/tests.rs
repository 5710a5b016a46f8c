use super::*;
use crate::test_util::{codes, kinds, lex, spans};
use garnet_ir::Event;
use pretty_assertions::assert_eq;

fn trivia(src: &str) -> Vec<TriviaKind> {
    lex(src)
        .events
        .into_iter()
        .filter_map(|e| match e {
            Event::Ignored(t) => Some(t.kind),
            _ => None,
        })
        .collect()
}

#[test]
fn test_statements_end_at_newline() {
    assert_eq!(
        kinds("foo\nbar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_newline_after_operator_is_ignored() {
    assert_eq!(
        kinds("1 +\n2\n"),
        vec![
            TokenKind::Integer,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::Newline,
        ]
    );
    assert!(trivia("1 +\n2\n").contains(&TriviaKind::IgnoredNewline));
}

#[test]
fn test_leading_dot_continues_previous_line() {
    assert_eq!(
        kinds("foo\n  .bar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
    assert_eq!(
        kinds("foo\n  &.bar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::AndDot,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_range_on_next_line_does_not_continue() {
    assert_eq!(
        kinds("foo\n..bar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::BDot2,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_comment_line_continues_expression() {
    assert_eq!(
        kinds("foo\n  # note\n  .bar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_backslash_newline_is_space() {
    assert_eq!(
        kinds("foo \\\n  bar\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let out = lex("foo\r\nbar\r\n");
    assert_eq!(
        crate::test_util::kinds_of(&out),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_lone_carriage_return_warns_once() {
    let out = lex("foo\r bar\r baz\n");
    assert_eq!(codes(&out), vec!["W0004"]);
    assert!(!out.has_errors());
}

#[test]
fn test_end_marker_stops_scanning() {
    let src = "foo\n__END__\nnot ruby at all \"\n";
    assert_eq!(kinds(src), vec![TokenKind::Identifier, TokenKind::Newline]);
    let trivia = trivia(src);
    assert!(trivia.contains(&TriviaKind::EndMarker));
    assert!(trivia.contains(&TriviaKind::DataSection));
}

#[test]
fn test_end_marker_must_be_alone() {
    assert_eq!(
        kinds("__END__x\n"),
        vec![TokenKind::Identifier, TokenKind::Newline]
    );
}

#[test]
fn test_nul_ends_script() {
    let src = "foo\0bar baz";
    assert_eq!(kinds(src), vec![TokenKind::Identifier]);
    assert!(trivia(src).contains(&TriviaKind::DataSection));
}

#[test]
fn test_embedded_document() {
    let src = "=begin\ndoc text\n=end\nfoo\n";
    assert_eq!(kinds(src), vec![TokenKind::Identifier, TokenKind::Newline]);
    let trivia = trivia(src);
    assert_eq!(
        &trivia[..3],
        &[TriviaKind::EmbdocBeg, TriviaKind::Embdoc, TriviaKind::EmbdocEnd]
    );
}

#[test]
fn test_unterminated_embedded_document() {
    let out = lex("=begin\nnever closed\n");
    assert_eq!(codes(&out), vec!["E0003"]);
    assert_eq!(out.diagnostics[0].line, 1);
}

#[test]
fn test_events_tile_the_source() {
    let src = "x = 1 # c\nfoo(a, b) \\\n  + 2\n";
    let spans = spans(&lex(src));
    assert_eq!(spans.first().map(|r| r.start), Some(0));
    assert_eq!(spans.last().map(|r| r.end), Some(src.len()));
    for pair in spans.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_eof_is_last_and_single() {
    let out = lex("foo");
    let eofs = out
        .tokens()
        .filter(|t| t.kind == TokenKind::Eof)
        .count();
    assert_eq!(eofs, 1);
    assert_eq!(out.tokens().last().map(|t| t.kind), Some(TokenKind::Eof));
}
