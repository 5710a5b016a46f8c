use super::*;
use pretty_assertions::assert_eq;

fn lex_lines(src: &str, options: &Options) -> Vec<String> {
    let mut out = Vec::new();
    lex_source(src.as_bytes(), options, &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_lex_prints_tokens_and_trivia() {
    let lines = lex_lines("x = 1\n", &Options::default());
    assert_eq!(
        lines[..6],
        [
            "1:0 Identifier \"x\"",
            "1:1 Space \" \"",
            "1:2 Assign \"=\"",
            "1:3 Space \" \"",
            "1:4 Integer \"1\"",
            "1:5 Newline \"\\n\"",
        ]
    );
    assert!(lines.last().unwrap().ends_with("Eof \"\""));
}

#[test]
fn test_lex_trace_state() {
    let options = Options {
        trace_state: true,
        ..Options::default()
    };
    let lines = lex_lines("1", &options);
    assert_eq!(lines[0], "1:0 Integer \"1\" [END]");
}

#[test]
fn test_lex_escapes_text() {
    let lines = lex_lines("\"a\\tb\"", &Options::default());
    assert_eq!(lines[1], "1:1 StringContent \"a\\\\tb\"");
}

#[test]
fn test_lex_returns_diagnostics() {
    let mut out = Vec::new();
    let diagnostics = lex_source(b"\"abc", &Options::default(), &mut out).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert!(!out.is_empty());
}

#[test]
fn test_format_event_out_of_range_span() {
    let mut lexer = Options::default().lexer(b"abc".to_vec());
    let event = lexer.next_event().unwrap();
    assert_eq!(format_event(&event, b"", false), "1:0 Identifier \"\"");
}
