use super::*;
use pretty_assertions::assert_eq;

fn number(text: &str, radix: u32, float: bool) -> NumberLit {
    NumberLit {
        text: text.to_owned(),
        radix,
        float,
        suffix: NumberSuffix::None,
        fraction: None,
    }
}

#[test]
fn test_number_lit_integer_values() {
    assert_eq!(number("1F", 16, false).to_u64(), Some(31));
    assert_eq!(number("777", 8, false).to_u64(), Some(511));
    assert_eq!(number("101", 2, false).to_f64(), Some(5.0));
    assert_eq!(number("1.5", 10, true).to_u64(), None);
}

#[test]
fn test_number_lit_float_value() {
    assert_eq!(number("10.5e10", 10, true).to_f64(), Some(10.5e10));
}

#[test]
fn test_suffix_predicates() {
    assert!(NumberSuffix::RationalImaginary.is_rational());
    assert!(NumberSuffix::RationalImaginary.is_imaginary());
    assert!(!NumberSuffix::Imaginary.is_rational());
    assert!(!NumberSuffix::None.is_imaginary());
}

#[test]
fn test_event_accessors() {
    let token = Token {
        kind: TokenKind::Identifier,
        span: Span::new(4, 7),
        line: 2,
        column: 1,
        state: ExprState::CMDARG,
        value: TokenValue::None,
    };
    let event = Event::Delayed(token.clone());
    assert_eq!(event.span(), Span::new(4, 7));
    assert_eq!(event.line(), 2);
    assert_eq!(event.token(), Some(&token));
    assert!(!event.is_ignored());

    let trivia = Event::Ignored(Trivia {
        kind: TriviaKind::Space,
        span: Span::new(3, 4),
        line: 2,
        column: 0,
    });
    assert!(trivia.is_ignored());
    assert_eq!(trivia.token(), None);
    assert_eq!(trivia.column(), 0);
}

#[test]
fn test_kind_classification() {
    assert!(TokenKind::HeredocBeg.is_string_beg());
    assert!(TokenKind::LabelEnd.is_string_end());
    assert!(!TokenKind::StringContent.is_string_end());
}

#[test]
fn test_token_debug_format() {
    let token = Token {
        kind: TokenKind::Integer,
        span: Span::new(0, 2),
        line: 1,
        column: 0,
        state: ExprState::END,
        value: TokenValue::None,
    };
    assert_eq!(format!("{token:?}"), "Integer @ 0..2 (1:0) [END]");
}
