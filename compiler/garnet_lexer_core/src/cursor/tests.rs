use super::*;
use crate::StrSource;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn cursor(text: &str) -> Cursor {
    Cursor::new(SourceBuffer::new(StrSource::new(text)))
}

fn read_all(cursor: &mut Cursor) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(c) = cursor.next_char() {
        out.push(c);
    }
    out
}

// === Reading ===

#[test]
fn test_next_char_crosses_lines() {
    let mut c = cursor("ab\ncd");
    assert_eq!(read_all(&mut c), b"ab\ncd");
    assert_eq!(c.next_char(), None);
    assert_eq!(c.line_no(), 2);
}

#[test]
fn test_empty_input() {
    let mut c = cursor("");
    assert!(c.at_eol());
    assert_eq!(c.next_char(), None);
    assert_eq!(c.line_no(), 1);
}

#[test]
fn test_crlf_reads_as_newline() {
    let mut c = cursor("a\r\nb");
    assert_eq!(read_all(&mut c), b"a\nb");
}

#[test]
fn test_lone_cr_is_returned() {
    let mut c = cursor("a\rb\n");
    assert_eq!(read_all(&mut c), b"a\rb\n");
}

#[test]
fn test_next_in_line_stops_at_eol() {
    let mut c = cursor("x\ny");
    assert_eq!(c.next_in_line(), Some(b'x'));
    assert_eq!(c.next_in_line(), Some(b'\n'));
    assert_eq!(c.next_in_line(), None);
    assert_eq!(c.line_no(), 1);
}

// === Pushback ===

#[test]
fn test_pushback_one_byte() {
    let mut c = cursor("xy");
    assert_eq!(c.next_char(), Some(b'x'));
    c.pushback(Some(b'x'));
    assert_eq!(c.pos(), 0);
    assert_eq!(c.next_char(), Some(b'x'));
}

#[test]
fn test_pushback_crlf_restores_both_bytes() {
    let mut c = cursor("a\r\n");
    c.skip(1);
    assert_eq!(c.next_char(), Some(b'\n'));
    assert_eq!(c.pos(), 3);
    c.pushback(Some(b'\n'));
    assert_eq!(c.pos(), 1);
    assert_eq!(c.peek(), Some(b'\r'));
    assert_eq!(c.peek_char(), Some(b'\n'));
}

#[test]
fn test_pushback_none_is_noop() {
    let mut c = cursor("a");
    c.skip(1);
    c.pushback(None);
    assert_eq!(c.pos(), 1);
}

#[test]
fn test_pushback_stops_at_line_start() {
    let mut c = cursor("a\nb");
    c.goto_eol();
    assert!(c.advance_line());
    c.pushback(Some(b'\n'));
    assert_eq!(c.pos(), 2);
}

// === Line position ===

#[test]
fn test_bol_tracking() {
    let mut c = cursor("ab\n");
    assert!(c.is_bol());
    assert!(!c.was_bol());
    c.next_char();
    assert!(c.was_bol());
    c.next_char();
    assert!(!c.was_bol());
}

#[test]
fn test_peek_does_not_cross_line() {
    let c = cursor("a\nb");
    assert_eq!(c.peek_at(1), Some(b'\n'));
    assert_eq!(c.peek_at(2), None);
}

#[test]
fn test_find_in_line() {
    let mut c = cursor("ab#cd\nx#");
    assert_eq!(c.find_in_line(b'#'), Some(2));
    c.skip(3);
    assert_eq!(c.find_in_line(b'#'), None);
}

// === Heredoc snapshots ===

#[test]
fn test_restore_skips_heredoc_body() {
    let mut c = cursor("x <<E, y\nbody\nE\nafter\n");
    c.skip(5);
    let snap = c.snapshot();
    c.goto_eol();
    assert!(c.advance_line());
    assert_eq!(c.line_bytes(), b"body\n");
    assert!(c.advance_line());
    assert_eq!(c.line_bytes(), b"E\n");
    let terminator = c.line_index();

    c.restore(snap, terminator);
    assert_eq!(c.pos(), 5);
    assert_eq!(c.rest_of_line(), b", y\n");
    assert_eq!(c.next_line(), Some(&b"after\n"[..]));

    c.goto_eol();
    assert!(c.advance_line());
    assert_eq!(c.line_bytes(), b"after\n");
    assert_eq!(c.line_no(), 4);
    assert_eq!(c.heredoc_end(), None);
}

#[test]
fn test_end_of_input_inside_skipped_body() {
    let mut c = cursor("<<E\nbody\nE\n");
    c.skip(3);
    let snap = c.snapshot();
    c.goto_eol();
    assert!(c.advance_line());
    assert!(c.advance_line());
    let terminator = c.line_index();
    c.restore(snap, terminator);

    c.goto_eol();
    assert!(!c.advance_line());
    assert_eq!(c.line_no(), 3);
    assert_eq!(c.pos(), 11);
    assert!(c.at_eol());
    assert_eq!(c.heredoc_end(), None);
}

#[test]
fn test_next_line_at_end() {
    let mut c = cursor("only\n");
    assert_eq!(c.next_line(), None);
    c.goto_eol();
    assert!(!c.advance_line());
    assert!(c.at_eol());
}

#[test]
fn test_skip_to_end_returns_remaining_lines() {
    let mut c = cursor("__END__\ndata 1\ndata 2\n");
    c.skip(7);
    assert_eq!(c.skip_to_end(), Some((8, 22)));
    assert_eq!(c.next_char(), None);
}

#[test]
fn test_skip_to_end_with_nothing_left() {
    let mut c = cursor("__END__");
    assert_eq!(c.skip_to_end(), None);
}

// === Line/column ===

#[test]
fn test_line_col_of_loaded_offsets() {
    let mut c = cursor("ab\ncd\n");
    read_all(&mut c);
    assert_eq!(c.line_col(4), (2, 1));
}

proptest! {
    #[test]
    fn test_reading_reproduces_lf_source(text in "[a-z \n]{0,64}") {
        let mut c = cursor(&text);
        prop_assert_eq!(read_all(&mut c), text.into_bytes());
    }

    #[test]
    fn test_pushback_then_read_is_stable(text in "[a-z\r\n]{1,32}") {
        let mut c = cursor(&text);
        while let Some(ch) = c.next_char() {
            let after = c.pos();
            c.pushback(Some(ch));
            prop_assert_eq!(c.next_char(), Some(ch));
            prop_assert_eq!(c.pos(), after);
        }
    }
}
