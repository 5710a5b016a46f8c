use super::*;
use crate::{ReaderSource, StrSource};
use pretty_assertions::assert_eq;

// === Loading ===

#[test]
fn test_lines_load_on_demand() {
    let mut buf = SourceBuffer::new(StrSource::new("a\nbb\nccc"));
    assert_eq!(buf.loaded_lines(), 0);
    assert!(buf.ensure_line(1));
    assert_eq!(buf.loaded_lines(), 2);
    assert_eq!(buf.line_range(0), Some((0, 2)));
    assert_eq!(buf.line_range(1), Some((2, 5)));
    assert!(!buf.is_exhausted());
    assert!(buf.ensure_line(2));
    assert_eq!(buf.line_range(2), Some((5, 8)));
    assert!(!buf.ensure_line(3));
    assert!(buf.is_exhausted());
}

#[test]
fn test_empty_source_has_no_lines() {
    let mut buf = SourceBuffer::new(StrSource::new(""));
    assert!(!buf.ensure_line(0));
    assert_eq!(buf.line_range(0), None);
    assert_eq!(buf.line_col(0), (1, 0));
}

#[test]
fn test_io_error_is_recorded() {
    struct Failing;
    impl LineSource for Failing {
        fn read_line(&mut self, _buf: &mut Vec<u8>) -> io::Result<bool> {
            Err(io::Error::other("disk on fire"))
        }
    }

    let mut buf = SourceBuffer::new(Failing);
    assert!(!buf.ensure_line(0));
    assert!(buf.is_exhausted());
    let err = buf.take_io_error();
    assert_eq!(err.map(|e| e.to_string()), Some("disk on fire".to_owned()));
}

#[test]
fn test_reader_source_loads_same_bytes() {
    let text = "one\r\ntwo\n";
    let mut buf = SourceBuffer::new(ReaderSource::new(text.as_bytes()));
    buf.load_all();
    assert_eq!(buf.bytes(), text.as_bytes());
    assert_eq!(buf.loaded_lines(), 2);
}

// === Positions ===

#[test]
fn test_line_col() {
    let mut buf = SourceBuffer::new(StrSource::new("ab\ncd\n\nx"));
    buf.load_all();
    assert_eq!(buf.line_col(0), (1, 0));
    assert_eq!(buf.line_col(2), (1, 2));
    assert_eq!(buf.line_col(3), (2, 0));
    assert_eq!(buf.line_col(6), (3, 0));
    assert_eq!(buf.line_col(7), (4, 0));
    assert_eq!(buf.line_col(100), (4, 93));
}

#[test]
fn test_slice_is_clamped() {
    let mut buf = SourceBuffer::new(StrSource::new("hello\n"));
    buf.load_all();
    assert_eq!(buf.slice(1, 3), b"el");
    assert_eq!(buf.slice(4, 100), b"o\n");
    assert_eq!(buf.slice(10, 12), b"");
}

// === BOM ===

#[test]
fn test_bom_detection() {
    let mut buf = SourceBuffer::new(StrSource::new(b"\xEF\xBB\xBFx = 1\n".to_vec()));
    buf.load_all();
    assert_eq!(buf.bom(), Some(Bom::Utf8));
    assert_eq!(buf.bom().map(Bom::byte_len), Some(3));

    assert_eq!(Bom::detect(b"\xFF\xFEa"), Some(Bom::Utf16Le));
    assert_eq!(Bom::detect(b"\xFE\xFFa"), Some(Bom::Utf16Be));
    assert_eq!(Bom::detect(b"plain"), None);
}

#[test]
fn test_bom_only_checked_on_first_line() {
    let mut buf = SourceBuffer::new(StrSource::new(b"a\n\xEF\xBB\xBF\n".to_vec()));
    buf.load_all();
    assert_eq!(buf.bom(), None);
}
