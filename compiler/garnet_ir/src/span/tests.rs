use super::*;

#[test]
fn test_span_len_and_empty() {
    let span = Span::new(3, 7);
    assert_eq!(span.len(), 4);
    assert!(!span.is_empty());
    assert!(Span::point(5).is_empty());
    assert_eq!(Span::point(5).len(), 0);
}

#[test]
fn test_span_from_range_saturates() {
    let span = Span::from_range(1..usize::MAX);
    assert_eq!(span.start, 1);
    assert_eq!(span.end, u32::MAX);
}

#[test]
fn test_span_merge_and_contains() {
    let merged = Span::new(4, 6).merge(Span::new(1, 5));
    assert_eq!(merged, Span::new(1, 6));
    assert!(merged.contains(1));
    assert!(merged.contains(5));
    assert!(!merged.contains(6));
}

#[test]
fn test_span_display() {
    assert_eq!(format!("{}", Span::new(2, 9)), "2..9");
    assert_eq!(format!("{:?}", Span::new(0, 0)), "0..0");
}
