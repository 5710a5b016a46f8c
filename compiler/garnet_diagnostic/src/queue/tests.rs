use super::*;
use garnet_ir::Span;
use pretty_assertions::assert_eq;

fn number_error(line: u32, column: u32, message: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E0005)
        .with_message(message)
        .at(Span::new(0, 1), line, column)
}

#[test]
fn test_sorted_by_position() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.push(number_error(3, 1, "third"));
    queue.push(number_error(1, 5, "second"));
    queue.push(number_error(1, 2, "first"));
    queue.push(number_error(1, 5, "second again"));

    let messages: Vec<String> = queue.into_sorted().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "second again", "third"]);
}

#[test]
fn test_repeats_at_one_position_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.push(number_error(2, 1, "Trailing '_' in number.")));
    assert!(!queue.push(number_error(2, 1, "Trailing '_' in number.")));
    assert!(queue.push(number_error(2, 7, "Trailing '_' in number.")));
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.iter().count(), 2);
}

#[test]
fn test_error_limit_spares_warnings() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    queue.extend([
        number_error(1, 1, "a"),
        number_error(2, 1, "b"),
        number_error(3, 1, "c"),
    ]);
    assert!(queue.limit_reached());
    assert_eq!((queue.error_count(), queue.dropped_count()), (2, 1));

    let warning = Diagnostic::new(ErrorCode::W0003).with_message("Float 1e999 out of range.");
    assert!(queue.push(warning));
    assert_eq!(queue.warning_count(), 1);
    assert!(queue.has_errors());
}

#[test]
fn test_empty_queue() {
    let queue = DiagnosticQueue::default();
    assert!(!queue.has_errors());
    assert!(!queue.limit_reached());
    assert!(queue.into_sorted().is_empty());
}
