use super::*;
use garnet_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

#[test]
fn test_clean_source() {
    let report = check_source("ok.rb", b"def f(a)\n  a + 1\nend\n".to_vec(), &Options::default());
    assert_eq!(report.path, "ok.rb");
    assert!(report.diagnostics.is_empty());
    assert!(!report.failed());
}

#[test]
fn test_errors_are_sorted_by_position() {
    let report = check_source("bad.rb", b"x = 09\ny = \"abc".to_vec(), &Options::default());
    let codes: Vec<_> = report.diagnostics.iter().map(|d| (d.code, d.line)).collect();
    assert_eq!(codes, vec![(ErrorCode::E0005, 1), (ErrorCode::E0001, 2)]);
    assert_eq!(report.error_count, 2);
    assert!(report.failed());
}

#[test]
fn test_warnings_do_not_fail() {
    let report = check_source("w.rb", b"x = 1e400\n".to_vec(), &Options::default());
    assert_eq!(report.warning_count, 1);
    assert_eq!(report.error_count, 0);
    assert!(!report.failed());
}

#[test]
fn test_verbose_only_warnings() {
    let src = b"foo *args\n".to_vec();
    let quiet = check_source("v.rb", src.clone(), &Options::default());
    let verbose = Options {
        verbose: true,
        ..Options::default()
    };
    let loud = check_source("v.rb", src, &verbose);
    assert_eq!(quiet.warning_count, 0);
    assert_eq!(
        loud.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![ErrorCode::W0006]
    );
}

#[test]
fn test_missing_file() {
    let report = check_path("/nonexistent/garnet/file.rb", &Options::default());
    assert_eq!(report.error_count, 1);
    assert_eq!(report.diagnostics[0].code, ErrorCode::E0016);
    assert!(report.diagnostics[0].message.contains("cannot find file"));
}

#[test]
fn test_report_keeps_source_for_snippets() {
    let report = check_source("s.rb", b"x = 09\n".to_vec(), &Options::default());
    assert_eq!(report.source.as_deref(), Some(&b"x = 09\n"[..]));
    let missing = check_path("/nonexistent/garnet/other.rb", &Options::default());
    assert_eq!(missing.source, None);
}
