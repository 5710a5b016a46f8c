use super::*;
use std::collections::HashSet;

#[test]
fn test_codes_are_unique() {
    let names: HashSet<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    assert_eq!(names.len(), ErrorCode::ALL.len());
}

#[test]
fn test_warning_prefix() {
    assert!(ErrorCode::W0001.is_warning());
    assert!(!ErrorCode::E0001.is_warning());
    let warnings = ErrorCode::ALL.iter().filter(|c| c.is_warning()).count();
    assert_eq!(warnings, 10);
}

#[test]
fn test_display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
        assert!(!code.description().is_empty());
    }
}
