//! Tests for decoding errors.

use super::*;

#[test]
fn test_parse_error_new() {
    let error = ParseError::new(ParseErrorKind::MissingEnd, 10);
    assert_eq!(error.kind, ParseErrorKind::MissingEnd);
    assert_eq!(error.line, 10);
    assert!(error.context.is_none());
}

#[test]
fn test_parse_error_display_with_context() {
    let error = ParseError::new(ParseErrorKind::InvalidDateTime, 5)
        .with_context("expected yyyyMMddThhmmss");
    let display = format!("{error}");
    assert!(display.contains("invalid date-time format"));
    assert!(display.contains("line 5"));
    assert!(display.contains("expected yyyyMMddThhmmss"));
}

#[test]
fn test_structural_kinds() {
    let structural = [
        ParseErrorKind::EmptyInput,
        ParseErrorKind::LeadingContinuation,
        ParseErrorKind::MissingBegin,
        ParseErrorKind::MissingEnd,
        ParseErrorKind::MismatchedEnd,
        ParseErrorKind::DuplicateTimezone,
    ];
    for kind in structural {
        assert!(kind.is_structural(), "{kind} should be structural");
    }

    let field = [
        ParseErrorKind::InvalidDateTime,
        ParseErrorKind::InvalidTimestamp,
        ParseErrorKind::InvalidUtcOffset,
        ParseErrorKind::InvalidPerson,
        ParseErrorKind::InvalidTrigger,
    ];
    for kind in field {
        assert!(!kind.is_structural(), "{kind} should be a field error");
    }
}

#[test]
fn test_error_trait() {
    let error = ParseError::new(ParseErrorKind::LeadingContinuation, 1);
    let as_dyn: &dyn std::error::Error = &error;
    assert!(as_dyn.to_string().starts_with("continuation line"));
}
