//! Fatal and non-fatal failure behavior.

use kalends_rfc::rfc::ical::core::TimestampField;
use kalends_rfc::rfc::ical::diagnostics::{Diagnostic, Severity};
use kalends_rfc::rfc::ical::expand::ConversionError;
use kalends_rfc::rfc::ical::parse::{ParseErrorKind, ParseResult};
use kalends_rfc::{DecodeOptions, Entry, decode, decode_with};
use kalends_test::fixtures::{pacific_event, pacific_invitation};

fn decode_collecting(input: &str) -> (ParseResult<Entry>, Vec<Diagnostic>) {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let result = decode_with(input, &mut sink, &DecodeOptions::default());
    (result, sink)
}

#[test_log::test]
fn leading_continuation_is_structural() {
    let input = format!(" {}", pacific_invitation());
    let (result, diagnostics) = decode_collecting(&input);

    let err = result.unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::LeadingContinuation);
    assert!(err.is_structural());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn truncated_envelope_is_structural() {
    let input = pacific_invitation().replace("END:VCALENDAR\r\n", "");
    let err = decode(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingEnd);
}

#[test]
fn malformed_start_aborts() {
    let input = pacific_event("2029-03-03 06:00", &[]);
    let err = decode(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidDateTime);
    assert!(!err.is_structural());
}

#[test]
fn short_form_is_rejected_with_a_zone() {
    let err = decode(&pacific_event("20290303T0600", &[])).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidDateTime);
}

#[test]
fn malformed_participant_is_reported_and_skipped() {
    let input = pacific_event(
        "20290303T060000",
        &[
            "ATTENDEE;CN=No Address:jane.doe@bar.com",
            "ATTENDEE;CN=Jane:mailto:jane@bar.com",
        ],
    );
    let (result, diagnostics) = decode_collecting(&input);

    let entry = result.unwrap();
    assert_eq!(entry.participants().len(), 1);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error && d.message.contains("participant"))
    );
}

#[test]
fn semicolon_fallback_only_when_colon_split_fails() {
    let input = pacific_event(
        "20290303T060000",
        &["SUMMARY:Sync; bring laptops", "ATTENDEE;CN=Jo:mailto:jo@example.com"],
    );
    let entry = decode(&input).unwrap();

    assert_eq!(entry.summary().unwrap().text, "Sync; bring laptops");
    assert_eq!(entry.participants()[0].email(), "jo@example.com");
}

#[test]
fn unknown_zone_only_fails_that_field() {
    let input = pacific_event(
        "20290303T060000",
        &["DTEND;TZID=W. Europe Standard Time:20290303T070000"],
    );
    let (result, diagnostics) = decode_collecting(&input);
    let entry = result.unwrap();

    assert!(entry.start().unwrap().utc().is_some());
    assert_eq!(entry.end().unwrap().utc(), None);
    assert_eq!(entry.conversion_failures().len(), 1);
    assert_eq!(entry.conversion_failures()[0].field, TimestampField::End);
    assert_eq!(
        entry.conversion_failures()[0].error,
        ConversionError::UnknownTimezone("W. Europe Standard Time".to_string())
    );
    assert!(diagnostics.iter().any(|d| d.severity == Severity::Error));
}

#[test]
fn unsupported_rule_only_fails_conversion() {
    let input = pacific_invitation().replace("BYDAY=2SU;BYMONTH=3", "BYDAY=2SA;BYMONTH=3");
    let entry = decode(&input).unwrap();

    assert_eq!(entry.start().unwrap().utc(), None);
    assert!(matches!(
        entry.conversion_failures()[0].error,
        ConversionError::RecurrenceUnsupported(_)
    ));
    assert_eq!(entry.uid(), Some("040000008200E00074C5B7101A82E00800000000"));
}

#[test]
fn second_timezone_is_rejected() {
    let input = pacific_invitation().replace(
        "BEGIN:VEVENT",
        "BEGIN:VTIMEZONE\r\nTZID:Other\r\nEND:VTIMEZONE\r\nBEGIN:VEVENT",
    );
    let err = decode(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::DuplicateTimezone);
}
