//! Properties every decode must satisfy, checked through the public API.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use kalends_rfc::rfc::ical::core::{AlarmKey, EntryKey, PersonKey, VendorKey};
use kalends_rfc::rfc::ical::expand::transition_date;
use kalends_rfc::rfc::ical::parse::lexer::unfold;
use kalends_rfc::{Entry, decode};
use kalends_test::fixtures::{PACIFIC, pacific_event, pacific_invitation};

fn basic(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").unwrap()
}

#[test_log::test]
fn pacific_scenario_converts_with_standard_offset() {
    let entry = decode(&pacific_invitation()).unwrap();

    let start = entry.start().unwrap();
    assert_eq!(start.tzid(), Some(PACIFIC));
    assert_eq!(
        start.utc().unwrap().naive_utc(),
        basic("20290303T140000")
    );
}

/// UTC start is local start minus the offset-to of the period the local start falls in.
#[test_log::test]
fn utc_start_subtracts_the_selected_period_offset() {
    let dst_start = transition_date("FREQ=YEARLY;INTERVAL=1;BYDAY=2SU;BYMONTH=3", 2029)
        .unwrap()
        .and_hms_opt(2, 0, 0)
        .unwrap();
    let dst_end = transition_date("FREQ=YEARLY;INTERVAL=1;BYDAY=1SU;BYMONTH=11", 2029)
        .unwrap()
        .and_hms_opt(2, 0, 0)
        .unwrap();

    for local in [
        "20290101T000000",
        "20290311T015959",
        "20290311T020000",
        "20290615T120000",
        "20291104T015959",
        "20291104T020000",
        "20291231T235959",
    ] {
        let entry = decode(&pacific_event(local, &[])).unwrap();
        let local = basic(local);
        let offset_minutes = if dst_start <= local && local < dst_end {
            -420
        } else {
            -480
        };

        assert_eq!(
            entry.start().unwrap().utc().unwrap().naive_utc(),
            local - TimeDelta::minutes(offset_minutes),
            "{local}"
        );
    }
}

#[test]
fn decoding_twice_gives_identical_entries() {
    let input = pacific_invitation();
    assert_eq!(decode(&input).unwrap(), decode(&input).unwrap());
}

#[test]
fn unfolding_removes_exactly_one_space() {
    let original = "Agenda:  two spaces survive as one, tabs\tstay";
    let (head, tail) = original.split_at(8);
    let folded = format!("DESCRIPTION:{head}\r\n {tail}\r\n");

    assert_eq!(
        unfold(&folded).unwrap(),
        vec![format!("DESCRIPTION:{original}")]
    );
}

#[test]
fn folded_description_is_reassembled() {
    let entry = decode(&pacific_invitation()).unwrap();
    let description = entry.description().unwrap();

    assert_eq!(description.language, "en-US");
    assert_eq!(
        description.text,
        "Agenda: budget, hiring\nand the roadmap for the next two quarters."
    );
}

#[test]
fn transition_boundaries() {
    // 2026-11-01 is a Sunday.
    assert_eq!(
        transition_date("FREQ=YEARLY;BYDAY=1SU;BYMONTH=11", 2026).unwrap(),
        NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
    );
    // 2029-03-31 is a Saturday.
    assert_eq!(
        transition_date("FREQ=YEARLY;BYDAY=-1SU;BYMONTH=3", 2029).unwrap(),
        NaiveDate::from_ymd_opt(2029, 3, 25).unwrap()
    );
}

#[test]
fn participants_decode() {
    let entry = Entry::from_ics(&pacific_invitation()).unwrap();

    let jane = &entry.participants()[1];
    let attrs = jane.attributes();
    assert_eq!(attrs[&PersonKey::Role], "REQ-PARTICIPANT");
    assert_eq!(attrs[&PersonKey::ParticipationStatus], "NEEDS-ACTION");
    assert_eq!(attrs[&PersonKey::Rsvp], "TRUE");
    assert_eq!(attrs[&PersonKey::Name], "Jane Doe");
    assert_eq!(attrs[&PersonKey::Email], "jane.doe@bar.com");
    assert_eq!(attrs.len(), 5);

    assert_eq!(
        entry.organizer().and_then(|p| p.name()),
        Some("John Smith")
    );
}

#[test]
fn attribute_view_includes_vendor_keys() {
    let entry = decode(&pacific_invitation()).unwrap();
    let attrs = entry.attributes();

    assert_eq!(attrs[&EntryKey::Method], "REQUEST");
    assert_eq!(attrs[&EntryKey::SummaryLanguage], "en-US");
    assert_eq!(attrs[&EntryKey::Sent], "20290215T181516Z");
    assert_eq!(
        attrs[&EntryKey::Vendor(VendorKey::OutlookConfType)],
        "0"
    );
    assert!(!attrs.contains_key(&EntryKey::Vendor(VendorKey::CalendarName)));
}

#[test]
fn alarm_decodes() {
    let entry = decode(&pacific_invitation()).unwrap();
    let alarm = &entry.alarms()[0];

    assert_eq!(alarm.get(AlarmKey::Description), Some("REMINDER"));
    assert_eq!(alarm.get(AlarmKey::TriggerRelated), Some("START"));
    assert_eq!(alarm.trigger_duration(), Some(TimeDelta::minutes(-15)));
}

#[test]
fn entry_serializes_to_json() {
    let entry = decode(&pacific_invitation()).unwrap();
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["uid"], "040000008200E00074C5B7101A82E00800000000");
    assert_eq!(json["start"]["tzid"], PACIFIC);
    assert_eq!(json["start"]["utc"], "2029-03-03T14:00:00Z");
    assert_eq!(json["participants"].as_array().map(Vec::len), Some(2));
}

#[test]
fn utc_marker_does_not_bypass_the_zone() {
    let entry = decode(&pacific_event("20290303T060000Z", &[])).unwrap();
    let start = entry.start().unwrap();

    assert!(start.has_utc_marker());
    assert_eq!(start.utc().unwrap().naive_utc(), basic("20290303T140000"));
}

#[test]
fn zone_without_daylight_rule_is_identity() {
    let input = "BEGIN:VCALENDAR\r
BEGIN:VTIMEZONE\r
TZID:US Mountain Standard Time\r
BEGIN:STANDARD\r
DTSTART:16010101T000000\r
TZOFFSETFROM:-0700\r
TZOFFSETTO:-0700\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTART;TZID=Other Zone:20290303T060000\r
END:VEVENT\r
END:VCALENDAR\r
";
    let entry = decode(input).unwrap();

    assert_eq!(
        entry.start().unwrap().utc().unwrap().naive_utc(),
        basic("20290303T060000")
    );
    assert!(entry.conversion_failures().is_empty());
}

#[test]
fn missing_timezone_block_is_identity() {
    let input = "BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
DTSTART;TZID=Pacific Standard Time:20290303T060000\r
END:VEVENT\r
END:VCALENDAR\r
";
    let entry = decode(input).unwrap();

    assert_eq!(
        entry.start().unwrap().utc().unwrap().naive_utc(),
        basic("20290303T060000")
    );
    assert!(entry.conversion_failures().is_empty());
}
