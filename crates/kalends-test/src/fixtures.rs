//! Calendar documents shared by the integration tests.

/// Name of the zone every Pacific fixture declares.
pub const PACIFIC: &str = "Pacific Standard Time";

const PACIFIC_ZONE: &str = "BEGIN:VTIMEZONE\r
TZID:Pacific Standard Time\r
BEGIN:STANDARD\r
DTSTART:16010101T020000\r
TZOFFSETFROM:-0700\r
TZOFFSETTO:-0800\r
RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=1SU;BYMONTH=11\r
END:STANDARD\r
BEGIN:DAYLIGHT\r
DTSTART:16010101T020000\r
TZOFFSETFROM:-0800\r
TZOFFSETTO:-0700\r
RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=2SU;BYMONTH=3\r
END:DAYLIGHT\r
END:VTIMEZONE\r
";

/// ## Summary
/// A one-event invitation in Pacific time starting at `dtstart`
/// (`yyyyMMddThhmmss`), with `extra` lines appended to the event.
#[must_use]
pub fn pacific_event(dtstart: &str, extra: &[&str]) -> String {
    let mut doc = String::from("BEGIN:VCALENDAR\r\nMETHOD:REQUEST\r\nVERSION:2.0\r\n");
    doc.push_str(PACIFIC_ZONE);
    doc.push_str("BEGIN:VEVENT\r\n");
    doc.push_str(&format!("DTSTART;TZID={PACIFIC}:{dtstart}\r\n"));
    for line in extra {
        doc.push_str(line);
        doc.push_str("\r\n");
    }
    doc.push_str("END:VEVENT\r\nEND:VCALENDAR\r\n");
    doc
}

/// The full Exchange-style invitation: organizer, one attendee, a folded
/// description, vendor keys and a reminder.
#[must_use]
pub fn pacific_invitation() -> String {
    pacific_event(
        "20290303T060000",
        &[
            "ORGANIZER;CN=John Smith:mailto:john.smith@foo.com",
            "ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=NEEDS-ACTION;RSVP=TRUE;CN=Jane Doe:mailto:jane.doe@bar.com",
            "DESCRIPTION;LANGUAGE=en-US:Agenda: budget\\, hiring\\nand the roadmap for the next two",
            "  quarters.",
            "SUMMARY;LANGUAGE=en-US:Quarterly planning",
            "DTEND;TZID=Pacific Standard Time:20290303T070000",
            "UID:040000008200E00074C5B7101A82E00800000000",
            "DTSTAMP:20290215T181516Z",
            "X-MICROSOFT-CDO-BUSYSTATUS:TENTATIVE",
            "X-MS-OLK-CONFTYPE:0",
            "BEGIN:VALARM",
            "DESCRIPTION:REMINDER",
            "TRIGGER;RELATED=START:-PT15M",
            "ACTION:DISPLAY",
            "END:VALARM",
        ],
    )
}
