//! Sample invitations as written by common mail clients.

/// Meeting request in Pacific time with one reminder.
pub const PACIFIC_INVITATION: &str = "BEGIN:VCALENDAR\r
METHOD:REQUEST\r
PRODID:Microsoft Exchange Server 2010\r
VERSION:2.0\r
BEGIN:VTIMEZONE\r
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
BEGIN:VEVENT\r
ORGANIZER;CN=John Smith:mailto:john.smith@foo.com\r
ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=NEEDS-ACTION;RSVP=TRUE;CN=Jane Doe:mailto:jane.doe@bar.com\r
DESCRIPTION;LANGUAGE=en-US:Quarterly planning. Please bring the Q1 numbers\\, \r
 the hiring plan and the roadmap.\\n\r
UID:040000008200E00074C5B7101A82E00800000000\r
SUMMARY;LANGUAGE=en-US:Quarterly planning\r
DTSTART;TZID=Pacific Standard Time:20290303T060000\r
DTEND;TZID=Pacific Standard Time:20290303T070000\r
CLASS:PUBLIC\r
PRIORITY:5\r
DTSTAMP:20290215T181516Z\r
TRANSP:OPAQUE\r
STATUS:CONFIRMED\r
SEQUENCE:0\r
LOCATION;LANGUAGE=en-US:Building 4\r
X-MICROSOFT-CDO-APPT-SEQUENCE:0\r
X-MICROSOFT-CDO-BUSYSTATUS:TENTATIVE\r
X-MICROSOFT-CDO-IMPORTANCE:1\r
X-MICROSOFT-DISALLOW-COUNTER:FALSE\r
BEGIN:VALARM\r
DESCRIPTION:REMINDER\r
TRIGGER;RELATED=START:-PT15M\r
ACTION:DISPLAY\r
END:VALARM\r
END:VEVENT\r
END:VCALENDAR\r
";

/// Same meeting in July, inside the daylight window, with the zone declared after the event.
pub const PACIFIC_SUMMER_ZONE_LAST: &str = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
UID:summer\n\
DTSTART;TZID=Pacific Standard Time:20290704T093000\n\
DTEND;TZID=Pacific Standard Time:20290704T103000\n\
END:VEVENT\n\
BEGIN:VTIMEZONE\n\
TZID:Pacific Standard Time\n\
BEGIN:STANDARD\n\
DTSTART:16010101T020000\n\
TZOFFSETFROM:-0700\n\
TZOFFSETTO:-0800\n\
RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=1SU;BYMONTH=11\n\
END:STANDARD\n\
BEGIN:DAYLIGHT\n\
DTSTART:16010101T020000\n\
TZOFFSETFROM:-0800\n\
TZOFFSETTO:-0700\n\
RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=2SU;BYMONTH=3\n\
END:DAYLIGHT\n\
END:VTIMEZONE\n\
END:VCALENDAR\n";
