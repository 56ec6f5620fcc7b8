//! Date-time detail for start, end and the entry timestamps.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Basic iCalendar date-time layout, `yyyyMMddThhmmss`.
pub const BASIC_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A timestamp as written in the document plus its UTC normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeDetail {
    tzid: Option<String>,
    local: NaiveDateTime,
    utc_marker: bool,
    utc: Option<DateTime<Utc>>,
}

impl DateTimeDetail {
    /// Creates a detail for a value written in the named timezone.
    #[must_use]
    pub fn zoned(tzid: impl Into<String>, local: NaiveDateTime) -> Self {
        Self {
            tzid: Some(tzid.into()),
            local,
            utc_marker: false,
            utc: None,
        }
    }

    /// Creates a detail for a value without a timezone parameter.
    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self {
            tzid: None,
            local,
            utc_marker: false,
            utc: None,
        }
    }

    /// Marks the value as carrying the trailing `Z`.
    #[must_use]
    pub const fn with_utc_marker(mut self, marker: bool) -> Self {
        self.utc_marker = marker;
        self
    }

    pub(crate) fn set_utc(&mut self, utc: DateTime<Utc>) {
        self.utc = Some(utc);
    }

    /// Original timezone name, if the value carried one.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.tzid.as_deref()
    }

    /// Local date-time exactly as written.
    #[must_use]
    pub const fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Whether the written value ended in `Z`.
    #[must_use]
    pub const fn has_utc_marker(&self) -> bool {
        self.utc_marker
    }

    /// UTC value, absent until the finishing pass or if conversion failed.
    #[must_use]
    pub const fn utc(&self) -> Option<DateTime<Utc>> {
        self.utc
    }

    /// Local value in basic format, with `Z` if it was written with one.
    #[must_use]
    pub fn local_basic(&self) -> String {
        let mut out = self.local.format(BASIC_FORMAT).to_string();
        if self.utc_marker {
            out.push('Z');
        }
        out
    }

    /// UTC value in basic format with a trailing `Z`.
    #[must_use]
    pub fn utc_basic(&self) -> Option<String> {
        self.utc
            .map(|utc| format!("{}Z", utc.naive_utc().format(BASIC_FORMAT)))
    }
}

impl fmt::Display for DateTimeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tzid) = &self.tzid {
            write!(f, "TZID={tzid}:")?;
        }
        f.write_str(&self.local_basic())
    }
}

/// Which stored timestamp a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampField {
    Created,
    Modified,
    Sent,
    Start,
    End,
}

impl TimestampField {
    pub const ALL: [Self; 5] = [
        Self::Created,
        Self::Modified,
        Self::Sent,
        Self::Start,
        Self::End,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Modified => "LAST-MODIFIED",
            Self::Sent => "DTSTAMP",
            Self::Start => "DTSTART",
            Self::End => "DTEND",
        }
    }
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
