//! The single timezone a document declares (`VTIMEZONE`).

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Which half of the yearly cycle a period describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Standard,
    Daylight,
}

impl PeriodKind {
    /// Block tag of this period.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A `STANDARD` or `DAYLIGHT` period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Period {
    pub(crate) name: Option<String>,
    pub(crate) epoch_start: Option<NaiveDateTime>,
    pub(crate) offset_from: Option<i32>,
    pub(crate) offset_to: Option<i32>,
    pub(crate) rule: Option<String>,
}

impl Period {
    /// Period name (`TZNAME`).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Local date-time at which the period was first observed.
    #[must_use]
    pub const fn epoch_start(&self) -> Option<NaiveDateTime> {
        self.epoch_start
    }

    /// Offset in minutes before the transition.
    #[must_use]
    pub const fn offset_from(&self) -> Option<i32> {
        self.offset_from
    }

    /// Offset in minutes after the transition.
    #[must_use]
    pub const fn offset_to(&self) -> Option<i32> {
        self.offset_to
    }

    /// Recurrence descriptor, verbatim.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Timezone {
    pub(crate) name: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) standard: Period,
    pub(crate) daylight: Period,
}

impl Timezone {
    /// Zone name (`TZID`), which event timestamps refer to.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Location hint (`X-LIC-LOCATION`).
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub const fn standard(&self) -> &Period {
        &self.standard
    }

    #[must_use]
    pub const fn daylight(&self) -> &Period {
        &self.daylight
    }

    #[must_use]
    pub const fn period(&self, kind: PeriodKind) -> &Period {
        match kind {
            PeriodKind::Standard => &self.standard,
            PeriodKind::Daylight => &self.daylight,
        }
    }

    pub(crate) fn period_mut(&mut self, kind: PeriodKind) -> &mut Period {
        match kind {
            PeriodKind::Standard => &mut self.standard,
            PeriodKind::Daylight => &mut self.daylight,
        }
    }
}
