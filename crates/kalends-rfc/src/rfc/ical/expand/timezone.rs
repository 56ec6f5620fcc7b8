//! Local-to-UTC conversion against the document's declared timezone.
//!
//! The declared `VTIMEZONE` is the only zone interpreted directly. Names it
//! does not cover go to an injected [`TimezoneRegistry`]; the default
//! registry resolves nothing.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use serde::Serialize;

use super::rule::YearlyRule;
use crate::rfc::ical::core::{ConversionFailure, Entry, PeriodKind, TimestampField, Timezone};
use crate::rfc::ical::diagnostics::{DiagnosticSink, Severity};

/// Error during timezone conversion. Only the affected field loses its UTC value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ConversionError {
    /// The timestamp names a zone the document does not declare and the registry does not know.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The recurrence descriptor is not a yearly, interval-1, Sunday-anchored rule.
    #[error("Unsupported recurrence: {0}")]
    RecurrenceUnsupported(String),

    /// A period lacks the rule or offset the conversion needs.
    #[error("Incomplete {0} period")]
    IncompletePeriod(PeriodKind),

    /// Applying the offset leaves the representable range.
    #[error("Date-time out of range: {0}")]
    OutOfRange(NaiveDateTime),
}

/// Resolves zone names the document itself does not declare.
pub trait TimezoneRegistry: Send + Sync {
    /// Converts `local`, read as wall time in `name`, to UTC. `None` if the name is unknown.
    fn to_utc(&self, local: NaiveDateTime, name: &str) -> Option<DateTime<Utc>>;
}

/// Registry that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl TimezoneRegistry for NoRegistry {
    fn to_utc(&self, _local: NaiveDateTime, _name: &str) -> Option<DateTime<Utc>> {
        None
    }
}

/// Registry backed by the IANA database.
///
/// Windows zone names ("Pacific Standard Time") and IANA aliases are mapped
/// to canonical IANA identifiers with ICU4X before lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaRegistry;

impl IanaRegistry {
    /// ## Summary
    /// Resolves a zone name to a `chrono_tz::Tz`.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Tz> {
        let normalized = normalize_zone_name(name);
        let resolved = Tz::from_str(&normalized).ok();
        if resolved.is_none() {
            tracing::debug!(name, %normalized, "Zone name not in IANA database");
        }
        resolved
    }
}

impl TimezoneRegistry for IanaRegistry {
    fn to_utc(&self, local: NaiveDateTime, name: &str) -> Option<DateTime<Utc>> {
        let tz = Self::resolve(name)?;
        // Folds take the first occurrence; gaps do not resolve.
        tz.from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Maps Windows names and IANA aliases to canonical IANA names; unknown names pass through.
fn normalize_zone_name(name: &str) -> String {
    let stripped = name
        .strip_prefix("/mozilla.org/")
        .or_else(|| name.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(name);

    let iana_parser = IanaParserExtended::new();

    if let Some(tz) = WindowsParser::new().parse(stripped, None)
        && let Some(entry) = iana_parser.iter().find(|entry| entry.time_zone == tz)
    {
        return entry.canonical.to_string();
    }

    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a local timestamp to UTC.
///
/// - No zone name, no declared `timezone`, or a declared zone without a
///   daylight rule: the value is already UTC.
/// - A name the declared `timezone` does not carry: the registry is asked,
///   then `UnknownTimezone`.
/// - Otherwise the daylight window `[dst_start, dst_end)` of the local
///   value's year selects which period's offset-to is subtracted. Both
///   bounds take their time of day from the daylight epoch start.
///
/// ## Errors
/// Returns `UnknownTimezone`, `RecurrenceUnsupported` for a rule outside the
/// supported shape, `IncompletePeriod` when the selected period lacks an
/// offset or the standard rule is missing, or `OutOfRange`.
pub fn convert_local_to_utc(
    local: NaiveDateTime,
    tzid: Option<&str>,
    timezone: Option<&Timezone>,
    registry: &dyn TimezoneRegistry,
) -> Result<DateTime<Utc>, ConversionError> {
    let Some(name) = tzid.filter(|name| !name.is_empty()) else {
        return Ok(local.and_utc());
    };
    let Some((timezone, daylight_rule)) =
        timezone.and_then(|tz| tz.daylight().rule().map(|rule| (tz, rule)))
    else {
        return Ok(local.and_utc());
    };

    if timezone.name() != Some(name) {
        return registry
            .to_utc(local, name)
            .ok_or_else(|| ConversionError::UnknownTimezone(name.to_string()));
    }

    let daylight = timezone.daylight();
    let standard_rule = timezone
        .standard()
        .rule()
        .ok_or(ConversionError::IncompletePeriod(PeriodKind::Standard))?;

    let year = local.year();
    let time_of_day: NaiveTime = daylight
        .epoch_start()
        .map(|epoch| epoch.time())
        .unwrap_or_default();
    let dst_start = YearlyRule::parse(daylight_rule)?
        .transition_date(year)?
        .and_time(time_of_day);
    let dst_end = YearlyRule::parse(standard_rule)?
        .transition_date(year)?
        .and_time(time_of_day);

    let kind = if dst_start <= local && local < dst_end {
        PeriodKind::Daylight
    } else {
        PeriodKind::Standard
    };
    let offset = timezone
        .period(kind)
        .offset_to()
        .ok_or(ConversionError::IncompletePeriod(kind))?;

    tracing::trace!(%local, %dst_start, %dst_end, %kind, offset, "Selected period");

    local
        .checked_sub_signed(TimeDelta::minutes(i64::from(offset)))
        .map(|utc| utc.and_utc())
        .ok_or(ConversionError::OutOfRange(local))
}

/// ## Summary
/// Fills in the UTC value of every stored timestamp.
///
/// Runs once after parsing so that periods declared after the events they
/// govern still apply. A trailing `Z` does not bypass a zone name.
/// Failures are recorded on the entry and reported at `Error`.
pub fn normalize_timestamps(
    entry: &mut Entry,
    registry: &dyn TimezoneRegistry,
    sink: &mut dyn DiagnosticSink,
) {
    let timezone = entry.timezone.clone();
    let mut failures = Vec::new();

    for field in TimestampField::ALL {
        let Some(detail) = entry.timestamp_mut(field) else {
            continue;
        };

        match convert_local_to_utc(detail.local(), detail.tzid(), timezone.as_ref(), registry) {
            Ok(utc) => detail.set_utc(utc),
            Err(error) => {
                sink.report(
                    Severity::Error,
                    &format!("{field}: UTC conversion failed: {error}"),
                );
                failures.push(ConversionFailure { field, error });
            }
        }
    }

    entry.conversion_failures.extend(failures);
}
