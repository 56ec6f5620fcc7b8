//! Yearly daylight-saving transition rules.
//!
//! Only the shape used by single-zone invitations is interpreted:
//! `FREQ=YEARLY`, `INTERVAL=1` (or absent), one `BYMONTH` and one
//! Sunday-anchored `BYDAY` ordinal.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use super::ConversionError;

/// A parsed `FREQ=YEARLY;BYMONTH=m;BYDAY=nSU` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyRule {
    /// Month of the transition, 1-12.
    pub month: u32,
    /// Sunday ordinal: positive counts from the start of the month, negative from the end.
    pub ordinal: i32,
}

impl YearlyRule {
    /// ## Summary
    /// Parses a `;`-joined `KEY=VALUE` recurrence descriptor.
    ///
    /// Keys other than `FREQ`, `INTERVAL`, `BYMONTH` and `BYDAY` are ignored.
    ///
    /// ## Errors
    /// Returns `RecurrenceUnsupported` if the frequency is not yearly, the
    /// interval is not 1, `BYMONTH` or `BYDAY` is missing or malformed, or
    /// the weekday is not Sunday.
    pub fn parse(descriptor: &str) -> Result<Self, ConversionError> {
        let unsupported = |why: &str| ConversionError::RecurrenceUnsupported(format!("{why}: {descriptor}"));

        let parts: HashMap<String, &str> = descriptor
            .split(';')
            .filter_map(|part| part.split_once('='))
            .map(|(key, value)| (key.trim().to_ascii_uppercase(), value.trim()))
            .collect();

        if !parts
            .get("FREQ")
            .is_some_and(|freq| freq.eq_ignore_ascii_case("YEARLY"))
        {
            return Err(unsupported("frequency must be YEARLY"));
        }

        if let Some(interval) = parts.get("INTERVAL")
            && interval.parse::<u32>().ok() != Some(1)
        {
            return Err(unsupported("interval must be 1"));
        }

        let month = parts
            .get("BYMONTH")
            .and_then(|m| m.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| unsupported("BYMONTH must be a single month"))?;

        let byday = parts
            .get("BYDAY")
            .ok_or_else(|| unsupported("BYDAY is required"))?;
        let ordinal = parse_sunday_ordinal(byday).ok_or_else(|| unsupported("BYDAY must be <n>SU"))?;

        Ok(Self { month, ordinal })
    }

    /// ## Summary
    /// Date of this rule's transition in `year`.
    ///
    /// Positive ordinals start at the first Sunday of the month and advance
    /// `n - 1` weeks; negative ones start at the last Sunday and step back
    /// `|n| - 1` weeks. The week arithmetic is not clamped to the month.
    ///
    /// ## Errors
    /// Returns `RecurrenceUnsupported` if the date leaves chrono's range.
    pub fn transition_date(self, year: i32) -> Result<NaiveDate, ConversionError> {
        let out_of_range = || {
            ConversionError::RecurrenceUnsupported(format!(
                "transition for month {} in {year} is out of range",
                self.month
            ))
        };
        let extra_weeks = Days::new(7 * u64::from(self.ordinal.unsigned_abs() - 1));

        if self.ordinal > 0 {
            let first = NaiveDate::from_ymd_opt(year, self.month, 1).ok_or_else(out_of_range)?;
            let to_sunday = (7 - first.weekday().num_days_from_sunday()) % 7;
            first
                .checked_add_days(Days::new(u64::from(to_sunday)))
                .and_then(|sunday| sunday.checked_add_days(extra_weeks))
                .ok_or_else(out_of_range)
        } else {
            let last = last_day_of_month(year, self.month).ok_or_else(out_of_range)?;
            let from_sunday = last.weekday().num_days_from_sunday();
            last.checked_sub_days(Days::new(u64::from(from_sunday)))
                .and_then(|sunday| sunday.checked_sub_days(extra_weeks))
                .ok_or_else(out_of_range)
        }
    }
}

/// ## Summary
/// Computes the transition date a descriptor yields in `year`.
///
/// ## Errors
/// Returns `RecurrenceUnsupported` if the descriptor is not a supported yearly rule.
pub fn transition_date(descriptor: &str, year: i32) -> Result<NaiveDate, ConversionError> {
    YearlyRule::parse(descriptor)?.transition_date(year)
}

/// Parses `<signed-int>SU`, e.g. `2SU`, `-1SU`, `+1SU`. Zero is rejected.
fn parse_sunday_ordinal(byday: &str) -> Option<i32> {
    let split = byday.len().checked_sub(2)?;
    let (count, weekday) = byday.split_at_checked(split)?;
    if !weekday.eq_ignore_ascii_case("SU") {
        return None;
    }
    let count = count.strip_prefix('+').unwrap_or(count);
    let ordinal: i32 = count.parse().ok()?;
    (ordinal != 0).then_some(ordinal)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parse_us_daylight_rule() {
        let rule = YearlyRule::parse("FREQ=YEARLY;INTERVAL=1;BYDAY=2SU;BYMONTH=3").unwrap();
        assert_eq!(rule, YearlyRule { month: 3, ordinal: 2 });
    }

    #[test]
    fn parse_without_interval() {
        let rule = YearlyRule::parse("FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU").unwrap();
        assert_eq!(rule.ordinal, -1);
    }

    #[test]
    fn second_sunday_of_march_2029() {
        assert_eq!(
            transition_date("FREQ=YEARLY;INTERVAL=1;BYDAY=2SU;BYMONTH=3", 2029).unwrap(),
            date(2029, 3, 11)
        );
    }

    #[test]
    fn first_sunday_is_the_first_of_the_month() {
        // 2026-11-01 is a Sunday.
        assert_eq!(
            transition_date("FREQ=YEARLY;INTERVAL=1;BYDAY=1SU;BYMONTH=11", 2026).unwrap(),
            date(2026, 11, 1)
        );
    }

    #[test]
    fn last_sunday_before_month_end() {
        // 2029-03-31 is a Saturday.
        assert_eq!(
            transition_date("FREQ=YEARLY;INTERVAL=1;BYDAY=-1SU;BYMONTH=3", 2029).unwrap(),
            date(2029, 3, 25)
        );
    }

    #[test]
    fn last_sunday_on_month_end() {
        // 2024-03-31 is a Sunday.
        assert_eq!(
            transition_date("FREQ=YEARLY;BYDAY=-1SU;BYMONTH=3", 2024).unwrap(),
            date(2024, 3, 31)
        );
    }

    #[test]
    fn second_to_last_sunday_of_december() {
        assert_eq!(
            transition_date("FREQ=YEARLY;BYDAY=-2SU;BYMONTH=12", 2026).unwrap(),
            date(2026, 12, 20)
        );
    }

    #[test]
    fn week_arithmetic_is_not_clamped() {
        // February 2026 has four Sundays; the fifth lands in March.
        assert_eq!(
            transition_date("FREQ=YEARLY;BYDAY=5SU;BYMONTH=2", 2026).unwrap(),
            date(2026, 3, 1)
        );
    }

    #[test]
    fn rejects_unsupported_rules() {
        for descriptor in [
            "FREQ=MONTHLY;BYDAY=1SU;BYMONTH=3",
            "FREQ=YEARLY;INTERVAL=2;BYDAY=1SU;BYMONTH=3",
            "FREQ=YEARLY;BYDAY=1MO;BYMONTH=3",
            "FREQ=YEARLY;BYDAY=SU;BYMONTH=3",
            "FREQ=YEARLY;BYDAY=0SU;BYMONTH=3",
            "FREQ=YEARLY;BYDAY=1SU",
            "FREQ=YEARLY;BYDAY=1SU;BYMONTH=13",
            "FREQ=YEARLY;BYMONTH=3",
            "",
        ] {
            let err = YearlyRule::parse(descriptor).unwrap_err();
            assert!(
                matches!(err, ConversionError::RecurrenceUnsupported(_)),
                "{descriptor:?} gave {err:?}"
            );
        }
    }
}
