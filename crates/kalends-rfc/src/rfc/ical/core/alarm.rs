//! Alarm (`VALARM`) records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::TimeDelta;
use serde::Serialize;

/// Attribute keys of an [`Alarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlarmKey {
    Description,
    TriggerRelated,
    TriggerOffset,
    Action,
}

impl AlarmKey {
    pub const ALL: [Self; 4] = [
        Self::Description,
        Self::TriggerRelated,
        Self::TriggerOffset,
        Self::Action,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::TriggerRelated => "trigger-related",
            Self::TriggerOffset => "trigger-offset",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for AlarmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Alarm {
    pub(crate) description: Option<String>,
    pub(crate) trigger_related: Option<String>,
    pub(crate) trigger_offset: Option<String>,
    pub(crate) action: Option<String>,
}

impl Alarm {
    #[must_use]
    pub fn get(&self, key: AlarmKey) -> Option<&str> {
        match key {
            AlarmKey::Description => self.description.as_deref(),
            AlarmKey::TriggerRelated => self.trigger_related.as_deref(),
            AlarmKey::TriggerOffset => self.trigger_offset.as_deref(),
            AlarmKey::Action => self.action.as_deref(),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> BTreeMap<AlarmKey, String> {
        AlarmKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value.to_string())))
            .collect()
    }

    /// ## Summary
    /// Signed offset of the alarm relative to its anchor.
    ///
    /// The stored offset is the `H`/`M`/`S` tail of `-PT...`, so the result is
    /// always negative (the alarm fires before the anchor). Returns `None`
    /// when no trigger was decoded.
    #[must_use]
    pub fn trigger_duration(&self) -> Option<TimeDelta> {
        let offset = self.trigger_offset.as_deref()?;
        let mut total = TimeDelta::zero();
        let mut digits = String::new();

        for c in offset.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let amount: i64 = digits.parse().ok()?;
            digits.clear();
            let part = match c {
                'H' => TimeDelta::try_hours(amount)?,
                'M' => TimeDelta::try_minutes(amount)?,
                'S' => TimeDelta::try_seconds(amount)?,
                _ => return None,
            };
            total = total.checked_add(&part)?;
        }

        digits.is_empty().then_some(-total)
    }
}
