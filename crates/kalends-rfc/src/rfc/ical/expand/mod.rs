//! Timezone rule engine: yearly transition dates and UTC normalization.

mod rule;
mod timezone;

pub use rule::{YearlyRule, transition_date};
pub use timezone::{
    ConversionError, IanaRegistry, NoRegistry, TimezoneRegistry, convert_local_to_utc,
    normalize_timestamps,
};
