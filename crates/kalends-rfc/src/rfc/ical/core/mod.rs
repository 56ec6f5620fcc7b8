//! Decoded model types.
//!
//! Every category keeps its known keys as named fields and exposes them
//! through a key enum (`EntryKey`, `PersonKey`, `AlarmKey`). Vendor
//! extension commands land in typed or string-keyed side maps.

mod alarm;
mod datetime;
mod entry;
mod person;
mod timezone;

pub use alarm::{Alarm, AlarmKey};
pub use datetime::{BASIC_FORMAT, DateTimeDetail, TimestampField};
pub use entry::{ConversionFailure, Entry, EntryKey, LocalizedText, VendorKey};
pub use person::{ORGANIZER_ROLE, Person, PersonKey};
pub use timezone::{Period, PeriodKind, Timezone};
