//! Decoder for vendor-flavored iCalendar invitations.
//!
//! Recovers event, timezone, participant and alarm information from the
//! RFC 5545 dialect emitted by common mail and calendar systems, and
//! normalizes every timestamp to UTC using the document's own daylight
//! saving rules.

pub mod error;
pub mod rfc;

pub use rfc::ical::{DecodeOptions, Entry, decode, decode_with};
