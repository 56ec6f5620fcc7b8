//! Vendor-flavored iCalendar (RFC 5545) decoding.
//!
//! - `parse`: line unfolding, field decoders and the block parser
//! - `expand`: yearly DST rules and UTC normalization
//! - `core`: the decoded [`Entry`] and its parts
//! - `diagnostics`: where non-fatal conditions are reported

pub mod core;
pub mod diagnostics;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use self::core::Entry;
pub use parse::{DecodeOptions, decode, decode_with};
