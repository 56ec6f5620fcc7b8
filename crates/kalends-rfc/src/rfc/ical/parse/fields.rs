//! Field decoders.
//!
//! Pure functions turning one parameter string (the part of a content line
//! after the command separator) into a structured value.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{DateTimeDetail, LocalizedText, Person, PersonKey};

const MAILTO: &str = "mailto:";
const TZID_PREFIX: &str = "TZID=";
const LANGUAGE_PREFIX: &str = "LANGUAGE=";
const RELATED_PREFIX: &str = "RELATED=";
const NEGATIVE_TIME_PREFIX: &str = "-PT";

/// Decoded participant plus the parameter names that were not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPerson {
    pub person: Person,
    pub ignored: Vec<String>,
}

/// Decodes `<attr-list>:mailto:<address>` (the attribute list may be empty).
///
/// ## Errors
/// Returns `InvalidPerson` if the `mailto:` marker or the address is missing,
/// or if an attribute is not `KEY=VALUE`.
pub fn decode_person(param: &str, line: usize) -> ParseResult<DecodedPerson> {
    let invalid = |ctx: &str| ParseError::new(ParseErrorKind::InvalidPerson, line).with_context(ctx);

    let (attrs, address) = if starts_with_ignore_case(param, MAILTO) {
        ("", &param[MAILTO.len()..])
    } else {
        let marker = rfind_ignore_case(param, ":mailto:")
            .ok_or_else(|| invalid("missing mailto: marker"))?;
        (&param[..marker], &param[marker + 1 + MAILTO.len()..])
    };

    let address = address.trim();
    if address.is_empty() {
        return Err(invalid("empty address"));
    }

    let mut person = Person::new(address);
    let mut ignored = Vec::new();

    for part in split_unquoted(attrs, ';') {
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| invalid(&format!("expected KEY=VALUE, got {part:?}")))?;
        match PersonKey::from_param(key) {
            Some(person_key) => person.set(person_key, unquote(value)),
            None => ignored.push(key.to_string()),
        }
    }

    Ok(DecodedPerson { person, ignored })
}

/// Decodes `TZID=<name>:<basic>[Z]` or a bare `<basic>[Z]`.
///
/// `<basic>` is `yyyyMMddThhmmss`; the bare form also accepts `yyyyMMddThhmm`.
///
/// ## Errors
/// Returns `InvalidDateTime` for any other shape.
pub fn decode_datetime(param: &str, line: usize) -> ParseResult<DateTimeDetail> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidDateTime, line).with_context(param.to_string())
    };

    if let Some(rest) = param.strip_prefix(TZID_PREFIX) {
        let (name, value) = rest.rsplit_once(':').ok_or_else(invalid)?;
        let name = unquote(name);
        if name.is_empty() {
            return Err(invalid());
        }
        let (value, utc) = strip_utc_marker(value);
        let local = parse_basic(value, true).ok_or_else(invalid)?;
        return Ok(DateTimeDetail::zoned(name, local).with_utc_marker(utc));
    }

    let (value, utc) = strip_utc_marker(param);
    let local = parse_basic(value, true)
        .or_else(|| parse_basic(value, false))
        .ok_or_else(invalid)?;
    Ok(DateTimeDetail::floating(local).with_utc_marker(utc))
}

/// Decodes an absolute timestamp, `yyyyMMddThhmmss[Z]`, fixed width.
///
/// ## Errors
/// Returns `InvalidTimestamp` for any other shape.
pub fn decode_timestamp(param: &str, line: usize) -> ParseResult<DateTimeDetail> {
    let (value, utc) = strip_utc_marker(param);
    let local = parse_basic(value, true).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidTimestamp, line).with_context(param.to_string())
    })?;
    Ok(DateTimeDetail::floating(local).with_utc_marker(utc))
}

/// Decodes a period epoch start, `yyyyMMddThhmmss` with no `Z`.
///
/// ## Errors
/// Returns `InvalidTimestamp` for any other shape.
pub fn decode_epoch(param: &str, line: usize) -> ParseResult<NaiveDateTime> {
    parse_basic(param, true).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidTimestamp, line).with_context(param.to_string())
    })
}

/// Decodes a signed `±HHMM` offset into signed minutes.
///
/// ## Errors
/// Returns `InvalidUtcOffset` unless the value is a sign followed by four digits.
pub fn decode_offset(param: &str, line: usize) -> ParseResult<i32> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidUtcOffset, line).with_context(param.to_string())
    };

    let (sign, digits) = match param.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(invalid()),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_e| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_e| invalid())?;
    Ok(sign * (hours * 60 + minutes))
}

/// Decodes `[LANGUAGE=<tag>:]<text>`, unescaping `\n` and `\,`. Never fails.
#[must_use]
pub fn decode_text(param: &str) -> LocalizedText {
    let (language, raw) = param
        .strip_prefix(LANGUAGE_PREFIX)
        .and_then(|rest| rest.split_once(':'))
        .unwrap_or(("", param));

    LocalizedText {
        language: language.to_string(),
        text: unescape_text(raw),
    }
}

/// Unescapes `\n` to a newline and `\,` to a comma; other sequences are kept.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') => {
                    result.push('\n');
                    chars.next();
                }
                Some(',') => {
                    result.push(',');
                    chars.next();
                }
                _ => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Decodes `RELATED=<START|END>:-PT<duration>` into (anchor, duration).
///
/// ## Errors
/// Returns `InvalidTrigger` for any other shape, including positive offsets.
pub fn decode_trigger(param: &str, line: usize) -> ParseResult<(String, String)> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidTrigger, line).with_context(param.to_string())
    };

    let (related, offset) = param.split_once(':').ok_or_else(invalid)?;
    let anchor = related.strip_prefix(RELATED_PREFIX).ok_or_else(invalid)?;
    if anchor != "START" && anchor != "END" {
        return Err(invalid());
    }

    let duration = offset.strip_prefix(NEGATIVE_TIME_PREFIX).ok_or_else(invalid)?;
    if !is_time_duration(duration) {
        return Err(invalid());
    }

    Ok((anchor.to_string(), duration.to_string()))
}

/// Checks `(<digits>(H|M|S))+`.
fn is_time_duration(s: &str) -> bool {
    let mut digits = 0usize;
    let mut units = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            'H' | 'M' | 'S' if digits > 0 => {
                digits = 0;
                units += 1;
            }
            _ => return false,
        }
    }
    digits == 0 && units > 0
}

fn strip_utc_marker(value: &str) -> (&str, bool) {
    value
        .strip_suffix('Z')
        .map_or((value, false), |stripped| (stripped, true))
}

/// Parses `yyyyMMddThhmmss` (or `yyyyMMddThhmm` when `with_seconds` is false).
fn parse_basic(value: &str, with_seconds: bool) -> Option<NaiveDateTime> {
    let expected_len = if with_seconds { 15 } else { 13 };
    let bytes = value.as_bytes();
    if bytes.len() != expected_len || bytes[8] != b'T' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 8 || b.is_ascii_digit())
    {
        return None;
    }

    let num = |range: std::ops::Range<usize>| value[range].parse::<u32>().ok();
    let year = i32::try_from(num(0..4)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, num(4..6)?, num(6..8)?)?;
    let seconds = if with_seconds { num(13..15)? } else { 0 };
    let time = NaiveTime::from_hms_opt(num(9..11)?, num(11..13)?, seconds)?;
    Some(NaiveDateTime::new(date, time))
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .rfind(&needle.to_ascii_lowercase())
}

/// Splits on `separator` outside double quotes.
fn split_unquoted(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == separator && !in_quotes {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        } else {
            // part of the current segment
        }
    }
    parts.push(&s[start..]);
    parts
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
