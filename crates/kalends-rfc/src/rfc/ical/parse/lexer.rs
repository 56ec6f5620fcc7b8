//! Content line lexer.
//!
//! Handles line unfolding and the command/parameter split of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Primary command separator.
const PRIMARY_SEPARATOR: char = ':';
/// Fallback separator, used by producers that write `ATTENDEE;...`,
/// `ORGANIZER;...` or `TRIGGER;...` with parameters before the value.
const SECONDARY_SEPARATOR: char = ';';

/// Splits input into logical content lines, merging folded continuations.
///
/// Lines are split on CRLF, LF or a lone CR. A line beginning with
/// a single space is a continuation: that one space is removed and the rest is
/// appended to the previous logical line. Empty lines are kept so the block
/// parser can address every logical line by index.
///
/// ## Errors
/// Returns `LeadingContinuation` if a continuation appears before any
/// logical line exists.
pub fn unfold(input: &str) -> ParseResult<Vec<String>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines: Vec<String> = Vec::new();

    let physical = input.split("\r\n").flat_map(|chunk| chunk.split(['\n', '\r']));
    for (i, line) in physical.enumerate() {
        if let Some(continuation) = line.strip_prefix(' ') {
            let Some(prev) = lines.last_mut() else {
                return Err(ParseError::new(ParseErrorKind::LeadingContinuation, i + 1)
                    .with_context("nothing to continue"));
            };
            prev.push_str(continuation);
        } else {
            lines.push(line.to_string());
        }
    }

    // A terminating line break leaves one empty trailing element.
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    Ok(lines)
}

/// Splits a content line into its command name and parameter string.
///
/// The colon separator is tried first, then the semicolon. Returns `None`
/// if the line cannot be split with either.
#[must_use]
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    split_at_separator(line, PRIMARY_SEPARATOR)
        .or_else(|| split_at_separator(line, SECONDARY_SEPARATOR))
}

/// Splits at `separator` when it directly follows a non-empty command name.
fn split_at_separator(line: &str, separator: char) -> Option<(&str, &str)> {
    let name_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(line.len());

    if name_end == 0 {
        return None;
    }

    line[name_end..]
        .strip_prefix(separator)
        .map(|param| (&line[..name_end], param))
}
