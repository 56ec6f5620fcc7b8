//! Decoding error types.

use std::fmt;

/// Result type for decoding operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Fatal decoding error. No aggregate is produced when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Logical line number where the error occurred (1-based).
    pub line: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns whether this is a block-structure failure rather than a field format failure.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        self.kind.is_structural()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input holds no content lines.
    EmptyInput,
    /// First physical line is a continuation with nothing to continue.
    LeadingContinuation,
    /// Expected a `BEGIN:<TAG>` line.
    MissingBegin,
    /// Input ended inside the envelope.
    MissingEnd,
    /// An `END:` line closes a block other than the open one.
    MismatchedEnd,
    /// More than one `VTIMEZONE` block.
    DuplicateTimezone,
    /// Invalid `DTSTART`/`DTEND` value.
    InvalidDateTime,
    /// Invalid absolute timestamp (`CREATED`, `LAST-MODIFIED`, `DTSTAMP`, period `DTSTART`).
    InvalidTimestamp,
    /// Invalid `±HHMM` offset.
    InvalidUtcOffset,
    /// Invalid participant or organizer value.
    InvalidPerson,
    /// Invalid alarm trigger value.
    InvalidTrigger,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::LeadingContinuation
                | Self::MissingBegin
                | Self::MissingEnd
                | Self::MismatchedEnd
                | Self::DuplicateTimezone
        )
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::LeadingContinuation => write!(f, "continuation line before any content line"),
            Self::MissingBegin => write!(f, "missing BEGIN line"),
            Self::MissingEnd => write!(f, "missing END line"),
            Self::MismatchedEnd => write!(f, "mismatched BEGIN/END"),
            Self::DuplicateTimezone => write!(f, "more than one VTIMEZONE"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::InvalidTimestamp => write!(f, "invalid timestamp format"),
            Self::InvalidUtcOffset => write!(f, "invalid UTC offset format"),
            Self::InvalidPerson => write!(f, "invalid participant format"),
            Self::InvalidTrigger => write!(f, "invalid alarm trigger format"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
