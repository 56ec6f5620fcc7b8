use thiserror::Error;

use crate::rfc::ical::expand::ConversionError;
use crate::rfc::ical::parse::ParseError;

/// Umbrella error for callers that mix decoding with other workspace operations.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Timezone conversion error: {0}")]
    ConversionError(#[from] ConversionError),

    #[error(transparent)]
    CoreError(#[from] kalends_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::parse::{ParseErrorKind, decode};

    #[test]
    fn parse_errors_convert() {
        let err: RfcError = decode("").unwrap_err().into();
        assert!(matches!(
            err,
            RfcError::ParseError(ParseError {
                kind: ParseErrorKind::EmptyInput,
                ..
            })
        ));
        assert_eq!(err.to_string(), "Parse error: empty input at line 1");
    }

    #[test]
    fn conversion_errors_convert() {
        let err: RfcError = ConversionError::UnknownTimezone("Mars/Olympus".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Timezone conversion error: Unknown timezone: Mars/Olympus"
        );
    }
}
