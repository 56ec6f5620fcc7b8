//! Diagnostic sink for conditions met while decoding.
//!
//! Fatal and non-fatal conditions are both reported here; only fatal ones
//! change control flow (the decode call returns an error).

use std::fmt;

/// Severity of a reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Receiver of `(severity, message)` pairs produced during a decode.
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, message: &str);
}

/// Forwards every diagnostic to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: "kalends::diagnostic", "{message}"),
            Severity::Info => tracing::info!(target: "kalends::diagnostic", "{message}"),
            Severity::Warning => tracing::warn!(target: "kalends::diagnostic", "{message}"),
            Severity::Error => tracing::error!(target: "kalends::diagnostic", "{message}"),
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, severity: Severity, message: &str) {
        self.push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Severity::Warning, "first");
        sink.report(Severity::Debug, "second");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].severity, Severity::Warning);
        assert_eq!(sink[1].message, "second");
    }

    #[test_log::test]
    fn tracing_sink_accepts_every_severity() {
        let mut sink = TracingSink;
        for severity in [
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ] {
            sink.report(severity, "diagnostic");
        }
    }

    #[test]
    fn severity_orders_by_gravity() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Info > Severity::Debug);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
