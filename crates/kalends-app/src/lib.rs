//! Command-line front end: reads one calendar file and decodes it with the
//! configured collaborators.

use std::fs;
use std::path::Path;

use anyhow::Context;
use kalends_core::config::Settings;
use kalends_rfc::rfc::ical::diagnostics::DiagnosticSink;
use kalends_rfc::rfc::ical::expand::{IanaRegistry, NoRegistry, TimezoneRegistry};
use kalends_rfc::{DecodeOptions, Entry, decode_with};

/// Picks the registry the settings ask for.
#[must_use]
pub fn registry_for(settings: &Settings) -> &'static dyn TimezoneRegistry {
    if settings.timezone.resolve_windows_names {
        &IanaRegistry
    } else {
        &NoRegistry
    }
}

/// ## Summary
/// Reads `path` and decodes it.
///
/// ## Errors
/// Returns an error if the file cannot be read, exceeds `input.max_bytes`,
/// or fails to decode.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn decode_file(
    path: &Path,
    settings: &Settings,
    sink: &mut dyn DiagnosticSink,
) -> anyhow::Result<Entry> {
    let len = fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    settings.input.check_len(len)?;

    let input =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;

    let options = DecodeOptions {
        registry: registry_for(settings),
    };
    let entry = decode_with(&input, sink, &options)?;

    tracing::info!(
        uid = entry.uid().unwrap_or_default(),
        failures = entry.conversion_failures().len(),
        "Decoded calendar file"
    );
    Ok(entry)
}
