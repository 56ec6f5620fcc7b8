//! Calendar document parser.
//!
//! Walks the `BEGIN`/`END` block structure of unfolded content lines. Each
//! block kind owns a command table; a block function returns the index of
//! the `END` line it consumed so the caller resumes right after it.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::fields::{
    decode_datetime, decode_epoch, decode_offset, decode_person, decode_text, decode_timestamp,
    decode_trigger, unescape_text,
};
use super::lexer::{split_command, unfold};
use crate::rfc::ical::core::{Alarm, Entry, Period, PeriodKind, Person, Timezone, VendorKey};
use crate::rfc::ical::diagnostics::{DiagnosticSink, Severity, TracingSink};
use crate::rfc::ical::expand::{NoRegistry, TimezoneRegistry, normalize_timestamps};

const CALENDAR: &str = "VCALENDAR";
const TIMEZONE: &str = "VTIMEZONE";
const EVENT: &str = "VEVENT";
const ALARM: &str = "VALARM";

/// Collaborators injected into a decode call.
#[derive(Clone, Copy)]
pub struct DecodeOptions<'r> {
    /// Consulted for zone names the document does not declare.
    pub registry: &'r dyn TimezoneRegistry,
}

impl Default for DecodeOptions<'static> {
    fn default() -> Self {
        Self {
            registry: &NoRegistry,
        }
    }
}

impl std::fmt::Debug for DecodeOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeOptions").finish_non_exhaustive()
    }
}

/// ## Summary
/// Decodes a calendar document, reporting diagnostics to `tracing`.
///
/// ## Errors
/// See [`decode_with`].
pub fn decode(input: &str) -> ParseResult<Entry> {
    decode_with(input, &mut TracingSink, &DecodeOptions::default())
}

/// ## Summary
/// Decodes a calendar document into an [`Entry`].
///
/// Unfolds the input, walks the block structure, then converts every stored
/// timestamp to UTC. Non-fatal conditions and the fatal error, if any, are
/// reported to `sink`.
///
/// ## Errors
/// Returns a structural error (bad nesting, missing envelope, leading
/// continuation, second `VTIMEZONE`) or a field error from a timestamp,
/// period epoch or offset. No entry is produced in that case.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn decode_with(
    input: &str,
    sink: &mut dyn DiagnosticSink,
    options: &DecodeOptions<'_>,
) -> ParseResult<Entry> {
    tracing::debug!("Decoding calendar document");

    let parsed = unfold(input).and_then(|lines| {
        tracing::trace!(count = lines.len(), "Unfolded lines");
        Decoder::new(&lines, &mut *sink).parse_calendar()
    });

    match parsed {
        Ok(mut entry) => {
            normalize_timestamps(&mut entry, options.registry, sink);
            tracing::debug!(
                participants = entry.participants().len(),
                alarms = entry.alarms().len(),
                "Calendar document decoded"
            );
            Ok(entry)
        }
        Err(err) => {
            sink.report(Severity::Error, &err.to_string());
            Err(err)
        }
    }
}

/// How a block walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEnd {
    /// The matching `END` line was consumed at this index.
    Closed(usize),
    /// Input ran out before the matching `END`.
    Exhausted,
}

/// The line being dispatched to a field handler.
struct FieldCtx<'a> {
    param: &'a str,
    /// 1-based logical line number.
    line: usize,
    sink: &'a mut dyn DiagnosticSink,
}

impl FieldCtx<'_> {
    fn value(&self) -> String {
        self.param.to_string()
    }

    /// Reports a field error that does not abort the decode.
    fn recover(&mut self, err: &ParseError) {
        self.sink
            .report(Severity::Error, &format!("{err}; line skipped"));
    }
}

type Handler<T> = fn(&mut T, &mut FieldCtx<'_>) -> ParseResult<()>;
type Unrecognized<T> = fn(&mut T, &str, &mut FieldCtx<'_>);
type Nested<T> = fn(&mut Decoder<'_, '_>, &str, usize, &mut T) -> ParseResult<Option<BlockEnd>>;

/// Behavior of one block kind.
struct BlockSpec<T: 'static> {
    handlers: &'static HashMap<&'static str, Handler<T>>,
    /// Opens a nested block; `None` if the tag is not expected here.
    nested: Nested<T>,
    unrecognized: Unrecognized<T>,
}

struct Decoder<'l, 's> {
    lines: &'l [String],
    sink: &'s mut dyn DiagnosticSink,
}

impl<'l, 's> Decoder<'l, 's> {
    fn new(lines: &'l [String], sink: &'s mut dyn DiagnosticSink) -> Self {
        Self { lines, sink }
    }

    fn parse_calendar(&mut self) -> ParseResult<Entry> {
        let Some(begin) = self.lines.iter().position(|line| !line.is_empty()) else {
            return Err(ParseError::new(ParseErrorKind::EmptyInput, 1));
        };

        let mut entry = Entry::default();
        let spec = BlockSpec {
            handlers: calendar_handlers(),
            nested: open_in_calendar,
            unrecognized: capture_extension,
        };

        match self.parse_block(CALENDAR, begin, &mut entry, &spec)? {
            BlockEnd::Closed(end) => {
                if self.lines[end + 1..].iter().any(|line| !line.is_empty()) {
                    self.sink.report(
                        Severity::Warning,
                        &format!("content after END:{CALENDAR} at line {} ignored", end + 2),
                    );
                }
                Ok(entry)
            }
            BlockEnd::Exhausted => Err(ParseError::new(ParseErrorKind::MissingEnd, self.lines.len())
                .with_context(format!("missing END:{CALENDAR}"))),
        }
    }

    /// ## Summary
    /// Walks one block starting at its `BEGIN` line.
    ///
    /// Empty lines are skipped. Lines that cannot be split and commands the
    /// block has no handler for are reported and skipped. A nested `BEGIN`
    /// recurses; if the nested block runs out of input, so does this one.
    ///
    /// ## Errors
    /// Returns `MissingBegin` if `begin` is not `BEGIN:<tag>`, `MismatchedEnd`
    /// for an `END` naming another block, and any fatal handler error.
    fn parse_block<T: 'static>(
        &mut self,
        tag: &str,
        begin: usize,
        target: &mut T,
        spec: &BlockSpec<T>,
    ) -> ParseResult<BlockEnd> {
        self.expect_begin(tag, begin)?;
        tracing::trace!(tag, line = begin + 1, "Entering block");

        let lines = self.lines;
        let mut cursor = begin + 1;
        while let Some(line) = lines.get(cursor) {
            let line_no = cursor + 1;

            if line.is_empty() {
                cursor += 1;
                continue;
            }

            let Some((command, param)) = split_command(line) else {
                self.sink.report(
                    Severity::Warning,
                    &format!("line {line_no}: cannot split {line:?} into command and value, skipped"),
                );
                cursor += 1;
                continue;
            };
            let command = command.to_ascii_uppercase();

            match command.as_str() {
                "END" => {
                    let closing = param.trim().to_ascii_uppercase();
                    if closing != tag {
                        return Err(ParseError::new(ParseErrorKind::MismatchedEnd, line_no)
                            .with_context(format!("expected END:{tag}, got END:{closing}")));
                    }
                    return Ok(BlockEnd::Closed(cursor));
                }
                "BEGIN" => {
                    let nested_tag = param.trim().to_ascii_uppercase();
                    let end = match (spec.nested)(self, &nested_tag, cursor, target)? {
                        Some(end) => end,
                        None => {
                            self.sink.report(
                                Severity::Warning,
                                &format!("line {line_no}: unsupported block {nested_tag} in {tag}, skipped"),
                            );
                            self.skip_block(&nested_tag, cursor)
                        }
                    };
                    match end {
                        BlockEnd::Closed(end) => cursor = end + 1,
                        BlockEnd::Exhausted => return Ok(BlockEnd::Exhausted),
                    }
                    continue;
                }
                _ => {}
            }

            let mut ctx = FieldCtx {
                param,
                line: line_no,
                sink: &mut *self.sink,
            };
            if let Some(handler) = spec.handlers.get(command.as_str()) {
                handler(target, &mut ctx)?;
            } else {
                (spec.unrecognized)(target, &command, &mut ctx);
            }
            cursor += 1;
        }

        tracing::debug!(tag, "Input ended inside block");
        Ok(BlockEnd::Exhausted)
    }

    fn expect_begin(&self, tag: &str, begin: usize) -> ParseResult<()> {
        let opens = self
            .lines
            .get(begin)
            .and_then(|line| split_command(line))
            .is_some_and(|(command, param)| {
                command.eq_ignore_ascii_case("BEGIN") && param.trim().eq_ignore_ascii_case(tag)
            });

        if opens {
            Ok(())
        } else {
            Err(ParseError::new(ParseErrorKind::MissingBegin, begin + 1)
                .with_context(format!("expected BEGIN:{tag}")))
        }
    }

    /// Finds the `END` matching the block opened at `begin`, counting same-tag nesting.
    fn skip_block(&self, tag: &str, begin: usize) -> BlockEnd {
        let mut depth = 0usize;
        for (index, line) in self.lines.iter().enumerate().skip(begin + 1) {
            let Some((command, param)) = split_command(line) else {
                continue;
            };
            if !param.trim().eq_ignore_ascii_case(tag) {
                continue;
            }
            if command.eq_ignore_ascii_case("BEGIN") {
                depth += 1;
            } else if command.eq_ignore_ascii_case("END") {
                if depth == 0 {
                    return BlockEnd::Closed(index);
                }
                depth -= 1;
            } else {
                // some other command whose value happens to equal the tag
            }
        }
        BlockEnd::Exhausted
    }

    fn parse_timezone(&mut self, begin: usize) -> ParseResult<(Timezone, BlockEnd)> {
        let mut timezone = Timezone::default();
        let spec = BlockSpec {
            handlers: timezone_handlers(),
            nested: open_in_timezone,
            unrecognized: ignore_unrecognized,
        };
        let end = self.parse_block(TIMEZONE, begin, &mut timezone, &spec)?;
        Ok((timezone, end))
    }

    fn parse_period(&mut self, kind: PeriodKind, begin: usize, period: &mut Period) -> ParseResult<BlockEnd> {
        let spec = BlockSpec {
            handlers: period_handlers(),
            nested: open_nothing,
            unrecognized: ignore_unrecognized,
        };
        self.parse_block(kind.tag(), begin, period, &spec)
    }

    fn parse_event(&mut self, begin: usize, entry: &mut Entry) -> ParseResult<BlockEnd> {
        let spec = BlockSpec {
            handlers: event_handlers(),
            nested: open_in_event,
            unrecognized: capture_extension,
        };
        self.parse_block(EVENT, begin, entry, &spec)
    }

    fn parse_alarm(&mut self, begin: usize) -> ParseResult<(Alarm, BlockEnd)> {
        let mut alarm = Alarm::default();
        let spec = BlockSpec {
            handlers: alarm_handlers(),
            nested: open_nothing,
            unrecognized: ignore_unrecognized,
        };
        let end = self.parse_block(ALARM, begin, &mut alarm, &spec)?;
        Ok((alarm, end))
    }
}

fn open_in_calendar(
    decoder: &mut Decoder<'_, '_>,
    tag: &str,
    begin: usize,
    entry: &mut Entry,
) -> ParseResult<Option<BlockEnd>> {
    match tag {
        TIMEZONE => {
            if entry.timezone.is_some() {
                return Err(ParseError::new(ParseErrorKind::DuplicateTimezone, begin + 1));
            }
            let (timezone, end) = decoder.parse_timezone(begin)?;
            entry.timezone = Some(timezone);
            Ok(Some(end))
        }
        EVENT => decoder.parse_event(begin, entry).map(Some),
        _ => Ok(None),
    }
}

fn open_in_timezone(
    decoder: &mut Decoder<'_, '_>,
    tag: &str,
    begin: usize,
    timezone: &mut Timezone,
) -> ParseResult<Option<BlockEnd>> {
    let kind = match tag {
        "STANDARD" => PeriodKind::Standard,
        "DAYLIGHT" => PeriodKind::Daylight,
        _ => return Ok(None),
    };
    decoder
        .parse_period(kind, begin, timezone.period_mut(kind))
        .map(Some)
}

fn open_in_event(
    decoder: &mut Decoder<'_, '_>,
    tag: &str,
    begin: usize,
    entry: &mut Entry,
) -> ParseResult<Option<BlockEnd>> {
    if tag != ALARM {
        return Ok(None);
    }
    let (alarm, end) = decoder.parse_alarm(begin)?;
    entry.alarms.push(alarm);
    Ok(Some(end))
}

fn open_nothing<T>(
    _decoder: &mut Decoder<'_, '_>,
    _tag: &str,
    _begin: usize,
    _target: &mut T,
) -> ParseResult<Option<BlockEnd>> {
    Ok(None)
}

/// Known vendor keys go to the typed map, other `X-` commands to the extension bag.
fn capture_extension(entry: &mut Entry, command: &str, ctx: &mut FieldCtx<'_>) {
    if let Some(key) = VendorKey::parse(command) {
        entry.vendor.insert(key, ctx.value());
    } else if command.starts_with("X-") {
        ctx.sink.report(
            Severity::Debug,
            &format!("line {}: extension {command} captured", ctx.line),
        );
        entry.extensions.insert(command.to_string(), ctx.value());
    } else {
        ignore_unrecognized(entry, command, ctx);
    }
}

fn ignore_unrecognized<T>(_target: &mut T, command: &str, ctx: &mut FieldCtx<'_>) {
    let severity = if command.starts_with("X-") {
        Severity::Debug
    } else {
        Severity::Warning
    };
    ctx.sink.report(
        severity,
        &format!("line {}: unrecognized command {command}, skipped", ctx.line),
    );
}

fn calendar_handlers() -> &'static HashMap<&'static str, Handler<Entry>> {
    static TABLE: OnceLock<HashMap<&'static str, Handler<Entry>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<&'static str, Handler<Entry>> = HashMap::new();
        table.insert("METHOD", |entry, ctx| {
            entry.method = Some(ctx.value());
            Ok(())
        });
        table.insert("PRODID", |entry, ctx| {
            entry.product_id = Some(ctx.value());
            Ok(())
        });
        table.insert("VERSION", |entry, ctx| {
            entry.version = Some(ctx.value());
            Ok(())
        });
        table.insert("CALSCALE", |entry, ctx| {
            entry.calendar_scale = Some(ctx.value());
            Ok(())
        });
        table
    })
}

fn event_handlers() -> &'static HashMap<&'static str, Handler<Entry>> {
    static TABLE: OnceLock<HashMap<&'static str, Handler<Entry>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<&'static str, Handler<Entry>> = HashMap::new();
        table.insert("ATTENDEE", |entry, ctx| {
            if let Some(person) = decode_participant(ctx) {
                entry.participants.push(person);
            }
            Ok(())
        });
        table.insert("ORGANIZER", |entry, ctx| {
            if let Some(person) = decode_participant(ctx) {
                entry.participants.push(person.into_organizer());
            }
            Ok(())
        });
        table.insert("CATEGORIES", |entry, ctx| {
            entry.categories = Some(ctx.value());
            Ok(())
        });
        table.insert("CLASS", |entry, ctx| {
            entry.class = Some(ctx.value());
            Ok(())
        });
        table.insert("CREATED", |entry, ctx| {
            entry.created = Some(decode_timestamp(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("LAST-MODIFIED", |entry, ctx| {
            entry.modified = Some(decode_timestamp(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("DTSTAMP", |entry, ctx| {
            entry.sent = Some(decode_timestamp(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("DESCRIPTION", |entry, ctx| {
            entry.description = Some(decode_text(ctx.param));
            Ok(())
        });
        table.insert("SUMMARY", |entry, ctx| {
            entry.summary = Some(decode_text(ctx.param));
            Ok(())
        });
        table.insert("LOCATION", |entry, ctx| {
            entry.location = Some(decode_text(ctx.param));
            Ok(())
        });
        table.insert("DTSTART", |entry, ctx| {
            entry.start = Some(decode_datetime(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("DTEND", |entry, ctx| {
            entry.end = Some(decode_datetime(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("PRIORITY", |entry, ctx| {
            entry.priority = Some(ctx.value());
            Ok(())
        });
        table.insert("RECURRENCE-ID", |entry, ctx| {
            entry.recurrence_id = Some(ctx.value());
            Ok(())
        });
        table.insert("SEQUENCE", |entry, ctx| {
            entry.sequence = Some(ctx.value());
            Ok(())
        });
        table.insert("STATUS", |entry, ctx| {
            entry.status = Some(ctx.value());
            Ok(())
        });
        table.insert("TRANSP", |entry, ctx| {
            entry.transparency = Some(ctx.value());
            Ok(())
        });
        table.insert("UID", |entry, ctx| {
            entry.uid = Some(ctx.value());
            Ok(())
        });
        table
    })
}

fn timezone_handlers() -> &'static HashMap<&'static str, Handler<Timezone>> {
    static TABLE: OnceLock<HashMap<&'static str, Handler<Timezone>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<&'static str, Handler<Timezone>> = HashMap::new();
        table.insert("TZID", |timezone, ctx| {
            timezone.name = Some(ctx.param.trim_matches('"').to_string());
            Ok(())
        });
        table.insert("X-LIC-LOCATION", |timezone, ctx| {
            timezone.location = Some(ctx.value());
            Ok(())
        });
        table
    })
}

fn period_handlers() -> &'static HashMap<&'static str, Handler<Period>> {
    static TABLE: OnceLock<HashMap<&'static str, Handler<Period>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<&'static str, Handler<Period>> = HashMap::new();
        table.insert("TZNAME", |period, ctx| {
            period.name = Some(ctx.value());
            Ok(())
        });
        table.insert("DTSTART", |period, ctx| {
            period.epoch_start = Some(decode_epoch(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("TZOFFSETFROM", |period, ctx| {
            period.offset_from = Some(decode_offset(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("TZOFFSETTO", |period, ctx| {
            period.offset_to = Some(decode_offset(ctx.param, ctx.line)?);
            Ok(())
        });
        table.insert("RRULE", |period, ctx| {
            period.rule = Some(ctx.value());
            Ok(())
        });
        table
    })
}

fn alarm_handlers() -> &'static HashMap<&'static str, Handler<Alarm>> {
    static TABLE: OnceLock<HashMap<&'static str, Handler<Alarm>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<&'static str, Handler<Alarm>> = HashMap::new();
        table.insert("DESCRIPTION", |alarm, ctx| {
            alarm.description = Some(unescape_text(ctx.param));
            Ok(())
        });
        table.insert("ACTION", |alarm, ctx| {
            alarm.action = Some(ctx.value());
            Ok(())
        });
        table.insert("TRIGGER", |alarm, ctx| {
            match decode_trigger(ctx.param, ctx.line) {
                Ok((related, offset)) => {
                    alarm.trigger_related = Some(related);
                    alarm.trigger_offset = Some(offset);
                }
                Err(err) => ctx.recover(&err),
            }
            Ok(())
        });
        table
    })
}

/// Decodes an `ATTENDEE`/`ORGANIZER` value; a malformed one is reported and dropped.
fn decode_participant(ctx: &mut FieldCtx<'_>) -> Option<Person> {
    match decode_person(ctx.param, ctx.line) {
        Ok(decoded) => {
            for key in &decoded.ignored {
                ctx.sink.report(
                    Severity::Debug,
                    &format!("line {}: participant parameter {key} ignored", ctx.line),
                );
            }
            Some(decoded.person)
        }
        Err(err) => {
            ctx.recover(&err);
            None
        }
    }
}
