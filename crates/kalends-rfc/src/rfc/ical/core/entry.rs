//! The decoded aggregate.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{Alarm, DateTimeDetail, Person, TimestampField, Timezone};
use crate::rfc::ical::expand::ConversionError;
use crate::rfc::ical::parse::{ParseResult, decode};

macro_rules! vendor_keys {
    ($($variant:ident => $name:literal,)+) => {
        /// Vendor extension commands stored under a typed key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum VendorKey {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl VendorKey {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Command name as written in the document.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Looks up a command name (already upper-cased).
            #[must_use]
            pub fn parse(command: &str) -> Option<Self> {
                match command {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

vendor_keys! {
    MicrosoftApptSequence => "X-MICROSOFT-CDO-APPT-SEQUENCE",
    MicrosoftBusyStatus => "X-MICROSOFT-CDO-BUSYSTATUS",
    MicrosoftIntendedStatus => "X-MICROSOFT-CDO-INTENDEDSTATUS",
    MicrosoftAllDayEvent => "X-MICROSOFT-CDO-ALLDAYEVENT",
    MicrosoftImportance => "X-MICROSOFT-CDO-IMPORTANCE",
    MicrosoftInstanceType => "X-MICROSOFT-CDO-INSTTYPE",
    MicrosoftOwnerApptId => "X-MICROSOFT-CDO-OWNERAPPTID",
    MicrosoftOwnerCriticalChange => "X-MICROSOFT-CDO-OWNER-CRITICAL-CHANGE",
    MicrosoftAttendeeCriticalChange => "X-MICROSOFT-CDO-ATTENDEE-CRITICAL-CHANGE",
    MicrosoftReplyTime => "X-MICROSOFT-CDO-REPLYTIME",
    MicrosoftDisallowCounter => "X-MICROSOFT-DISALLOW-COUNTER",
    MicrosoftDoNotForward => "X-MICROSOFT-DONOTFORWARDMEETING",
    MicrosoftLocations => "X-MICROSOFT-LOCATIONS",
    MicrosoftCalScale => "X-MICROSOFT-CALSCALE",
    OutlookApptSeqTime => "X-MS-OLK-APPTSEQTIME",
    OutlookApptLastSequence => "X-MS-OLK-APPTLASTSEQUENCE",
    OutlookAutoFillLocation => "X-MS-OLK-AUTOFILLLOCATION",
    OutlookAutoStartCheck => "X-MS-OLK-AUTOSTARTCHECK",
    OutlookAllowExternCheck => "X-MS-OLK-ALLOWEXTERNCHECK",
    OutlookConfType => "X-MS-OLK-CONFTYPE",
    OutlookSender => "X-MS-OLK-SENDER",
    OutlookForceInspectorOpen => "X-MS-OLK-FORCEINSPECTOROPEN",
    OutlookOriginalStart => "X-MS-OLK-ORIGINALSTART",
    OutlookOriginalEnd => "X-MS-OLK-ORIGINALEND",
    CalendarName => "X-WR-CALNAME",
    RelatedCalendarId => "X-WR-RELCALID",
    AlternateDescription => "X-ALT-DESC",
}

impl fmt::Display for VendorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute keys of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKey {
    Method,
    ProductId,
    Version,
    CalendarScale,
    Uid,
    Summary,
    SummaryLanguage,
    Description,
    DescriptionLanguage,
    Location,
    LocationLanguage,
    Status,
    Sequence,
    Class,
    Priority,
    Transparency,
    Categories,
    RecurrenceId,
    Created,
    CreatedUtc,
    Modified,
    ModifiedUtc,
    Sent,
    SentUtc,
    Vendor(VendorKey),
}

impl EntryKey {
    /// Every key except the vendor tail.
    pub const CORE: [Self; 24] = [
        Self::Method,
        Self::ProductId,
        Self::Version,
        Self::CalendarScale,
        Self::Uid,
        Self::Summary,
        Self::SummaryLanguage,
        Self::Description,
        Self::DescriptionLanguage,
        Self::Location,
        Self::LocationLanguage,
        Self::Status,
        Self::Sequence,
        Self::Class,
        Self::Priority,
        Self::Transparency,
        Self::Categories,
        Self::RecurrenceId,
        Self::Created,
        Self::CreatedUtc,
        Self::Modified,
        Self::ModifiedUtc,
        Self::Sent,
        Self::SentUtc,
    ];
}

/// Text with the language tag it was written in (empty if none).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalizedText {
    pub language: String,
    pub text: String,
}

/// A UTC conversion that failed for one timestamp; the local value is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionFailure {
    pub field: TimestampField,
    pub error: ConversionError,
}

/// Everything recovered from one calendar document.
///
/// Built in a single decoding pass and read-only afterwards. Later lines
/// for the same key overwrite earlier ones, including across several
/// `VEVENT` blocks; participants and alarms accumulate in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Entry {
    pub(crate) method: Option<String>,
    pub(crate) product_id: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) calendar_scale: Option<String>,
    pub(crate) uid: Option<String>,
    pub(crate) summary: Option<LocalizedText>,
    pub(crate) description: Option<LocalizedText>,
    pub(crate) location: Option<LocalizedText>,
    pub(crate) status: Option<String>,
    pub(crate) sequence: Option<String>,
    pub(crate) class: Option<String>,
    pub(crate) priority: Option<String>,
    pub(crate) transparency: Option<String>,
    pub(crate) categories: Option<String>,
    pub(crate) recurrence_id: Option<String>,
    pub(crate) created: Option<DateTimeDetail>,
    pub(crate) modified: Option<DateTimeDetail>,
    pub(crate) sent: Option<DateTimeDetail>,
    pub(crate) start: Option<DateTimeDetail>,
    pub(crate) end: Option<DateTimeDetail>,
    pub(crate) vendor: BTreeMap<VendorKey, String>,
    pub(crate) extensions: BTreeMap<String, String>,
    pub(crate) timezone: Option<Timezone>,
    pub(crate) participants: Vec<Person>,
    pub(crate) alarms: Vec<Alarm>,
    pub(crate) conversion_failures: Vec<ConversionFailure>,
}

impl Entry {
    /// ## Summary
    /// Decodes a calendar document into an `Entry`, reporting diagnostics to `tracing`.
    ///
    /// ## Errors
    /// Returns a structural or load-bearing field error; see [`decode`].
    pub fn from_ics(input: &str) -> ParseResult<Self> {
        decode(input)
    }

    /// Value of one attribute, formatted as it would appear in the document.
    #[must_use]
    pub fn get(&self, key: EntryKey) -> Option<String> {
        let text = |t: &Option<LocalizedText>| t.as_ref().map(|t| t.text.clone());
        let language = |t: &Option<LocalizedText>| {
            t.as_ref()
                .filter(|t| !t.language.is_empty())
                .map(|t| t.language.clone())
        };

        match key {
            EntryKey::Method => self.method.clone(),
            EntryKey::ProductId => self.product_id.clone(),
            EntryKey::Version => self.version.clone(),
            EntryKey::CalendarScale => self.calendar_scale.clone(),
            EntryKey::Uid => self.uid.clone(),
            EntryKey::Summary => text(&self.summary),
            EntryKey::SummaryLanguage => language(&self.summary),
            EntryKey::Description => text(&self.description),
            EntryKey::DescriptionLanguage => language(&self.description),
            EntryKey::Location => text(&self.location),
            EntryKey::LocationLanguage => language(&self.location),
            EntryKey::Status => self.status.clone(),
            EntryKey::Sequence => self.sequence.clone(),
            EntryKey::Class => self.class.clone(),
            EntryKey::Priority => self.priority.clone(),
            EntryKey::Transparency => self.transparency.clone(),
            EntryKey::Categories => self.categories.clone(),
            EntryKey::RecurrenceId => self.recurrence_id.clone(),
            EntryKey::Created => self.created.as_ref().map(DateTimeDetail::local_basic),
            EntryKey::CreatedUtc => self.created.as_ref().and_then(DateTimeDetail::utc_basic),
            EntryKey::Modified => self.modified.as_ref().map(DateTimeDetail::local_basic),
            EntryKey::ModifiedUtc => self.modified.as_ref().and_then(DateTimeDetail::utc_basic),
            EntryKey::Sent => self.sent.as_ref().map(DateTimeDetail::local_basic),
            EntryKey::SentUtc => self.sent.as_ref().and_then(DateTimeDetail::utc_basic),
            EntryKey::Vendor(vendor) => self.vendor.get(&vendor).cloned(),
        }
    }

    /// All present attributes, vendor keys included.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<EntryKey, String> {
        let mut attrs: BTreeMap<EntryKey, String> = EntryKey::CORE
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect();
        attrs.extend(
            self.vendor
                .iter()
                .map(|(key, value)| (EntryKey::Vendor(*key), value.clone())),
        );
        attrs
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&LocalizedText> {
        self.summary.as_ref()
    }

    #[must_use]
    pub const fn description(&self) -> Option<&LocalizedText> {
        self.description.as_ref()
    }

    #[must_use]
    pub const fn location(&self) -> Option<&LocalizedText> {
        self.location.as_ref()
    }

    /// The stored timestamp for `field`.
    #[must_use]
    pub const fn timestamp(&self, field: TimestampField) -> Option<&DateTimeDetail> {
        match field {
            TimestampField::Created => self.created.as_ref(),
            TimestampField::Modified => self.modified.as_ref(),
            TimestampField::Sent => self.sent.as_ref(),
            TimestampField::Start => self.start.as_ref(),
            TimestampField::End => self.end.as_ref(),
        }
    }

    pub(crate) fn timestamp_mut(&mut self, field: TimestampField) -> Option<&mut DateTimeDetail> {
        match field {
            TimestampField::Created => self.created.as_mut(),
            TimestampField::Modified => self.modified.as_mut(),
            TimestampField::Sent => self.sent.as_mut(),
            TimestampField::Start => self.start.as_mut(),
            TimestampField::End => self.end.as_mut(),
        }
    }

    #[must_use]
    pub const fn start(&self) -> Option<&DateTimeDetail> {
        self.start.as_ref()
    }

    #[must_use]
    pub const fn end(&self) -> Option<&DateTimeDetail> {
        self.end.as_ref()
    }

    #[must_use]
    pub const fn created(&self) -> Option<&DateTimeDetail> {
        self.created.as_ref()
    }

    #[must_use]
    pub const fn modified(&self) -> Option<&DateTimeDetail> {
        self.modified.as_ref()
    }

    #[must_use]
    pub const fn sent(&self) -> Option<&DateTimeDetail> {
        self.sent.as_ref()
    }

    #[must_use]
    pub const fn timezone(&self) -> Option<&Timezone> {
        self.timezone.as_ref()
    }

    /// Participants in document order, organizer included.
    #[must_use]
    pub fn participants(&self) -> &[Person] {
        &self.participants
    }

    /// The first participant whose role is the organizer role.
    #[must_use]
    pub fn organizer(&self) -> Option<&Person> {
        self.participants.iter().find(|p| p.is_organizer())
    }

    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    /// Unrecognized `X-` commands, verbatim.
    #[must_use]
    pub const fn extensions(&self) -> &BTreeMap<String, String> {
        &self.extensions
    }

    /// Timestamps whose UTC conversion failed.
    #[must_use]
    pub fn conversion_failures(&self) -> &[ConversionFailure] {
        &self.conversion_failures
    }
}
