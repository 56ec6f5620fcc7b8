//! Participants and organizer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Role value forced onto the organizer.
pub const ORGANIZER_ROLE: &str = "organizer";

/// Attribute keys of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonKey {
    Name,
    Email,
    Type,
    Role,
    ParticipationStatus,
    Rsvp,
    GuestCount,
}

impl PersonKey {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Type,
        Self::Role,
        Self::ParticipationStatus,
        Self::Rsvp,
        Self::GuestCount,
    ];

    /// Maps an attendee parameter name to its key. `mailto:` is not a parameter.
    #[must_use]
    pub fn from_param(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CN" => Some(Self::Name),
            "CUTYPE" => Some(Self::Type),
            "PARTSTAT" => Some(Self::ParticipationStatus),
            "ROLE" => Some(Self::Role),
            "RSVP" => Some(Self::Rsvp),
            "X-NUM-GUESTS" => Some(Self::GuestCount),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Type => "type",
            Self::Role => "role",
            Self::ParticipationStatus => "participation-status",
            Self::Rsvp => "rsvp",
            Self::GuestCount => "guest-count",
        }
    }
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant or the organizer. Only the email is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    email: String,
    name: Option<String>,
    kind: Option<String>,
    role: Option<String>,
    participation_status: Option<String>,
    rsvp: Option<String>,
    guest_count: Option<String>,
}

impl Person {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            kind: None,
            role: None,
            participation_status: None,
            rsvp: None,
            guest_count: None,
        }
    }

    /// Sets an optional attribute. Setting `Email` replaces the address.
    pub(crate) fn set(&mut self, key: PersonKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            PersonKey::Email => self.email = value,
            PersonKey::Name => self.name = Some(value),
            PersonKey::Type => self.kind = Some(value),
            PersonKey::Role => self.role = Some(value),
            PersonKey::ParticipationStatus => self.participation_status = Some(value),
            PersonKey::Rsvp => self.rsvp = Some(value),
            PersonKey::GuestCount => self.guest_count = Some(value),
        }
    }

    /// Forces the organizer role.
    #[must_use]
    pub(crate) fn into_organizer(mut self) -> Self {
        self.role = Some(ORGANIZER_ROLE.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, key: PersonKey) -> Option<&str> {
        match key {
            PersonKey::Email => Some(&self.email),
            PersonKey::Name => self.name.as_deref(),
            PersonKey::Type => self.kind.as_deref(),
            PersonKey::Role => self.role.as_deref(),
            PersonKey::ParticipationStatus => self.participation_status.as_deref(),
            PersonKey::Rsvp => self.rsvp.as_deref(),
            PersonKey::GuestCount => self.guest_count.as_deref(),
        }
    }

    /// All present attributes keyed by [`PersonKey`].
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<PersonKey, String> {
        PersonKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value.to_string())))
            .collect()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    #[must_use]
    pub fn is_organizer(&self) -> bool {
        self.role.as_deref() == Some(ORGANIZER_ROLE)
    }
}
