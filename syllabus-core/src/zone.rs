//! Resolution of naive local times to UTC instants.
//!
//! Extraction never looks at timezones: a syllabus says "2:00 PM" and that is
//! what gets stored. Only when a calendar is rendered (ICS timestamps, provider
//! links) do those wall-clock times need an offset, which is what `LocalZone`
//! supplies.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{SyllabusError, SyllabusResult};

/// The zone naive event times are interpreted in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LocalZone {
    /// Whatever zone the host system is configured with.
    #[default]
    System,
    /// A fixed IANA zone, e.g. from `timezone = "America/Chicago"` in config.
    Named(Tz),
}

impl LocalZone {
    pub fn from_name(name: &str) -> SyllabusResult<Self> {
        name.parse::<Tz>()
            .map(LocalZone::Named)
            .map_err(|_| SyllabusError::UnknownTimezone(name.to_string()))
    }

    /// `None` resolves to the system zone.
    pub fn from_config(name: Option<&str>) -> SyllabusResult<Self> {
        match name {
            Some(name) => Self::from_name(name),
            None => Ok(LocalZone::System),
        }
    }

    /// Resolve a wall-clock time to a UTC instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
    /// that do not exist (DST spring-forward gap) are taken as UTC.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let resolved = match self {
            LocalZone::System => Local
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            LocalZone::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };

        resolved.unwrap_or_else(|| {
            warn!(%local, zone = %self, "Local time does not exist in zone, treating it as UTC");
            local.and_utc()
        })
    }

    /// Convert a UTC instant back to wall-clock time in this zone.
    pub fn from_utc(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        match self {
            LocalZone::System => utc.with_timezone(&Local).naive_local(),
            LocalZone::Named(tz) => utc.with_timezone(tz).naive_local(),
        }
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalZone::System => write!(f, "system"),
            LocalZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
