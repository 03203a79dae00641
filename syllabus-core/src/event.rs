//! Event records.
//!
//! An `EventDraft` is what the extractor (or a caller) knows about an event;
//! every field but the start is optional. `Event::from_draft` is the one place
//! defaults get filled in and ids get assigned.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::recurrence::Recurrence;

/// A finalized calendar event.
///
/// Start and end are wall-clock times with no zone attached. For all-day
/// events only the date part is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub all_day: bool,
    pub recurrence: Option<Recurrence>,
}

/// A candidate event with optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl EventDraft {
    pub fn new(start: NaiveDateTime) -> Self {
        EventDraft {
            title: None,
            description: None,
            start,
            end: None,
            location: None,
            all_day: None,
            recurrence: None,
        }
    }

    /// A draft covering a whole day.
    pub fn all_day(date: NaiveDate) -> Self {
        EventDraft {
            all_day: Some(true),
            ..EventDraft::new(date.and_time(chrono::NaiveTime::MIN))
        }
    }
}

impl Event {
    /// Build an event from a draft, assigning a fresh id.
    ///
    /// Empty strings count as missing, so an empty title becomes
    /// `default_title`. Title and description are cut to their length limits.
    pub fn from_draft(draft: EventDraft, default_title: &str) -> Self {
        let title = non_empty(draft.title).unwrap_or_else(|| default_title.to_string());
        let description = non_empty(draft.description).unwrap_or_default();

        Event {
            id: Uuid::new_v4().to_string(),
            title: truncate_chars(&title, MAX_TITLE_CHARS),
            description: truncate_chars(&description, MAX_DESCRIPTION_CHARS),
            start: draft.start,
            end: draft.end.unwrap_or(draft.start),
            location: non_empty(draft.location).unwrap_or_default(),
            all_day: draft.all_day.unwrap_or(false),
            recurrence: draft.recurrence,
        }
    }

    /// Human-readable time span, e.g. "2024-10-15 14:00-15:00" or "2024-10-15 (all day)".
    pub fn render_time(&self) -> String {
        if self.all_day {
            if self.start.date() == self.end.date() {
                format!("{} (all day)", self.start.format("%Y-%m-%d"))
            } else {
                format!(
                    "{} to {} (all day)",
                    self.start.format("%Y-%m-%d"),
                    self.end.format("%Y-%m-%d")
                )
            }
        } else if self.start.date() == self.end.date() {
            format!(
                "{} {}-{}",
                self.start.format("%Y-%m-%d"),
                self.start.format("%H:%M"),
                self.end.format("%H:%M")
            )
        } else {
            format!(
                "{} to {}",
                self.start.format("%Y-%m-%d %H:%M"),
                self.end.format("%Y-%m-%d %H:%M")
            )
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// First `max` characters of `s` (characters, not bytes).
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
