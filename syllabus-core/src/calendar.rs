//! Ordered event collection and its renderings.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::{DEFAULT_PRODUCT_ID, DEFAULT_TITLE, DEFAULT_UID_DOMAIN};
use crate::event::{Event, EventDraft};
use crate::extract;
use crate::ics;
use crate::links::{self, Provider};
use crate::zone::LocalZone;

/// Settings applied when events are added and rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarOptions {
    pub product_id: String,
    pub uid_domain: String,
    pub default_title: String,
    pub zone: LocalZone,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            zone: LocalZone::System,
        }
    }
}

/// Events in insertion order.
///
/// Events are never modified once added; the only way to remove them is
/// `clear`. There is no internal locking.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    options: CalendarOptions,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CalendarOptions) -> Self {
        Calendar {
            options,
            events: Vec::new(),
        }
    }

    /// Extract events from syllabus text into a new calendar.
    pub fn from_text(text: &str, options: CalendarOptions) -> Self {
        let mut calendar = Self::with_options(options);
        calendar.add_events(extract::parse(text));
        calendar
    }

    /// Append a draft, assigning it a fresh id and filling defaults.
    pub fn add_event(&mut self, draft: EventDraft) -> &Event {
        let event = Event::from_draft(draft, &self.options.default_title);
        debug!(id = %event.id, title = %event.title, "Added event");
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub fn add_events(&mut self, drafts: impl IntoIterator<Item = EventDraft>) {
        for draft in drafts {
            self.add_event(draft);
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    /// Render as an ICS document stamped with the current time.
    pub fn render(&self) -> String {
        self.render_at(Utc::now())
    }

    /// Render as an ICS document with `now` as every event's DTSTAMP.
    pub fn render_at(&self, now: DateTime<Utc>) -> String {
        ics::generate_calendar(&self.events, &self.options, now)
    }

    /// One "create event" link per event, in collection order.
    pub fn provider_links(&self, provider: Provider) -> Vec<String> {
        links::provider_links(&self.events, provider, self.options.zone)
    }
}
