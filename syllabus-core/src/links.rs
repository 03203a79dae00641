//! "Create event" deep links for web calendar providers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SyllabusError;
use crate::event::Event;
use crate::zone::LocalZone;

const GOOGLE_ENDPOINT: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_ENDPOINT: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Google,
    Outlook,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Outlook => "outlook",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Provider {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "gcal" => Ok(Provider::Google),
            "outlook" => Ok(Provider::Outlook),
            _ => Err(SyllabusError::UnknownProvider(s.to_string())),
        }
    }
}

/// ISO-8601 UTC with milliseconds, e.g. `2024-10-15T18:00:00.000Z`.
fn iso_timestamp(time: NaiveDateTime, zone: LocalZone) -> String {
    zone.to_utc(time)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Deep link that opens the provider's event form pre-filled with `event`.
pub fn event_link(event: &Event, provider: Provider, zone: LocalZone) -> String {
    let start = iso_timestamp(event.start, zone);
    let end = iso_timestamp(event.end, zone);
    let title = urlencoding::encode(&event.title);
    let details = urlencoding::encode(&event.description);
    let location = urlencoding::encode(&event.location);

    match provider {
        Provider::Google => format!(
            "{GOOGLE_ENDPOINT}?action=TEMPLATE&text={title}&dates={start}/{end}&details={details}&location={location}"
        ),
        Provider::Outlook => format!(
            "{OUTLOOK_ENDPOINT}?subject={title}&startdt={start}&enddt={end}&body={details}&location={location}"
        ),
    }
}

/// One link per event, in order.
pub fn provider_links(events: &[Event], provider: Provider, zone: LocalZone) -> Vec<String> {
    events
        .iter()
        .map(|event| event_link(event, provider, zone))
        .collect()
}
