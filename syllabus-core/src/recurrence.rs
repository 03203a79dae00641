//! Weekly recurrence rules.
//!
//! Syllabi only ever say things like "every Tuesday", so the rule grammar is
//! the single form `FREQ=WEEKLY;BYDAY=<code>`. Expansion into concrete dates
//! is delegated to the rrule crate.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{SyllabusError, SyllabusResult};

/// A weekly recurrence on a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Recurrence {
    pub by_day: Weekday,
}

/// Two-letter RRULE code for a weekday.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

impl Recurrence {
    pub fn weekly(by_day: Weekday) -> Self {
        Recurrence { by_day }
    }

    /// Expand the rule from `start` through the end of `until`, returning at
    /// most `limit` occurrences.
    ///
    /// Times are treated as floating: they come back exactly as they went in.
    pub fn occurrences(
        &self,
        start: NaiveDateTime,
        until: NaiveDate,
        limit: u16,
    ) -> SyllabusResult<Vec<NaiveDateTime>> {
        let rrule_str = format!("DTSTART:{}Z\nRRULE:{}", start.format("%Y%m%dT%H%M%S"), self);

        let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
            SyllabusError::InvalidRecurrence(format!("Failed to expand '{}': {}", self, e))
        })?;

        // `before` is exclusive, so stop at midnight after the last day
        let tz: rrule::Tz = Utc.into();
        let end = (until.and_time(NaiveTime::MIN) + Duration::days(1)).and_utc();
        let result = rrule_set.before(end.with_timezone(&tz)).all(limit);

        Ok(result.dates.iter().map(|dt| dt.naive_utc()).collect())
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ=WEEKLY;BYDAY={}", weekday_code(self.by_day))
    }
}

impl FromStr for Recurrence {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut freq = None;
        let mut by_day = None;

        for part in s.trim().split(';').filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| SyllabusError::InvalidRecurrence(s.to_string()))?;
            match key.to_ascii_uppercase().as_str() {
                "FREQ" => freq = Some(value.to_ascii_uppercase()),
                "BYDAY" => by_day = weekday_from_code(&value.to_ascii_uppercase()),
                _ => return Err(SyllabusError::InvalidRecurrence(s.to_string())),
            }
        }

        match (freq.as_deref(), by_day) {
            (Some("WEEKLY"), Some(by_day)) => Ok(Recurrence { by_day }),
            _ => Err(SyllabusError::InvalidRecurrence(s.to_string())),
        }
    }
}

impl From<Recurrence> for String {
    fn from(rule: Recurrence) -> Self {
        rule.to_string()
    }
}

impl TryFrom<String> for Recurrence {
    type Error = SyllabusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
