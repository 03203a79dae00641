//! Syllabus text to event drafts.
//!
//! Every non-empty line is examined on its own (the following line is only
//! consulted to extend the description). A line without a date never becomes
//! an event. Field extraction walks the tables in `patterns` in order.

mod dedup;
pub mod patterns;

use std::ops::Range;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_DURATION_MINUTES, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::error::SyllabusResult;
use crate::event::{EventDraft, truncate_chars};
use crate::recurrence::Recurrence;

pub use dedup::dedup_events;
use patterns::{
    DATE_FORMATS, KEYWORD_PATTERNS, LOCATION_PATTERNS, RECURRENCE_PATTERNS, TIME_FORMATS,
};

/// Extract deduplicated event drafts from free-form text.
///
/// Lines whose dates fail calendar validation are logged and skipped.
pub fn parse(text: &str) -> Vec<EventDraft> {
    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();
    let mut drafts = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        let next_line = lines.get(index + 1).copied();
        match extract_event(line, next_line) {
            Ok(Some(draft)) => {
                debug!(line = index + 1, title = ?draft.title, start = %draft.start, "Extracted event");
                drafts.push(draft);
            }
            Ok(None) => {}
            Err(e) => warn!(line = index + 1, error = %e, "Skipping line"),
        }
    }

    let total = drafts.len();
    let unique = dedup_events(drafts);
    if unique.len() < total {
        debug!(duplicates = total - unique.len(), "Collapsed duplicate events");
    }
    unique
}

/// Build a draft from one line, or `Ok(None)` if the line has no date.
pub fn extract_event(line: &str, next_line: Option<&str>) -> SyllabusResult<Option<EventDraft>> {
    let dates = extract_dates(line)?;
    let Some(&start_date) = dates.first() else {
        return Ok(None);
    };
    let end_date = dates.get(1).copied().unwrap_or(start_date);

    let times = extract_times(line);
    let (start, end, all_day) = match times.as_slice() {
        [] => (
            start_date.and_time(NaiveTime::MIN),
            end_date.and_time(NaiveTime::MIN),
            true,
        ),
        [only] => {
            let start = start_date.and_time(*only);
            (start, start + Duration::minutes(DEFAULT_DURATION_MINUTES), false)
        }
        [first, second, ..] => (start_date.and_time(*first), end_date.and_time(*second), false),
    };

    Ok(Some(EventDraft {
        title: Some(extract_title(line)),
        description: Some(extract_description(line, next_line)),
        start,
        end: Some(end),
        location: Some(extract_location(line)),
        all_day: Some(all_day),
        recurrence: extract_recurrence(line),
    }))
}

/// All dates in the line, grouped by format in table order.
///
/// Fails on the first match that is not a real calendar date.
pub fn extract_dates(line: &str) -> SyllabusResult<Vec<NaiveDate>> {
    DATE_FORMATS
        .iter()
        .flat_map(|format| {
            format.regex.captures_iter(line).map(move |caps| {
                (format.build)(&caps).inspect_err(|_| {
                    debug!(format = format.name, text = &caps[0], "Date match is not a calendar date");
                })
            })
        })
        .collect()
}

/// All times in the line, grouped by format in table order.
///
/// Text claimed by an earlier format is not matched again, so `2:00 PM`
/// yields one time rather than also reading `00 PM`.
pub fn extract_times(line: &str) -> Vec<NaiveTime> {
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut times = Vec::new();

    for format in TIME_FORMATS.iter() {
        let mut spans = Vec::new();
        for caps in format.regex.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let span = whole.range();
            if claimed
                .iter()
                .any(|c| span.start < c.end && c.start < span.end)
            {
                continue;
            }
            match (format.build)(&caps) {
                Some(time) => times.push(time),
                None => debug!(format = format.name, text = whole.as_str(), "Ignoring out-of-range time"),
            }
            spans.push(span);
        }
        claimed.extend(spans);
    }

    times
}

/// Text following the first event keyword, or the start of the line.
pub fn extract_title(line: &str) -> String {
    for (_, regex) in KEYWORD_PATTERNS.iter() {
        let Some(found) = regex.find(line) else {
            continue;
        };

        let rest = &line[found.end()..];
        let segment = regex.find(rest).map_or(rest, |next| &rest[..next.start()]);
        let title = segment.trim();
        if !title.is_empty() {
            return truncate_chars(title, MAX_TITLE_CHARS);
        }
        break;
    }

    truncate_chars(line, MAX_TITLE_CHARS)
}

/// The line itself, plus the next line when that one carries no date.
pub fn extract_description(line: &str, next_line: Option<&str>) -> String {
    let mut description = line.to_string();

    if let Some(next) = next_line
        .map(str::trim)
        .filter(|next| !next.is_empty() && !patterns::has_date(next))
    {
        description.push(' ');
        description.push_str(next);
    }

    truncate_chars(&description, MAX_DESCRIPTION_CHARS)
}

/// First location pattern to match, or an empty string.
pub fn extract_location(line: &str) -> String {
    LOCATION_PATTERNS
        .iter()
        .find_map(|pattern| {
            let location = pattern
                .regex
                .captures(line)
                .and_then(|caps| (pattern.build)(&caps))?;
            debug!(pattern = pattern.name, %location, "Matched location");
            Some(location)
        })
        .unwrap_or_default()
}

pub fn extract_recurrence(line: &str) -> Option<Recurrence> {
    RECURRENCE_PATTERNS.iter().find_map(|pattern| {
        let recurrence = pattern
            .regex
            .captures(line)
            .and_then(|caps| (pattern.build)(&caps))?;
        debug!(pattern = pattern.name, %recurrence, "Matched recurrence");
        Some(recurrence)
    })
}
