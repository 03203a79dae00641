//! ICS document parsing using the icalendar crate's parser.
//!
//! Reads back documents in the shape `generate_calendar` writes. Properties
//! this crate does not model are ignored.

use chrono::{NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use super::escape::unescape;
use crate::error::{SyllabusError, SyllabusResult};
use crate::event::Event;
use crate::recurrence::Recurrence;
use crate::zone::LocalZone;

/// Read every VEVENT of a VCALENDAR document.
///
/// UTC and TZID timestamps are converted to wall-clock time in `zone`;
/// floating times are kept as written; date-only values mark the event as
/// all-day.
pub fn parse_calendar(content: &str, zone: LocalZone) -> SyllabusResult<Vec<Event>> {
    let unfolded = unfold(content);

    if !unfolded.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err(SyllabusError::IcsParse(
            "Document does not start with BEGIN:VCALENDAR".into(),
        ));
    }

    let calendar = read_calendar(&unfolded).map_err(|e| SyllabusError::IcsParse(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(|vevent| parse_event(vevent, zone))
        .collect()
}

fn parse_event(vevent: &Component, zone: LocalZone) -> SyllabusResult<Event> {
    let start = vevent
        .find_prop("DTSTART")
        .ok_or_else(|| SyllabusError::IcsParse("VEVENT without DTSTART".into()))
        .and_then(|p| {
            DatePerhapsTime::try_from(p)
                .map_err(|_| SyllabusError::IcsParse(format!("Invalid DTSTART value '{}'", p.val.as_ref())))
        })?;
    let end = vevent
        .find_prop("DTEND")
        .map(|p| {
            DatePerhapsTime::try_from(p)
                .map_err(|_| SyllabusError::IcsParse(format!("Invalid DTEND value '{}'", p.val.as_ref())))
        })
        .transpose()?;

    let all_day = matches!(start, DatePerhapsTime::Date(_));
    let start = to_local(start, zone);
    let end = end.map_or(start, |t| to_local(t, zone));

    // Drop the "@domain" suffix added on output
    let id = vevent
        .find_prop("UID")
        .map(|p| match p.val.as_ref().split_once('@') {
            Some((id, _)) => id.to_string(),
            None => p.val.to_string(),
        })
        .unwrap_or_default();

    let text = |name: &str| {
        vevent
            .find_prop(name)
            .map(|p| unescape(p.val.as_ref()))
            .unwrap_or_default()
    };

    let recurrence = vevent
        .find_prop("RRULE")
        .map(|p| p.val.as_ref().parse::<Recurrence>())
        .transpose()?;

    Ok(Event {
        id,
        title: text("SUMMARY"),
        description: text("DESCRIPTION"),
        start,
        end,
        location: text("LOCATION"),
        all_day,
        recurrence,
    })
}

/// Wall-clock time in `zone` for a DTSTART/DTEND value.
///
/// A TZID the zone database does not know is read as floating.
fn to_local(value: DatePerhapsTime, zone: LocalZone) -> NaiveDateTime {
    match value {
        DatePerhapsTime::Date(d) => d.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => zone.from_utc(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => naive,
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.parse::<Tz>() {
                Ok(tz) => tz
                    .from_local_datetime(&date_time)
                    .earliest()
                    .map_or(date_time, |dt| zone.from_utc(dt.with_timezone(&Utc))),
                Err(_) => {
                    tracing::debug!(%tzid, "Unknown TZID, reading time as floating");
                    date_time
                }
            }
        }
    }
}
