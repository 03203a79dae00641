//! ICS document generation.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::escape::escape;
use crate::calendar::CalendarOptions;
use crate::event::Event;
use crate::zone::LocalZone;

const ICS_TIMESTAMP: &str = "%Y%m%dT%H%M%SZ";
const ICS_DATE: &str = "%Y%m%d";

/// Render events as one VCALENDAR document with CRLF line endings.
///
/// `now` becomes the DTSTAMP of every VEVENT.
pub fn generate_calendar(events: &[Event], options: &CalendarOptions, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", options.product_id),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    let dtstamp = now.format(ICS_TIMESTAMP).to_string();
    for event in events {
        push_event_lines(&mut lines, event, options, &dtstamp);
    }

    lines.push("END:VCALENDAR".to_string());

    let mut result = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for line in &lines {
        result.push_str(line);
        result.push_str("\r\n");
    }
    result
}

fn push_event_lines(lines: &mut Vec<String>, event: &Event, options: &CalendarOptions, dtstamp: &str) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}@{}", event.id, options.uid_domain));
    lines.push(format!("DTSTAMP:{dtstamp}"));
    lines.push(format!(
        "DTSTART:{}",
        format_time(event.start, event.all_day, options.zone)
    ));
    lines.push(format!(
        "DTEND:{}",
        format_time(event.end, event.all_day, options.zone)
    ));
    lines.push(format!("SUMMARY:{}", escape(&event.title)));

    if !event.description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", escape(&event.description)));
    }

    if !event.location.is_empty() {
        lines.push(format!("LOCATION:{}", escape(&event.location)));
    }

    if let Some(recurrence) = event.recurrence {
        lines.push(format!("RRULE:{recurrence}"));
    }

    lines.push("END:VEVENT".to_string());
}

/// Date-only for all-day events, otherwise a UTC timestamp.
fn format_time(time: NaiveDateTime, all_day: bool, zone: LocalZone) -> String {
    if all_day {
        time.date().format(ICS_DATE).to_string()
    } else {
        zone.to_utc(time).format(ICS_TIMESTAMP).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;
    use crate::recurrence::Recurrence;
    use chrono::{NaiveDate, TimeZone, Weekday};

    fn options() -> CalendarOptions {
        CalendarOptions {
            zone: LocalZone::from_name("America/New_York").unwrap(),
            ..CalendarOptions::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
    }

    fn all_day_final() -> Event {
        Event::from_draft(
            EventDraft {
                title: Some("Final Exam".to_string()),
                ..EventDraft::all_day(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap())
            },
            "Untitled Event",
        )
    }

    fn timed_lecture() -> Event {
        let start = NaiveDate::from_ymd_opt(2024, 10, 15)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        Event::from_draft(
            EventDraft {
                title: Some("Lecture; intro, part 1".to_string()),
                description: Some("Bring\nnotes".to_string()),
                end: Some(start + chrono::Duration::hours(1)),
                location: Some("Room 204".to_string()),
                recurrence: Some(Recurrence::weekly(Weekday::Tue)),
                ..EventDraft::new(start)
            },
            "Untitled Event",
        )
    }

    #[test]
    fn test_all_day_event_uses_date_only_form() {
        let ics = generate_calendar(&[all_day_final()], &options(), now());

        assert!(ics.contains("\r\nDTSTART:20241015\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("\r\nDTEND:20241015\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("\r\nSUMMARY:Final Exam\r\n"));
    }

    #[test]
    fn test_all_day_event_omits_empty_optional_fields() {
        let ics = generate_calendar(&[all_day_final()], &options(), now());
        assert!(!ics.contains("DESCRIPTION:"));
        assert!(!ics.contains("LOCATION:"));
        assert!(!ics.contains("RRULE:"));
    }

    #[test]
    fn test_timed_event_lines_in_order() {
        let event = timed_lecture();
        let ics = generate_calendar(&[event.clone()], &options(), now());

        let expected = format!(
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//Syllabus Calendar Converter//EN\r\n\
             CALSCALE:GREGORIAN\r\n\
             METHOD:PUBLISH\r\n\
             BEGIN:VEVENT\r\n\
             UID:{}@syllabus-converter.com\r\n\
             DTSTAMP:20240901T120000Z\r\n\
             DTSTART:20241015T180000Z\r\n\
             DTEND:20241015T190000Z\r\n\
             SUMMARY:Lecture\\; intro\\, part 1\r\n\
             DESCRIPTION:Bring\\nnotes\r\n\
             LOCATION:Room 204\r\n\
             RRULE:FREQ=WEEKLY;BYDAY=TU\r\n\
             END:VEVENT\r\n\
             END:VCALENDAR\r\n",
            event.id
        );
        assert_eq!(ics, expected);
    }

    #[test]
    fn test_every_line_ends_with_crlf() {
        let ics = generate_calendar(&[all_day_final(), timed_lecture()], &options(), now());
        assert!(ics.ends_with("\r\n"));
        assert_eq!(ics.matches('\n').count(), ics.matches("\r\n").count());
    }

    #[test]
    fn test_empty_collection_is_valid_shell() {
        let ics = generate_calendar(&[], &options(), now());
        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Syllabus Calendar Converter//EN\r\n\
             CALSCALE:GREGORIAN\r\nMETHOD:PUBLISH\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_custom_product_id_and_uid_domain() {
        let options = CalendarOptions {
            product_id: "-//Example U//Registrar//EN".to_string(),
            uid_domain: "example.edu".to_string(),
            ..options()
        };
        let event = all_day_final();
        let ics = generate_calendar(&[event.clone()], &options, now());
        assert!(ics.contains("PRODID:-//Example U//Registrar//EN\r\n"));
        assert!(ics.contains(&format!("UID:{}@example.edu\r\n", event.id)));
    }

    #[test]
    fn test_output_is_readable_by_icalendar_parser() {
        use icalendar::parser::{read_calendar, unfold};

        let ics = generate_calendar(&[all_day_final(), timed_lecture()], &options(), now());
        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).expect("generated ICS should parse");

        let vevents: Vec<_> = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect();
        assert_eq!(vevents.len(), 2);

        let dtstart = vevents[0].find_prop("DTSTART").expect("DTSTART");
        assert_eq!(dtstart.val.as_ref(), "20241015");
        let rrule = vevents[1].find_prop("RRULE").expect("RRULE");
        assert_eq!(rrule.val.as_ref(), "FREQ=WEEKLY;BYDAY=TU");
    }
}
