//! Static pattern tables for the extractor.
//!
//! Each category is an ordered table of `(regex, builder)` pairs. Order is
//! precedence: the extractor walks the tables front to back, so reordering an
//! entry changes what gets extracted.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Weekday};
use regex::{Captures, Regex};

use crate::error::{SyllabusError, SyllabusResult};
use crate::recurrence::Recurrence;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Words that mark the start of an event title, checked in this order.
pub const EVENT_KEYWORDS: [&str; 18] = [
    "exam",
    "test",
    "quiz",
    "assignment",
    "homework",
    "project",
    "due",
    "class",
    "lecture",
    "lab",
    "seminar",
    "workshop",
    "meeting",
    "midterm",
    "final",
    "presentation",
    "discussion",
    "review",
];

pub struct DateFormat {
    pub name: &'static str,
    pub regex: Regex,
    pub build: fn(&Captures) -> SyllabusResult<NaiveDate>,
}

pub struct TimeFormat {
    pub name: &'static str,
    pub regex: Regex,
    /// `None` for matches that look like a time but are out of range.
    pub build: fn(&Captures) -> Option<NaiveTime>,
}

pub struct LocationPattern {
    pub name: &'static str,
    pub regex: Regex,
    pub build: fn(&Captures) -> Option<String>,
}

pub struct RecurrencePattern {
    pub name: &'static str,
    pub regex: Regex,
    pub build: fn(&Captures) -> Option<Recurrence>,
}

pub static DATE_FORMATS: LazyLock<Vec<DateFormat>> = LazyLock::new(|| {
    let months = alternation(&MONTH_NAMES);
    vec![
        DateFormat {
            name: "month/day/year",
            regex: compile(r"([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{4})"),
            build: numeric_date,
        },
        DateFormat {
            name: "month day, year",
            regex: compile(&format!(r"(?i)({months})\s+([0-9]{{1,2}}),?\s+([0-9]{{4}})")),
            build: month_first_date,
        },
        DateFormat {
            name: "day month year",
            regex: compile(&format!(r"(?i)([0-9]{{1,2}})\s+({months})\s+([0-9]{{4}})")),
            build: day_first_date,
        },
    ]
});

pub static TIME_FORMATS: LazyLock<Vec<TimeFormat>> = LazyLock::new(|| {
    vec![
        TimeFormat {
            name: "hour:minute am/pm",
            regex: compile(r"(?i)([0-9]{1,2}):([0-9]{2})\s*(am|pm)"),
            build: hour_minute_time,
        },
        TimeFormat {
            name: "hour am/pm",
            regex: compile(r"(?i)\b([0-9]{1,2})\s*(am|pm)\b"),
            build: hour_only_time,
        },
    ]
});

pub static LOCATION_PATTERNS: LazyLock<Vec<LocationPattern>> = LazyLock::new(|| {
    vec![
        LocationPattern {
            name: "room",
            regex: compile(r"(?i)\broom\s+(\w+)"),
            build: capture_or_match,
        },
        LocationPattern {
            name: "building",
            regex: compile(r"(?i)\bbuilding\s+(\w+)"),
            build: capture_or_match,
        },
        LocationPattern {
            name: "location label",
            regex: compile(r"(?i)\blocation:\s*(.+)"),
            build: capture_or_match,
        },
        LocationPattern {
            name: "at place",
            regex: compile(r"\b(?i:at)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)"),
            build: capture_or_match,
        },
    ]
});

pub static RECURRENCE_PATTERNS: LazyLock<Vec<RecurrencePattern>> = LazyLock::new(|| {
    let weekdays: Vec<&str> = WEEKDAY_NAMES.iter().map(|(name, _)| *name).collect();
    vec![RecurrencePattern {
        name: "every weekday",
        regex: compile(&format!(r"(?i)\bevery\s+({})\b", weekdays.join("|"))),
        build: weekly_on_named_day,
    }]
});

/// One whole-word, case-insensitive matcher per entry of `EVENT_KEYWORDS`.
pub static KEYWORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    EVENT_KEYWORDS
        .iter()
        .map(|keyword| (*keyword, compile(&format!(r"(?i)\b{keyword}\b"))))
        .collect()
});

/// Whether any date format matches somewhere in `text`.
pub fn has_date(text: &str) -> bool {
    DATE_FORMATS.iter().any(|format| format.regex.is_match(text))
}

/// Convert a 12-hour clock reading to 24-hour.
///
/// `12 AM` is midnight and `12 PM` is noon.
pub fn to_24_hour(hour: u32, pm: bool) -> u32 {
    match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern table regex is valid")
}

fn alternation(names: &[&str]) -> String {
    names.join("|")
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Numeric group as a number; 0 (never a valid month/day) when it won't parse.
fn number(caps: &Captures, index: usize) -> u32 {
    group(caps, index).parse().unwrap_or(0)
}

fn month_number(name: &str) -> u32 {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|month| *month == lower)
        .map_or(0, |index| index as u32 + 1)
}

fn make_date(year: i32, month: u32, day: u32) -> SyllabusResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(SyllabusError::InvalidDate { year, month, day })
}

fn numeric_date(caps: &Captures) -> SyllabusResult<NaiveDate> {
    make_date(number(caps, 3) as i32, number(caps, 1), number(caps, 2))
}

fn month_first_date(caps: &Captures) -> SyllabusResult<NaiveDate> {
    make_date(
        number(caps, 3) as i32,
        month_number(group(caps, 1)),
        number(caps, 2),
    )
}

fn day_first_date(caps: &Captures) -> SyllabusResult<NaiveDate> {
    make_date(
        number(caps, 3) as i32,
        month_number(group(caps, 2)),
        number(caps, 1),
    )
}

fn is_pm(meridiem: &str) -> bool {
    meridiem.eq_ignore_ascii_case("pm")
}

fn twelve_hour_time(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if hour > 12 {
        return None;
    }
    NaiveTime::from_hms_opt(to_24_hour(hour, is_pm(meridiem)), minute, 0)
}

fn hour_minute_time(caps: &Captures) -> Option<NaiveTime> {
    twelve_hour_time(number(caps, 1), number(caps, 2), group(caps, 3))
}

fn hour_only_time(caps: &Captures) -> Option<NaiveTime> {
    twelve_hour_time(number(caps, 1), 0, group(caps, 2))
}

fn capture_or_match(caps: &Captures) -> Option<String> {
    caps.get(1)
        .filter(|m| !m.as_str().trim().is_empty())
        .or_else(|| caps.get(0))
        .map(|m| m.as_str().trim().to_string())
}

fn weekly_on_named_day(caps: &Captures) -> Option<Recurrence> {
    let name = group(caps, 1).to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|(day_name, _)| *day_name == name)
        .map(|(_, day)| Recurrence::weekly(*day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_date(format: &DateFormat, text: &str) -> Option<SyllabusResult<NaiveDate>> {
        format.regex.captures(text).map(|caps| (format.build)(&caps))
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(to_24_hour(12, false), 0);
        assert_eq!(to_24_hour(12, true), 12);
        assert_eq!(to_24_hour(1, true), 13);
        assert_eq!(to_24_hour(11, false), 11);
        assert_eq!(to_24_hour(11, true), 23);
    }

    #[test]
    fn test_numeric_date_accepts_slash_and_dash() {
        let numeric = &DATE_FORMATS[0];
        let expected = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        assert_eq!(first_date(numeric, "on 10/15/2024").unwrap().unwrap(), expected);
        assert_eq!(first_date(numeric, "on 10-15-2024").unwrap().unwrap(), expected);
        assert!(first_date(numeric, "on 2024-10-15").is_none());
    }

    #[test]
    fn test_numeric_date_rejects_impossible_day() {
        let numeric = &DATE_FORMATS[0];
        let err = first_date(numeric, "due 2/30/2024").unwrap().unwrap_err();
        assert!(matches!(
            err,
            SyllabusError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            }
        ));
    }

    #[test]
    fn test_month_first_date_is_case_insensitive() {
        let format = &DATE_FORMATS[1];
        let expected = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        assert_eq!(first_date(format, "September 3, 2024").unwrap().unwrap(), expected);
        assert_eq!(first_date(format, "SEPTEMBER 3 2024").unwrap().unwrap(), expected);
    }

    #[test]
    fn test_day_first_date() {
        let format = &DATE_FORMATS[2];
        let expected = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(first_date(format, "5 December 2024").unwrap().unwrap(), expected);
    }

    #[test]
    fn test_time_formats() {
        let hm = &TIME_FORMATS[0];
        let caps = hm.regex.captures("at 2:30pm").unwrap();
        assert_eq!((hm.build)(&caps), NaiveTime::from_hms_opt(14, 30, 0));

        let h = &TIME_FORMATS[1];
        let caps = h.regex.captures("starts 12 AM").unwrap();
        assert_eq!((h.build)(&caps), NaiveTime::from_hms_opt(0, 0, 0));

        let caps = hm.regex.captures("13:00 PM").unwrap();
        assert_eq!((hm.build)(&caps), None);
    }

    #[test]
    fn test_has_date() {
        assert!(has_date("Exam on March 3, 2025"));
        assert!(has_date("3 March 2025"));
        assert!(!has_date("Bring a calculator"));
    }

    #[test]
    fn test_keyword_patterns_match_whole_words() {
        let (_, lab) = KEYWORD_PATTERNS
            .iter()
            .find(|(keyword, _)| *keyword == "lab")
            .unwrap();
        assert!(lab.is_match("Lab 3 report"));
        assert!(!lab.is_match("Syllabus overview"));
    }

    #[test]
    fn test_weekday_recurrence_lookup_ignores_case() {
        let pattern = &RECURRENCE_PATTERNS[0];
        let caps = pattern.regex.captures("meets every tuesday").unwrap();
        assert_eq!((pattern.build)(&caps), Some(Recurrence::weekly(Weekday::Tue)));
    }
}
