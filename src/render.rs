//! Colored terminal rendering for syllabus-core types.

use owo_colors::OwoColorize;
use syllabus_core::Event;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.title.bold(), self.render_time().dimmed());

        if !self.location.is_empty() {
            line.push_str(&format!(" @ {}", self.location.cyan()));
        }

        if let Some(recurrence) = self.recurrence {
            line.push_str(&format!(" {}", format!("[{}]", recurrence).yellow()));
        }

        line
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> &str {
    if count == 1 {
        word
    } else {
        match word {
            "event" => "events",
            _ => word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use syllabus_core::EventDraft;
    use syllabus_core::recurrence::Recurrence;

    #[test]
    fn test_render_includes_fields() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let event = Event::from_draft(
            EventDraft {
                title: Some("Lecture".to_string()),
                end: Some(start + chrono::Duration::minutes(50)),
                location: Some("Room 12".to_string()),
                recurrence: Some(Recurrence::weekly(Weekday::Tue)),
                ..EventDraft::new(start)
            },
            "Untitled Event",
        );

        let line = event.render();
        assert!(line.contains("Lecture"));
        assert!(line.contains("2025-01-14 10:00-10:50"));
        assert!(line.contains("Room 12"));
        assert!(line.contains("[FREQ=WEEKLY;BYDAY=TU]"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("event", 3), "events");
    }
}
