use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;
use syllabus_core::Event;
use syllabus_core::config::SyllabusConfig;

use super::TERM_DAYS;
use crate::input::InputArgs;
use crate::render::{Render, pluralize};

pub fn run(
    config: &SyllabusConfig,
    input: &InputArgs,
    json: bool,
    occurrences: Option<u16>,
    until: Option<NaiveDate>,
) -> Result<()> {
    let calendar = input.load_calendar(config.calendar_options()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(calendar.events())?);
        return Ok(());
    }

    if calendar.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in calendar.events() {
        println!("{}", event.render());

        if let Some(limit) = occurrences {
            for date in upcoming(event, until, limit)? {
                println!("   {}", date.format("%a %Y-%m-%d %H:%M").dimmed());
            }
        }
    }

    let count = calendar.count();
    println!();
    println!("{}", format!("{} {}", count, pluralize("event", count)).green());

    Ok(())
}

/// Dates of a recurring event up to `until` (one term past its start by default).
fn upcoming(event: &Event, until: Option<NaiveDate>, limit: u16) -> Result<Vec<NaiveDateTime>> {
    let Some(recurrence) = event.recurrence else {
        return Ok(Vec::new());
    };

    let until = until.unwrap_or_else(|| event.start.date() + Duration::days(TERM_DAYS));
    Ok(recurrence.occurrences(event.start, until, limit)?)
}
