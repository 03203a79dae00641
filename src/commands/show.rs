use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use syllabus_core::config::SyllabusConfig;
use syllabus_core::ics::parse_calendar;

use crate::render::{Render, pluralize};

pub fn run(config: &SyllabusConfig, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let events = parse_calendar(&content, config.zone()?)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    println!("{}", path.display().dimmed());

    if events.is_empty() {
        println!("   {}", "No events".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("   {}", event.render());
        if !event.description.is_empty() {
            println!("      {}", event.description.dimmed());
        }
    }

    println!();
    println!("{} {}", events.len(), pluralize("event", events.len()));

    Ok(())
}
