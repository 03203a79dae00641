use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use syllabus_core::Calendar;
use syllabus_core::config::SyllabusConfig;

use crate::input::InputArgs;
use crate::render::pluralize;

pub fn run(
    config: &SyllabusConfig,
    input: &InputArgs,
    output: Option<PathBuf>,
    to_stdout: bool,
) -> Result<()> {
    let calendar = input.load_calendar(config.calendar_options()?)?;

    if to_stdout {
        print!("{}", calendar.render());
        return Ok(());
    }

    if calendar.is_empty() {
        println!("{}", "No events found, writing an empty calendar".yellow());
    }

    let path = output.unwrap_or_else(|| config.output_path());
    write_calendar(&calendar, &path)?;

    let count = calendar.count();
    println!(
        "{}",
        format!("Wrote {} {} to {}", count, pluralize("event", count), path.display()).green()
    );

    Ok(())
}

fn write_calendar(calendar: &Calendar, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, calendar.render())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), events = calendar.count(), "wrote calendar");
    Ok(())
}
