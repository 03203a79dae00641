//! Reading syllabus text (or event drafts) from a file or stdin.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use syllabus_core::{Calendar, CalendarOptions, EventDraft};

/// Input options shared by every command that builds a calendar.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Syllabus text file, or "-" for stdin
    pub input: String,

    /// Treat the input as a JSON array of event drafts instead of syllabus text
    #[arg(long)]
    pub drafts: bool,
}

impl InputArgs {
    /// Build a calendar from the input.
    pub fn load_calendar(&self, options: CalendarOptions) -> Result<Calendar> {
        let content = read_source(&self.input)?;
        calendar_from_content(&content, self.drafts, options)
    }
}

pub fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}

fn calendar_from_content(content: &str, drafts: bool, options: CalendarOptions) -> Result<Calendar> {
    if !drafts {
        return Ok(Calendar::from_text(content, options));
    }

    let drafts: Vec<EventDraft> =
        serde_json::from_str(content).context("Failed to parse event drafts JSON")?;

    let mut calendar = Calendar::with_options(options);
    calendar.add_events(drafts);
    Ok(calendar)
}
