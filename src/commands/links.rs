use anyhow::Result;
use owo_colors::OwoColorize;
use syllabus_core::Provider;
use syllabus_core::config::SyllabusConfig;

use crate::input::InputArgs;

pub fn run(config: &SyllabusConfig, input: &InputArgs, provider: Provider, open_links: bool) -> Result<()> {
    let calendar = input.load_calendar(config.calendar_options()?)?;

    if calendar.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let links = calendar.provider_links(provider);

    for (event, link) in calendar.events().iter().zip(&links) {
        println!("{} {}", event.title.bold(), event.render_time().dimmed());
        println!("   {}", link);
    }

    if open_links {
        for link in &links {
            if open::that(link).is_err() {
                eprintln!("(Could not open browser automatically, use the links above)");
                break;
            }
        }
    }

    Ok(())
}
