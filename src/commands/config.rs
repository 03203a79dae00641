use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use syllabus_core::config::SyllabusConfig;

pub fn run(init: bool) -> Result<()> {
    let path = SyllabusConfig::config_path()?;

    if init {
        if path.exists() {
            println!("{}", format!("Config already exists at {}", path.display()).yellow());
        } else {
            SyllabusConfig::create_default_config(&path)?;
            println!("{}", format!("Created {}", path.display()).green());
        }
    }

    let config = SyllabusConfig::load_from(&path).context("Failed to load config")?;
    let zone = config.zone()?;

    if path.exists() {
        println!("{}", path.display().dimmed());
    } else {
        println!(
            "{}",
            format!("{} (not found, using defaults)", path.display()).dimmed()
        );
    }
    println!();
    print!("{}", config.to_toml()?);
    println!("{}", format!("# rendering times in {}", zone).dimmed());

    Ok(())
}
