mod commands;
mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use syllabus_core::Provider;
use syllabus_core::config::SyllabusConfig;
use tracing_subscriber::EnvFilter;

use input::InputArgs;

#[derive(Parser)]
#[command(name = "syllabus-cal")]
#[command(about = "Turn syllabus text into calendar events, .ics files and calendar links")]
struct Cli {
    /// Log what the extractor matched and skipped
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the events found in a syllabus
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Print events as JSON
        #[arg(long)]
        json: bool,

        /// List up to N dates for each recurring event
        #[arg(long, value_name = "N")]
        occurrences: Option<u16>,

        /// Last day to expand recurring events to (e.g., "2025-05-02")
        #[arg(long, requires = "occurrences")]
        until: Option<String>,
    },
    /// Write the events as an .ics file
    Ics {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to output_file from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Print "add to calendar" links for each event
    Links {
        #[command(flatten)]
        input: InputArgs,

        /// Calendar provider, "google" or "outlook" (defaults to default_provider from config)
        #[arg(short, long)]
        provider: Option<String>,

        /// Open every link in the browser
        #[arg(long)]
        open: bool,
    },
    /// List the events in an .ics file
    Show {
        /// Path to the .ics file
        file: PathBuf,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a commented config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            json,
            occurrences,
            until,
        } => {
            let until = until.as_deref().map(parse_date).transpose()?;
            commands::extract::run(&load_config()?, &input, json, occurrences, until)
        }
        Commands::Ics {
            input,
            output,
            stdout,
        } => commands::ics::run(&load_config()?, &input, output, stdout),
        Commands::Links {
            input,
            provider,
            open,
        } => {
            let config = load_config()?;
            let provider = match provider {
                Some(name) => name.parse::<Provider>()?,
                None => config.default_provider,
            };
            commands::links::run(&config, &input, provider, open)
        }
        Commands::Show { file } => commands::show::run(&load_config()?, &file),
        Commands::Config { init } => commands::config::run(init),
    }
}

/// Logs go to stderr so `--json` and `--stdout` output stays clean.
fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(log_filter(verbose))
        .init();
}

/// `-v` forces debug; otherwise `RUST_LOG` decides, falling back to warn.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn load_config() -> Result<SyllabusConfig> {
    SyllabusConfig::load().context("Failed to load config")
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}
