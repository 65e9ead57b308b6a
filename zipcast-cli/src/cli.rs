use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use std::{io::IsTerminal, process::ExitCode};
use zipcast_core::{
    Config, ForecastOrchestrator, Mode, ModeStore, Notification, NotificationSink, QueryPhase,
    Severity, TomlFileStore,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "zipcast", version, about = "Weather forecast by US zip code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the hourly and daily forecast for a zip code.
    Show {
        /// US postal code, e.g. "10001".
        zip: String,

        /// Use this mode for one query without changing the saved one.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,
    },

    /// Show or change where forecast data comes from.
    Mode {
        /// "direct" or "backend". Prompts when omitted on a terminal.
        #[arg(value_parser = parse_mode)]
        mode: Option<Mode>,

        /// Switch to the other mode.
        #[arg(long, conflicts_with = "mode")]
        toggle: bool,
    },

    /// Configure the backend service URL.
    Configure,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::try_from(value).map_err(|e| e.to_string())
}

/// Prints notifications: info to stdout, errors to stderr.
struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!("{}: {}", notification.title, notification.description),
            Severity::Error => {
                eprintln!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show { zip, mode } => show(&zip, mode).await,
            Command::Mode { mode, toggle } => {
                select_mode(mode, toggle).map(|()| ExitCode::SUCCESS)
            }
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
        }
    }
}

fn mode_store() -> anyhow::Result<ModeStore<TomlFileStore>> {
    Ok(ModeStore::load(TomlFileStore::default_location()?))
}

async fn show(zip: &str, mode_override: Option<Mode>) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let mode = match mode_override {
        Some(mode) => mode,
        None => mode_store()?.get_mode(),
    };
    tracing::debug!(%mode, overridden = mode_override.is_some(), "mode resolved");

    let mut orchestrator = ForecastOrchestrator::new(&config, Box::new(TerminalSink))?;
    orchestrator.query(zip, mode).await;

    match forecast_output(&orchestrator, mode) {
        Some(text) => {
            println!();
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        // The sink has already told the user what went wrong.
        None => Ok(ExitCode::FAILURE),
    }
}

/// Rendered tables for the last query, `None` unless it succeeded.
fn forecast_output(orchestrator: &ForecastOrchestrator, mode: Mode) -> Option<String> {
    match (orchestrator.phase(), orchestrator.schedule()) {
        (QueryPhase::Success, Some(schedule)) => {
            Some(render::schedule(orchestrator.location(), mode, schedule))
        }
        _ => None,
    }
}

fn select_mode(mode: Option<Mode>, toggle: bool) -> anyhow::Result<()> {
    let mut store = mode_store()?;

    let next = if toggle {
        Some(store.get_mode().toggled())
    } else if mode.is_some() {
        mode
    } else if std::io::stdin().is_terminal() {
        let current = store.get_mode();
        let options = Mode::all().to_vec();
        let start = options.iter().position(|m| *m == current).unwrap_or(0);
        Some(
            Select::new("Fetch weather data via:", options)
                .with_starting_cursor(start)
                .prompt()
                .context("Mode selection cancelled")?,
        )
    } else {
        None
    };

    if let Some(mode) = next {
        store
            .set_mode(mode)
            .context("Failed to save the selected mode")?;
    }

    println!("Mode: {}", describe(store.get_mode()));
    Ok(())
}

fn describe(mode: Mode) -> String {
    match mode {
        Mode::Direct => format!("{mode} (Nominatim + Open-Meteo, called directly)"),
        Mode::Backend => format!("{mode} (via the backend service)"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Backend service URL:")
        .with_default(&config.endpoints.backend_url)
        .prompt()
        .context("Configuration cancelled")?;

    config.set_backend_url(&url)?;
    config.save()?;

    println!(
        "Saved backend URL {} to {}",
        config.endpoints.backend_url,
        Config::config_file_path()?.display()
    );
    Ok(())
}
