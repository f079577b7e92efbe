use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod app;
mod config;
mod logging;
mod tour;
mod ui;

use app::App;
use config::Config;
use tour::TourDefinition;

#[derive(Parser)]
#[command(name = "tourguide")]
#[command(about = "Guided onboarding tours for ratatui applications")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tour definition file
    Check {
        /// Path to a tour definition JSON file
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Check { file }) => {
            let _logging = logging::init_logging(&config, false, cli.debug)?;
            check_definition(&file)
        }
        None => {
            let logging = logging::init_logging(&config, true, cli.debug)?;
            if let Some(path) = &logging.log_file_path {
                tracing::info!(path = %path.display(), "logging to file");
            }

            let mut app = App::new(config)?;
            app.run()
        }
    }
}

fn check_definition(path: &str) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tour definition {path}"))?;
    let definition = TourDefinition::from_json(&json)
        .with_context(|| format!("Invalid tour definition {path}"))?;

    println!(
        "{}: {} step(s), ok",
        definition.name.as_deref().unwrap_or(path),
        definition.steps.len()
    );
    for (i, step) in definition.steps.iter().enumerate() {
        let transition = step
            .transition
            .as_ref()
            .map(|t| format!(" -> {}", t.route))
            .unwrap_or_default();
        println!("  {i}: {}{transition}", step.target);
    }
    Ok(())
}
