//! retake - Countdown-driven clip recording with instant review
//!
//! Entry point for the retake CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use retake::cli::{Cli, Commands};
use retake::config::Settings;

fn init_logging(verbose: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            retake::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(cli.verbose, &settings.general.log_level);

            // Execute command
            match command {
                Commands::Simulate(args) => {
                    retake::cli::commands::simulate(&settings, args).await?;
                }
                Commands::Status { json } => {
                    retake::cli::commands::show_status(&settings, json)?;
                }
                Commands::Config(config_cmd) => {
                    retake::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
