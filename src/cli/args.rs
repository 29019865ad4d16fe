//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::capture::CameraFacing;
use crate::countdown::CountdownPreset;

/// retake - Record a short clip after a countdown and review it
#[derive(Parser, Debug)]
#[command(name = "retake")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a clip with simulated devices, then review it
    Simulate(SimulateArgs),

    /// Show the recording kept for review
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Countdown before recording (defaults to the configured preset)
    #[arg(short, long, value_enum)]
    pub countdown: Option<CountdownPreset>,

    /// Camera to record with (defaults to the configured camera)
    #[arg(short, long, value_enum)]
    pub facing: Option<CameraFacing>,

    /// Switch the torch on before recording (back camera only)
    #[arg(long)]
    pub flash: bool,

    /// Seconds to record once the countdown reaches START
    #[arg(short, long, default_value = "3")]
    pub record_secs: u64,

    /// Seconds to spend on the playback screen
    #[arg(long, default_value = "5")]
    pub review_secs: u64,

    /// Release the scrubber at this fraction of the clip during review
    #[arg(long)]
    pub seek_fraction: Option<f64>,

    /// Discard the clip at the end of the review
    #[arg(long)]
    pub retake: bool,

    /// Print screen updates as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
