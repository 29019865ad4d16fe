//! CLI module for retake
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;
pub mod completions;
pub mod view;

pub use args::{Cli, Commands, ConfigCommand, SimulateArgs};
