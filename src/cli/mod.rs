//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arena")]
#[command(author, version, about = "Multi-model trading simulation arena")]
pub struct Cli {
    /// Configuration file path (defaults and environment apply without one)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the simulation
    Run(RunArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Tick interval in milliseconds (overrides config)
    #[arg(long)]
    pub tick_interval_ms: Option<u64>,

    /// Starting capital per model (overrides config)
    #[arg(long)]
    pub capital: Option<f64>,

    /// Seed for randomized strategies and leverage draws
    #[arg(long)]
    pub seed: Option<u64>,
}
