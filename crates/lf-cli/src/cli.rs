//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Lakeflow - a SQL transformation runner for DuckDB
#[derive(Parser, Debug)]
#[command(name = "lf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute models against the database
    Run(RunArgs),

    /// Load seed CSV files into the seeds schema
    Seed(SeedArgs),

    /// Clone all relations from one schema into another
    Clone(CloneArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Model names to run (comma-separated, default: all)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Drop and recreate incremental models
    #[arg(long)]
    pub full_refresh: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {}

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Schema to clone from (default: the project schema)
    #[arg(long)]
    pub source_schema: Option<String>,

    /// Schema to clone into
    #[arg(long)]
    pub target_schema: String,
}

/// Output formats for the run command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON run summary
    Json,
}
