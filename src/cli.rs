// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::OutputFormat;

/// Command-line arguments for `mpiflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mpiflow",
    version,
    about = "Turn an MPI seismic pipeline definition into build steps.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Mpiflow.toml")]
    pub config: String,

    /// Explicit node count, used when `$PBS_NODEFILE` is unavailable.
    ///
    /// Overrides `[config].nodes`.
    #[arg(long, value_name = "N")]
    pub nodes: Option<u32>,

    /// Print the resolved worker count and exit. Does not read the config.
    #[arg(long)]
    pub print_np: bool,

    /// Parse + validate, list the steps, but don't resolve executables.
    #[arg(long)]
    pub dry_run: bool,

    /// How to print the registered plan.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MPIFLOW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
