use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Container suffix every on-disk artifact prefix must carry.
pub const ARTIFACT_SUFFIX: &str = ".rsf";

/// Execution flags attached to every registered step.
///
/// Both values are fixed for the MPI tools: they read their inputs by name,
/// and their stdout is diagnostic chatter rather than artifact content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecFlags {
    /// Whether the build engine should pipe an input artifact into stdin.
    pub feed_stdin: bool,
    /// Whether stdout is a build log instead of the output artifact.
    pub capture_stdout_as_log: bool,
}

impl ExecFlags {
    pub const MPI: ExecFlags = ExecFlags {
        feed_stdin: false,
        capture_stdout_as_log: true,
    };
}

impl Default for ExecFlags {
    fn default() -> Self {
        ExecFlags::MPI
    }
}

/// How the registered plan is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// `[task.<name>]` TOML that a DAG runner can execute.
    Toml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Toml => f.write_str("toml"),
        }
    }
}
