// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpiflowError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A launcher or target binary could not be found. Always fatal.
    #[error("executable '{name}' not found on PATH ({} directories searched)", .searched.len())]
    ExecutableNotFound { name: String, searched: Vec<PathBuf> },

    #[error("Invalid file name template: {0}")]
    Template(String),

    #[error("Step has no outputs: {0}")]
    EmptyStep(String),

    #[error("Output '{0}' is already produced by another step")]
    DuplicateOutput(String),

    #[error("Cycle detected in step graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MpiflowError>;
