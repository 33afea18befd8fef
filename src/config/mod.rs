// src/config/mod.rs

//! Pipeline definition file (`Mpiflow.toml`).
//!
//! - [`model`] holds the serde types.
//! - [`loader`] reads TOML from disk.
//! - [`validate`] turns a [`RawPipelineFile`] into a checked [`PipelineFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigSection, PipelineFile, RawPipelineFile, StepConfig, TaskSpec};
