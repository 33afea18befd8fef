// src/engine/mod.rs

//! Boundary to the dependency-tracking build engine.
//!
//! Task builders produce [`TaskDescriptor`]s and hand them to a
//! [`BuildEngine`]. The engine alone decides if and when a step runs; this
//! crate never executes commands.
//!
//! - [`graph`] holds [`StepGraph`], an in-memory engine that records steps
//!   and derives their dependency DAG from artifact names.
//! - [`export`] renders a recorded graph as a readable plan or as TOML for
//!   an external DAG runner.

use serde::Serialize;

use crate::command::CommandLine;
use crate::errors::Result;
use crate::types::ExecFlags;

pub mod export;
pub mod graph;

pub use export::{export_toml, render_plan};
pub use graph::StepGraph;

/// Canonical artifact name type.
pub type ArtifactName = String;

/// One build step as handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDescriptor {
    pub outputs: Vec<ArtifactName>,
    pub inputs: Vec<ArtifactName>,
    /// Fully rendered command line.
    pub command: String,
    pub flags: ExecFlags,
}

impl TaskDescriptor {
    /// Descriptor with the fixed MPI execution flags.
    pub fn new(outputs: Vec<ArtifactName>, inputs: Vec<ArtifactName>, command: &CommandLine) -> Self {
        Self {
            outputs,
            inputs,
            command: command.render(),
            flags: ExecFlags::MPI,
        }
    }

    /// Name used for diagnostics and exported task tables: the first output.
    pub fn name(&self) -> &str {
        self.outputs.first().map(String::as_str).unwrap_or("<unnamed>")
    }
}

/// Task-registration primitive of a build engine.
pub trait BuildEngine {
    /// Register one step. On error nothing is recorded.
    fn register(&mut self, step: TaskDescriptor) -> Result<()>;
}
