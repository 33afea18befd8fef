// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::locate::DEFAULT_LAUNCHER;
use crate::tasks::{EncodeParams, GridAndStackParams, StackParams};

/// Pipeline file as deserialized, before validation.
///
/// ```toml
/// [config]
/// launcher = "mpiexec"
/// nodes = 2
///
/// [step.stacked]
/// kind = "stack"
/// output = "stacked"
/// fprefix = "shot%03d"
/// nf = 3
/// of = 10
/// jf = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// All steps from `[step.<name>]`, keyed by step name.
    #[serde(default)]
    pub step: BTreeMap<String, StepConfig>,
}

/// Validated pipeline file. Build with `PipelineFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct PipelineFile {
    pub config: ConfigSection,
    pub step: BTreeMap<String, StepConfig>,
}

impl PipelineFile {
    pub(crate) fn new_unchecked(config: ConfigSection, step: BTreeMap<String, StepConfig>) -> Self {
        Self { config, step }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Parallel launcher binary, looked up on `$PATH`.
    #[serde(default = "default_launcher")]
    pub launcher: String,

    /// Explicit node count used when no scheduler node file is available.
    #[serde(default)]
    pub nodes: Option<u32>,
}

fn default_launcher() -> String {
    DEFAULT_LAUNCHER.to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            launcher: default_launcher(),
            nodes: None,
        }
    }
}

/// `[step.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Worker count for this step; resolved from the environment if `None`.
    #[serde(default)]
    pub np: Option<u32>,

    #[serde(flatten)]
    pub task: TaskSpec,
}

/// Which tool a step runs, selected by `kind = "..."`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskSpec {
    Encode(EncodeParams),
    GridAndStack(GridAndStackParams),
    Stack(StackParams),
}

impl TaskSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            TaskSpec::Encode(_) => "encode",
            TaskSpec::GridAndStack(_) => "grid_and_stack",
            TaskSpec::Stack(_) => "stack",
        }
    }

    /// Artifacts the step declares as outputs.
    pub fn outputs(&self) -> Vec<&str> {
        match self {
            TaskSpec::Encode(p) => p.outputs.iter().map(String::as_str).collect(),
            TaskSpec::GridAndStack(p) => vec![p.output.as_str()],
            TaskSpec::Stack(p) => vec![p.output.as_str()],
        }
    }
}
