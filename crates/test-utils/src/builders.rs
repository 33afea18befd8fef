#![allow(dead_code)]

use std::collections::BTreeMap;

use mpiflow::config::{ConfigSection, PipelineFile, RawPipelineFile, StepConfig, TaskSpec};
use mpiflow::tasks::{EncodeParams, GridAndStackParams, StackParams};

/// Builder for `PipelineFile` to simplify test setup.
pub struct PipelineFileBuilder {
    config: RawPipelineFile,
}

impl PipelineFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawPipelineFile {
                config: ConfigSection::default(),
                step: BTreeMap::new(),
            },
        }
    }

    pub fn with_step(mut self, name: &str, task: TaskSpec) -> Self {
        self.config
            .step
            .insert(name.to_string(), StepConfig { np: None, task });
        self
    }

    pub fn with_step_np(mut self, name: &str, np: u32, task: TaskSpec) -> Self {
        self.config
            .step
            .insert(name.to_string(), StepConfig { np: Some(np), task });
        self
    }

    pub fn nodes(mut self, nodes: u32) -> Self {
        self.config.config.nodes = Some(nodes);
        self
    }

    pub fn launcher(mut self, launcher: &str) -> Self {
        self.config.config.launcher = launcher.to_string();
        self
    }

    pub fn build(self) -> PipelineFile {
        PipelineFile::try_from(self.config).expect("Failed to build valid pipeline from builder")
    }
}

impl Default for PipelineFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode step over `shots` with a small 2-D output grid.
pub fn encode_params(outputs: &[&str], shots: &[&str]) -> EncodeParams {
    EncodeParams {
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        shot_gathers: shots.iter().map(|s| s.to_string()).collect(),
        encoding: "encoding".to_string(),
        eprefix: "enc".to_string(),
        dprefix: "dat".to_string(),
        nx: 200,
        ox: 0.0,
        dx: 12.5,
        ny: 1,
        oy: 0.0,
        dy: 1.0,
        custom: String::new(),
    }
}

/// Grid-and-stack step with a 3-D output cube.
pub fn grid_and_stack_params(output: &str, files: &[&str]) -> GridAndStackParams {
    GridAndStackParams {
        output: output.to_string(),
        files: files.iter().map(|s| s.to_string()).collect(),
        fprefix: "dat".to_string(),
        nf: files.len() as i64,
        of: 0,
        jf: 1,
        nx: 200,
        ox: 0.0,
        dx: 12.5,
        ny: 100,
        oy: 5.0,
        dy: 25.0,
        nz: 500,
        oz: 0.5,
        dz: 0.004,
        custom: String::new(),
    }
}

pub fn stack_params(output: &str, fprefix: &str, nf: i64, of: i64, jf: i64) -> StackParams {
    StackParams {
        output: output.to_string(),
        fprefix: fprefix.to_string(),
        nf,
        of,
        jf,
        custom: String::new(),
    }
}
