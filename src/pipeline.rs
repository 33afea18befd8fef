// src/pipeline.rs

//! Registering every step of a pipeline file with a build engine.

use tracing::{debug, info};

use crate::config::model::{PipelineFile, TaskSpec};
use crate::engine::BuildEngine;
use crate::errors::Result;
use crate::locate::CommandLocator;
use crate::tasks::{encode, grid_and_stack, stack};
use crate::workers::WorkerCountResolver;

/// Register all steps of `cfg` with `engine`.
///
/// The default worker count is resolved once from the environment, using
/// `nodes_override` (CLI) or `[config].nodes` as the explicit node count.
/// Steps with their own `np` use that instead. Returns the default worker
/// count.
///
/// Stops at the first failing step; steps registered before it stay
/// registered.
pub fn register_pipeline(
    cfg: &PipelineFile,
    resolver: &WorkerCountResolver,
    locator: &CommandLocator,
    engine: &mut dyn BuildEngine,
    nodes_override: Option<u32>,
) -> Result<u32> {
    let default_np = resolver.resolve(nodes_override.or(cfg.config.nodes));
    info!(np = default_np, steps = cfg.step.len(), "registering pipeline");

    for (name, step) in cfg.step.iter() {
        let np = step.np.unwrap_or(default_np);
        debug!(step = %name, kind = step.task.kind(), np, "building step");

        match &step.task {
            TaskSpec::Encode(params) => encode(engine, locator, np, params)?,
            TaskSpec::GridAndStack(params) => grid_and_stack(engine, locator, np, params)?,
            TaskSpec::Stack(params) => stack(engine, locator, np, params)?,
        }
    }

    Ok(default_np)
}
