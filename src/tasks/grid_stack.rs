// src/tasks/grid_stack.rs

use serde::Deserialize;
use tracing::info;

use crate::command::ParamValue;
use crate::engine::{BuildEngine, TaskDescriptor};
use crate::errors::Result;
use crate::locate::CommandLocator;
use crate::prefix::ArtifactPrefix;
use crate::tasks::GRID_STACK_TOOL;

/// Parameters of a grid-and-stack step.
///
/// Input files need not share a cube; the tool relocates each into the
/// output grid described by the `n*/o*/d*` axes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridAndStackParams {
    /// Stacked output; also the `oname` handed to the tool.
    pub output: String,
    #[serde(default)]
    pub files: Vec<String>,
    /// Input file-name prefix (the encode step's `dprefix`).
    pub fprefix: String,

    pub nf: i64,
    pub of: i64,
    pub jf: i64,

    pub nx: i64,
    pub ox: f64,
    pub dx: f64,
    pub ny: i64,
    pub oy: f64,
    pub dy: f64,
    pub nz: i64,
    pub oz: f64,
    pub dz: f64,

    #[serde(default)]
    pub custom: String,
}

/// Register an `sfbigmpistack` step.
pub fn grid_and_stack(
    engine: &mut dyn BuildEngine,
    locator: &CommandLocator,
    np: u32,
    params: &GridAndStackParams,
) -> Result<()> {
    let fprefix = ArtifactPrefix::new(&params.fprefix);
    let oname = ArtifactPrefix::new(&params.output);

    let cmd = locator
        .build_prefix(np, GRID_STACK_TOOL, &params.custom)?
        .param("nx", params.nx)
        .param("ny", params.ny)
        .param("nz", params.nz)
        .param("ox", params.ox)
        .param("oy", params.oy)
        .param("oz", params.oz)
        .param("dx", params.dx)
        .param("dy", params.dy)
        .param("dz", params.dz)
        .param("nf", params.nf)
        .param("of", params.of)
        .param("jf", params.jf)
        .param("prefix", ParamValue::Quoted(fprefix.into_string()))
        .param("oname", ParamValue::Quoted(oname.into_string()));

    info!(
        output = %params.output,
        files = params.files.len(),
        np,
        "registering grid-and-stack step"
    );

    engine.register(TaskDescriptor::new(
        vec![params.output.clone()],
        params.files.clone(),
        &cmd,
    ))
}
