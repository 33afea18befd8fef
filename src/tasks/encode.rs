// src/tasks/encode.rs

use serde::Deserialize;
use tracing::info;

use crate::command::ParamValue;
use crate::engine::{BuildEngine, TaskDescriptor};
use crate::errors::Result;
use crate::locate::CommandLocator;
use crate::prefix::ArtifactPrefix;
use crate::tasks::{ENCODE_TOOL, FIRST_SOURCE};

/// Parameters of an encode step.
///
/// The encoding artifact (from `sfencodemaker`) becomes the first input and
/// is referenced positionally by the command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EncodeParams {
    /// Encoded files produced by the step.
    pub outputs: Vec<String>,
    /// Shot gathers to encode.
    #[serde(default)]
    pub shot_gathers: Vec<String>,
    /// Encoding definition artifact.
    pub encoding: String,
    /// Prefix of the encoded output files.
    pub eprefix: String,
    /// Prefix of the shot-gather data files.
    pub dprefix: String,

    pub nx: i64,
    pub ox: f64,
    pub dx: f64,
    pub ny: i64,
    pub oy: f64,
    pub dy: f64,

    /// Extra launcher flags, inserted verbatim.
    #[serde(default)]
    pub custom: String,
}

/// Register an `sfbigmpiencode` step.
pub fn encode(
    engine: &mut dyn BuildEngine,
    locator: &CommandLocator,
    np: u32,
    params: &EncodeParams,
) -> Result<()> {
    let eprefix = ArtifactPrefix::new(&params.eprefix);
    let dprefix = ArtifactPrefix::new(&params.dprefix);

    let mut inputs = Vec::with_capacity(params.shot_gathers.len() + 1);
    inputs.push(params.encoding.clone());
    inputs.extend(params.shot_gathers.iter().cloned());

    let cmd = locator
        .build_prefix(np, ENCODE_TOOL, &params.custom)?
        .param("eprefix", eprefix.into_string())
        .param("dprefix", dprefix.into_string())
        .param("encode", ParamValue::Text(FIRST_SOURCE.to_string()))
        .param("nx", params.nx)
        .param("ox", params.ox)
        .param("dx", params.dx)
        .param("ny", params.ny)
        .param("oy", params.oy)
        .param("dy", params.dy);

    info!(
        outputs = ?params.outputs,
        shots = params.shot_gathers.len(),
        np,
        "registering encode step"
    );

    engine.register(TaskDescriptor::new(params.outputs.clone(), inputs, &cmd))
}
