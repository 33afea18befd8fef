// src/tasks/stack.rs

use serde::Deserialize;
use tracing::info;

use crate::engine::{BuildEngine, TaskDescriptor};
use crate::errors::Result;
use crate::locate::CommandLocator;
use crate::prefix::{interpolate, normalize, ArtifactPrefix};
use crate::tasks::STACK_TOOL;

/// Parameters of a plain stack step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackParams {
    pub output: String,
    /// Per-file name template, e.g. `"shot%03d"`.
    pub fprefix: String,
    /// Number of files.
    pub nf: i64,
    /// Number of the first file.
    pub of: i64,
    /// Step between file numbers.
    pub jf: i64,

    #[serde(default)]
    pub custom: String,
}

/// Input artifacts `fprefix % (of + i*jf)` for `i` in `0..nf`, suffixed.
///
/// `nf <= 0` yields no inputs.
pub fn stack_inputs(fprefix: &str, nf: i64, of: i64, jf: i64) -> Result<Vec<String>> {
    (0..nf.max(0))
        .map(|i| {
            let number = of.saturating_add(i.saturating_mul(jf));
            interpolate(fprefix, number).map(|name| normalize(&name))
        })
        .collect()
}

/// Register an `sfmpistack` step.
pub fn stack(
    engine: &mut dyn BuildEngine,
    locator: &CommandLocator,
    np: u32,
    params: &StackParams,
) -> Result<()> {
    let inputs = stack_inputs(&params.fprefix, params.nf, params.of, params.jf)?;
    let fprefix = ArtifactPrefix::new(&params.fprefix);

    let cmd = locator
        .build_prefix(np, STACK_TOOL, &params.custom)?
        .param("nf", params.nf)
        .param("of", params.of)
        .param("jf", params.jf)
        .param("fprefix", fprefix.into_string())
        .param("oname", params.output.as_str());

    info!(output = %params.output, files = inputs.len(), np, "registering stack step");

    engine.register(TaskDescriptor::new(vec![params.output.clone()], inputs, &cmd))
}
