// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod errors;
pub mod fs;
pub mod locate;
pub mod logging;
pub mod pipeline;
pub mod prefix;
pub mod tasks;
pub mod types;
pub mod workers;

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{PipelineFile, TaskSpec};
use crate::engine::{export_toml, render_plan, StepGraph};
use crate::locate::CommandLocator;
use crate::pipeline::register_pipeline;
use crate::types::OutputFormat;
use crate::workers::WorkerCountResolver;

/// High-level entry point used by `main.rs`.
///
/// Runs [`run_with`] against the process environment, the real filesystem
/// and stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let resolver = WorkerCountResolver::from_process();
    let locator = CommandLocator::from_process();

    let mut stdout = std::io::stdout().lock();
    run_with(&args, &resolver, locator, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Everything `mpiflow` prints on stdout, written to `out`.
///
/// This wires together:
/// - worker-count resolution (`--print-np` stops here)
/// - pipeline loading and validation (`--dry-run` stops here)
/// - executable lookup and step registration into a [`StepGraph`]
/// - the plan listing or the TOML export, per `--format`
///
/// The pipeline's `[config].launcher` replaces the launcher of `locator`.
pub fn run_with(
    args: &CliArgs,
    resolver: &WorkerCountResolver,
    locator: CommandLocator,
    out: &mut impl Write,
) -> Result<()> {
    if args.print_np {
        writeln!(out, "{}", resolver.resolve(args.nodes))?;
        return Ok(());
    }

    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        write_dry_run(out, &cfg, resolver, args.nodes)?;
        return Ok(());
    }

    let locator = locator.with_launcher(cfg.config.launcher.clone());
    let mut graph = StepGraph::new();
    register_pipeline(&cfg, resolver, &locator, &mut graph, args.nodes)?;

    match args.format {
        OutputFormat::Text => write!(out, "{}", render_plan(&graph))?,
        OutputFormat::Toml => write!(out, "{}", export_toml(&graph)?)?,
    }

    Ok(())
}

/// Dry-run output: steps with their kind, worker count and outputs.
fn write_dry_run(
    out: &mut impl Write,
    cfg: &PipelineFile,
    resolver: &WorkerCountResolver,
    nodes: Option<u32>,
) -> Result<()> {
    let nodes = nodes.or(cfg.config.nodes);
    let default_np = resolver.resolve(nodes);

    writeln!(out, "mpiflow dry-run")?;
    writeln!(out, "  config.launcher = {}", cfg.config.launcher)?;
    if let Some(nodes) = nodes {
        writeln!(out, "  config.nodes = {nodes}")?;
    }
    writeln!(out, "  default np = {default_np}")?;
    writeln!(out)?;

    writeln!(out, "steps ({}):", cfg.step.len())?;
    for (name, step) in cfg.step.iter() {
        writeln!(out, "  - {name}")?;
        writeln!(out, "      kind: {}", step.task.kind())?;
        writeln!(out, "      np: {}", step.np.unwrap_or(default_np))?;
        writeln!(out, "      outputs: {:?}", step.task.outputs())?;
        match &step.task {
            TaskSpec::Encode(p) => writeln!(
                out,
                "      inputs: {} shot gathers + {}",
                p.shot_gathers.len(),
                p.encoding
            )?,
            TaskSpec::GridAndStack(p) => writeln!(out, "      inputs: {} files", p.files.len())?,
            TaskSpec::Stack(p) => writeln!(
                out,
                "      inputs: {} files from '{}'",
                p.nf.max(0),
                p.fprefix
            )?,
        }
        let custom = match &step.task {
            TaskSpec::Encode(p) => &p.custom,
            TaskSpec::GridAndStack(p) => &p.custom,
            TaskSpec::Stack(p) => &p.custom,
        };
        if !custom.trim().is_empty() {
            writeln!(out, "      custom: {custom}")?;
        }
    }

    debug!("dry-run complete (nothing registered)");
    Ok(())
}
