// src/engine/export.rs

//! Rendering a recorded [`StepGraph`].

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::engine::{StepGraph, TaskDescriptor};
use crate::errors::{MpiflowError, Result};
use crate::prefix::artifact_file_name;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<list>SOURCES|TARGETS)\[(?P<idx>[0-9]+)\]\}|\$(?P<single>SOURCE|TARGET)\b")
        .expect("placeholder regex is valid")
});

/// Readable listing of every step in dependency order.
pub fn render_plan(graph: &StepGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "mpiflow plan ({} steps)", graph.len());

    for (pos, idx) in graph.topological_order().into_iter().enumerate() {
        let step = &graph.steps()[idx];
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}", pos + 1, step.outputs.join(", "));
        let _ = writeln!(out, "    inputs: {}", step.inputs.join(", "));

        let after: Vec<&str> = graph
            .dependencies_of(idx)
            .into_iter()
            .map(|dep| graph.steps()[dep].name())
            .collect();
        if !after.is_empty() {
            let _ = writeln!(out, "    after: {}", after.join(", "));
        }

        let _ = writeln!(out, "    cmd: {}", step.command);
        let _ = writeln!(
            out,
            "    stdin: {}, stdout: {}",
            if step.flags.feed_stdin { "first input" } else { "none" },
            if step.flags.capture_stdout_as_log { "log" } else { "first output" },
        );
    }

    out
}

#[derive(Debug, Serialize)]
struct ExportFile {
    task: BTreeMap<String, ExportTask>,
}

#[derive(Debug, Serialize)]
struct ExportTask {
    cmd: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    after: Vec<String>,
}

/// TOML task table (`[task.<name>] cmd / after`) for an external DAG runner.
///
/// Source/target placeholders are replaced by concrete file names and the
/// stdin/stdout flags become shell redirections.
pub fn export_toml(graph: &StepGraph) -> Result<String> {
    let mut task = BTreeMap::new();

    for (idx, step) in graph.steps().iter().enumerate() {
        let after = graph
            .dependencies_of(idx)
            .into_iter()
            .map(|dep| graph.steps()[dep].name().to_string())
            .collect();

        task.insert(
            step.name().to_string(),
            ExportTask {
                cmd: shell_command(step)?,
                after,
            },
        );
    }

    Ok(toml::to_string(&ExportFile { task })?)
}

/// Concrete shell command for one step.
pub fn shell_command(step: &TaskDescriptor) -> Result<String> {
    let mut cmd = expand_placeholders(step)?;

    if step.flags.feed_stdin {
        let source = step.inputs.first().ok_or_else(|| {
            MpiflowError::ConfigError(format!(
                "step '{}' reads stdin but has no inputs",
                step.name()
            ))
        })?;
        let _ = write!(cmd, " < {}", artifact_file_name(source));
    } else {
        cmd.push_str(" < /dev/null");
    }

    if !step.flags.capture_stdout_as_log {
        let _ = write!(cmd, " > {}", artifact_file_name(step.name()));
    }

    Ok(cmd)
}

/// Replace `${SOURCES[i]}`, `${TARGETS[i]}`, `$SOURCE` and `$TARGET`.
pub fn expand_placeholders(step: &TaskDescriptor) -> Result<String> {
    let mut failure = None;

    let expanded = PLACEHOLDER.replace_all(&step.command, |caps: &Captures<'_>| {
        let (names, idx) = match (caps.name("list"), caps.name("single")) {
            (Some(list), _) => {
                let idx = caps
                    .name("idx")
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .unwrap_or(usize::MAX);
                (list.as_str(), idx)
            }
            (None, Some(single)) => (single.as_str(), 0),
            (None, None) => return caps[0].to_string(),
        };

        let list = if names.starts_with("SOURCE") {
            &step.inputs
        } else {
            &step.outputs
        };

        match list.get(idx) {
            Some(name) => artifact_file_name(name),
            None => {
                failure.get_or_insert_with(|| caps[0].to_string());
                caps[0].to_string()
            }
        }
    });

    match failure {
        Some(placeholder) => Err(MpiflowError::Template(format!(
            "placeholder {placeholder} in step '{}' is out of range",
            step.name()
        ))),
        None => Ok(expanded.into_owned()),
    }
}
