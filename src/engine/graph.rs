// src/engine/graph.rs

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::engine::{BuildEngine, TaskDescriptor};
use crate::errors::{MpiflowError, Result};
use crate::prefix::artifact_file_name;

/// In-memory build engine that only records steps.
///
/// Steps are linked through artifact names: a step depends on whichever
/// step produces one of its inputs. Inputs nobody produces are source
/// files. Names are compared after suffix normalization, so `stack` and
/// `stack.rsf` are the same artifact.
#[derive(Debug, Clone, Default)]
pub struct StepGraph {
    steps: Vec<TaskDescriptor>,
    /// Normalized artifact name -> index of the producing step.
    producers: HashMap<String, usize>,
}

impl StepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered steps in registration order.
    pub fn steps(&self) -> &[TaskDescriptor] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the step producing `artifact`, if any.
    pub fn producer_of(&self, artifact: &str) -> Option<usize> {
        self.producers.get(&artifact_file_name(artifact)).copied()
    }

    /// Steps whose outputs `step` consumes, ascending and without duplicates.
    pub fn dependencies_of(&self, step: usize) -> Vec<usize> {
        let Some(desc) = self.steps.get(step) else {
            return Vec::new();
        };
        let mut deps: Vec<usize> = desc
            .inputs
            .iter()
            .filter_map(|input| self.producer_of(input))
            .collect();
        deps.sort_unstable();
        deps.dedup();
        deps
    }

    /// Steps consuming an output of `step`.
    pub fn dependents_of(&self, step: usize) -> Vec<usize> {
        (0..self.steps.len())
            .filter(|&other| self.dependencies_of(other).contains(&step))
            .collect()
    }

    /// Steps that depend only on source files.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.steps.len())
            .filter(|&idx| self.dependencies_of(idx).is_empty())
            .collect()
    }

    /// Step indices ordered so every step follows its dependencies.
    pub fn topological_order(&self) -> Vec<usize> {
        let graph = build_graph(&self.producers, self.steps.iter());
        // Registration rejects cycles, so the sort always succeeds.
        toposort(&graph, None).unwrap_or_else(|_| (0..self.steps.len()).collect())
    }
}

impl BuildEngine for StepGraph {
    fn register(&mut self, step: TaskDescriptor) -> Result<()> {
        if step.outputs.is_empty() {
            return Err(MpiflowError::EmptyStep(step.command.clone()));
        }

        let idx = self.steps.len();
        let mut producers = self.producers.clone();
        for output in &step.outputs {
            if producers.insert(artifact_file_name(output), idx).is_some() {
                return Err(MpiflowError::DuplicateOutput(output.clone()));
            }
        }

        // Edge direction: producer -> consumer.
        let graph = build_graph(&producers, self.steps.iter().chain(std::iter::once(&step)));
        if let Err(cycle) = toposort(&graph, None) {
            let culprit = if cycle.node_id() == idx {
                step.name()
            } else {
                self.steps[cycle.node_id()].name()
            };
            return Err(MpiflowError::DagCycle(format!(
                "registering '{}' creates a cycle involving step '{}'",
                step.name(),
                culprit
            )));
        }

        debug!(
            step = %step.name(),
            inputs = step.inputs.len(),
            outputs = step.outputs.len(),
            "registered build step"
        );

        self.producers = producers;
        self.steps.push(step);
        Ok(())
    }
}

fn build_graph<'a>(
    producers: &HashMap<String, usize>,
    steps: impl Iterator<Item = &'a TaskDescriptor>,
) -> DiGraphMap<usize, ()> {
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for (idx, step) in steps.enumerate() {
        graph.add_node(idx);
        for input in &step.inputs {
            if let Some(&dep) = producers.get(&artifact_file_name(input)) {
                graph.add_edge(dep, idx, ());
            }
        }
    }
    graph
}
