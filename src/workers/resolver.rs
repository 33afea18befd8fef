// src/workers/resolver.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::env::{EnvSource, ProcessEnv, OMP_NUM_THREADS, PBS_NODEFILE};
use crate::fs::{FileSystem, RealFileSystem};
use crate::workers::node_list::{count_distinct_nodes, NodeList};

/// Threads per node when `OMP_NUM_THREADS` is unset or unusable.
pub const DEFAULT_THREADS_PER_NODE: u32 = 8;

/// Decides how many MPI ranks to request for a pipeline step.
///
/// Resolution order:
/// 1. distinct nodes in `$PBS_NODEFILE` × threads-per-node
/// 2. explicit node count × threads-per-node
/// 3. threads-per-node alone
///
/// Resolution never fails; every unusable hint falls through to the next
/// branch.
#[derive(Debug, Clone)]
pub struct WorkerCountResolver {
    env: Arc<dyn EnvSource>,
    fs: Arc<dyn FileSystem>,
}

impl WorkerCountResolver {
    pub fn new(env: Arc<dyn EnvSource>, fs: Arc<dyn FileSystem>) -> Self {
        Self { env, fs }
    }

    /// Resolver reading the real process environment and filesystem.
    pub fn from_process() -> Self {
        Self::new(Arc::new(ProcessEnv), Arc::new(RealFileSystem))
    }

    /// Threads per node from `OMP_NUM_THREADS`, defaulting to 8.
    ///
    /// Zero and unparsable values are treated like an unset variable so the
    /// resulting worker count stays positive.
    pub fn threads_per_node(&self) -> u32 {
        let Some(raw) = self.env.var(OMP_NUM_THREADS) else {
            return DEFAULT_THREADS_PER_NODE;
        };

        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                warn!(
                    value = %raw,
                    default = DEFAULT_THREADS_PER_NODE,
                    "ignoring unusable {OMP_NUM_THREADS}"
                );
                DEFAULT_THREADS_PER_NODE
            }
        }
    }

    /// Inspect `$PBS_NODEFILE`.
    pub fn probe_node_list(&self) -> NodeList {
        let Some(path) = self.env.var(PBS_NODEFILE) else {
            return NodeList::Unavailable(format!("{PBS_NODEFILE} is not set"));
        };

        match self.fs.read_to_string(Path::new(&path)) {
            Ok(contents) => match count_distinct_nodes(&contents) {
                0 => NodeList::Unavailable(format!("node file {path} lists no nodes")),
                n => NodeList::Available(n),
            },
            Err(err) => NodeList::Unavailable(format!("{err:#}")),
        }
    }

    /// Number of worker processes to request.
    ///
    /// An explicit node count of `Some(0)` is treated exactly like `None`.
    pub fn resolve(&self, explicit_nodes: Option<u32>) -> u32 {
        let threads = self.threads_per_node();

        let np = match self.probe_node_list() {
            NodeList::Available(nodes) => {
                debug!(nodes, threads, "worker count from scheduler node file");
                saturating_workers(nodes as u64, threads)
            }
            NodeList::Unavailable(reason) => {
                debug!(%reason, "scheduler node file unavailable");
                match explicit_nodes {
                    Some(nodes) if nodes > 0 => {
                        debug!(nodes, threads, "worker count from explicit node count");
                        saturating_workers(nodes as u64, threads)
                    }
                    _ => threads,
                }
            }
        };

        debug!(np, "resolved worker count");
        np
    }
}

fn saturating_workers(nodes: u64, threads: u32) -> u32 {
    u32::try_from(nodes.saturating_mul(threads as u64)).unwrap_or(u32::MAX)
}
