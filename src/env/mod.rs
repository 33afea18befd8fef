// src/env/mod.rs

//! Read-only access to process environment variables.
//!
//! The resolver and locator take an [`EnvSource`] instead of calling
//! `std::env::var` directly, so tests can pin `OMP_NUM_THREADS`,
//! `PBS_NODEFILE` and `PATH` without mutating the real environment.

use std::fmt::Debug;

pub mod mock;

/// Threads each MPI rank may use; also the per-node worker multiplier.
pub const OMP_NUM_THREADS: &str = "OMP_NUM_THREADS";

/// Path of the PBS/Torque node file listing allocated compute nodes.
pub const PBS_NODEFILE: &str = "PBS_NODEFILE";

/// Executable search path.
pub const PATH: &str = "PATH";

pub trait EnvSource: Send + Sync + Debug {
    /// Value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// Implementation backed by the real process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
