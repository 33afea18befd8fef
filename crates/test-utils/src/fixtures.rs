use std::sync::Arc;

use mpiflow::env::mock::MockEnv;
use mpiflow::env::{OMP_NUM_THREADS, PATH, PBS_NODEFILE};
use mpiflow::fs::mock::MockFileSystem;
use mpiflow::locate::CommandLocator;
use mpiflow::tasks::{ENCODE_TOOL, GRID_STACK_TOOL, STACK_TOOL};
use mpiflow::workers::WorkerCountResolver;

/// Directory holding the fake launcher.
pub const MPI_BIN: &str = "/opt/mpi/bin";

/// Directory holding the fake seismic tools.
pub const RSF_BIN: &str = "/opt/rsf/bin";

/// Where tests put the scheduler node file.
pub const NODEFILE: &str = "/var/spool/pbs/aux/job.nodes";

/// `$PATH` listing both fake bin directories.
pub fn search_path() -> String {
    format!("{MPI_BIN}:{RSF_BIN}")
}

/// Filesystem with `mpiexec` and all three MPI tools installed.
pub fn installed_tools() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_executable(format!("{MPI_BIN}/mpiexec"));
    for tool in [ENCODE_TOOL, GRID_STACK_TOOL, STACK_TOOL] {
        fs.add_executable(format!("{RSF_BIN}/{tool}"));
    }
    fs
}

/// Environment with `$PATH` pointing at the fake bin directories.
pub fn tool_env() -> MockEnv {
    MockEnv::new().with(PATH, search_path())
}

pub fn locator(env: MockEnv, fs: MockFileSystem) -> CommandLocator {
    CommandLocator::new(Arc::new(env), Arc::new(fs))
}

/// Locator over [`tool_env`] and [`installed_tools`].
pub fn default_locator() -> CommandLocator {
    locator(tool_env(), installed_tools())
}

pub fn resolver(env: MockEnv, fs: MockFileSystem) -> WorkerCountResolver {
    WorkerCountResolver::new(Arc::new(env), Arc::new(fs))
}

/// Resolver with the given `OMP_NUM_THREADS` and node file lines.
pub fn resolver_with_nodes(threads: &str, nodes: &[&str]) -> WorkerCountResolver {
    let fs = MockFileSystem::new();
    fs.add_file(NODEFILE, nodes.concat());
    let env = MockEnv::new()
        .with(OMP_NUM_THREADS, threads)
        .with(PBS_NODEFILE, NODEFILE);
    resolver(env, fs)
}
