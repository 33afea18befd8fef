// src/tasks/mod.rs

//! Build-step builders for the MPI encode/stack tools.
//!
//! Every builder follows the same shape:
//! 1. normalize its artifact prefixes,
//! 2. ask the [`CommandLocator`](crate::locate::CommandLocator) for the
//!    `mpiexec -np N ... <tool>` prefix,
//! 3. append the tool's `key=value` parameter block,
//! 4. register exactly one step with the build engine.
//!
//! The worker count is passed in by the caller; see
//! [`WorkerCountResolver`](crate::workers::WorkerCountResolver).

pub mod encode;
pub mod grid_stack;
pub mod stack;

pub use encode::{encode, EncodeParams};
pub use grid_stack::{grid_and_stack, GridAndStackParams};
pub use stack::{stack, stack_inputs, StackParams};

/// Shot-encoding tool.
pub const ENCODE_TOOL: &str = "sfbigmpiencode";

/// Relocating stacker for files on different cubes.
pub const GRID_STACK_TOOL: &str = "sfbigmpistack";

/// Stacker for files sharing one cube.
pub const STACK_TOOL: &str = "sfmpistack";

/// Placeholder for the first input, substituted by the build engine.
pub const FIRST_SOURCE: &str = "${SOURCES[0]}";
