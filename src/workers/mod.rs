// src/workers/mod.rs

//! Worker-count resolution.
//!
//! - [`node_list`] parses job-scheduler node files into a distinct node count.
//! - [`resolver`] combines that count with `OMP_NUM_THREADS` and an optional
//!   explicit node count into the `-np` value handed to the launcher.

pub mod node_list;
pub mod resolver;

pub use node_list::{count_distinct_nodes, NodeList};
pub use resolver::{WorkerCountResolver, DEFAULT_THREADS_PER_NODE};
