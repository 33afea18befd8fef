use mpiflow::engine::{BuildEngine, TaskDescriptor};
use mpiflow::errors::{MpiflowError, Result};

/// A fake build engine that:
/// - records every descriptor it receives
/// - optionally rejects every registration, to check error propagation.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub registered: Vec<TaskDescriptor>,
    reject_with: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            registered: Vec::new(),
            reject_with: Some(reason.to_string()),
        }
    }

    /// The only registered step; panics unless exactly one was registered.
    pub fn single(&self) -> &TaskDescriptor {
        assert_eq!(
            self.registered.len(),
            1,
            "expected exactly one registered step, got {:?}",
            self.registered
        );
        &self.registered[0]
    }
}

impl BuildEngine for RecordingEngine {
    fn register(&mut self, step: TaskDescriptor) -> Result<()> {
        if let Some(reason) = &self.reject_with {
            return Err(MpiflowError::ConfigError(reason.clone()));
        }
        self.registered.push(step);
        Ok(())
    }
}
