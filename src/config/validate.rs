// src/config/validate.rs

use std::collections::HashMap;

use crate::config::model::{PipelineFile, RawPipelineFile};
use crate::errors::{MpiflowError, Result};
use crate::prefix::artifact_file_name;

impl TryFrom<RawPipelineFile> for PipelineFile {
    type Error = crate::errors::MpiflowError;

    fn try_from(raw: RawPipelineFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(PipelineFile::new_unchecked(raw.config, raw.step))
    }
}

fn validate_raw_config(cfg: &RawPipelineFile) -> Result<()> {
    ensure_has_steps(cfg)?;
    validate_global_config(cfg)?;
    validate_steps(cfg)?;
    validate_unique_outputs(cfg)?;
    Ok(())
}

fn ensure_has_steps(cfg: &RawPipelineFile) -> Result<()> {
    if cfg.step.is_empty() {
        return Err(MpiflowError::ConfigError(
            "pipeline must contain at least one [step.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawPipelineFile) -> Result<()> {
    if cfg.config.launcher.trim().is_empty() {
        return Err(MpiflowError::ConfigError(
            "[config].launcher must not be empty".to_string(),
        ));
    }

    if cfg.config.nodes == Some(0) {
        return Err(MpiflowError::ConfigError(
            "[config].nodes must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_steps(cfg: &RawPipelineFile) -> Result<()> {
    for (name, step) in cfg.step.iter() {
        if step.np == Some(0) {
            return Err(MpiflowError::ConfigError(format!(
                "step '{}' has np = 0; np must be >= 1",
                name
            )));
        }

        let outputs = step.task.outputs();
        if outputs.is_empty() || outputs.iter().any(|o| o.trim().is_empty()) {
            return Err(MpiflowError::ConfigError(format!(
                "step '{}' ({}) must name at least one non-empty output",
                name,
                step.task.kind()
            )));
        }
    }
    Ok(())
}

fn validate_unique_outputs(cfg: &RawPipelineFile) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (name, step) in cfg.step.iter() {
        for output in step.task.outputs() {
            if let Some(other) = seen.insert(artifact_file_name(output), name) {
                return Err(MpiflowError::ConfigError(format!(
                    "output '{}' is produced by both step '{}' and step '{}'",
                    output, other, name
                )));
            }
        }
    }
    Ok(())
}
