// src/locate.rs

//! Executable lookup and the parallel-launch prefix.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::command::CommandLine;
use crate::env::{EnvSource, ProcessEnv, PATH};
use crate::errors::{MpiflowError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Launcher used when none is configured.
pub const DEFAULT_LAUNCHER: &str = "mpiexec";

/// Resolves the launcher and target binaries on `$PATH`.
#[derive(Debug, Clone)]
pub struct CommandLocator {
    env: Arc<dyn EnvSource>,
    fs: Arc<dyn FileSystem>,
    launcher: String,
}

impl CommandLocator {
    pub fn new(env: Arc<dyn EnvSource>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            env,
            fs,
            launcher: DEFAULT_LAUNCHER.to_string(),
        }
    }

    pub fn from_process() -> Self {
        Self::new(Arc::new(ProcessEnv), Arc::new(RealFileSystem))
    }

    /// Use a different launcher binary (e.g. `mpirun` or `srun`).
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    pub fn launcher(&self) -> &str {
        &self.launcher
    }

    /// Directories of `$PATH` in search order. Empty entries mean the
    /// current directory.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let Some(raw) = self.env.var(PATH) else {
            return Vec::new();
        };
        std::env::split_paths(&raw)
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    dir
                }
            })
            .collect()
    }

    /// Resolve `name` to the path of an executable.
    ///
    /// Names containing a path separator are checked as given and never
    /// searched for.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let candidate = Path::new(name);
        if candidate.components().count() > 1 || candidate.is_absolute() {
            if self.fs.is_executable(candidate) {
                return Ok(candidate.to_path_buf());
            }
            return Err(MpiflowError::ExecutableNotFound {
                name: name.to_string(),
                searched: Vec::new(),
            });
        }

        let searched = self.search_dirs();
        for dir in &searched {
            let path = dir.join(name);
            if self.fs.is_executable(&path) {
                debug!(name, path = %path.display(), "located executable");
                return Ok(path);
            }
        }

        Err(MpiflowError::ExecutableNotFound {
            name: name.to_string(),
            searched,
        })
    }

    /// `<launcher> -np <np> [<custom>] <target>`.
    ///
    /// `custom` is inserted verbatim, surrounding whitespace included; a
    /// blank string adds nothing.
    pub fn build_prefix(&self, np: u32, target: &str, custom: &str) -> Result<CommandLine> {
        let launcher = self.locate(&self.launcher)?;
        let target = self.locate(target)?;

        let mut cmd = CommandLine::new(launcher).word("-np").word(np.to_string());
        if !custom.trim().is_empty() {
            cmd.push_word(custom);
        }
        cmd.push_word(target.display().to_string());
        Ok(cmd)
    }
}
