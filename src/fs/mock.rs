// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { content: Vec<u8>, executable: bool },
    /// Present on disk but unreadable (permission denied and the like).
    Unreadable,
}

/// In-memory filesystem for tests. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(
            path,
            MockEntry::File {
                content: content.into(),
                executable: false,
            },
        );
    }

    /// Add an empty executable, as if installed on the search path.
    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.insert(
            path,
            MockEntry::File {
                content: Vec::new(),
                executable: true,
            },
        );
    }

    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        self.insert(path, MockEntry::Unreadable);
    }

    fn insert(&self, path: impl AsRef<Path>, entry: MockEntry) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.as_ref().to_path_buf(), entry);
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File { content, .. }) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Unreadable) => Err(anyhow!("Permission denied: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn is_executable(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(
            files.get(path),
            Some(MockEntry::File {
                executable: true,
                ..
            })
        )
    }
}
