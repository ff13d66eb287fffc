//! The host-provided storage abstraction. The core performs no I/O itself;
//! everything save/load touches goes through this trait.

use crate::error::EngineError;

/// Filesystem-shaped operations a host implements so the core can persist
/// and restore saves without depending on a filesystem directly.
pub trait StorageBackend {
    fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), EngineError>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>, EngineError>;
    fn list_files(&self, dir: &str) -> Result<Vec<String>, EngineError>;
    fn delete_file(&mut self, path: &str) -> Result<(), EngineError>;
    fn exists(&self, path: &str) -> Result<bool, EngineError>;
    fn ensure_dir(&mut self, dir: &str) -> Result<(), EngineError>;
}

/// An in-memory [`StorageBackend`], useful for tests and for hosts that
/// defer real persistence. Not used by the core itself outside `#[cfg(test)]`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    files: std::collections::BTreeMap<String, Vec<u8>>,
    dirs: std::collections::BTreeSet<String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryStorage {
    fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), EngineError> {
        self.files.insert(path.to_owned(), bytes.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, EngineError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::Storage(format!("no such file: {path}")))
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>, EngineError> {
        let prefix = format!("{dir}/");
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn delete_file(&mut self, path: &str) -> Result<(), EngineError> {
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| EngineError::Storage(format!("no such file: {path}")))
    }

    fn exists(&self, path: &str) -> Result<bool, EngineError> {
        Ok(self.files.contains_key(path) || self.dirs.contains(path))
    }

    fn ensure_dir(&mut self, dir: &str) -> Result<(), EngineError> {
        self.dirs.insert(dir.to_owned());
        Ok(())
    }
}
