//! Snapshot persistence for the todo collection.
//!
//! The whole collection lives under a single key as a JSON array and is
//! always read and written in its entirety.

use crate::error::{Error, Result};
use crate::models::{default_todos, Todo};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "todos";

/// A flat string key/value store.
pub trait StorageBackend {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename, so readers never see a partial file.
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        file.persist(self.path_for(key))?;
        Ok(())
    }
}

/// In-memory backend for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` already stored under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut backend = Self::new();
        backend.entries.insert(key.into(), value.into());
        backend
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the todo snapshot through a [`StorageBackend`].
#[derive(Debug)]
pub struct TodoStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> TodoStore<B> {
    /// Create a store using the default `todos` key.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a snapshot is present.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.read_raw()?.is_some())
    }

    /// Read the whole collection.
    ///
    /// A missing snapshot yields an empty list. So does a snapshot that is
    /// present but cannot be parsed; that case is logged.
    pub fn load_all(&self) -> Result<Vec<Todo>> {
        let Some(raw) = self.read_raw()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(todos) => Ok(todos),
            Err(e) => {
                tracing::warn!("Ignoring malformed snapshot under {:?}: {}", self.key, e);
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the whole snapshot with `todos`.
    pub fn save_all(&mut self, todos: &[Todo]) -> Result<()> {
        let raw = serde_json::to_string(todos)?;
        self.backend
            .set(&self.key, &raw)
            .map_err(|source| Error::Storage {
                key: self.key.clone(),
                source,
            })?;
        tracing::debug!("Saved {} todos under {:?}", todos.len(), self.key);
        Ok(())
    }

    /// Write the default records if no snapshot exists yet.
    ///
    /// Returns `true` when the defaults were written.
    pub fn ensure_seeded(&mut self) -> Result<bool> {
        if self.exists()? {
            return Ok(false);
        }
        tracing::info!("No snapshot under {:?}, seeding defaults", self.key);
        self.save_all(&default_todos())?;
        Ok(true)
    }

    fn read_raw(&self) -> Result<Option<String>> {
        self.backend.get(&self.key).map_err(|source| Error::Storage {
            key: self.key.clone(),
            source,
        })
    }
}
