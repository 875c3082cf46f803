//! Key-value persistence for profile, weight log and theme.
//!
//! Each record is stored independently as JSON under its own key. Records
//! are not written atomically with respect to each other; each one on its
//! own is replaced atomically.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key of the last-used profile record
pub const PROFILE_KEY: &str = "profile";
/// Key of the weight log record
pub const WEIGHT_LOG_KEY: &str = "weight_log";
/// Key of the dark-mode flag
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Get/set by name, JSON-encoded
pub trait KeyValueStore {
    /// Load the value stored under `key`, or `default` when there is none
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T>;

    /// Replace the value stored under `key`
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()>;
}

/// One `<key>.json` file per record inside a data directory
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir` (created lazily on first save)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read_locked(path: &Path) -> std::io::Result<String> {
        let file = File::open(path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        let _ = file.unlock();
        read?;

        Ok(contents)
    }
}

impl KeyValueStore for JsonFileStore {
    /// Returns `default` if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns `default`.
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::info!("No {} record found, using default", key);
            return Ok(default);
        }

        let contents = match Self::read_locked(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    "Unable to read {:?}: {}. Using default {}.",
                    path,
                    e,
                    key
                );
                return Ok(default);
            }
        };

        match serde_json::from_str::<T>(&contents) {
            Ok(value) => {
                tracing::debug!("Loaded {} from {:?}", key, path);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse {:?}: {}. Using default {}.",
                    path,
                    e,
                    key
                );
                Ok(default)
            }
        }
    }

    /// Atomically writes the record by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Private temp file; readers only ever see the old or the new record
        // because the final rename is atomic.
        let temp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(value)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} to {:?}", key, path);
        Ok(())
    }
}

/// In-memory store holding encoded JSON values
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Raw JSON stored under `key`
    pub fn raw(&self, key: &str) -> Option<&serde_json::Value> {
        self.records.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.records.get(key) {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(v) => Ok(v),
                Err(e) => {
                    tracing::warn!("Failed to decode {}: {}. Using default.", key, e);
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.records
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }
}
