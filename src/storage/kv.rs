//! Key-value persistence backends
//!
//! Directory layout used by [`FileStore`]:
//! ```text
//! {data_dir}/
//! └── {key}.json      # One serialized value per key
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Snapshot writer is no longer running")]
    WriterClosed,

    #[error("Write rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Opaque text storage addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored text for `key`, or `None` when nothing is stored or the read
    /// fails.
    async fn load(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    async fn save(&self, key: &str, text: &str) -> Result<()>;
}

/// Stores each key as a JSON file inside a data directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashdeck"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Get the file path for a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    async fn save(&self, key: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        // Write then rename so readers never observe a partial file
        let temp_path = self.temp_path_for(key);
        fs::write(&temp_path, text).await?;
        fs::rename(&temp_path, self.path_for(key)).await?;
        Ok(())
    }
}

/// In-process store that keeps every saved value. Saves can be made to fail
/// on demand.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    history: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `text` under `key`
    pub fn with_entry(key: &str, text: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
        store
    }

    /// Current value stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Every successfully saved value for `key`, oldest first
    pub fn saves(&self, key: &str) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    async fn save(&self, key: &str, text: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected(format!("store unavailable for {}", key)));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
        self.history
            .lock()
            .unwrap()
            .push((key.to_string(), text.to_string()));
        Ok(())
    }
}
