//! Durable UI preferences

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Preference storage unavailable: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value storage that outlives the process
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Preferences kept as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use super::*;

    /// In-memory store; `broken` makes every access fail
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        pub items: BTreeMap<String, String>,
        pub broken: bool,
    }

    impl MemoryStore {
        pub fn broken() -> Self {
            Self {
                broken: true,
                ..Default::default()
            }
        }

        fn check(&self) -> Result<(), PrefsError> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage disabled").into());
            }
            Ok(())
        }
    }

    impl PreferenceStore for MemoryStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, PrefsError> {
            self.check()?;
            Ok(self.items.get(key).cloned())
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
            self.check()?;
            self.items.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
