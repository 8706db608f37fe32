//! Persisted user preferences (the local-storage equivalent).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key/value store for small persisted user choices.
pub trait PreferenceStore {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// What: Store `value` under `key`.
    ///
    /// # Errors
    /// - Returns `Err` when the value cannot be persisted
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Volatile store, used by tests and when no config directory is available.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    /// Stored values.
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisting a flat JSON object (`{"language": "fr"}`) to one file.
#[derive(Clone, Debug)]
pub struct FilePreferenceStore {
    /// JSON file location.
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Create a store backed by `path` (created on first write).
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backing file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What: Read every stored value.
    ///
    /// Output:
    /// - Stored map; empty when the file is missing or unreadable
    ///
    /// Details:
    /// - A corrupt file is logged and treated as empty; the next write replaces it.
    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "[Persist] Ignoring unreadable preferences file"
                );
                BTreeMap::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let s = serde_json::to_string_pretty(&all).map_err(io::Error::other)?;
        fs::write(&self.path, s)?;
        tracing::debug!(
            path = %self.path.display(),
            key = %key,
            "[Persist] Preference saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: File store persistence across instances
    ///
    /// - Input: Write `language=fr` with one instance, read with another
    /// - Output: Value survives; other keys untouched; corrupt file reads as empty
    fn file_store_persists_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.json");
        let mut store = FilePreferenceStore::new(path.clone());
        assert_eq!(store.get("language"), None);
        store.set("language", "fr").expect("set language");
        store.set("theme", "dark").expect("set theme");

        let reopened = FilePreferenceStore::new(path.clone());
        assert_eq!(reopened.get("language").as_deref(), Some("fr"));
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));

        fs::write(&path, "not json").expect("corrupt file");
        assert_eq!(reopened.get("language"), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryPreferenceStore::default();
        store.set("language", "zh").expect("set");
        assert_eq!(store.get("language").as_deref(), Some("zh"));
    }
}
