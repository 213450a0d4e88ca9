use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{KeyValueStore, Result};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Directory-backed store: each key lives in `{base_path}/{key}.json`.
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
            .map(|p| p.join("tricard"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.init()?;

        // Write to a sibling temp file first so a crash never leaves half a document
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[test]
    fn test_missing_key_is_none() {
        let (store, _temp) = create_test_store();
        assert!(store.get("flashcards").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory_and_reads_back() {
        let (mut store, _temp) = create_test_store();

        store.set("deck_names", "[\"Default\"]").unwrap();

        assert!(store.base_path().join("deck_names.json").exists());
        assert_eq!(
            store.get("deck_names").unwrap().as_deref(),
            Some("[\"Default\"]")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let (mut store, _temp) = create_test_store();

        store.set("flashcards", "[]").unwrap();
        store.set("flashcards", "[1]").unwrap();

        assert_eq!(store.get("flashcards").unwrap().as_deref(), Some("[1]"));
        assert!(!store.base_path().join("flashcards.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (mut store, _temp) = create_test_store();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }
}
