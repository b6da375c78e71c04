use crate::domain::ports::SessionStorage;
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const SESSION_FILE_NAME: &str = "session.json";

/// Session storage that lives as long as the process. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(|e| AppError::StorageError {
            message: format!("session storage lock poisoned: {}", e),
        })?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|e| AppError::StorageError {
            message: format!("session storage lock poisoned: {}", e),
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|e| AppError::StorageError {
            message: format!("session storage lock poisoned: {}", e),
        })?;
        items.remove(key);
        Ok(())
    }
}

/// Session storage kept in `<session_dir>/session.json`, so restarting the
/// front end against the same directory behaves like a page reload.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new<P: AsRef<Path>>(session_dir: P) -> Self {
        Self {
            path: session_dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// 讀取後準備覆寫；檔案損壞時從空白開始
    fn read_items_for_write(&self) -> Result<HashMap<String, String>> {
        match self.read_items() {
            Err(AppError::SerializationError(e)) => {
                tracing::warn!(
                    "⚠️ Session file {} is corrupt, starting over: {}",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    fn write_items(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 先寫暫存檔再改名，避免留下寫到一半的檔案
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_items_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_items_for_write()?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_items(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_clones_share_items() {
        let storage = MemorySessionStorage::new();
        let other = storage.clone();

        storage.set_item("products", "[]").unwrap();
        assert_eq!(other.get_item("products").unwrap().as_deref(), Some("[]"));

        other.remove_item("products").unwrap();
        assert_eq!(storage.get_item("products").unwrap(), None);
    }

    #[test]
    fn test_file_storage_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        FileSessionStorage::new(temp_dir.path())
            .set_item("products", r#"["Sal"]"#)
            .unwrap();

        let reopened = FileSessionStorage::new(temp_dir.path());
        assert_eq!(
            reopened.get_item("products").unwrap().as_deref(),
            Some(r#"["Sal"]"#)
        );
        assert!(!temp_dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let session_dir = temp_dir.path().join("nested").join("session");
        let storage = FileSessionStorage::new(&session_dir);

        assert_eq!(storage.get_item("products").unwrap(), None);
        storage.set_item("products", "[]").unwrap();
        assert!(session_dir.join(SESSION_FILE_NAME).exists());
    }

    #[test]
    fn test_file_storage_remove_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp_dir.path());
        storage.set_item("products", "[]").unwrap();
        storage.set_item("theme", "dark").unwrap();

        storage.remove_item("products").unwrap();

        assert_eq!(storage.get_item("products").unwrap(), None);
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp_dir.path());
        fs::write(storage.path(), "{not json").unwrap();

        assert!(matches!(
            storage.get_item("products"),
            Err(AppError::SerializationError(_))
        ));

        storage.set_item("products", r#"["Sal"]"#).unwrap();
        assert_eq!(
            storage.get_item("products").unwrap().as_deref(),
            Some(r#"["Sal"]"#)
        );
    }
}
