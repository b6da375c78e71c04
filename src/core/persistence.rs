use crate::domain::model::ProductName;
use crate::domain::ports::SessionStorage;
use crate::utils::error::Result;

pub const PRODUCTS_STORAGE_KEY: &str = "products";

/// JSON-array mirror of the product names under one session storage key.
pub struct SessionPersistence<S: SessionStorage> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> SessionPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, PRODUCTS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, names: &[ProductName]) -> Result<()> {
        let json = serde_json::to_string(names)?;
        tracing::debug!("💾 Saving {} product names under '{}'", names.len(), self.key);
        self.storage.set_item(&self.key, &json)
    }

    /// `Ok(None)` when nothing usable is stored: the key is absent or the
    /// value is not a JSON array of strings.
    pub fn load(&self) -> Result<Option<Vec<ProductName>>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(values) => Ok(Some(
                values.iter().filter_map(|value| ProductName::new(value)).collect(),
            )),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring malformed snapshot under '{}': {}", self.key, e);
                Ok(None)
            }
        }
    }

    pub fn drop_snapshot(&self) -> Result<()> {
        tracing::debug!("🗑️ Removing snapshot '{}'", self.key);
        self.storage.remove_item(&self.key)
    }
}
