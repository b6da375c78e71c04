use crate::domain::model::{InvoiceKey, RawDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Session-scoped key/value store, shaped after Web Storage.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Where raw invoice documents come from.
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    async fn fetch_raw(&self, key: &InvoiceKey) -> Result<RawDocument>;
}

pub trait ConfigProvider: Send + Sync {
    fn lookup_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn homologation(&self) -> bool;
    fn session_dir(&self) -> Option<&str>;
    fn storage_key(&self) -> &str;
}
