use crate::core::parser::ResponseParser;
use crate::core::persistence::SessionPersistence;
use crate::core::store::ProductListStore;
use crate::core::validator::KeyValidator;
use crate::domain::model::{ListState, ProductList};
use crate::domain::ports::{InvoiceSource, SessionStorage};
use crate::utils::error::{AppError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Drives a lookup from raw input to the stored list and owns the store.
///
/// Only one lookup may be outstanding at a time; store mutations run one at
/// a time behind the mutex.
pub struct ShoppingListEngine<I: InvoiceSource, S: SessionStorage> {
    source: I,
    parser: ResponseParser,
    store: Mutex<ProductListStore<S>>,
    lookup_in_flight: AtomicBool,
}

impl<I: InvoiceSource, S: SessionStorage> ShoppingListEngine<I, S> {
    /// Builds the engine and restores whatever the session already holds.
    pub fn new(source: I, persistence: SessionPersistence<S>) -> Self {
        let mut store = ProductListStore::new(persistence);
        store.load_from_persistence();

        Self {
            source,
            parser: ResponseParser::new(),
            store: Mutex::new(store),
            lookup_in_flight: AtomicBool::new(false),
        }
    }

    /// 查詢發票並以結果取代目前清單
    pub async fn lookup(&self, input: &str) -> Result<ProductList> {
        let key = KeyValidator::validate(input)?;
        let _guard = LookupGuard::acquire(&self.lookup_in_flight)?;

        tracing::info!("🔍 Looking up invoice {}…", &key.as_str()[..6]);
        let document = self.source.fetch_raw(&key).await?;
        drop(key);

        let names = self.parser.parse(&document)?;

        let mut store = self.store.lock().await;
        store.replace_all(names)?;
        Ok(store.state().list().cloned().unwrap_or_default())
    }

    pub async fn remove(&self, name: &str) -> Result<bool> {
        self.store.lock().await.remove(name)
    }

    pub async fn toggle_checked(&self, name: &str) -> Option<bool> {
        self.store.lock().await.toggle_checked(name)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.lock().await.clear()
    }

    pub async fn state(&self) -> ListState {
        self.store.lock().await.state().clone()
    }

    pub fn is_lookup_in_flight(&self) -> bool {
        self.lookup_in_flight.load(Ordering::Acquire)
    }
}

/// Holds the in-flight flag for one lookup and releases it on drop, including
/// when the lookup fails or its future is dropped.
struct LookupGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LookupGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::LookupInProgressError)?;
        Ok(Self { flag })
    }
}

impl Drop for LookupGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
