use crate::core::persistence::SessionPersistence;
use crate::domain::model::{ListState, ProductEntry, ProductList, ProductName};
use crate::domain::ports::SessionStorage;
use crate::utils::error::Result;

/// Owns the product list and writes every change through to the session.
///
/// The snapshot is written before the in-memory list changes, so a failed
/// write leaves both sides as they were.
pub struct ProductListStore<S: SessionStorage> {
    persistence: SessionPersistence<S>,
    state: ListState,
}

impl<S: SessionStorage> ProductListStore<S> {
    pub fn new(persistence: SessionPersistence<S>) -> Self {
        Self {
            persistence,
            state: ListState::AwaitingLookup,
        }
    }

    /// 啟動時讀取一次；缺少或損壞的快照都視為尚未查詢
    pub fn load_from_persistence(&mut self) -> &ListState {
        self.state = match self.persistence.load() {
            Ok(Some(names)) => {
                tracing::info!("📂 Restored {} products from session", names.len());
                ListState::Loaded(names.into_iter().collect())
            }
            Ok(None) => ListState::AwaitingLookup,
            Err(e) => {
                tracing::warn!("⚠️ Could not read session snapshot, starting empty: {}", e);
                ListState::AwaitingLookup
            }
        };
        &self.state
    }

    pub fn replace_all<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = ProductName>,
    {
        let list: ProductList = names.into_iter().collect();
        self.persistence.save(&list.to_names())?;

        tracing::info!("🛒 Product list replaced with {} items", list.len());
        self.state = ListState::Loaded(list);
        Ok(())
    }

    /// Returns whether an entry was removed. Absent names leave the list and
    /// the snapshot untouched.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let Some(list) = self.state.list_mut() else {
            return Ok(false);
        };
        if !list.contains(name) {
            tracing::debug!("Remove ignored, '{}' not in list", name);
            return Ok(false);
        }

        let remaining: Vec<ProductName> = list
            .names()
            .filter(|existing| existing.as_str() != name)
            .cloned()
            .collect();
        self.persistence.save(&remaining)?;

        list.remove(name);
        tracing::info!("➖ Removed '{}', {} items left", name, list.len());
        Ok(true)
    }

    /// New checked flag, or `None` if the name is not in the list.
    pub fn toggle_checked(&mut self, name: &str) -> Option<bool> {
        let checked = self.state.list_mut()?.toggle(name)?;
        tracing::debug!("'{}' checked = {}", name, checked);
        Some(checked)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.persistence.drop_snapshot()?;
        self.state = ListState::AwaitingLookup;
        tracing::info!("🧹 Product list cleared");
        Ok(())
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn entries(&self) -> Vec<ProductEntry> {
        self.state
            .list()
            .map(|list| list.entries().collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> Vec<ProductName> {
        self.state.list().map(ProductList::to_names).unwrap_or_default()
    }

    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.state.list()?.is_checked(name)
    }

    pub fn len(&self) -> usize {
        self.state.list().map(ProductList::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn persistence(&self) -> &SessionPersistence<S> {
        &self.persistence
    }
}
