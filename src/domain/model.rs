use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// 44 位數字的發票金鑰，只能經由 `KeyValidator` 建立
#[derive(Debug, PartialEq, Eq)]
pub struct InvoiceKey(String);

impl InvoiceKey {
    pub(crate) fn from_validated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw response text handed back by the lookup relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument(String);

impl RawDocument {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed, non-empty product name. Ordering is exact code-point order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    /// 去除前後空白；空字串回傳 None
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Borrow<str> for ProductName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub name: ProductName,
    pub checked: bool,
}

/// Products unique by name, kept in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductList {
    entries: BTreeMap<ProductName, bool>,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &ProductName> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = ProductEntry> + '_ {
        self.entries.iter().map(|(name, checked)| ProductEntry {
            name: name.clone(),
            checked: *checked,
        })
    }

    pub fn to_names(&self) -> Vec<ProductName> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub(crate) fn toggle(&mut self, name: &str) -> Option<bool> {
        let checked = self.entries.get_mut(name)?;
        *checked = !*checked;
        Some(*checked)
    }
}

impl FromIterator<ProductName> for ProductList {
    fn from_iter<I: IntoIterator<Item = ProductName>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|name| (name, false)).collect(),
        }
    }
}

/// Whether a lookup has populated the list yet.
///
/// An empty `Loaded` list is a real state (every item was removed), distinct
/// from `AwaitingLookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    AwaitingLookup,
    Loaded(ProductList),
}

impl ListState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ListState::Loaded(_))
    }

    pub fn list(&self) -> Option<&ProductList> {
        match self {
            ListState::Loaded(list) => Some(list),
            ListState::AwaitingLookup => None,
        }
    }

    pub(crate) fn list_mut(&mut self) -> Option<&mut ProductList> {
        match self {
            ListState::Loaded(list) => Some(list),
            ListState::AwaitingLookup => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<ProductName> {
        raw.iter().filter_map(|s| ProductName::new(s)).collect()
    }

    #[test]
    fn test_product_name_trims_and_rejects_blank() {
        assert_eq!(ProductName::new("  Arroz \n").unwrap().as_str(), "Arroz");
        assert_eq!(
            ProductName::new("\u{a0}Leite  Integral\u{a0}").unwrap().as_str(),
            "Leite  Integral"
        );
        assert!(ProductName::new("").is_none());
        assert!(ProductName::new(" \t\n").is_none());
        assert!(ProductName::new("\u{feff}").is_none());
    }

    #[test]
    fn test_product_list_dedups_and_sorts_by_code_point() {
        let list: ProductList = names(&["arroz", "Feijão", "Arroz", "arroz"]).into_iter().collect();

        let sorted: Vec<&str> = list.names().map(|n| n.as_str()).collect();
        assert_eq!(sorted, vec!["Arroz", "Feijão", "arroz"]);
        assert!(list.entries().all(|entry| !entry.checked));
    }

    #[test]
    fn test_toggle_is_keyed_by_name_and_survives_removal() {
        let mut list: ProductList = names(&["A", "B", "C"]).into_iter().collect();

        assert_eq!(list.toggle("C"), Some(true));
        assert!(list.remove("A"));
        assert_eq!(list.is_checked("C"), Some(true));
        assert_eq!(list.is_checked("B"), Some(false));
        assert_eq!(list.toggle("missing"), None);
        assert!(!list.remove("missing"));
    }

    #[test]
    fn test_list_state_default_is_awaiting_lookup() {
        let state = ListState::default();
        assert!(!state.is_loaded());
        assert!(state.list().is_none());

        let loaded = ListState::Loaded(ProductList::new());
        assert!(loaded.is_loaded());
        assert_eq!(loaded.list().map(ProductList::len), Some(0));
    }
}
