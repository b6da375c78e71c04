pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::{
    http::InvoiceLookupClient,
    storage::{FileSessionStorage, MemorySessionStorage},
};
pub use crate::core::{
    engine::ShoppingListEngine, parser::ResponseParser, persistence::SessionPersistence,
    store::ProductListStore, validator::KeyValidator,
};
pub use config::toml_config::TomlConfig;
pub use domain::model::{InvoiceKey, ListState, ProductEntry, ProductList, ProductName};
pub use utils::error::{AppError, Result};
