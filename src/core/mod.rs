pub mod engine;
pub mod parser;
pub mod persistence;
pub mod store;
pub mod validator;

pub use crate::domain::model::{
    InvoiceKey, ListState, ProductEntry, ProductList, ProductName, RawDocument,
};
pub use crate::domain::ports::{ConfigProvider, InvoiceSource, SessionStorage};
pub use crate::utils::error::Result;
