// Adapters layer: concrete implementations for the relay and session storage.

pub mod http;
pub mod storage;
