#![forbid(unsafe_code)]

pub mod clock;
pub mod doc;
pub mod health;
pub mod service;
pub mod store;

pub use service::DecisionService;
pub use store::{JsonFileStore, MemoryStore, StateStore, StoreError};
