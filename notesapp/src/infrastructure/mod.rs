// src/infrastructure/mod.rs
pub mod config;
pub mod record_store;
pub mod renderer;
pub mod storage;

pub use config::Config;
pub use record_store::RecordStore;
pub use renderer::ContentRenderer;
pub use storage::{DirStorage, KeyValueStorage, MemoryStorage};
