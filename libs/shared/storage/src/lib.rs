pub mod error;
pub mod kv;

pub use error::StorageError;
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
