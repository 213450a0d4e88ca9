//! Key-value persistence backends.
//!
//! The flashcard state is persisted as a handful of named JSON documents.
//! Any backend that can read and write a string under a key can hold it.

mod file_storage;
mod memory;

pub use file_storage::{FileStore, StorageError};
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed store of string values.
///
/// `get` returns `Ok(None)` for a key that was never written.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
