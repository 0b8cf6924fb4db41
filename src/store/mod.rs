//! Key-value persistence for throttle records.
//!
//! # Data Flow
//! ```text
//! AttemptThrottle
//!     → key.rs (resolve slot: shared key or key:subject)
//!     → StateStore::get / StateStore::set (serialized ThrottleState)
//!         - memory.rs (in-process map)
//!         - file.rs (JSON file, survives restarts)
//! ```
//!
//! # Design Decisions
//! - Stores hold opaque strings; encoding belongs to the throttle
//! - Only single get/set calls are atomic; read-modify-write is not
//! - Store errors never escape a throttle operation

pub mod file;
pub mod key;
pub mod memory;

use std::sync::Arc;
use thiserror::Error;

pub use file::FileStore;
pub use key::{KeyScope, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key-value slot store.
pub trait StateStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
