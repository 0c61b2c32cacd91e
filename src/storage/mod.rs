//! Key-value blob storage
//!
//! The store snapshots its state into a single named blob. This module
//! defines the [`StorageAdapter`] contract and the two backends:
//!
//! - [`FileStorage`] - one file per blob under the app data directory
//! - [`MemoryStorage`] - shared in-memory map, for tests and headless runs
//!
//! Adapters are owned by the persister thread, so they only need `Send`.

mod file;

pub use file::FileStorage;

use crate::error::{DataChartsError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Get/set/remove access to named blobs
#[cfg_attr(test, mockall::automock)]
pub trait StorageAdapter: Send {
    /// Read a blob, `None` if it was never written
    fn get(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Write a blob, replacing any previous contents
    fn set(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Delete a blob; removing a missing blob is not an error
    fn remove(&self, name: &str) -> Result<()>;
}

/// In-memory storage backed by a shared map
///
/// Clones share the same map, so a test can keep one handle while the
/// persister owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently stored
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| DataChartsError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(name).cloned())
    }

    fn set(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.lock()?.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.lock()?.remove(name);
        Ok(())
    }
}
