use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::DirectoryError;
use crate::loader::load_json_file;
use crate::record::Record;
use crate::snapshot::Snapshot;

/// Concurrent handle to the current directory snapshot.
///
/// Readers call [`snapshot`](DirectoryStore::snapshot) and get an `Arc`
/// clone; they keep working against that view even if a reload swaps the
/// pointer underneath them. Writers build the replacement snapshot outside
/// the lock and hold the write lock only for the pointer swap, so readers
/// never observe a partially built snapshot.
#[derive(Debug)]
pub struct DirectoryStore {
    current: RwLock<Arc<Snapshot>>,
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStore {
    /// An empty store; lookups report data-unavailable until the first load.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// The current snapshot. Cheap (one Arc clone), never blocks on a
    /// concurrent reload for longer than the pointer swap.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        // Snapshots are immutable, so a poisoned lock cannot hold torn
        // data; recover the guard and carry on.
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the current snapshot with one built from `records`.
    /// Returns the new row count.
    pub fn replace(&self, records: Vec<Record>) -> usize {
        let snapshot = Arc::new(Snapshot::new(records));
        let count = snapshot.len();
        let loaded_at = snapshot.loaded_at();
        {
            let mut guard = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = snapshot;
        }
        info!(rows = count, loaded_at = %loaded_at, "directory_reloaded");
        count
    }

    /// Load records from a JSON file and swap them in. On error the
    /// current snapshot is left untouched.
    pub fn reload_from_file(&self, path: &Path) -> Result<usize, DirectoryError> {
        let records = load_json_file(path)?;
        Ok(self.replace(records))
    }
}
