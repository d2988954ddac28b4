//! In-memory table store for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    error::Error,
    ports::TableStore,
    q_learning::{QTable, table_from_str, table_to_string},
};

/// In-memory store keyed by path.
///
/// Tables are kept in their text form so loads go through the same parser
/// as files. All clones share the same storage.
///
/// # Examples
///
/// ```
/// use pursuit::adapters::InMemoryStore;
/// use pursuit::ports::TableStore;
/// use pursuit::q_learning::QTable;
/// use std::path::Path;
///
/// let store = InMemoryStore::new();
/// store.save(&QTable::zeros(), Path::new("qtable.txt"))?;
/// assert_eq!(store.load(Path::new("qtable.txt"))?, QTable::zeros());
/// # Ok::<(), pursuit::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    /// Seed the store with a table.
    pub fn insert(&self, path: &Path, table: QTable) {
        self.storage().insert(Self::key(path), table_to_string(&table));
    }

    /// Store raw text, well-formed or not.
    pub fn insert_text(&self, path: &Path, text: impl Into<String>) {
        self.storage().insert(Self::key(path), text.into());
    }

    /// Current table at `path`, if present and well-formed.
    pub fn get(&self, path: &Path) -> Option<QTable> {
        self.storage()
            .get(&Self::key(path))
            .and_then(|text| table_from_str(text).ok())
    }

    /// Number of stored tables.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Whether anything is stored at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }
}

impl TableStore for InMemoryStore {
    fn load(&self, path: &Path) -> Result<QTable> {
        let storage = self.storage();
        let text = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load q-table from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;
        table_from_str(text)
    }

    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        self.insert(path, table.clone());
        Ok(())
    }
}
