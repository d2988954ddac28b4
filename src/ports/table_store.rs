//! Table store port for q-table persistence.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading q-tables.
///
/// # Examples
///
/// ```no_run
/// use pursuit::adapters::TextFileStore;
/// use pursuit::ports::TableStore;
/// use pursuit::q_learning::QTable;
/// use std::path::Path;
///
/// let store = TextFileStore::new();
/// store.save(&QTable::zeros(), Path::new("qtable.txt"))?;
/// let table = store.load(Path::new("qtable.txt"))?;
/// # Ok::<(), pursuit::Error>(())
/// ```
pub trait TableStore {
    /// Load a table, failing on any shape mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The location does not exist or cannot be read
    /// - The content is not exactly 81 rows of 4 numbers
    fn load(&self, path: &Path) -> Result<QTable>;

    /// Overwrite the stored table at `path` with `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be created or written to.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;
}
