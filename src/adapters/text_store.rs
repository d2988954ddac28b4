//! Plain-text implementation of the table store.
//!
//! Reads and writes the flat 81-line format from
//! [`crate::q_learning::serialization`]. Saving writes a sibling temp file
//! and renames it over the target, so a failed save keeps the old table.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    Result,
    error::Error,
    ports::TableStore,
    q_learning::{QTable, read_table, write_table},
};

/// File-backed q-table store.
///
/// # Examples
///
/// ```no_run
/// use pursuit::adapters::TextFileStore;
/// use pursuit::ports::TableStore;
/// use std::path::Path;
///
/// let store = TextFileStore::new();
/// let table = store.load(Path::new("qtable.txt"))?;
/// store.save(&table, Path::new("qtable.txt"))?;
/// # Ok::<(), pursuit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileStore;

impl TextFileStore {
    /// Create a file-backed store.
    pub fn new() -> Self {
        Self
    }
}

impl TableStore for TextFileStore {
    fn load(&self, path: &Path) -> Result<QTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open q-table {}", path.display()),
            source,
        })?;
        read_table(BufReader::new(file))
    }

    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let temp_path = sibling_temp_path(path);
        let written = write_synced(table, &temp_path).and_then(|()| {
            fs::rename(&temp_path, path).map_err(|source| Error::Io {
                operation: format!("replace q-table {}", path.display()),
                source,
            })
        });
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }
}

/// Temp file next to `path`, so the final rename stays on one filesystem.
fn sibling_temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let temp_name = format!(".tmp_{}_{name}", std::process::id());
    match path.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    }
}

fn write_synced(table: &QTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create q-table {}", path.display()),
        source,
    })?;
    write_table(table, BufWriter::new(&file))?;
    file.sync_all().map_err(|source| Error::Io {
        operation: format!("sync q-table {}", path.display()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{q_learning::table_to_string, types::Action};

    #[test]
    fn test_text_store_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.txt");

        let mut table = QTable::zeros();
        table.set(16, Action::North, 3.25);
        table.set(80, Action::West, -1.0);

        let store = TextFileStore::new();
        store.save(&table, &path).expect("Failed to save");
        let loaded = store.load(&path).expect("Failed to load");
        assert_eq!(loaded, table);

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, table_to_string(&table));
        assert_eq!(on_disk.lines().count(), 81);
    }

    #[test]
    fn test_save_overwrites_longer_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.txt");
        std::fs::write(&path, "junk\n".repeat(500)).unwrap();

        let store = TextFileStore::new();
        store.save(&QTable::zeros(), &path).unwrap();
        assert_eq!(store.load(&path).unwrap(), QTable::zeros());
    }

    #[test]
    fn test_failed_save_keeps_previous_table() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.txt");
        let store = TextFileStore::new();

        let mut trained = QTable::zeros();
        trained.set(3, Action::South, 12.5);
        store.save(&trained, &path).unwrap();

        // The temp file cannot be created inside a missing directory.
        let unreachable = temp_dir.path().join("missing").join("qtable.txt");
        assert!(store.save(&QTable::zeros(), &unreachable).is_err());

        // Renaming onto a directory fails after the temp file was written.
        let blocked = temp_dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();
        assert!(store.save(&QTable::zeros(), &blocked).is_err());

        assert_eq!(store.load(&path).unwrap(), trained);
        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp_"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_load_short_file_is_format_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.txt");
        std::fs::write(&path, "0 0 0 0\n".repeat(80)).unwrap();

        let err = TextFileStore::new().load(&path).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let result = TextFileStore::new().load(Path::new("/tmp/nonexistent_qtable_12345.txt"));
        assert!(result.is_err());
    }
}
