//! Dependency injection container for the pursuit application.
//!
//! The container owns the table store and hands it to each controller it
//! starts, so production code writes text files while tests stay in memory.

use std::{io::ErrorKind, path::Path, sync::Arc};

use super::config::LearningConfig;
use crate::{
    Error, Result, adapters::TextFileStore, controller::Controller, ports::TableStore, q_learning::QTable,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use pursuit::app::{App, LearningConfig};
///
/// let app = App::new();
/// let controller = app.start_controller(&LearningConfig::default())?;
/// # Ok::<(), pursuit::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use pursuit::app::{App, LearningConfig};
/// use pursuit::adapters::InMemoryStore;
/// use std::path::Path;
///
/// let app = App::for_testing()
///     .with_store(InMemoryStore::new())
///     .with_default_seed(42)
///     .build();
/// app.init_table(Path::new("qtable.txt"), false)?;
/// let controller = app.start_controller(&LearningConfig::default())?;
/// # Ok::<(), pursuit::Error>(())
/// ```
pub struct App {
    /// Store for q-table persistence
    table_store: Arc<dyn TableStore + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `TextFileStore` for q-table persistence
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        Self {
            table_store: Arc::new(TextFileStore::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the table store.
    pub fn table_store(&self) -> Arc<dyn TableStore + Send + Sync> {
        Arc::clone(&self.table_store)
    }

    /// Load the table and start a controller for one episode.
    ///
    /// The config's seed wins over the container default.
    pub fn start_controller(&self, config: &LearningConfig) -> Result<Controller> {
        let mut config = config.clone();
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        Controller::initialize(&config, self.table_store())
    }

    /// Write an all-zero table to `path`.
    ///
    /// Without `overwrite`, only a missing table is created. An existing
    /// table is left alone (returns `false`), and any failure to read one,
    /// malformed or unreadable, is reported rather than replaced.
    pub fn init_table(&self, path: &Path, overwrite: bool) -> Result<bool> {
        if !overwrite {
            match self.table_store.load(path) {
                Ok(_) => return Ok(false),
                Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            }
        }
        self.table_store.save(&QTable::zeros(), path)?;
        Ok(true)
    }

    /// Load the table at `path` through the configured store.
    pub fn load_table(&self, path: &Path) -> Result<QTable> {
        self.table_store.load(path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    table_store: Option<Arc<dyn TableStore + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            table_store: None,
            default_seed: None,
        }
    }

    /// Set a custom table store.
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: TableStore + Send + Sync + 'static,
    {
        self.table_store = Some(Arc::new(store));
        self
    }

    /// Set a default random seed for all controllers.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app, falling back to `TextFileStore`.
    pub fn build(self) -> App {
        App {
            table_store: self
                .table_store
                .unwrap_or_else(|| Arc::new(TextFileStore::new())),
            default_seed: self.default_seed,
        }
    }
}
