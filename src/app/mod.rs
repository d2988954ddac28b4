//! Application layer with dependency injection container.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        App (DI container)                │
//! │   owns ─► TableStore adapter             │
//! │   starts ─► Controller (one per episode) │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use pursuit::app::App;
//! use pursuit::adapters::InMemoryStore;
//!
//! let app = App::for_testing()
//!     .with_store(InMemoryStore::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::LearningConfig;
pub use container::{App, AppBuilder};
