//! Adapters implementing domain ports.
//!
//! Table stores back [`crate::ports::TableStore`]; the maze distancer and
//! grid arena are minimal stand-ins for a host game, used by the CLI and
//! integration tests.

pub mod grid_arena;
pub mod in_memory_store;
pub mod maze_distancer;
pub mod text_store;

pub use grid_arena::{GridArena, Layout, TargetMotion};
pub use in_memory_store::InMemoryStore;
pub use maze_distancer::MazeDistancer;
pub use text_store::TextFileStore;
