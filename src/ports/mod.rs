//! Ports (trait boundaries) for external collaborators.
//!
//! The controller core depends only on these traits. The game engine, the
//! maze-distance service and table persistence are supplied by adapters.

pub mod distancer;
pub mod engine;
pub mod table_store;

pub use distancer::Distancer;
pub use engine::Engine;
pub use table_store::TableStore;
