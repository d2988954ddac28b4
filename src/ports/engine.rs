//! Engine port - the host game the controller plays in.

use crate::{Result, types::{Move, Observation}};

/// Host game engine driving one pursuer.
///
/// # Event Sequence
///
/// 1. `observe()` - read the current tick
/// 2. `submit(mv)` - exactly one move per tick; the engine advances
/// 3. repeat until `is_over()` reports the episode has ended
pub trait Engine {
    /// Snapshot of the current tick.
    fn observe(&self) -> Observation;

    /// Apply the pursuer's move and advance the game by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalAction`] if the move is not legal.
    fn submit(&mut self, mv: Move) -> Result<()>;

    /// Whether the episode has ended.
    fn is_over(&self) -> bool;
}
