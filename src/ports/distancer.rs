//! Maze-distance port.

use crate::types::Position;

/// Shortest walkable path length between two grid cells.
///
/// Implementations are expected to precompute or cache distances; the
/// controller queries this once per live target per tick.
///
/// Any `Fn(Position, Position) -> u32` closure is a `Distancer`, which keeps
/// tests free of layout fixtures:
///
/// ```
/// use pursuit::{ports::Distancer, types::Position};
///
/// let manhattan = |a: Position, b: Position| a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
/// assert_eq!(manhattan.distance(Position::new(0, 0), Position::new(2, 3)), 5);
/// ```
pub trait Distancer {
    fn distance(&self, from: Position, to: Position) -> u32;
}

impl<F> Distancer for F
where
    F: Fn(Position, Position) -> u32,
{
    fn distance(&self, from: Position, to: Position) -> u32 {
        self(from, to)
    }
}
