//! Core value types shared by the encoder, policy and engine seams.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A grid cell. `y` grows northwards, `x` grows eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell reached by `mv`. `Stop` returns `self`.
    pub fn step(self, mv: Move) -> Self {
        let (dx, dy) = mv.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Engine-level move, including the `Stop` no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    North,
    East,
    South,
    West,
    Stop,
}

impl Move {
    pub const ALL: [Move; 5] = [Move::North, Move::East, Move::South, Move::West, Move::Stop];

    /// Grid displacement `(dx, dy)` of the move.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::North => (0, 1),
            Move::East => (1, 0),
            Move::South => (0, -1),
            Move::West => (-1, 0),
            Move::Stop => (0, 0),
        }
    }
}

impl From<Action> for Move {
    fn from(action: Action) -> Self {
        match action {
            Action::North => Move::North,
            Action::East => Move::East,
            Action::South => Move::South,
            Action::West => Move::West,
        }
    }
}

/// Action selectable by the learner; column order of the q-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    North,
    East,
    South,
    West,
}

impl Action {
    /// All actions in q-table column order.
    pub const ALL: [Action; 4] = [Action::North, Action::East, Action::South, Action::West];

    /// Number of q-table columns.
    pub const COUNT: usize = Self::ALL.len();

    /// Column index of the action in a q-table row.
    pub const fn column(self) -> usize {
        match self {
            Action::North => 0,
            Action::East => 1,
            Action::South => 2,
            Action::West => 3,
        }
    }

    /// Learner action for an engine move, `None` for `Stop`.
    pub fn from_move(mv: Move) -> Option<Self> {
        match mv {
            Move::North => Some(Action::North),
            Move::East => Some(Action::East),
            Move::South => Some(Action::South),
            Move::West => Some(Action::West),
            Move::Stop => None,
        }
    }

    /// Action name as printed in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::North => "North",
            Action::East => "East",
            Action::South => "South",
            Action::West => "West",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Action::North),
            "east" | "e" => Ok(Action::East),
            "south" | "s" => Ok(Action::South),
            "west" | "w" => Ok(Action::West),
            other => Err(format!(
                "unknown action '{other}' (expected north, east, south or west)"
            )),
        }
    }
}

/// A pursued entity as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub position: Position,
    pub alive: bool,
}

impl Target {
    /// Create a target.
    pub fn new(position: Position, alive: bool) -> Self {
        Self { position, alive }
    }
}

/// Read-only snapshot of the engine state for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub self_position: Position,
    /// Targets in stable engine order; indices are preserved across ticks.
    pub targets: Vec<Target>,
    /// Legal engine moves for the pursuer, possibly including `Stop`.
    pub legal_moves: Vec<Move>,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_columns_are_dense() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.column(), i);
        }
    }

    #[test]
    fn test_stop_has_no_action() {
        assert_eq!(Action::from_move(Move::Stop), None);
        for action in Action::ALL {
            assert_eq!(Action::from_move(Move::from(action)), Some(action));
        }
    }

    #[test]
    fn test_step_follows_compass() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Move::North), Position::new(3, 4));
        assert_eq!(origin.step(Move::West), Position::new(2, 3));
        assert_eq!(origin.step(Move::Stop), origin);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("North".parse::<Action>(), Ok(Action::North));
        assert_eq!(" w ".parse::<Action>(), Ok(Action::West));
        assert!("stop".parse::<Action>().is_err());
    }
}
