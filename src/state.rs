//! Discrete state encoding
//!
//! Collapses a continuous game observation into one of 81 symbolic states:
//! the compass direction of the nearest live target (8 directions) crossed
//! with a distance bucket in `1..=10`, plus a single terminal state used
//! when no target is left to pursue.
//!
//! ## Row layout
//!
//! | State | Row |
//! |-------|-----|
//! | `(dir, bucket)` | `dir + (bucket - 1) * 8` |
//! | `Terminal` | `80` |

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    ports::Distancer,
    types::{Observation, Position},
};

/// Direction from the pursuer to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    /// All directions in row-ordinal order.
    pub const ALL: [Compass; 8] = [
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    /// Position of the direction in [`Compass::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            Compass::North => 0,
            Compass::NorthEast => 1,
            Compass::East => 2,
            Compass::SouthEast => 3,
            Compass::South => 4,
            Compass::SouthWest => 5,
            Compass::West => 6,
            Compass::NorthWest => 7,
        }
    }

    /// Direction label for `dx = self.x - target.x`, `dy = self.y - target.y`.
    ///
    /// Returns `None` when the two cells coincide.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        use std::cmp::Ordering::*;

        match (dy.cmp(&0), dx.cmp(&0)) {
            (Less, Equal) => Some(Compass::North),
            (Less, Less) => Some(Compass::NorthEast),
            (Equal, Less) => Some(Compass::East),
            (Greater, Less) => Some(Compass::SouthEast),
            (Greater, Equal) => Some(Compass::South),
            (Greater, Greater) => Some(Compass::SouthWest),
            (Equal, Greater) => Some(Compass::West),
            (Less, Greater) => Some(Compass::NorthWest),
            (Equal, Equal) => None,
        }
    }

    /// Short label such as `NE`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Compass::North => "N",
            Compass::NorthEast => "NE",
            Compass::East => "E",
            Compass::SouthEast => "SE",
            Compass::South => "S",
            Compass::SouthWest => "SW",
            Compass::West => "W",
            Compass::NorthWest => "NW",
        }
    }
}

/// Symbolic state used as the q-table row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscreteState {
    /// No target is left to pursue.
    Terminal,
    /// Nearest live target lies in `compass` at distance bucket `bucket`.
    Tracking { compass: Compass, bucket: u8 },
}

impl DiscreteState {
    /// Number of distance buckets per direction.
    pub const MAX_BUCKET: u8 = 10;

    /// Total number of q-table rows.
    pub const ROWS: usize = Compass::ALL.len() * Self::MAX_BUCKET as usize + 1;

    /// Row reserved for the terminal state.
    pub const TERMINAL_ROW: usize = Self::ROWS - 1;

    /// Tracking state; panics if `bucket` is outside `1..=10`.
    pub fn tracking(compass: Compass, bucket: u8) -> Self {
        assert!(
            (1..=Self::MAX_BUCKET).contains(&bucket),
            "distance bucket {bucket} outside 1..={}",
            Self::MAX_BUCKET
        );
        DiscreteState::Tracking { compass, bucket }
    }

    /// q-table row of this state.
    pub fn row(self) -> usize {
        match self {
            DiscreteState::Terminal => Self::TERMINAL_ROW,
            DiscreteState::Tracking { compass, bucket } => {
                debug_assert!((1..=Self::MAX_BUCKET).contains(&bucket));
                compass.ordinal() + (bucket as usize - 1) * Compass::ALL.len()
            }
        }
    }

    /// Inverse of [`DiscreteState::row`]; panics on rows `>= 81`.
    pub fn from_row(row: usize) -> Self {
        assert!(row < Self::ROWS, "row {row} out of range");
        if row == Self::TERMINAL_ROW {
            return DiscreteState::Terminal;
        }
        let directions = Compass::ALL.len();
        DiscreteState::Tracking {
            compass: Compass::ALL[row % directions],
            bucket: (row / directions + 1) as u8,
        }
    }

    /// Whether this is the terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, DiscreteState::Terminal)
    }
}

impl fmt::Display for DiscreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscreteState::Terminal => f.write_str("Terminal"),
            DiscreteState::Tracking { compass, bucket } => {
                write!(f, "{}/{}", compass.abbreviation(), bucket)
            }
        }
    }
}

/// The target chosen as nearest on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFix {
    /// Index into [`Observation::targets`].
    pub index: usize,
    pub position: Position,
    /// Maze distance from the pursuer at the time of the fix.
    pub distance: u32,
}

/// Result of encoding one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub state: DiscreteState,
    /// `None` only when no target is alive.
    pub target: Option<TargetFix>,
}

/// Maps observations onto [`DiscreteState`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEncoder;

impl StateEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode an observation.
    ///
    /// A pursuer standing on its nearest target encodes as `Terminal`, the
    /// same row as "nothing left to chase", while still reporting the fix.
    pub fn encode<D: Distancer + ?Sized>(&self, obs: &Observation, distancer: &D) -> Encoding {
        let Some(fix) = nearest_live_target(obs, distancer) else {
            return Encoding {
                state: DiscreteState::Terminal,
                target: None,
            };
        };

        let dx = obs.self_position.x - fix.position.x;
        let dy = obs.self_position.y - fix.position.y;

        let state = match Compass::from_offset(dx, dy) {
            Some(compass) => DiscreteState::tracking(
                compass,
                distance_bucket(fix.distance, obs.width, obs.height),
            ),
            None => DiscreteState::Terminal,
        };

        trace!(
            "encoded {} -> {state} (target {} at {}, distance {})",
            obs.self_position, fix.index, fix.position, fix.distance
        );

        Encoding {
            state,
            target: Some(fix),
        }
    }
}

/// Nearest live target by maze distance; ties keep the first in order.
pub fn nearest_live_target<D: Distancer + ?Sized>(
    obs: &Observation,
    distancer: &D,
) -> Option<TargetFix> {
    obs.targets
        .iter()
        .enumerate()
        .filter(|(_, target)| target.alive)
        .map(|(index, target)| TargetFix {
            index,
            position: target.position,
            distance: distancer.distance(obs.self_position, target.position),
        })
        .fold(None, |best: Option<TargetFix>, candidate| match best {
            Some(best) if best.distance <= candidate.distance => Some(best),
            _ => Some(candidate),
        })
}

/// Width of one distance bucket for a map of the given size.
pub fn bucket_unit(width: u32, height: u32) -> f64 {
    ((f64::from(width) - 2.0) + (f64::from(height) - 4.0)) / 10.0
}

/// Distance bucket in `1..=10`; distances past the last bucket clamp to it.
pub fn distance_bucket(distance: u32, width: u32, height: u32) -> u8 {
    let unit = bucket_unit(width, height);
    let max = f64::from(DiscreteState::MAX_BUCKET);
    let raw = if unit > 0.0 {
        (f64::from(distance) / unit).ceil()
    } else {
        max
    };
    raw.clamp(1.0, max) as u8
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::Target;

    fn manhattan(a: Position, b: Position) -> u32 {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
    }

    fn observation(me: (i32, i32), targets: &[((i32, i32), bool)]) -> Observation {
        Observation {
            self_position: me.into(),
            targets: targets
                .iter()
                .map(|&(p, alive)| Target::new(p.into(), alive))
                .collect(),
            legal_moves: vec![],
            width: 10,
            height: 8,
        }
    }

    #[test]
    fn test_rows_are_a_bijection() {
        let mut seen = HashSet::new();
        for bucket in 1..=DiscreteState::MAX_BUCKET {
            for compass in Compass::ALL {
                let state = DiscreteState::tracking(compass, bucket);
                let row = state.row();
                assert!(row < DiscreteState::TERMINAL_ROW);
                assert!(seen.insert(row), "row {row} assigned twice");
                assert_eq!(DiscreteState::from_row(row), state);
            }
        }
        assert_eq!(seen.len(), 80);
        assert_eq!(DiscreteState::Terminal.row(), 80);
        assert_eq!(DiscreteState::from_row(80), DiscreteState::Terminal);
    }

    #[test]
    fn test_compass_table() {
        // dx = self - target, dy = self - target
        let cases = [
            ((0, -1), Compass::North),
            ((-1, -1), Compass::NorthEast),
            ((-1, 0), Compass::East),
            ((-1, 1), Compass::SouthEast),
            ((0, 1), Compass::South),
            ((1, 1), Compass::SouthWest),
            ((1, 0), Compass::West),
            ((1, -1), Compass::NorthWest),
        ];
        for ((dx, dy), expected) in cases {
            assert_eq!(Compass::from_offset(dx * 4, dy * 7), Some(expected));
        }
        assert_eq!(Compass::from_offset(0, 0), None);
    }

    #[test]
    fn test_encode_reference_scenario() {
        let obs = observation((5, 5), &[((5, 2), true)]);
        let distance = |_: Position, _: Position| -> u32 { 3 };
        let encoding = StateEncoder::new().encode(&obs, &distance);

        // 10x8 map: unit = 1.2, ceil(3 / 1.2) = 3. The target is below us,
        // so dy > 0 reads as South in the label table.
        assert_eq!(
            encoding.state,
            DiscreteState::tracking(Compass::South, 3)
        );
        assert_eq!(encoding.state.row(), 4 + 2 * 8);
        assert_eq!(encoding.target.map(|t| t.index), Some(0));
    }

    #[test]
    fn test_encode_north_row() {
        let obs = observation((5, 2), &[((5, 5), true)]);
        let encoding = StateEncoder::new().encode(&obs, &manhattan);
        assert_eq!(encoding.state, DiscreteState::tracking(Compass::North, 3));
        assert_eq!(encoding.state.row(), 16);
    }

    #[test]
    fn test_encode_without_live_targets_is_terminal() {
        let obs = observation((1, 1), &[((3, 3), false), ((4, 4), false)]);
        let encoding = StateEncoder::new().encode(&obs, &manhattan);
        assert_eq!(encoding.state, DiscreteState::Terminal);
        assert_eq!(encoding.target, None);
    }

    #[test]
    fn test_encode_collocated_is_terminal_with_fix() {
        let obs = observation((2, 2), &[((2, 2), true)]);
        let encoding = StateEncoder::new().encode(&obs, &manhattan);
        assert_eq!(encoding.state, DiscreteState::Terminal);
        assert_eq!(encoding.target.map(|t| t.distance), Some(0));
    }

    #[test]
    fn test_nearest_skips_dead_and_keeps_first_tie() {
        let obs = observation(
            (0, 0),
            &[((1, 0), false), ((0, 2), true), ((2, 0), true), ((5, 5), true)],
        );
        let fix = nearest_live_target(&obs, &manhattan).unwrap();
        assert_eq!(fix.index, 1);
        assert_eq!(fix.distance, 2);
    }

    #[test]
    fn test_bucket_clamps_to_table_shape() {
        assert_eq!(distance_bucket(0, 10, 8), 1);
        assert_eq!(distance_bucket(1, 10, 8), 1);
        assert_eq!(distance_bucket(12, 10, 8), 10);
        assert_eq!(distance_bucket(500, 10, 8), 10);
        // Degenerate map where the unit is not positive.
        assert_eq!(distance_bucket(3, 2, 4), 10);
    }
}
