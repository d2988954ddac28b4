//! Common test utilities for the pursuit test suite.

#![allow(dead_code)]

use pursuit::{Action, Error, Move, Observation, Position, Result, Target, ports::Engine};

/// Manhattan distance, standing in for maze distance on open maps.
pub fn manhattan(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Build an observation on a `width` × `height` map.
pub fn observation(
    me: (i32, i32),
    targets: &[((i32, i32), bool)],
    legal: &[Move],
    width: u32,
    height: u32,
) -> Observation {
    Observation {
        self_position: me.into(),
        targets: targets
            .iter()
            .map(|&(p, alive)| Target::new(p.into(), alive))
            .collect(),
        legal_moves: legal.to_vec(),
        width,
        height,
    }
}

/// Engine replaying a fixed list of observations, one per submitted move.
pub struct ScriptedEngine {
    frames: Vec<Observation>,
    cursor: usize,
    pub submitted: Vec<Move>,
    fail_at: Option<usize>,
    panic_at: Option<usize>,
}

impl ScriptedEngine {
    pub fn new(frames: Vec<Observation>) -> Self {
        Self {
            frames,
            cursor: 0,
            submitted: Vec::new(),
            fail_at: None,
            panic_at: None,
        }
    }

    /// Reject the `n`-th submitted move (0-based).
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    /// Panic on the `n`-th submitted move (0-based).
    pub fn panicking_at(mut self, n: usize) -> Self {
        self.panic_at = Some(n);
        self
    }
}

impl Engine for ScriptedEngine {
    fn observe(&self) -> Observation {
        self.frames[self.cursor].clone()
    }

    fn submit(&mut self, mv: Move) -> Result<()> {
        let n = self.submitted.len();
        if self.panic_at == Some(n) {
            panic!("scripted engine crashed");
        }
        if self.fail_at == Some(n) {
            return Err(Error::IllegalAction {
                action: Action::from_move(mv).unwrap_or(Action::North),
            });
        }
        self.submitted.push(mv);
        self.cursor += 1;
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.cursor + 1 >= self.frames.len()
    }
}
