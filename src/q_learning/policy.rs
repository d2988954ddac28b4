//! ε-greedy action selection over the legal, non-Stop moves.

use rand::{Rng, seq::IndexedRandom};

use crate::{
    Error, Result,
    q_learning::q_table::QTable,
    state::DiscreteState,
    types::{Action, Move},
};

/// Learner actions present in an engine's legal move set.
///
/// `Stop` is filtered out and duplicates collapse; the engine's order is
/// kept. An absent `Stop` is not an error.
pub fn legal_actions(moves: &[Move]) -> Vec<Action> {
    let mut actions = Vec::with_capacity(Action::COUNT);
    for action in moves.iter().copied().filter_map(Action::from_move) {
        if !actions.contains(&action) {
            actions.push(action);
        }
    }
    actions
}

/// ε-greedy policy
///
/// Explores uniformly over the legal actions with probability ε, otherwise
/// exploits the highest q-value among them, breaking ties uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub const DEFAULT_EPSILON: f64 = 0.05;

    /// Create a policy exploring with probability `epsilon`.
    pub fn new(epsilon: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&epsilon), "epsilon {epsilon} outside [0, 1]");
        Self { epsilon }
    }

    /// Exploration probability.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Pick an action for `state` from `legal`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if `legal` is empty.
    pub fn select_action<R: Rng>(
        &self,
        table: &QTable,
        state: DiscreteState,
        legal: &[Action],
        rng: &mut R,
    ) -> Result<Action> {
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }

        let candidates = if rng.random::<f64>() < self.epsilon {
            // Explore
            legal.to_vec()
        } else {
            table.best_actions(state.row(), legal)
        };

        candidates
            .choose(rng)
            .copied()
            .ok_or(Error::NoLegalActions)
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EPSILON)
    }
}
