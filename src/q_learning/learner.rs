//! Q-learning backup rule.

use crate::{q_learning::q_table::QTable, state::DiscreteState, types::Action};

/// Q-learning update with fixed step size and discount.
///
/// Q(s,a) ← (1-α) Q(s,a) + α [r + γ max_a' Q(s',a')]
///
/// The bootstrap term is dropped when `s'` is terminal. With the defaults
/// (α = 1, γ = 0) the update replaces Q(s,a) with the reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearner {
    alpha: f64,
    discount: f64,
}

impl QLearner {
    pub const DEFAULT_ALPHA: f64 = 1.0;
    pub const DEFAULT_DISCOUNT: f64 = 0.0;

    /// Create a learner with step size `alpha` and discount `discount`.
    pub fn new(alpha: f64, discount: f64) -> Self {
        Self { alpha, discount }
    }

    /// Step size α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Discount factor γ.
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Apply one backup and return the new Q(s,a).
    pub fn update(
        &self,
        table: &mut QTable,
        prior: DiscreteState,
        action: Action,
        next: DiscreteState,
        reward: f64,
    ) -> f64 {
        let row = prior.row();
        let target = if next.is_terminal() {
            reward
        } else {
            reward + self.discount * table.best_value(next.row())
        };
        let value = (1.0 - self.alpha) * table.get(row, action) + self.alpha * target;
        table.set(row, action, value);
        value
    }
}

impl Default for QLearner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA, Self::DEFAULT_DISCOUNT)
    }
}
