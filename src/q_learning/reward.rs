//! Shaped reward from relative progress towards the tracked target.

use crate::{
    Error, Result,
    ports::Distancer,
    state::TargetFix,
    types::Observation,
};

/// Outcome of one transition as seen by the reward model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub reward: f64,
    /// The tracked target died during the transition.
    pub captured: bool,
}

/// Reward model
///
/// Pays a fixed capture reward when the target tracked on the prior tick is
/// no longer alive, and otherwise the signed change in maze distance to it
/// (positive when the pursuer closed in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardModel {
    capture_reward: f64,
}

impl RewardModel {
    pub const DEFAULT_CAPTURE_REWARD: f64 = 200.0;

    /// Create a reward model paying `capture_reward` on capture.
    pub fn new(capture_reward: f64) -> Self {
        Self { capture_reward }
    }

    /// Reward paid when the tracked target is captured.
    pub fn capture_reward(&self) -> f64 {
        self.capture_reward
    }

    /// Score the transition into `next` for the target fixed on the prior tick.
    ///
    /// # Errors
    ///
    /// - [`Error::NoLiveTarget`] if no target was alive on the prior tick
    /// - [`Error::TargetMissing`] if the tracked target is absent from `next`
    pub fn assess<D: Distancer + ?Sized>(
        &self,
        prior: Option<&TargetFix>,
        next: &Observation,
        distancer: &D,
    ) -> Result<Transition> {
        let prior = prior.ok_or(Error::NoLiveTarget)?;
        let target = next.targets.get(prior.index).ok_or(Error::TargetMissing {
            index: prior.index,
            count: next.targets.len(),
        })?;

        if !target.alive {
            return Ok(Transition {
                reward: self.capture_reward,
                captured: true,
            });
        }

        let next_distance = distancer.distance(next.self_position, target.position);
        Ok(Transition {
            reward: f64::from(prior.distance) - f64::from(next_distance),
            captured: false,
        })
    }

    /// Reward of the transition; see [`RewardModel::assess`].
    pub fn reward<D: Distancer + ?Sized>(
        &self,
        prior: Option<&TargetFix>,
        next: &Observation,
        distancer: &D,
    ) -> Result<f64> {
        self.assess(prior, next, distancer).map(|t| t.reward)
    }
}

impl Default for RewardModel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPTURE_REWARD)
    }
}
