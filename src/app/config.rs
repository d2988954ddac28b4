//! Configuration for controller creation.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{EpsilonGreedy, QLearner, RewardModel},
};

/// Hyperparameters and persistence location for a pursuit controller.
///
/// # Examples
///
/// ```
/// use pursuit::app::LearningConfig;
///
/// let config = LearningConfig::default()
///     .with_epsilon(0.1)
///     .with_alpha(0.5)
///     .with_discount(0.9)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), pursuit::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Exploration probability
    pub epsilon: f64,
    /// Step size α
    pub alpha: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Reward paid when the tracked target is captured
    pub capture_reward: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Q-table location
    pub table_path: PathBuf,
}

impl LearningConfig {
    pub const DEFAULT_TABLE_PATH: &'static str = "qtable.txt";

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the step size.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the discount factor.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the reward paid on capture.
    pub fn with_capture_reward(mut self, reward: f64) -> Self {
        self.capture_reward = reward;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the q-table location.
    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = path.into();
        self
    }

    /// Check every hyperparameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if epsilon, alpha or discount
    /// lie outside `[0, 1]`, or the capture reward is not finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("alpha", self.alpha),
            ("discount", self.discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if !self.capture_reward.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("capture_reward must be finite, got {}", self.capture_reward),
            });
        }
        Ok(())
    }

    /// Policy built from `epsilon`.
    pub fn policy(&self) -> EpsilonGreedy {
        EpsilonGreedy::new(self.epsilon)
    }

    /// Learner built from `alpha` and `discount`.
    pub fn learner(&self) -> QLearner {
        QLearner::new(self.alpha, self.discount)
    }

    /// Reward model built from `capture_reward`.
    pub fn reward_model(&self) -> RewardModel {
        RewardModel::new(self.capture_reward)
    }

    /// Read a JSON configuration; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            epsilon: EpsilonGreedy::DEFAULT_EPSILON,
            alpha: QLearner::DEFAULT_ALPHA,
            discount: QLearner::DEFAULT_DISCOUNT,
            capture_reward: RewardModel::DEFAULT_CAPTURE_REWARD,
            seed: None,
            table_path: PathBuf::from(Self::DEFAULT_TABLE_PATH),
        }
    }
}
