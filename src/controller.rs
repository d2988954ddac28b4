//! Online-learning pursuit controller
//!
//! Owns the q-table for one episode and runs one decide/learn step per
//! engine tick:
//!
//! ```text
//! observation ─► StateEncoder ─► EpsilonGreedy ─► action ─► engine
//!      ▲                                                      │
//!      └── RewardModel ◄── next observation ◄─────────────────┘
//!                │
//!                ▼
//!        QLearner updates Q(prior state, action)
//! ```
//!
//! The table is loaded by [`Controller::initialize`] and written back exactly
//! once by [`Controller::shutdown`]. [`Controller::run_episode`] drives an
//! [`Engine`] and flushes on every exit path, including errors and panics.

use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::Arc,
};

use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    Error, Result,
    app::LearningConfig,
    ports::{Distancer, Engine, TableStore},
    q_learning::{EpsilonGreedy, QLearner, QTable, RewardModel, legal_actions},
    state::{Encoding, StateEncoder},
    types::{Action, Observation},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Per-episode counters reported at shutdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpisodeSummary {
    /// Decisions taken
    pub ticks: usize,
    /// Q-value updates applied
    pub updates: usize,
    /// Learning steps skipped on a domain error
    pub skipped_updates: usize,
    /// Tracked targets captured
    pub captures: usize,
    /// Sum of applied rewards
    pub total_reward: f64,
}

#[derive(Debug, Clone, Copy)]
struct PendingStep {
    encoding: Encoding,
    action: Action,
}

/// Pursuit controller for a single episode.
pub struct Controller {
    table: QTable,
    store: Arc<dyn TableStore + Send + Sync>,
    table_path: PathBuf,
    encoder: StateEncoder,
    policy: EpsilonGreedy,
    learner: QLearner,
    reward_model: RewardModel,
    rng: StdRng,
    pending: Option<PendingStep>,
    summary: EpisodeSummary,
}

impl Controller {
    /// Load the q-table from `store` and prepare for the first tick.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or if the stored table cannot be
    /// read or is malformed. No controller is built from a partial table.
    pub fn initialize(
        config: &LearningConfig,
        store: Arc<dyn TableStore + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        let table = store.load(&config.table_path)?;
        let controller = Self::with_table(config, store, table);
        info!(
            "loaded q-table from {} (epsilon {}, alpha {}, discount {}, capture reward {})",
            controller.table_path.display(),
            controller.policy.epsilon(),
            controller.learner.alpha(),
            controller.learner.discount(),
            controller.reward_model.capture_reward()
        );
        Ok(controller)
    }

    fn with_table(
        config: &LearningConfig,
        store: Arc<dyn TableStore + Send + Sync>,
        table: QTable,
    ) -> Self {
        Self {
            table,
            store,
            table_path: config.table_path.clone(),
            encoder: StateEncoder::new(),
            policy: config.policy(),
            learner: config.learner(),
            reward_model: config.reward_model(),
            rng: build_rng(config.seed),
            pending: None,
            summary: EpisodeSummary::default(),
        }
    }

    /// Learn from the previous tick, then choose this tick's action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if the observation offers no move
    /// besides `Stop`.
    pub fn act<D: Distancer + ?Sized>(
        &mut self,
        obs: &Observation,
        distancer: &D,
    ) -> Result<Action> {
        let encoding = self.encoder.encode(obs, distancer);
        self.learn_from(obs, &encoding, distancer);

        let legal = legal_actions(&obs.legal_moves);
        let action = self
            .policy
            .select_action(&self.table, encoding.state, &legal, &mut self.rng)?;

        debug!(
            "tick {}: state {} -> {action}",
            self.summary.ticks, encoding.state
        );

        self.pending = Some(PendingStep { encoding, action });
        self.summary.ticks += 1;
        Ok(action)
    }

    /// Learn from the final observation of an episode.
    pub fn finish<D: Distancer + ?Sized>(&mut self, obs: &Observation, distancer: &D) {
        let encoding = self.encoder.encode(obs, distancer);
        self.learn_from(obs, &encoding, distancer);
    }

    /// Back up the pending step into `next`, the encoding of `obs`.
    fn learn_from<D: Distancer + ?Sized>(
        &mut self,
        obs: &Observation,
        next: &Encoding,
        distancer: &D,
    ) {
        let Some(step) = self.pending.take() else {
            return;
        };

        let transition = match self
            .reward_model
            .assess(step.encoding.target.as_ref(), obs, distancer)
        {
            Ok(transition) => transition,
            Err(err) => {
                warn!("skipping learning step from {}: {err}", step.encoding.state);
                self.summary.skipped_updates += 1;
                return;
            }
        };

        let value = self.learner.update(
            &mut self.table,
            step.encoding.state,
            step.action,
            next.state,
            transition.reward,
        );

        debug!(
            "Q({}, {}) <- {value} (reward {}, next {})",
            step.encoding.state, step.action, transition.reward, next.state
        );

        self.summary.updates += 1;
        self.summary.total_reward += transition.reward;
        if transition.captured {
            self.summary.captures += 1;
        }
    }

    /// Drive `engine` until it reports the episode over or `max_ticks`
    /// decisions were made, then flush the table.
    ///
    /// The table is written even when a tick fails or panics; the tick's
    /// error (or panic) is then passed on.
    pub fn run_episode<E, D>(
        mut self,
        engine: &mut E,
        distancer: &D,
        max_ticks: Option<usize>,
    ) -> Result<EpisodeSummary>
    where
        E: Engine + ?Sized,
        D: Distancer + ?Sized,
    {
        let played = panic::catch_unwind(AssertUnwindSafe(|| {
            self.play(engine, distancer, max_ticks)
        }));
        let flushed = self.shutdown();

        match played {
            Ok(Ok(())) => flushed,
            Ok(Err(err)) => {
                if let Err(flush_err) = flushed {
                    error!("q-table flush after failed episode also failed: {flush_err}");
                }
                Err(err)
            }
            Err(payload) => {
                if let Err(flush_err) = flushed {
                    error!("q-table flush after panic failed: {flush_err}");
                }
                panic::resume_unwind(payload)
            }
        }
    }

    fn play<E, D>(&mut self, engine: &mut E, distancer: &D, max_ticks: Option<usize>) -> Result<()>
    where
        E: Engine + ?Sized,
        D: Distancer + ?Sized,
    {
        while !engine.is_over() && max_ticks.is_none_or(|limit| self.summary.ticks < limit) {
            let obs = engine.observe();
            let action = self.act(&obs, distancer)?;
            engine.submit(action.into())?;
        }
        self.finish(&engine.observe(), distancer);
        Ok(())
    }

    /// Persist the table and end the episode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot write the table.
    pub fn shutdown(self) -> Result<EpisodeSummary> {
        self.store.save(&self.table, &self.table_path)?;
        info!(
            "saved q-table to {} after {} ticks ({} updates, {} skipped, {} captures, reward {})",
            self.table_path.display(),
            self.summary.ticks,
            self.summary.updates,
            self.summary.skipped_updates,
            self.summary.captures,
            self.summary.total_reward
        );
        Ok(self.summary)
    }

    /// The q-table as learned so far this episode.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Counters for the episode so far.
    pub fn summary(&self) -> &EpisodeSummary {
        &self.summary
    }

}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("table_path", &self.table_path)
            .field("policy", &self.policy)
            .field("learner", &self.learner)
            .field("reward_model", &self.reward_model)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
