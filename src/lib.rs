//! Tabular Q-learning controller for grid pursuit/evasion games
//!
//! This crate provides:
//! - Discrete state encoding (compass direction × distance bucket) of the nearest live target
//! - A fixed 81 × 4 q-table with a flat text persistence format
//! - ε-greedy action selection, shaped capture/progress reward and a Q-learning backup
//! - A per-episode controller with an explicit load/shutdown lifecycle
//! - Ports for the host engine, maze distances and table storage, with simple adapters

pub mod adapters;
pub mod app;
pub mod cli;
pub mod controller;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod state;
pub mod types;

pub use app::{App, LearningConfig};
pub use controller::{Controller, EpisodeSummary};
pub use error::{Error, Result};
pub use q_learning::{EpsilonGreedy, QLearner, QTable, RewardModel};
pub use state::{Compass, DiscreteState, StateEncoder};
pub use types::{Action, Move, Observation, Position, Target};
