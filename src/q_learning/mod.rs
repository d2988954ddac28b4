//! Tabular Q-learning for the pursuit controller
//!
//! ## Components
//!
//! - [`QTable`]: fixed 81 × 4 table of action values
//! - [`serialization`]: flat text persistence format
//! - [`EpsilonGreedy`]: action selection over legal, non-Stop moves
//! - [`RewardModel`]: capture bonus or signed distance progress
//! - [`QLearner`]: the backup rule
//!
//! ## Usage Example
//!
//! ```
//! use pursuit::q_learning::{EpsilonGreedy, QLearner, QTable};
//! use pursuit::state::{Compass, DiscreteState};
//! use pursuit::types::Action;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut table = QTable::zeros();
//! let state = DiscreteState::tracking(Compass::North, 3);
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let action = EpsilonGreedy::new(0.05)
//!     .select_action(&table, state, &Action::ALL, &mut rng)?;
//! QLearner::default().update(&mut table, state, action, DiscreteState::Terminal, 200.0);
//! assert_eq!(table.value(state, action), 200.0);
//! # Ok::<(), pursuit::Error>(())
//! ```

pub mod learner;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod serialization;

// Public re-exports
pub use learner::QLearner;
pub use policy::{EpsilonGreedy, legal_actions};
pub use q_table::{QTable, Row};
pub use reward::{RewardModel, Transition};
pub use serialization::{read_table, table_from_str, table_to_string, write_table};
