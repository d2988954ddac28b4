//! Fixed-shape q-table indexed by discrete state row and action column.

use crate::{
    Error, Result,
    state::DiscreteState,
    types::Action,
};

/// One q-table row: action values in [`Action::ALL`] order.
pub type Row = [f64; Action::COUNT];

/// Q-table with exactly 81 rows of 4 action values.
///
/// The shape is fixed for the lifetime of the table. Row and action indices
/// outside that shape are programming errors and panic.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    rows: [Row; DiscreteState::ROWS],
}

impl QTable {
    /// Table with every action value at zero.
    pub fn zeros() -> Self {
        Self {
            rows: [[0.0; Action::COUNT]; DiscreteState::ROWS],
        }
    }

    /// Build a table from exactly 81 rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableRowCount`] if `rows` has any other length.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let got = rows.len();
        let rows: [Row; DiscreteState::ROWS] =
            rows.try_into().map_err(|_| Error::TableRowCount {
                expected: DiscreteState::ROWS,
                got,
            })?;
        Ok(Self { rows })
    }

    /// Q-value at `row` for `action`.
    pub fn get(&self, row: usize, action: Action) -> f64 {
        self.row(row)[action.column()]
    }

    /// Overwrite the q-value at `row` for `action`.
    pub fn set(&mut self, row: usize, action: Action, value: f64) {
        assert!(row < DiscreteState::ROWS, "q-table row {row} out of range");
        self.rows[row][action.column()] = value;
    }

    /// Q-value for a discrete state.
    pub fn value(&self, state: DiscreteState, action: Action) -> f64 {
        self.get(state.row(), action)
    }

    /// All four action values at `row`.
    pub fn row(&self, row: usize) -> &Row {
        assert!(row < DiscreteState::ROWS, "q-table row {row} out of range");
        &self.rows[row]
    }

    /// Rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Maximum over all four action values at `row`.
    pub fn best_value(&self, row: usize) -> f64 {
        self.row(row).iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Actions among `candidates` sharing the highest value at `row`.
    pub fn best_actions(&self, row: usize, candidates: &[Action]) -> Vec<Action> {
        let values = self.row(row);
        let best = candidates
            .iter()
            .map(|action| values[action.column()])
            .fold(f64::NEG_INFINITY, f64::max);
        candidates
            .iter()
            .copied()
            .filter(|action| values[action.column()] == best)
            .collect()
    }

    /// First highest-valued action over the full row.
    pub fn greedy_action(&self, row: usize) -> Action {
        self.best_actions(row, &Action::ALL)[0]
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::zeros()
    }
}
