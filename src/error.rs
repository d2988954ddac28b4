//! Error types for the pursuit crate

use thiserror::Error;

use crate::types::Action;

/// Main error type for the pursuit crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("q-table has {got} rows, expected {expected}")]
    TableRowCount { expected: usize, got: usize },

    #[error("q-table line {line} has {got} values, expected {expected}")]
    TableColumnCount {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("q-table line {line}: '{token}' is not a number")]
    TableValue { line: usize, token: String },

    #[error("q-table has {extra} rows beyond the expected {expected}")]
    TableTrailingRows { expected: usize, extra: usize },

    #[error("no live target to pursue")]
    NoLiveTarget,

    #[error("target {index} is missing from observation with {count} targets")]
    TargetMissing { index: usize, count: usize },

    #[error("no legal actions available once Stop is excluded")]
    NoLegalActions,

    #[error("action {action} is not legal in the current position")]
    IllegalAction { action: Action },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error belongs to the table format family.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::TableRowCount { .. }
                | Error::TableColumnCount { .. }
                | Error::TableValue { .. }
                | Error::TableTrailingRows { .. }
        )
    }

    /// Whether the error is a per-tick domain condition the controller can
    /// recover from by skipping the learning step.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Error::NoLiveTarget | Error::TargetMissing { .. })
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
