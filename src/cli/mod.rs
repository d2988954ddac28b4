//! Command-line interface for training and inspecting pursuit q-tables.

pub mod commands;
pub mod output;
