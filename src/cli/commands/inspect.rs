//! Inspect command - print the greedy policy stored in a q-table

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App, cli::output::print_section, q_learning::QTable, state::DiscreteState, types::Action,
};

#[derive(Parser, Debug)]
#[command(about = "Show the learned values and greedy action per state")]
pub struct InspectArgs {
    /// Q-table file to read
    #[arg(default_value = "qtable.txt")]
    pub table: PathBuf,

    /// Only list states with at least one non-zero value
    #[arg(long, default_value_t = false)]
    pub learned_only: bool,
}

/// Run the `inspect` command.
pub fn execute(args: InspectArgs) -> Result<()> {
    let table = App::new()
        .load_table(&args.table)
        .with_context(|| format!("Failed to load {}", args.table.display()))?;

    print_section(&format!("Q-table {}", args.table.display()));
    let shown = write_report(&table, args.learned_only, &mut io::stdout().lock())?;
    println!("\n{shown} of {} states shown", DiscreteState::ROWS);
    Ok(())
}

/// Write one line per state with its values and greedy action; returns the
/// number of states listed.
pub fn write_report<W: Write>(
    table: &QTable,
    learned_only: bool,
    out: &mut W,
) -> io::Result<usize> {
    writeln!(
        out,
        "{:>4}  {:<9} {:>10} {:>10} {:>10} {:>10}  {}",
        "row", "state", "North", "East", "South", "West", "greedy"
    )?;

    let mut shown = 0;
    for row in 0..DiscreteState::ROWS {
        let values = table.row(row);
        if learned_only && values.iter().all(|&v| v == 0.0) {
            continue;
        }
        let greedy: Action = table.greedy_action(row);
        writeln!(
            out,
            "{:>4}  {:<9} {:>10.3} {:>10.3} {:>10.3} {:>10.3}  {}",
            row,
            DiscreteState::from_row(row).to_string(),
            values[0],
            values[1],
            values[2],
            values[3],
            greedy
        )?;
        shown += 1;
    }
    Ok(shown)
}
