//! Init command - write an all-zero q-table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(about = "Create an all-zero q-table")]
pub struct InitArgs {
    /// Q-table file to create
    #[arg(default_value = "qtable.txt")]
    pub table: PathBuf,

    /// Replace an existing table
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

/// Run the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    let app = App::new();
    let written = app
        .init_table(&args.table, args.force)
        .with_context(|| format!("Failed to initialise {}", args.table.display()))?;

    if written {
        println!("Wrote zeroed q-table to {}", args.table.display());
    } else {
        println!(
            "{} already holds a q-table; pass --force to replace it",
            args.table.display()
        );
    }
    Ok(())
}
