//! Pursuit CLI - train and inspect the tabular pursuit controller

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pursuit")]
#[command(version, about = "Tabular Q-learning pursuit controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an all-zero q-table
    Init(pursuit::cli::commands::init::InitArgs),

    /// Train the controller in a grid arena
    Train(Box<pursuit::cli::commands::train::TrainArgs>),

    /// Show the learned values and greedy policy
    Inspect(pursuit::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => pursuit::cli::commands::init::execute(args),
        Commands::Train(args) => pursuit::cli::commands::train::execute(*args),
        Commands::Inspect(args) => pursuit::cli::commands::inspect::execute(args),
    }
}
