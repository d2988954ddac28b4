//! Train command - play episodes in a grid arena and learn online

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{GridArena, Layout, MazeDistancer, TargetMotion, grid_arena::DEFAULT_LAYOUT},
    app::{App, LearningConfig},
    cli::output::{create_training_progress, print_section, print_stats_table},
    controller::EpisodeSummary,
};

#[derive(Parser, Debug)]
#[command(about = "Train the pursuit controller", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Q-table file, read at the start and written at the end of each episode
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// JSON file with learning configuration
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// ASCII layout file (defaults to a built-in maze)
    #[arg(long, short = 'l')]
    pub layout: Option<PathBuf>,

    /// Number of episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Decision limit per episode
    #[arg(long, default_value_t = 500)]
    pub max_ticks: usize,

    /// Exploration probability override
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Step size override
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor override
    #[arg(long)]
    pub discount: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let targets random-walk instead of standing still
    #[arg(long, default_value_t = false)]
    pub moving_targets: bool,

    /// Create a zeroed table first if none exists
    #[arg(long, default_value_t = false)]
    pub init: bool,

    /// Hide the progress bar
    #[arg(long = "no-progress", action = ArgAction::SetFalse)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct TrainingSummary {
    episodes: usize,
    cleared: usize,
    ticks: usize,
    updates: usize,
    skipped_updates: usize,
    captures: usize,
    total_reward: f64,
    mean_ticks: f64,
    config: Option<LearningConfig>,
}

impl TrainingSummary {
    fn record(&mut self, episode: &EpisodeSummary, cleared: bool) {
        self.episodes += 1;
        self.cleared += usize::from(cleared);
        self.ticks += episode.ticks;
        self.updates += episode.updates;
        self.skipped_updates += episode.skipped_updates;
        self.captures += episode.captures;
        self.total_reward += episode.total_reward;
        self.mean_ticks = self.ticks as f64 / self.episodes as f64;
    }
}

fn resolve_config(args: &TrainArgs) -> Result<LearningConfig> {
    let mut config = match &args.config {
        Some(path) => LearningConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => LearningConfig::default(),
    };
    if let Some(table) = &args.table {
        config.table_path = table.clone();
    }
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(discount) = args.discount {
        config.discount = discount;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Run the `train` command.
pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let layout_text = match &args.layout {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout {}", path.display()))?,
        None => DEFAULT_LAYOUT.to_string(),
    };
    let layout = Layout::parse(&layout_text)?;
    let distancer = MazeDistancer::new(&layout);
    let motion = if args.moving_targets {
        TargetMotion::RandomWalk
    } else {
        TargetMotion::Stationary
    };

    let app = App::new();
    if args.init && app.init_table(&config.table_path, false)? {
        info!("initialised {}", config.table_path.display());
    }

    let pb = if args.progress {
        Some(create_training_progress(args.episodes as u64)?)
    } else {
        None
    };

    let mut totals = TrainingSummary::default();
    for episode in 0..args.episodes {
        let mut episode_config = config.clone();
        episode_config.seed = config.seed.map(|seed| seed.wrapping_add(episode as u64));

        let mut arena = GridArena::new(layout.clone(), motion, episode_config.seed);
        let controller = app
            .start_controller(&episode_config)
            .with_context(|| format!("Failed to start episode {}", episode + 1))?;
        let summary = controller
            .run_episode(&mut arena, &distancer, Some(args.max_ticks))
            .with_context(|| format!("Episode {} failed", episode + 1))?;

        totals.record(&summary, arena.captured() == layout.target_starts().len());
        if let Some(pb) = &pb {
            pb.set_message(format!("{} ticks, reward {}", summary.ticks, summary.total_reward));
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    print_section("Training summary");
    print_stats_table(&[
        ("Episodes", totals.episodes.to_string()),
        ("Cleared", totals.cleared.to_string()),
        ("Mean ticks", format!("{:.1}", totals.mean_ticks)),
        ("Updates", totals.updates.to_string()),
        ("Skipped updates", totals.skipped_updates.to_string()),
        ("Captures", totals.captures.to_string()),
        ("Total reward", format!("{:.1}", totals.total_reward)),
        ("Q-table", config.table_path.display().to_string()),
    ]);

    if let Some(path) = &args.summary {
        totals.config = Some(config);
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        to_writer_pretty(file, &totals).context("Failed to write summary")?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
