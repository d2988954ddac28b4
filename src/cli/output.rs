//! Terminal output for the pursuit CLI

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 60;

/// Progress bar counting finished episodes; the message carries the last
/// episode's ticks and reward.
pub fn create_training_progress(total_episodes: u64) -> Result<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.green/white} {pos}/{len} episodes {msg}")
        .map_err(|e| anyhow!("invalid progress template: {e}"))?
        .progress_chars("#>-");
    Ok(ProgressBar::new(total_episodes).with_style(style))
}

/// Heading framed by horizontal rules.
pub fn print_section(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}\n{title}\n{rule}");
}

/// Aligned `label: value` lines.
pub fn print_stats_table(stats: &[(&str, String)]) {
    let width = stats.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    for (label, value) in stats {
        println!("  {:<width$} {value}", format!("{label}:"));
    }
}
