//! Rangewatch CLI
//!
//! Replay a recorded price stream through the rolling extrema engine and
//! report per-window minima and maxima.
//!
//! Usage:
//!   cargo run --release -- replay --input prices.jsonl
//!   cargo run --release -- replay --input prices.jsonl --config windows.toml --advance-to 1700000086400000
//!   cargo run --release -- windows --config windows.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rangewatch::engine::clock::{format_millis, Millis};
use rangewatch::{PriceFeed, RollingExtremaTracker, VecFeed, WindowConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Rolling-window price extrema over a recorded stream
#[derive(Parser, Debug)]
#[command(name = "rangewatch")]
#[command(about = "Rolling-window price extrema over a recorded stream")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSONL price stream and print window extrema
    Replay {
        /// Path to the input stream: one {"price": .., "at": ..} object per line
        #[arg(short, long)]
        input: PathBuf,

        /// Optional TOML window configuration (defaults to 5m/15m/1h/4h/24h)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Advance stream time to this timestamp after the last sample
        #[arg(long)]
        advance_to: Option<Millis>,
    },

    /// Print the active window configuration
    Windows {
        /// Optional TOML window configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rangewatch=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            config,
            advance_to,
        } => replay(&input, config.as_deref(), advance_to),
        Commands::Windows { config } => show_windows(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<WindowConfig> {
    match path {
        Some(path) => WindowConfig::load(path)
            .with_context(|| format!("failed to load window config {}", path.display())),
        None => Ok(WindowConfig::default()),
    }
}

fn replay(input: &Path, config: Option<&Path>, advance_to: Option<Millis>) -> Result<()> {
    let config = load_config(config)?;
    let mut tracker = RollingExtremaTracker::new(config.specs())?;
    let mut feed = VecFeed::from_jsonl(input)?;

    let mut recorded = 0usize;
    while let Some(sample) = feed.next_sample() {
        match tracker.record(sample.price, sample.at) {
            Ok(()) => recorded += 1,
            Err(e) => warn!(at = sample.at, error = %e, "skipping sample"),
        }
    }
    if let Some(now) = advance_to {
        tracker
            .advance_to(now)
            .context("cannot advance behind the last sample")?;
    }
    info!(recorded, live = tracker.live_samples(), "replay complete");

    print_summary(&tracker);
    Ok(())
}

fn show_windows(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    println!("{:<8} {:>12}", "window", "length_ms");
    for window in &config.windows {
        println!("{:<8} {:>12}", window.id, window.length_ms);
    }
    Ok(())
}

fn print_summary(tracker: &RollingExtremaTracker) {
    let now = match tracker.now() {
        Some(now) => now,
        None => {
            println!("No samples recorded.");
            return;
        }
    };
    println!("As of {}", format_millis(now));
    if let Some(last) = tracker.latest() {
        println!(
            "Last price {:.4} at {}",
            last.price,
            format_millis(last.at)
        );
    }
    println!("{:<8} {:>14} {:>14}", "window", "min", "max");
    for (spec, extrema) in tracker.snapshot() {
        println!(
            "{:<8} {:>14} {:>14}",
            spec.id,
            render(extrema.min),
            render(extrema.max)
        );
    }
}

fn render(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("{:.4}", price),
        None => "-".to_string(),
    }
}
