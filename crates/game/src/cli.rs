//! Command-line argument parsing for the headless driver.

use std::path::PathBuf;

use clap::Parser;

use crate::config::HikeConfig;

/// hike-progress command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hike-progress", about = "Headless hike progress renderer")]
pub struct CliArgs {
    /// Path to a config file (overrides `./config.ron`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewport width.
    #[arg(long)]
    pub width: Option<f64>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<f64>,

    /// Device pixel ratio.
    #[arg(long)]
    pub pixel_ratio: Option<f64>,

    /// Frame budget for the run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Frames between "+steps" presses.
    #[arg(long)]
    pub click_interval: Option<u64>,

    /// Frames between PNG snapshots (0 disables).
    #[arg(long)]
    pub snapshot_interval: Option<u64>,

    /// Directory for PNG snapshots.
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Seed for particles and camera shake.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the effective config (after overrides) to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub dump_config: Option<PathBuf>,
}

impl HikeConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.viewport.width = w;
        }
        if let Some(h) = args.height {
            self.viewport.height = h;
        }
        if let Some(r) = args.pixel_ratio {
            self.viewport.pixel_ratio = r;
        }
        if let Some(f) = args.frames {
            self.driver.frames = f;
        }
        if let Some(c) = args.click_interval {
            self.driver.click_interval = c;
        }
        if let Some(s) = args.snapshot_interval {
            self.driver.snapshot_interval = s;
        }
        if let Some(ref dir) = args.snapshot_dir {
            self.driver.snapshot_dir = Some(dir.clone());
        }
        if let Some(seed) = args.seed {
            self.driver.seed = seed;
        }
    }
}
