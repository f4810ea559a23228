//! hike-progress: headless driver that presses "+steps" on a timer and
//! writes PNG snapshots of the animation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use hike::{CliArgs, FrameLoop, HikeConfig, HudStats};
use renderer::{RasterSurface, Viewport};

/// Ticks to keep animating after the last press so the scene settles.
const SETTLE_FRAMES: u64 = 180;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut config = match &args.config {
        Some(path) => HikeConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HikeConfig::load(),
    };
    config.apply_cli_overrides(&args);

    if let Some(path) = &args.dump_config {
        config.save_to(path).with_context(|| format!("writing config to {}", path.display()))?;
        log::info!("Wrote effective config to {}", path.display());
        return Ok(());
    }

    let vp = &config.viewport;
    let surface = RasterSurface::new_opaque(&Viewport::new(vp.width, vp.height, vp.pixel_ratio));
    log::info!(
        "Starting hike-progress: {}x{} px, up to {} frames",
        surface.width(),
        surface.height(),
        config.driver.frames
    );

    let mut frames = FrameLoop::new(&config, Some(surface));
    let driver = config.driver.clone();
    let tick = frames.tick_duration();
    let max_steps = config.world.max_steps;
    let mut settle_left = SETTLE_FRAMES;

    if let Some(dir) = &driver.snapshot_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    for frame in 0..driver.frames {
        if driver.click_interval > 0 && frame % driver.click_interval == 0 && frames.state().steps() < max_steps {
            frames.add_steps(driver.click_steps);
            log::debug!("+{} steps -> {}", driver.click_steps, frames.state().steps());
        }

        frames.frame(tick);

        if let Some(dir) = &driver.snapshot_dir {
            if driver.snapshot_interval > 0 && frame % driver.snapshot_interval == 0 {
                snapshot(&frames, dir, frame)?;
            }
        }

        if frames.state().steps() >= max_steps {
            if settle_left == 0 {
                break;
            }
            settle_left -= 1;
        }
    }

    if let Some(dir) = &driver.snapshot_dir {
        snapshot(&frames, dir, frames.state().tick_count)?;
    }

    log::info!("{}", HudStats::from_state(frames.state()).summary());
    let clock = frames.clock();
    log::info!(
        "Simulated {} frames ({:.1}s at {:.0} fps)",
        clock.frame_count(),
        clock.elapsed_seconds(),
        clock.fps()
    );
    frames.teardown();
    Ok(())
}

fn snapshot(frames: &FrameLoop<RasterSurface>, dir: &Path, frame: u64) -> Result<()> {
    let Some(surface) = frames.surface() else {
        return Ok(());
    };
    let path = dir.join(format!("frame_{:05}.png", frame));
    surface.save_png(&path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
