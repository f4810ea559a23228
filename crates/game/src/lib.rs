//! Hike progress: a walking figure crosses a procedurally generated,
//! biome-cycling landscape as an external step count grows.
//!
//! [`FrameLoop`] is the host entry point. It runs fixed [`update::tick`]s and
//! draws through any [`renderer::DrawSurface`].

pub mod cli;
pub mod config;
pub mod effects;
pub mod frame_loop;
pub mod hiker;
pub mod hud;
pub mod landmarks;
pub mod render;
pub mod state;
pub mod transition;
pub mod update;

pub use cli::CliArgs;
pub use config::{config_path, ConfigError, HikeConfig};
pub use frame_loop::{FrameLoop, FrameOutcome, MAX_TICKS_PER_FRAME};
pub use hud::{HudStats, TimeOfDay};
pub use state::{HikeEvent, HikeState};
