//! Hike configuration (world, motion, viewport, headless driver). Loaded from config.ron at startup.

use std::path::{Path, PathBuf};

use engine_core::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// World geometry and the step-to-distance mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_width")]
    pub width: f64,
    #[serde(default = "default_world_height")]
    pub height: f64,
    #[serde(default = "default_meters_per_step")]
    pub meters_per_step: f64,
    /// Steps walked before the next biome starts.
    #[serde(default = "default_steps_per_biome")]
    pub steps_per_biome: u32,
    /// Upper clamp for the step input.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// The hiker never targets closer than this to the right world edge.
    #[serde(default = "default_right_margin")]
    pub right_margin: f64,
}

fn default_world_width() -> f64 {
    8000.0
}
fn default_world_height() -> f64 {
    1000.0
}
fn default_meters_per_step() -> f64 {
    0.8
}
fn default_steps_per_biome() -> u32 {
    1000
}
fn default_max_steps() -> u32 {
    10_000
}
fn default_right_margin() -> f64 {
    100.0
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_width(),
            height: default_world_height(),
            meters_per_step: default_meters_per_step(),
            steps_per_biome: default_steps_per_biome(),
            max_steps: default_max_steps(),
            right_margin: default_right_margin(),
        }
    }
}

impl WorldConfig {
    /// Distance walked after `steps`, in world units.
    pub fn distance(&self, steps: u32) -> f64 {
        steps as f64 * self.meters_per_step
    }

    /// Overall journey progress in `[0, 1]`.
    pub fn progress(&self, steps: u32) -> f64 {
        if self.width <= 0.0 {
            return 1.0;
        }
        (self.distance(steps) / self.width).clamp(0.0, 1.0)
    }

    /// Where the hiker heads for after `steps`.
    pub fn target_x(&self, steps: u32) -> f64 {
        self.distance(steps).min(self.width - self.right_margin)
    }
}

/// Per-tick animation rates. All values assume the 60 Hz logical tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_tween_speed")]
    pub tween_speed: f64,
    #[serde(default = "default_chase")]
    pub chase: f64,
    #[serde(default = "default_camera_smoothing")]
    pub camera_smoothing: f64,
    #[serde(default = "default_camera_lead")]
    pub camera_lead: f64,
    #[serde(default = "default_transition_speed")]
    pub transition_speed: f64,
    #[serde(default = "default_bob_speed")]
    pub bob_speed: f64,
    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f64,
    #[serde(default = "default_walk_speed_active")]
    pub walk_speed_active: f64,
    #[serde(default = "default_walk_speed_idle")]
    pub walk_speed_idle: f64,
    #[serde(default = "default_particle_gravity")]
    pub particle_gravity: f64,
    #[serde(default = "default_particles_per_step")]
    pub particles_per_step: usize,
}

fn default_tween_speed() -> f64 {
    0.06
}
fn default_chase() -> f64 {
    0.15
}
fn default_camera_smoothing() -> f64 {
    0.06
}
fn default_camera_lead() -> f64 {
    0.35
}
fn default_transition_speed() -> f64 {
    0.018
}
fn default_bob_speed() -> f64 {
    0.08
}
fn default_bob_amplitude() -> f64 {
    3.0
}
fn default_walk_speed_active() -> f64 {
    0.18
}
fn default_walk_speed_idle() -> f64 {
    0.04
}
fn default_particle_gravity() -> f64 {
    0.08
}
fn default_particles_per_step() -> usize {
    2
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tween_speed: default_tween_speed(),
            chase: default_chase(),
            camera_smoothing: default_camera_smoothing(),
            camera_lead: default_camera_lead(),
            transition_speed: default_transition_speed(),
            bob_speed: default_bob_speed(),
            bob_amplitude: default_bob_amplitude(),
            walk_speed_active: default_walk_speed_active(),
            walk_speed_idle: default_walk_speed_idle(),
            particle_gravity: default_particle_gravity(),
            particles_per_step: default_particles_per_step(),
        }
    }
}

/// Logical drawing area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f64,
    #[serde(default = "default_viewport_height")]
    pub height: f64,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
}

fn default_viewport_width() -> f64 {
    1280.0
}
fn default_viewport_height() -> f64 {
    720.0
}
fn default_pixel_ratio() -> f64 {
    1.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
            pixel_ratio: default_pixel_ratio(),
        }
    }
}

/// Settings for the headless `hike-progress` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Frame budget; the run also stops once the step count reaches the max.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Frames between "+steps" presses.
    #[serde(default = "default_click_interval")]
    pub click_interval: u64,
    #[serde(default = "default_click_steps")]
    pub click_steps: u32,
    /// Frames between PNG snapshots (0 disables).
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval: u64,
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_frames() -> u64 {
    9000
}
fn default_click_interval() -> u64 {
    45
}
fn default_click_steps() -> u32 {
    100
}
fn default_snapshot_interval() -> u64 {
    300
}
fn default_seed() -> u64 {
    42
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            click_interval: default_click_interval(),
            click_steps: default_click_steps(),
            snapshot_interval: default_snapshot_interval(),
            snapshot_dir: None,
            seed: default_seed(),
        }
    }
}

/// Hiker figure colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikerColors {
    #[serde(default = "default_body_color")]
    pub body: Rgb,
    #[serde(default = "default_accent_color")]
    pub accent: Rgb,
    #[serde(default = "default_stick_color")]
    pub stick: Rgb,
}

fn default_body_color() -> Rgb {
    Rgb::from_hex(0x3a7fc1)
}
fn default_accent_color() -> Rgb {
    Rgb::from_hex(0x2a5f8f)
}
fn default_stick_color() -> Rgb {
    Rgb::from_hex(0x5a4a3a)
}

impl Default for HikerColors {
    fn default() -> Self {
        Self { body: default_body_color(), accent: default_accent_color(), stick: default_stick_color() }
    }
}

/// Persistent hike settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HikeConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub hiker: HikerColors,
}

impl HikeConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_ron(&data).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Save current config to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let s = self.to_ron()?;
        std::fs::write(path, s).map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
