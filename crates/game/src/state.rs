//! Simulation state owned by the frame loop.

use std::fmt;

use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use renderer::FollowCamera;

use crate::config::{HikeConfig, HikerColors, MotionConfig, WorldConfig};
use crate::effects::DustPuffs;
use crate::hiker::Hiker;
use crate::landmarks::LandmarkTracker;
use crate::transition::BiomeState;

/// Seconds a landmark notification stays up.
pub const LANDMARK_NOTICE_SECS: f64 = 2.5;
/// Seconds a biome notification stays up.
pub const BIOME_NOTICE_SECS: f64 = 2.2;

/// Something a tick produced for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HikeEvent {
    LandmarkReached { name: &'static str },
    BiomeEntered { name: &'static str, index: usize },
}

impl fmt::Display for HikeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HikeEvent::LandmarkReached { name } => write!(f, "Reached {}", name),
            HikeEvent::BiomeEntered { name, index } => write!(f, "Entered {} (biome {})", name, index),
        }
    }
}

/// Random jitter applied to the whole scene after a big moment.
pub struct ScreenShake {
    pub intensity: f64,
    pub decay: f64,
    pub offset: DVec2,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self { intensity: 0.0, decay: 0.9, offset: DVec2::ZERO }
    }

    /// A stronger pulse wins over a weaker one still in flight.
    pub fn kick(&mut self, amount: f64) {
        self.intensity = self.intensity.max(amount);
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.intensity > 0.01 {
            self.intensity *= self.decay;
            self.offset = DVec2::new(
                (rng.gen::<f64>() - 0.5) * self.intensity,
                (rng.gen::<f64>() - 0.5) * self.intensity,
            );
        } else {
            self.intensity = 0.0;
            self.offset = DVec2::ZERO;
        }
    }
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub time_remaining: f64,
}

/// The two auto-clearing notification slots.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    landmark: Option<Notice>,
    biome: Option<Notice>,
}

impl Notifications {
    pub fn show_landmark(&mut self, text: impl Into<String>) {
        self.landmark = Some(Notice { text: text.into(), time_remaining: LANDMARK_NOTICE_SECS });
    }

    pub fn show_biome(&mut self, text: impl Into<String>) {
        self.biome = Some(Notice { text: text.into(), time_remaining: BIOME_NOTICE_SECS });
    }

    pub fn landmark(&self) -> Option<&str> {
        self.landmark.as_ref().map(|n| n.text.as_str())
    }

    pub fn biome(&self) -> Option<&str> {
        self.biome.as_ref().map(|n| n.text.as_str())
    }

    pub fn update(&mut self, dt: f64) {
        for slot in [&mut self.landmark, &mut self.biome] {
            if let Some(notice) = slot.as_mut() {
                notice.time_remaining -= dt;
                if notice.time_remaining <= 0.0 {
                    *slot = None;
                }
            }
        }
    }
}

pub struct HikeState {
    pub world: WorldConfig,
    pub motion: MotionConfig,
    pub hiker_colors: HikerColors,
    steps: u32,
    last_steps: u32,
    pub hiker: Hiker,
    pub camera: FollowCamera,
    pub biomes: BiomeState,
    pub landmarks: LandmarkTracker,
    pub dust: DustPuffs,
    pub shake: ScreenShake,
    pub notifications: Notifications,
    pub rng: StdRng,
    pub tick_count: u64,
}

impl HikeState {
    pub fn new(config: &HikeConfig) -> Self {
        let world = config.world.clone();
        let motion = config.motion.clone();
        log::info!(
            "New hike: {}x{} world, {} m/step, {} steps per biome",
            world.width,
            world.height,
            world.meters_per_step,
            world.steps_per_biome
        );
        Self {
            biomes: BiomeState::new(world.width, world.height),
            landmarks: LandmarkTracker::new(world.width),
            camera: FollowCamera::new(motion.camera_smoothing, motion.camera_lead),
            hiker_colors: config.hiker.clone(),
            steps: 0,
            last_steps: 0,
            hiker: Hiker::default(),
            dust: DustPuffs::new(),
            shake: ScreenShake::new(),
            notifications: Notifications::default(),
            rng: StdRng::seed_from_u64(config.driver.seed),
            tick_count: 0,
            world,
            motion,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Set the step count, clamped to `[0, max_steps]`.
    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps.min(self.world.max_steps);
    }

    pub fn add_steps(&mut self, steps: u32) {
        self.set_steps(self.steps.saturating_add(steps));
    }

    pub fn reset_steps(&mut self) {
        self.set_steps(0);
    }

    /// Net change since the last call. Only the final value matters, so
    /// several input changes between ticks collapse into one delta.
    pub fn take_step_delta(&mut self) -> i64 {
        let delta = self.steps as i64 - self.last_steps as i64;
        self.last_steps = self.steps;
        delta
    }

    /// Overall journey progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.world.progress(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_steps_clamps_to_max() {
        let mut state = HikeState::new(&HikeConfig::default());
        state.set_steps(25_000);
        assert_eq!(state.steps(), 10_000);
        state.reset_steps();
        assert_eq!(state.steps(), 0);
    }

    #[test]
    fn add_steps_saturates() {
        let mut state = HikeState::new(&HikeConfig::default());
        state.set_steps(9_950);
        state.add_steps(100);
        assert_eq!(state.steps(), 10_000);
        state.add_steps(u32::MAX);
        assert_eq!(state.steps(), 10_000);
    }

    #[test]
    fn step_delta_collapses_changes_between_ticks() {
        let mut state = HikeState::new(&HikeConfig::default());
        state.add_steps(100);
        state.add_steps(100);
        state.set_steps(150);
        assert_eq!(state.take_step_delta(), 150);
        assert_eq!(state.take_step_delta(), 0);
        state.set_steps(50);
        assert_eq!(state.take_step_delta(), -100);
    }

    #[test]
    fn shake_kick_keeps_the_stronger_pulse() {
        let mut shake = ScreenShake::new();
        shake.kick(6.0);
        shake.kick(2.0);
        assert_eq!(shake.intensity, 6.0);
    }

    #[test]
    fn shake_decays_to_rest() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shake = ScreenShake::new();
        shake.kick(6.0);
        shake.update(&mut rng);
        assert!((shake.intensity - 5.4).abs() < 1e-12);
        assert!(shake.offset.x.abs() <= 2.7 && shake.offset.y.abs() <= 2.7);
        for _ in 0..200 {
            shake.update(&mut rng);
        }
        assert_eq!(shake.intensity, 0.0);
        assert_eq!(shake.offset, DVec2::ZERO);
    }

    #[test]
    fn notifications_clear_after_their_hold_time() {
        let mut n = Notifications::default();
        n.show_landmark("Ridge Walk");
        n.show_biome("Kazakhstan");
        n.update(2.3);
        assert_eq!(n.landmark(), Some("Ridge Walk"));
        assert_eq!(n.biome(), None);
        n.update(0.3);
        assert_eq!(n.landmark(), None);
    }

    #[test]
    fn newer_notice_replaces_older_one() {
        let mut n = Notifications::default();
        n.show_landmark("Mountain Trail");
        n.update(2.0);
        n.show_landmark("Hilltop View");
        n.update(2.0);
        assert_eq!(n.landmark(), Some("Hilltop View"));
    }

    #[test]
    fn event_display_is_readable() {
        let e = HikeEvent::BiomeEntered { name: "Uzbekistan", index: 3 };
        assert_eq!(e.to_string(), "Entered Uzbekistan (biome 3)");
    }
}
