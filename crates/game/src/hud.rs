//! Read-only numbers and labels for the presentation layer.

use crate::state::HikeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Sunset,
    Evening,
}

impl TimeOfDay {
    pub fn from_progress(p: f64) -> Self {
        if p < 0.3 {
            TimeOfDay::Morning
        } else if p < 0.7 {
            TimeOfDay::Sunset
        } else {
            TimeOfDay::Evening
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning Journey",
            TimeOfDay::Sunset => "Sunset Trail",
            TimeOfDay::Evening => "Evening Path",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudStats {
    pub steps: u32,
    pub distance_km: f64,
    pub progress_percent: f64,
    pub time_of_day: TimeOfDay,
    pub biome: &'static str,
    pub landmark_notice: Option<String>,
    pub biome_notice: Option<String>,
}

impl HudStats {
    pub fn from_state(state: &HikeState) -> Self {
        let steps = state.steps();
        let distance = state.world.distance(steps);
        let progress_percent =
            if state.world.width > 0.0 { (distance / state.world.width * 100.0).min(100.0) } else { 100.0 };
        Self {
            steps,
            distance_km: distance / 1000.0,
            progress_percent,
            time_of_day: TimeOfDay::from_progress(state.progress()),
            biome: state.biomes.current().name,
            landmark_notice: state.notifications.landmark().map(str::to_owned),
            biome_notice: state.notifications.biome().map(str::to_owned),
        }
    }

    /// One-line summary, e.g. for log output.
    pub fn summary(&self) -> String {
        format!(
            "{} steps | {:.2} km | {:.0}% | {} | {}",
            self.steps,
            self.distance_km,
            self.progress_percent,
            self.time_of_day.label(),
            self.biome
        )
    }
}
