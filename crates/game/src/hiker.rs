//! Hiker motion: step tween, chase smoothing, terrain following and the
//! walk/bob phases that drive the procedural pose.

use std::f64::consts::PI;

use engine_core::{ease_out_cubic, lerp};

use crate::config::MotionConfig;

/// Eased interpolation of the hiker's target x after a step change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepTween {
    pub active: bool,
    pub progress: f64,
    pub start_x: f64,
    pub end_x: f64,
}

impl StepTween {
    pub fn arm(&mut self, start_x: f64, end_x: f64) {
        *self = Self { active: true, progress: 0.0, start_x, end_x };
    }

    /// Advance one tick. Returns the tween-driven target, or `None` when idle.
    pub fn advance(&mut self, increment: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        self.progress += increment;
        if self.progress >= 1.0 {
            self.active = false;
            self.progress = 1.0;
        }
        Some(lerp(self.start_x, self.end_x, ease_out_cubic(self.progress)))
    }
}

/// Limb angles (radians) and vertical bob for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub leg_swing: f64,
    pub arm_swing: f64,
    pub bob_offset: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Hiker {
    /// Rendered world position.
    pub x: f64,
    pub y: f64,
    /// Where the rendered x is chasing this tick.
    pub target_x: f64,
    pub bob_phase: f64,
    pub walk_phase: f64,
    pub tween: StepTween,
}

impl Hiker {
    /// A step change re-arms the tween from where the hiker is drawn now.
    pub fn on_steps_changed(&mut self, end_x: f64) {
        self.tween.arm(self.x, end_x);
    }

    /// Tween target while one is running, otherwise the resting position.
    pub fn resolve_target(&mut self, resting_x: f64, tween_speed: f64) {
        self.target_x = self.tween.advance(tween_speed).unwrap_or(resting_x);
    }

    pub fn chase(&mut self, factor: f64) {
        self.x = lerp(self.x, self.target_x, factor);
    }

    pub fn advance_phases(&mut self, motion: &MotionConfig) {
        self.bob_phase += motion.bob_speed;
        self.walk_phase += if self.tween.active { motion.walk_speed_active } else { motion.walk_speed_idle };
    }

    pub fn pose(&self, bob_amplitude: f64) -> Pose {
        Pose {
            leg_swing: self.walk_phase.sin() * 0.35,
            arm_swing: (self.walk_phase + PI).sin() * 0.3,
            bob_offset: self.bob_phase.sin() * bob_amplitude,
        }
    }
}
