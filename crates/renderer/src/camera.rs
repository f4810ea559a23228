//! Side-scrolling follow camera.

use engine_core::{clamp, lerp};

/// Horizontal camera that eases toward a point ahead of its subject.
///
/// `x` is the world-space left edge of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub x: f64,
    /// Fraction of the remaining distance covered per tick.
    pub smoothing: f64,
    /// Where the subject sits across the viewport (0 = left edge).
    pub lead: f64,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self { x: 0.0, smoothing: 0.06, lead: 0.35 }
    }
}

impl FollowCamera {
    pub fn new(smoothing: f64, lead: f64) -> Self {
        Self { x: 0.0, smoothing, lead }
    }

    /// Left edge that would place `subject_x` at the lead position.
    pub fn target_for(&self, subject_x: f64, viewport_width: f64) -> f64 {
        subject_x - self.lead * viewport_width
    }

    /// One tick of exponential smoothing, then clamp to the scrollable range.
    pub fn follow(&mut self, subject_x: f64, viewport_width: f64, world_width: f64) {
        let target = self.target_for(subject_x, viewport_width);
        self.x = lerp(self.x, target, self.smoothing);
        self.x = clamp(self.x, 0.0, world_width - viewport_width);
    }

    /// World x range currently on screen, widened by `margin` on both sides.
    pub fn visible_range(&self, viewport_width: f64, margin: f64) -> (f64, f64) {
        (self.x - margin, self.x + viewport_width + margin)
    }
}
