//! Named markers along the trail that fire once when the hiker passes them.

/// Position as a fraction of world width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSpec {
    pub fraction: f64,
    pub name: &'static str,
}

pub const LANDMARKS: [LandmarkSpec; 6] = [
    LandmarkSpec { fraction: 0.12, name: "Mountain Trail" },
    LandmarkSpec { fraction: 0.28, name: "Hilltop View" },
    LandmarkSpec { fraction: 0.45, name: "Valley Path" },
    LandmarkSpec { fraction: 0.62, name: "Ridge Walk" },
    LandmarkSpec { fraction: 0.78, name: "Scenic Overlook" },
    LandmarkSpec { fraction: 0.92, name: "Journey's End" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub name: &'static str,
    pub reached: bool,
}

#[derive(Debug, Clone)]
pub struct LandmarkTracker {
    landmarks: Vec<Landmark>,
}

impl LandmarkTracker {
    pub fn new(world_width: f64) -> Self {
        let landmarks = LANDMARKS
            .iter()
            .map(|spec| Landmark { x: spec.fraction * world_width, name: spec.name, reached: false })
            .collect();
        Self { landmarks }
    }

    /// Mark every unreached landmark at or behind `x` and return their names.
    pub fn check(&mut self, x: f64) -> Vec<&'static str> {
        let mut reached = Vec::new();
        for lm in self.landmarks.iter_mut().filter(|lm| !lm.reached && x >= lm.x) {
            lm.reached = true;
            reached.push(lm.name);
        }
        reached
    }

    /// Re-arm every landmark.
    pub fn reset(&mut self) {
        for lm in &mut self.landmarks {
            lm.reached = false;
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Landmarks with `left <= x <= right`.
    pub fn visible(&self, left: f64, right: f64) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter().filter(move |lm| lm.x >= left && lm.x <= right)
    }
}
