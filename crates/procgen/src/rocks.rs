//! Decorative rock fields scattered along the ground.

use crate::rng::pseudo_random;

/// World units of ground per rock at density 1.0.
const SPACING: f64 = 300.0;

/// A single rock. Shape details are derived from `seed`, so a rock looks the
/// same on every frame without storing them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rock {
    pub x: f64,
    pub size: f64,
    pub seed: f64,
}

impl Rock {
    /// Half-width of the rock's ellipse.
    pub fn width(&self) -> f64 {
        self.size * (0.9 + pseudo_random(self.seed + 1.0) * 0.4)
    }

    /// Half-height of the rock's ellipse.
    pub fn height(&self) -> f64 {
        self.size * (0.5 + pseudo_random(self.seed + 2.0) * 0.35)
    }

    /// Horizontal jitter in `[-1, 1)`; also drives a slight tilt.
    pub fn wobble(&self) -> f64 {
        (pseudo_random(self.seed + 3.0) - 0.5) * 2.0
    }
}

/// Rocks sorted ascending by x.
///
/// The ordering is established once in [`RockField::generate`]; [`RockField::window`]
/// relies on it to cull to the visible range with two binary searches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RockField {
    rocks: Vec<Rock>,
}

impl RockField {
    /// Deterministic field: `floor(world_width / 300 × density)` rocks.
    pub fn generate(world_width: f64, seed: f64, density: f64) -> Self {
        let count = ((world_width / SPACING) * density).max(0.0).floor() as usize;
        let mut rocks: Vec<Rock> = (0..count)
            .map(|i| {
                let s = seed * 1000.0 + i as f64 * 17.0;
                Rock {
                    x: pseudo_random(s) * world_width,
                    size: 6.0 + pseudo_random(s + 9.0) * 22.0,
                    seed: s,
                }
            })
            .collect();
        rocks.sort_by(|a, b| a.x.total_cmp(&b.x));
        log::debug!("Generated {} rocks for seed {}", rocks.len(), seed);
        Self { rocks }
    }

    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    pub fn len(&self) -> usize {
        self.rocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rocks.is_empty()
    }

    /// Rocks with `left <= x <= right`.
    pub fn window(&self, left: f64, right: f64) -> &[Rock] {
        let start = self.rocks.partition_point(|r| r.x < left);
        let end = self.rocks.partition_point(|r| r.x <= right).max(start);
        &self.rocks[start..end]
    }
}
