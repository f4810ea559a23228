//! Side-view ground profiles.
//!
//! A [`HeightMap`] is a fixed number of samples spread evenly across the world
//! width. Every biome uses the same [`SEGMENT_COUNT`], so any two heightmaps
//! can be blended index-for-index while a biome transition is in flight.

use std::f64::consts::PI;

use engine_core::{clamp, lerp};
use glam::DVec2;

use crate::rng::pseudo_random;

/// One ground sample in world coordinates.
pub type Point = DVec2;

/// Segments per heightmap (samples = segments + 1).
pub const SEGMENT_COUNT: usize = 150;

/// Inputs for [`HeightMap::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    /// World width in world units; the last sample sits at this x.
    pub width: f64,
    /// Ground height the harmonics oscillate around.
    pub base_height: f64,
    /// Amplitude multiplier for hills and jitter.
    pub roughness: f64,
    /// Phase offset for the harmonics and jitter seed.
    pub seed: f64,
}

/// Ordered ground samples; x increases from 0 to the world width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeightMap {
    points: Vec<Point>,
}

impl HeightMap {
    /// Wrap existing samples. Callers are responsible for x ordering.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Multi-frequency hills: three sine harmonics plus a little seeded jitter.
    ///
    /// Output is fully determined by `params`.
    pub fn generate(params: &TerrainParams) -> Self {
        let TerrainParams { width, base_height, roughness, seed } = *params;
        let points = (0..=SEGMENT_COUNT)
            .map(|i| {
                let u = i as f64 / SEGMENT_COUNT as f64;
                let mut y = base_height;
                y += (u * PI * 2.0 + seed).sin() * roughness * 80.0;
                y += (u * PI * 6.0 + seed).sin() * roughness * 40.0;
                y += (u * PI * 12.0 + seed).sin() * roughness * 20.0;
                y += (pseudo_random(i as f64 + seed * 100.0) - 0.5) * roughness * 10.0;
                Point::new(u * width, y)
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Element-wise blend of y toward `other` (x is taken from `self`).
    ///
    /// Lengths are truncated to the shorter input. An empty operand yields the
    /// other one unchanged, which covers start-up before a target exists.
    pub fn blend(&self, other: &HeightMap, t: f64) -> HeightMap {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let points = self
            .points
            .iter()
            .zip(other.points.iter())
            .map(|(a, b)| Point::new(a.x, lerp(a.y, b.y, t)))
            .collect();
        HeightMap { points }
    }

    /// Ground height at an arbitrary world x.
    ///
    /// `world_x` is mapped to a fractional sample index (clamped to the world)
    /// and the two bracketing samples are interpolated. An empty heightmap
    /// reads as flat ground at 0.
    pub fn sample_y(&self, world_x: f64, world_width: f64) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        let n = self.points.len() - 1;
        if n == 0 || world_width <= 0.0 {
            return first.y;
        }
        let nx = clamp(world_x / world_width, 0.0, 1.0);
        let idx = nx * n as f64;
        let lo = (idx.floor() as usize).min(n);
        let hi = (lo + 1).min(n);
        let t = idx - lo as f64;
        lerp(self.points[lo].y, self.points[hi].y, t)
    }

    /// Height at `world_x` on the blend of `a` and `b`, without materialising
    /// the blended heightmap.
    pub fn sample_blended(a: &HeightMap, b: &HeightMap, world_x: f64, world_width: f64, t: f64) -> f64 {
        if a.is_empty() {
            return b.sample_y(world_x, world_width);
        }
        if b.is_empty() {
            return a.sample_y(world_x, world_width);
        }
        lerp(a.sample_y(world_x, world_width), b.sample_y(world_x, world_width), t)
    }
}
