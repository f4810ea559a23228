//! Stateless seeded hash used wherever a re-render must reproduce the same layout.

/// Deterministic pseudo-random value in `[0, 1)` for a scalar seed.
///
/// Scales the sine of the seed and keeps the fractional part. Same seed,
/// same output, on every call and every frame.
#[inline]
pub fn pseudo_random(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}
