//! Scalar helpers shared by the simulation and the renderer.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-out: fast start, gentle landing. `t` is expected in `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics: when `lo > hi` the result is `lo`,
/// which is what scroll ranges want when the viewport is wider than the world.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn ease_out_cubic_is_monotonic_and_pinned() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = ease_out_cubic(i as f64 / 20.0);
            assert!(v >= prev, "ease_out_cubic should not decrease at step {}", i);
            prev = v;
        }
        // Ease-out front-loads the motion
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn clamp_with_inverted_range_returns_lower_bound() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 0.0, -200.0), 0.0);
    }
}
