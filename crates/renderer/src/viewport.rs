//! Viewport dimensions and pixel ratio.

/// Logical size of the drawing area plus the device pixel ratio.
///
/// Scene code works in logical units; surfaces multiply by `pixel_ratio`
/// when they allocate or address pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let mut viewport = Self::default();
        viewport.resize(width, height, pixel_ratio);
        viewport
    }

    /// Apply a new size. Zero or negative dimensions are ignored (minimised
    /// windows report those); a non-positive ratio falls back to 1.
    /// Returns true if anything changed.
    pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) -> bool {
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        let changed = self.width != width || self.height != height || self.pixel_ratio != ratio;
        self.width = width;
        self.height = height;
        self.pixel_ratio = ratio;
        changed
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(1.0) as u32,
            (self.height * self.pixel_ratio).round().max(1.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_scales_by_ratio() {
        let vp = Viewport::new(400.0, 300.0, 2.0);
        assert_eq!(vp.physical_size(), (800, 600));
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut vp = Viewport::new(400.0, 300.0, 1.0);
        assert!(!vp.resize(0.0, 300.0, 1.0));
        assert_eq!(vp.width, 400.0);
    }

    #[test]
    fn resize_reports_changes() {
        let mut vp = Viewport::new(400.0, 300.0, 1.0);
        assert!(!vp.resize(400.0, 300.0, 1.0));
        assert!(vp.resize(400.0, 300.0, 1.5));
        assert!(vp.resize(500.0, 300.0, 1.5));
        assert_eq!(vp.pixel_ratio, 1.5);
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        let vp = Viewport::new(10.0, 10.0, 0.0);
        assert_eq!(vp.pixel_ratio, 1.0);
    }
}
