//! Fill styles: solid colors and linear/radial gradients.

use engine_core::{Rgb, Rgba};
use glam::DVec2;

use crate::path::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f64, color: impl Into<Rgba>) -> Self {
        Self { offset, color: color.into() }
    }
}

/// Color at `t` along sorted stops. Outside the first/last stop the end
/// colors extend.
pub fn sample_stops(stops: &[ColorStop], t: f64) -> Rgba {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Rgba::TRANSPARENT,
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

/// Gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: DVec2,
    pub end: DVec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end, stops: Vec::new() }
    }

    /// Vertical gradient from `top` to `bottom`.
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(DVec2::new(0.0, top), DVec2::new(0.0, bottom))
    }

    pub fn with_stop(mut self, offset: f64, color: impl Into<Rgba>) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    pub fn color_at(&self, p: DVec2) -> Rgba {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        let t = if len_sq > 0.0 { (p - self.start).dot(axis) / len_sq } else { 0.0 };
        sample_stops(&self.stops, t)
    }
}

/// Gradient between two concentric circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: DVec2, inner_radius: f64, outer_radius: f64) -> Self {
        Self { center, inner_radius, outer_radius, stops: Vec::new() }
    }

    pub fn with_stop(mut self, offset: f64, color: impl Into<Rgba>) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    pub fn color_at(&self, p: DVec2) -> Rgba {
        let span = self.outer_radius - self.inner_radius;
        let d = p.distance(self.center);
        let t = if span > 0.0 { (d - self.inner_radius) / span } else { 1.0 };
        sample_stops(&self.stops, t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    pub fn solid(rgb: Rgb) -> Self {
        Paint::Solid(Rgba::opaque(rgb))
    }

    pub fn rgba(rgb: Rgb, alpha: f64) -> Self {
        Paint::Solid(Rgba::new(rgb, alpha))
    }

    /// Color at a point in the user space the paint was defined in.
    pub fn color_at(&self, p: DVec2) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.color_at(p),
            Paint::Radial(g) => g.color_at(p),
        }
    }

    /// Largest alpha the paint produces anywhere.
    pub fn max_alpha(&self) -> f64 {
        let stops = match self {
            Paint::Solid(c) => return c.alpha,
            Paint::Linear(g) => &g.stops,
            Paint::Radial(g) => &g.stops,
        };
        stops.iter().map(|s| s.color.alpha).fold(0.0, f64::max)
    }

    /// True when the color only varies with y: solids and vertical gradients.
    pub fn is_row_uniform(&self) -> bool {
        match self {
            Paint::Solid(_) => true,
            Paint::Linear(g) => g.start.x == g.end.x,
            Paint::Radial(_) => false,
        }
    }

    /// User-space box outside which the paint is fully transparent, if any.
    pub fn visible_bounds(&self) -> Option<Rect> {
        match self {
            Paint::Radial(g) if g.stops.last().is_some_and(|s| s.color.alpha <= 0.0) => {
                let r = g.outer_radius.abs();
                Some(Rect::new(g.center.x - r, g.center.y - r, r * 2.0, r * 2.0))
            }
            _ => None,
        }
    }
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Paint::Solid(c)
    }
}

impl From<Rgb> for Paint {
    fn from(c: Rgb) -> Self {
        Paint::solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::Linear(g)
    }
}

impl From<RadialGradient> for Paint {
    fn from(g: RadialGradient) -> Self {
        Paint::Radial(g)
    }
}
