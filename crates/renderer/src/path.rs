//! Canvas-style path building and flattening.

use std::f64::consts::TAU;

use glam::DVec2;

/// Axis-aligned rectangle in the current user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.x, self.y),
            DVec2::new(self.x + self.width, self.y),
            DVec2::new(self.x + self.width, self.y + self.height),
            DVec2::new(self.x, self.y + self.height),
        ]
    }
}

/// One drawing instruction inside a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Circular arc swept clockwise (increasing angle, y down) from `start` to `end`.
    Arc { center: DVec2, radius: f64, start: f64, end: f64 },
    /// Elliptical arc; `rotation` tilts the ellipse's x axis.
    Ellipse { center: DVec2, radii: DVec2, rotation: f64, start: f64, end: f64 },
    /// Closed rectangle as its own subpath.
    Rect(Rect),
    Close,
}

/// A polyline produced by [`Path::flatten`].
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub points: Vec<DVec2>,
    pub closed: bool,
}

/// Ordered list of segments, built with chained calls:
///
/// ```
/// use glam::DVec2;
/// use renderer::Path;
///
/// let mut path = Path::new();
/// path.move_to(DVec2::ZERO).line_to(DVec2::new(10.0, 0.0)).close();
/// assert_eq!(path.segments().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full circle.
    pub fn circle(center: DVec2, radius: f64) -> Self {
        let mut path = Self::new();
        path.add_circle(center, radius);
        path
    }

    /// Full ellipse.
    pub fn ellipse_shape(center: DVec2, radii: DVec2, rotation: f64) -> Self {
        let mut path = Self::new();
        path.add_ellipse(center, radii, rotation);
        path
    }

    /// Straight segment between two points.
    pub fn line(from: DVec2, to: DVec2) -> Self {
        let mut path = Self::new();
        path.move_to(from).line_to(to);
        path
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[DVec2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn move_to(&mut self, p: DVec2) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: DVec2) -> &mut Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64) -> &mut Self {
        self.segments.push(PathSegment::Arc { center, radius, start, end });
        self
    }

    pub fn ellipse(&mut self, center: DVec2, radii: DVec2, rotation: f64, start: f64, end: f64) -> &mut Self {
        self.segments.push(PathSegment::Ellipse { center, radii, rotation, start, end });
        self
    }

    /// Closed circle as its own subpath.
    pub fn add_circle(&mut self, center: DVec2, radius: f64) -> &mut Self {
        self.move_to(center + DVec2::new(radius, 0.0)).arc(center, radius, 0.0, TAU).close()
    }

    /// Closed ellipse as its own subpath.
    pub fn add_ellipse(&mut self, center: DVec2, radii: DVec2, rotation: f64) -> &mut Self {
        let start = center + DVec2::from_angle(rotation).rotate(DVec2::new(radii.x, 0.0));
        self.move_to(start).ellipse(center, radii, rotation, 0.0, TAU).close()
    }

    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.segments.push(PathSegment::Rect(rect));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Convert curves to polylines. Arcs and ellipses continue the current
    /// subpath with a straight joint, as a canvas does.
    pub fn flatten(&self) -> Vec<Subpath> {
        let mut out: Vec<Subpath> = Vec::new();
        let mut current: Option<Subpath> = None;

        fn finish(out: &mut Vec<Subpath>, current: &mut Option<Subpath>) {
            if let Some(sub) = current.take() {
                if !sub.points.is_empty() {
                    out.push(sub);
                }
            }
        }

        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => {
                    finish(&mut out, &mut current);
                    current = Some(Subpath { points: vec![p], closed: false });
                }
                PathSegment::LineTo(p) => match current.as_mut() {
                    Some(sub) => sub.points.push(p),
                    None => current = Some(Subpath { points: vec![p], closed: false }),
                },
                PathSegment::Arc { center, radius, start, end } => {
                    let pts = sample_ellipse(center, DVec2::splat(radius), 0.0, start, end);
                    extend_current(&mut current, pts);
                }
                PathSegment::Ellipse { center, radii, rotation, start, end } => {
                    let pts = sample_ellipse(center, radii, rotation, start, end);
                    extend_current(&mut current, pts);
                }
                PathSegment::Rect(rect) => {
                    finish(&mut out, &mut current);
                    out.push(Subpath { points: rect.corners().to_vec(), closed: true });
                }
                PathSegment::Close => {
                    if let Some(sub) = current.as_mut() {
                        sub.closed = true;
                        // A new subpath starts where the closed one began
                        let start = sub.points[0];
                        finish(&mut out, &mut current);
                        current = Some(Subpath { points: vec![start], closed: false });
                    }
                }
            }
        }
        finish(&mut out, &mut current);
        // Drop the lone restart points left behind by `Close`
        out.retain(|sub| sub.closed || sub.points.len() > 1);
        out
    }
}

fn extend_current(current: &mut Option<Subpath>, pts: Vec<DVec2>) {
    match current.as_mut() {
        Some(sub) => sub.points.extend(pts),
        None => *current = Some(Subpath { points: pts, closed: false }),
    }
}

/// Points along an elliptical arc, clockwise from `start` to `end`.
fn sample_ellipse(center: DVec2, radii: DVec2, rotation: f64, start: f64, end: f64) -> Vec<DVec2> {
    let mut sweep = end - start;
    if sweep >= TAU {
        sweep = TAU;
    } else if sweep < 0.0 {
        sweep = sweep.rem_euclid(TAU);
    }
    let radius = radii.x.abs().max(radii.y.abs());
    let steps = ((sweep * radius / 2.0).ceil() as usize).clamp(8, 256);
    let (sin_r, cos_r) = rotation.sin_cos();
    (0..=steps)
        .map(|i| {
            let theta = start + sweep * i as f64 / steps as f64;
            let local = DVec2::new(radii.x * theta.cos(), radii.y * theta.sin());
            center + DVec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
        })
        .collect()
}
