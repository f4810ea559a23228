//! The drawing contract scene code renders against.

use engine_core::Rgba;
use glam::DVec2;

use crate::paint::Paint;
use crate::path::{Path, Rect};
use crate::viewport::Viewport;

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Erase existing content where the shape is drawn, scaled by its alpha.
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(color: impl Into<Rgba>, width: f64) -> Self {
        Self { color: color.into(), width, cap: LineCap::Butt }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

/// A canvas-like 2D target.
///
/// Coordinates are logical units; implementations apply the viewport's pixel
/// ratio themselves. `save`/`restore` bracket the translation, global alpha
/// and composite mode.
pub trait DrawSurface {
    /// Reallocate the backing store for a new viewport. Clears the surface.
    fn resize(&mut self, viewport: &Viewport);

    fn save(&mut self);

    /// Pop the last saved state. A restore without a matching save is ignored.
    fn restore(&mut self);

    fn translate(&mut self, offset: DVec2);

    fn set_global_alpha(&mut self, alpha: f64);

    fn set_composite(&mut self, mode: CompositeMode);

    /// Make a rectangle fully transparent, ignoring alpha and composite mode.
    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let mut path = Path::new();
        path.rect(rect);
        self.fill_path(&path, paint);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);
}
