//! A surface that records draw calls instead of rasterizing them.

use glam::DVec2;

use crate::paint::Paint;
use crate::path::{Path, Rect};
use crate::surface::{CompositeMode, DrawSurface, Stroke};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    Save,
    Restore,
    Translate(DVec2),
    GlobalAlpha(f64),
    Composite(CompositeMode),
    ClearRect(Rect),
    FillPath { path: Path, paint: Paint },
    StrokePath { path: Path, stroke: Stroke },
}

/// Ordered list of every call made against it.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every save has a matching restore, and no restore comes before its save.
    pub fn is_balanced(&self) -> bool {
        let mut depth: i64 = 0;
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    pub fn fill_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::FillPath { .. })).count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::StrokePath { .. })).count()
    }
}

impl DrawSurface for DisplayList {
    fn resize(&mut self, viewport: &Viewport) {
        self.commands.push(DrawCommand::Resize(*viewport));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: DVec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.commands.push(DrawCommand::Composite(mode));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::FillPath { path: path.clone(), paint: paint.clone() });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePath { path: path.clone(), stroke: *stroke });
    }
}
