//! Software raster surface backed by an `image::RgbaImage`.
//!
//! Fills use the nonzero winding rule sampled at pixel centers. Strokes are
//! expanded into quads (plus round caps and joins) and filled the same way.

use std::path::{Path as FsPath, PathBuf};

use engine_core::Rgba;
use glam::DVec2;
use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use thiserror::Error;

use crate::paint::Paint;
use crate::path::{Path, Rect};
use crate::surface::{CompositeMode, DrawSurface, LineCap, Stroke};
use crate::viewport::Viewport;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    translation: DVec2,
    alpha: f64,
    composite: CompositeMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { translation: DVec2::ZERO, alpha: 1.0, composite: CompositeMode::SourceOver }
    }
}

pub struct RasterSurface {
    image: RgbaImage,
    pixel_ratio: f64,
    state: DrawState,
    stack: Vec<DrawState>,
    /// Erased pixels become opaque black instead of transparent.
    opaque: bool,
}

impl RasterSurface {
    pub fn new(viewport: &Viewport) -> Self {
        let (w, h) = viewport.physical_size();
        Self {
            image: RgbaImage::new(w, h),
            pixel_ratio: viewport.pixel_ratio,
            state: DrawState::default(),
            stack: Vec::new(),
            opaque: false,
        }
    }

    /// A surface without an alpha channel: it starts black, and clearing or
    /// `DestinationOut` darken toward black.
    pub fn new_opaque(viewport: &Viewport) -> Self {
        let mut surface = Self::new(viewport);
        surface.opaque = true;
        surface.fill_background();
        surface
    }

    fn background(&self) -> Pixel<u8> {
        if self.opaque {
            Pixel([0, 0, 0, 255])
        } else {
            Pixel([0, 0, 0, 0])
        }
    }

    fn fill_background(&mut self) {
        let bg = self.background();
        for p in self.image.pixels_mut() {
            *p = bg;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Device pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Encode the current contents as PNG.
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png).map_err(|source| SnapshotError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Wrote snapshot {}", path.display());
        Ok(())
    }

    fn to_device(&self, p: DVec2) -> DVec2 {
        (p + self.state.translation) * self.pixel_ratio
    }

    fn fill_polygons(&mut self, polygons: &[Vec<DVec2>], paint: &Paint) {
        if paint.max_alpha() <= 0.0 || self.state.alpha <= 0.0 {
            return;
        }
        let device: Vec<Vec<DVec2>> =
            polygons.iter().map(|poly| poly.iter().map(|p| self.to_device(*p)).collect()).collect();
        let clip = paint.visible_bounds().map(|r| {
            let [a, _, c, _] = r.corners();
            let (a, c) = (self.to_device(a), self.to_device(c));
            (a.min(c), a.max(c))
        });
        let state = self.state;
        let ratio = self.pixel_ratio;
        let shade = |d: DVec2| paint.color_at(d / ratio - state.translation);
        let fill = Fill {
            blend: Blend { global_alpha: state.alpha, composite: state.composite, opaque: self.opaque },
            clip,
            row_uniform: paint.is_row_uniform(),
        };
        scan_fill(&mut self.image, &device, fill, shade);
    }
}

impl DrawSurface for RasterSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.physical_size();
        self.image = RgbaImage::new(w, h);
        self.pixel_ratio = viewport.pixel_ratio;
        self.state = DrawState::default();
        self.stack.clear();
        self.fill_background();
        log::debug!("Raster surface resized to {}x{} (ratio {})", w, h, viewport.pixel_ratio);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: DVec2) {
        self.state.translation += offset;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    fn clear_rect(&mut self, rect: Rect) {
        let a = self.to_device(DVec2::new(rect.x, rect.y));
        let b = self.to_device(DVec2::new(rect.x + rect.width, rect.y + rect.height));
        let (min, max) = (a.min(b), a.max(b));
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let x0 = pixel_start(min.x).clamp(0, w);
        let x1 = pixel_start(max.x).clamp(0, w);
        let y0 = pixel_start(min.y).clamp(0, h);
        let y1 = pixel_start(max.y).clamp(0, h);
        let bg = self.background();
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, bg);
            }
        }
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let polygons: Vec<Vec<DVec2>> = path
            .flatten()
            .into_iter()
            .filter(|sub| sub.points.len() >= 3)
            .map(|sub| sub.points)
            .collect();
        if !polygons.is_empty() {
            self.fill_polygons(&polygons, paint);
        }
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        if stroke.width <= 0.0 || stroke.color.alpha <= 0.0 {
            return;
        }
        let half = stroke.width / 2.0;
        let mut polygons = Vec::new();
        for sub in path.flatten() {
            let mut pts = sub.points.clone();
            if sub.closed && pts.len() > 2 {
                pts.push(pts[0]);
            }
            for pair in pts.windows(2) {
                if let Some(quad) = segment_quad(pair[0], pair[1], half) {
                    polygons.push(quad);
                }
            }
            // Round joins at interior vertices keep thick polylines continuous
            if pts.len() > 2 && half > 0.75 {
                for p in &pts[1..pts.len() - 1] {
                    polygons.push(disc(*p, half));
                }
            }
            if stroke.cap == LineCap::Round && !sub.closed {
                if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
                    polygons.push(disc(*first, half));
                    polygons.push(disc(*last, half));
                }
            }
        }
        for poly in &mut polygons {
            if signed_area(poly) < 0.0 {
                poly.reverse();
            }
        }
        self.fill_polygons(&polygons, &Paint::Solid(stroke.color));
    }
}

/// First pixel whose center lies at or after `edge`.
fn pixel_start(edge: f64) -> i64 {
    (edge - 0.5).ceil() as i64
}

fn segment_quad(a: DVec2, b: DVec2, half: f64) -> Option<Vec<DVec2>> {
    let dir = (b - a).try_normalize()?;
    let n = dir.perp() * half;
    Some(vec![a + n, b + n, b - n, a - n])
}

fn disc(center: DVec2, radius: f64) -> Vec<DVec2> {
    Path::circle(center, radius).flatten().into_iter().next().map(|s| s.points).unwrap_or_default()
}

fn signed_area(poly: &[DVec2]) -> f64 {
    let n = poly.len();
    (0..n).map(|i| poly[i].perp_dot(poly[(i + 1) % n])).sum::<f64>() / 2.0
}

struct Edge {
    a: DVec2,
    b: DVec2,
    winding: i32,
}

#[derive(Clone, Copy)]
struct Blend {
    global_alpha: f64,
    composite: CompositeMode,
    opaque: bool,
}

#[derive(Clone, Copy)]
struct Fill {
    blend: Blend,
    /// Device-space box outside which the paint is transparent.
    clip: Option<(DVec2, DVec2)>,
    /// Shade once per scanline instead of once per pixel.
    row_uniform: bool,
}

fn scan_fill(image: &mut RgbaImage, polygons: &[Vec<DVec2>], fill: Fill, shade: impl Fn(DVec2) -> Rgba) {
    let mut edges = Vec::new();
    for poly in polygons {
        let n = poly.len();
        for i in 0..n {
            let (a, b) = (poly[i], poly[(i + 1) % n]);
            if a.y == b.y || !a.is_finite() || !b.is_finite() {
                continue;
            }
            let winding = if b.y > a.y { 1 } else { -1 };
            edges.push(Edge { a, b, winding });
        }
    }
    if edges.is_empty() {
        return;
    }

    let (w, h) = (image.width() as i64, image.height() as i64);
    let min_y = edges.iter().map(|e| e.a.y.min(e.b.y)).fold(f64::INFINITY, f64::min);
    let max_y = edges.iter().map(|e| e.a.y.max(e.b.y)).fold(f64::NEG_INFINITY, f64::max);
    let (mut row_start, mut row_end) = (pixel_start(min_y).clamp(0, h), pixel_start(max_y).clamp(0, h));
    let (mut col_start, mut col_end) = (0, w);
    if let Some((lo, hi)) = fill.clip {
        row_start = row_start.max(pixel_start(lo.y).clamp(0, h));
        row_end = row_end.min(pixel_start(hi.y).clamp(0, h));
        col_start = pixel_start(lo.x).clamp(0, w);
        col_end = pixel_start(hi.x).clamp(0, w);
    }

    let mut crossings: Vec<(f64, i32)> = Vec::new();
    for y in row_start..row_end {
        let yc = y as f64 + 0.5;
        crossings.clear();
        for e in &edges {
            let (lo, hi) = if e.a.y < e.b.y { (e.a.y, e.b.y) } else { (e.b.y, e.a.y) };
            if yc < lo || yc >= hi {
                continue;
            }
            let x = e.a.x + (yc - e.a.y) * (e.b.x - e.a.x) / (e.b.y - e.a.y);
            crossings.push((x, e.winding));
        }
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let row_color = fill.row_uniform.then(|| shade(DVec2::new(0.5, yc)));
        if row_color.is_some_and(|c| c.alpha <= 0.0) {
            continue;
        }

        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in &crossings {
            let before = winding;
            winding += dir;
            if before == 0 && winding != 0 {
                span_start = x;
            } else if before != 0 && winding == 0 {
                let x0 = pixel_start(span_start).clamp(col_start, col_end.max(col_start));
                let x1 = pixel_start(x).clamp(col_start, col_end.max(col_start));
                for px in x0..x1 {
                    let color = row_color.unwrap_or_else(|| shade(DVec2::new(px as f64 + 0.5, yc)));
                    let pixel = image.get_pixel_mut(px as u32, y as u32);
                    blend(pixel, color, fill.blend);
                }
            }
        }
    }
}

fn blend(dst: &mut Pixel<u8>, src: Rgba, mode: Blend) {
    let sa = (src.alpha * mode.global_alpha).clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 && mode.composite == CompositeMode::SourceOver {
        dst.0 = [src.rgb.r, src.rgb.g, src.rgb.b, 255];
        return;
    }
    let da = dst.0[3] as f64 / 255.0;
    match mode.composite {
        CompositeMode::SourceOver => {
            let out_a = sa + da * (1.0 - sa);
            let [sr, sg, sb] = src.rgb.to_unit();
            let channel = |s: f64, d: u8| {
                let d = d as f64 / 255.0;
                ((s * sa + d * da * (1.0 - sa)) / out_a * 255.0).round().clamp(0.0, 255.0) as u8
            };
            dst.0 = [
                channel(sr, dst.0[0]),
                channel(sg, dst.0[1]),
                channel(sb, dst.0[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ];
        }
        CompositeMode::DestinationOut if mode.opaque => {
            for c in &mut dst.0[..3] {
                *c = (*c as f64 * (1.0 - sa)).round().clamp(0.0, 255.0) as u8;
            }
        }
        CompositeMode::DestinationOut => {
            dst.0[3] = (da * (1.0 - sa) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{LinearGradient, RadialGradient};
    use engine_core::Rgb;

    fn surface(w: f64, h: f64, ratio: f64) -> RasterSurface {
        RasterSurface::new(&Viewport::new(w, h, ratio))
    }

    #[test]
    fn fill_rect_covers_exact_pixels() {
        let mut s = surface(10.0, 10.0, 1.0);
        s.fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), &Paint::solid(Rgb::new(255, 0, 0)));
        assert_eq!(s.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn translation_and_pixel_ratio_apply_to_fills() {
        let mut s = surface(10.0, 10.0, 2.0);
        assert_eq!((s.width(), s.height()), (20, 20));
        s.save();
        s.translate(DVec2::new(3.0, 0.0));
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::solid(Rgb::WHITE));
        s.restore();
        assert_eq!(s.pixel(6, 0), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(7, 1), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn global_alpha_blends_over_background() {
        let mut s = surface(4.0, 4.0, 1.0);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::solid(Rgb::BLACK));
        s.set_global_alpha(0.5);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::solid(Rgb::WHITE));
        assert_eq!(s.pixel(1, 1), Some([128, 128, 128, 255]));
    }

    #[test]
    fn destination_out_erases() {
        let mut s = surface(8.0, 8.0, 1.0);
        s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Paint::solid(Rgb::WHITE));
        s.set_composite(CompositeMode::DestinationOut);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), &Paint::solid(Rgb::BLACK));
        assert_eq!(s.pixel(1, 1).map(|p| p[3]), Some(0));
        assert_eq!(s.pixel(6, 1).map(|p| p[3]), Some(255));
    }

    #[test]
    fn clear_rect_ignores_alpha_and_composite() {
        let mut s = surface(8.0, 8.0, 1.0);
        s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Paint::solid(Rgb::WHITE));
        s.set_global_alpha(0.1);
        s.clear_rect(Rect::new(0.0, 0.0, 8.0, 4.0));
        assert_eq!(s.pixel(3, 1), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(3, 6), Some([255, 255, 255, 255]));
    }

    #[test]
    fn opaque_surface_erases_to_black() {
        let mut s = RasterSurface::new_opaque(&Viewport::new(8.0, 8.0, 1.0));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
        s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Paint::solid(Rgb::WHITE));
        s.clear_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 255]));
        s.set_composite(CompositeMode::DestinationOut);
        s.fill_rect(Rect::new(4.0, 4.0, 4.0, 4.0), &Paint::solid(Rgb::WHITE));
        assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(3, 3), Some([255, 255, 255, 255]));
    }

    #[test]
    fn vertical_gradient_is_shaded_per_row() {
        let mut s = surface(4.0, 10.0, 1.0);
        let sky = LinearGradient::vertical(0.0, 10.0).with_stop(0.0, Rgb::BLACK).with_stop(1.0, Rgb::WHITE);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 10.0), &sky.clone().into());
        for y in 0..10 {
            let expected = sky.color_at(DVec2::new(0.0, y as f64 + 0.5)).rgb;
            for x in 0..4 {
                assert_eq!(s.pixel(x, y), Some([expected.r, expected.g, expected.b, 255]), "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn fading_radial_only_touches_its_circle() {
        let mut s = surface(40.0, 40.0, 1.0);
        let glow = RadialGradient::new(DVec2::new(20.0, 20.0), 0.0, 5.0)
            .with_stop(0.0, Rgb::WHITE.with_alpha(1.0))
            .with_stop(1.0, Rgb::WHITE.with_alpha(0.0));
        s.fill_rect(Rect::new(0.0, 0.0, 40.0, 40.0), &glow.into());
        assert!(s.pixel(20, 20).is_some_and(|p| p[3] > 200));
        assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(26, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn transparent_paint_leaves_pixels_alone() {
        let mut s = RasterSurface::new_opaque(&Viewport::new(4.0, 4.0, 1.0));
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::solid(Rgb::WHITE));
        s.set_composite(CompositeMode::DestinationOut);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::rgba(Rgb::BLACK, 0.0));
        assert_eq!(s.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn restore_without_save_is_ignored() {
        let mut s = surface(4.0, 4.0, 1.0);
        s.restore();
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::solid(Rgb::WHITE));
        assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn thick_stroke_paints_along_the_line() {
        let mut s = surface(20.0, 20.0, 1.0);
        let stroke = Stroke::new(Rgb::WHITE, 4.0).round();
        s.stroke_path(&Path::line(DVec2::new(2.0, 10.0), DVec2::new(18.0, 10.0)), &stroke);
        assert_eq!(s.pixel(10, 10).map(|p| p[3]), Some(255));
        assert_eq!(s.pixel(10, 9).map(|p| p[3]), Some(255));
        assert_eq!(s.pixel(10, 3).map(|p| p[3]), Some(0));
    }

    #[test]
    fn overlapping_stroke_parts_do_not_cancel() {
        let mut s = surface(20.0, 20.0, 1.0);
        let mut path = Path::new();
        path.move_to(DVec2::new(2.0, 10.0)).line_to(DVec2::new(10.0, 10.0)).line_to(DVec2::new(10.0, 2.0));
        s.stroke_path(&path, &Stroke::new(Rgb::WHITE, 4.0).round());
        assert_eq!(s.pixel(10, 10).map(|p| p[3]), Some(255));
        assert_eq!(s.pixel(2, 10).map(|p| p[3]), Some(255));
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut s = surface(4.0, 4.0, 1.0);
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::solid(Rgb::WHITE));
        s.resize(&Viewport::new(6.0, 3.0, 1.0));
        assert_eq!((s.width(), s.height()), (6, 3));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut s = surface(8.0, 8.0, 1.0);
        s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Paint::solid(Rgb::new(10, 20, 30)));
        s.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(3, 3).0, [10, 20, 30, 255]);
    }

    #[test]
    fn save_png_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let s = surface(2.0, 2.0, 1.0);
        let err = s.save_png(dir.path().join("missing").join("x.png")).unwrap_err();
        assert!(err.to_string().contains("x.png"));
    }
}
