//! World-space scenery: terrain, rocks, landmark signposts with their
//! architecture, dust. Plus the screen-space vignette.

use std::f64::consts::{PI, TAU};

use engine_core::Rgb;
use glam::DVec2;
use procgen::{ArchitectureStyle, HeightMap, RockField};
use renderer::{CompositeMode, DrawSurface, Paint, Path, RadialGradient, Rect, Viewport};

use crate::effects::DustPuffs;
use crate::landmarks::LandmarkTracker;
use crate::transition::BiomeState;

/// Extra world units past each viewport edge that still get drawn.
pub const CULL_MARGIN: f64 = 120.0;
/// Architecture silhouette scale.
const ARCH_SIZE: f64 = 42.0;
/// Architecture sits this far left of its signpost.
const ARCH_OFFSET: f64 = 34.0;
const DUST_COLOR: Rgb = Rgb::new(150, 150, 100);

/// Closed ground polygon from the bottom-left world corner along the surface.
pub fn terrain_path(heightmap: &HeightMap, world_width: f64, world_height: f64) -> Path {
    let mut path = Path::new();
    path.move_to(DVec2::new(0.0, world_height));
    for p in heightmap.points() {
        path.line_to(*p);
    }
    path.line_to(DVec2::new(world_width, world_height)).close();
    path
}

pub fn draw_terrain(surface: &mut dyn DrawSurface, heightmap: &HeightMap, world_width: f64, world_height: f64, color: Rgb) {
    surface.fill_path(&terrain_path(heightmap, world_width, world_height), &Paint::solid(color));
}

/// Rocks between `left` and `right`, seated on the blended ground.
pub fn draw_rocks(
    surface: &mut dyn DrawSurface,
    rocks: &RockField,
    biomes: &BiomeState,
    (left, right): (f64, f64),
    color: Rgb,
    alpha: f64,
) {
    if alpha <= 0.001 {
        return;
    }
    let visible = rocks.window(left, right);
    if visible.is_empty() {
        return;
    }
    let mut path = Path::new();
    for rock in visible {
        let y = biomes.ground_y(rock.x);
        let wobble = rock.wobble();
        let (w, h) = (rock.width(), rock.height());
        path.add_ellipse(DVec2::new(rock.x + wobble, y - h * 0.25), DVec2::new(w, h), wobble * 0.03);
    }
    surface.save();
    surface.set_global_alpha(alpha);
    surface.fill_path(&path, &Paint::solid(color));
    surface.restore();
}

pub fn draw_signpost(surface: &mut dyn DrawSurface, x: f64, y: f64, opacity: f64) {
    let black = Paint::solid(Rgb::BLACK);
    surface.save();
    surface.set_global_alpha(opacity);
    surface.fill_rect(Rect::new(x - 3.0, y - 60.0, 6.0, 60.0), &black);
    surface.fill_rect(Rect::new(x - 25.0, y - 70.0, 50.0, 15.0), &black);
    let arrow = Path::polygon(&[
        DVec2::new(x + 25.0, y - 62.5),
        DVec2::new(x + 32.0, y - 62.5),
        DVec2::new(x + 28.5, y - 67.5),
        DVec2::new(x + 28.5, y - 57.5),
    ]);
    surface.fill_path(&arrow, &black);
    surface.restore();
}

/// Silhouette of `style` standing on `ground_y`, `s` units tall-ish.
pub fn draw_architecture(
    surface: &mut dyn DrawSurface,
    style: ArchitectureStyle,
    x: f64,
    ground_y: f64,
    s: f64,
    alpha: f64,
) {
    let black = Paint::solid(Rgb::BLACK);
    surface.save();
    surface.set_global_alpha(alpha);

    match style {
        ArchitectureStyle::Yurt => {
            let mut dome = Path::new();
            dome.ellipse(DVec2::new(x, ground_y - s * 0.35), DVec2::new(s * 0.55, s * 0.35), 0.0, PI, TAU)
                .close();
            surface.fill_path(&dome, &black);
            surface.fill_rect(Rect::new(x - s * 0.55, ground_y - s * 0.35, s * 1.1, s * 0.35), &black);
            // Door
            surface.clear_rect(Rect::new(x - s * 0.12, ground_y - s * 0.18, s * 0.24, s * 0.18));
        }
        ArchitectureStyle::Pagoda => {
            for i in 0..3 {
                let w = s * (1.1 - i as f64 * 0.25);
                let h = s * 0.16;
                let yy = ground_y - s * 0.15 - i as f64 * (h + s * 0.08);
                let tier = Path::polygon(&[
                    DVec2::new(x - w * 0.5, yy),
                    DVec2::new(x + w * 0.5, yy),
                    DVec2::new(x + w * 0.38, yy - h),
                    DVec2::new(x - w * 0.38, yy - h),
                ]);
                surface.fill_path(&tier, &black);
            }
            surface.fill_rect(Rect::new(x - s * 0.18, ground_y - s * 0.55, s * 0.36, s * 0.4), &black);
        }
        ArchitectureStyle::Minaret => {
            surface.fill_rect(Rect::new(x - s * 0.12, ground_y - s * 0.8, s * 0.24, s * 0.8), &black);
            surface.fill_path(&Path::circle(DVec2::new(x, ground_y - s * 0.82), s * 0.16), &black);
            surface.fill_path(&Path::circle(DVec2::new(x + s * 0.06, ground_y - s * 0.98), s * 0.06), &black);
        }
        ArchitectureStyle::Iwan => {
            surface.fill_rect(Rect::new(x - s * 0.5, ground_y - s * 0.65, s, s * 0.65), &black);
            surface.set_composite(CompositeMode::DestinationOut);
            let mut arch = Path::new();
            arch.ellipse(DVec2::new(x, ground_y - s * 0.25), DVec2::new(s * 0.28, s * 0.35), 0.0, PI, TAU)
                .close();
            surface.fill_path(&arch, &black);
            surface.set_composite(CompositeMode::SourceOver);
        }
        ArchitectureStyle::Fort => {
            let wall = s * 1.2;
            surface.fill_rect(Rect::new(x - s * 0.6, ground_y - s * 0.35, wall, s * 0.35), &black);
            let crenels = 6;
            for i in (0..crenels).filter(|i| i % 2 == 0) {
                let cx = x - s * 0.6 + i as f64 * wall / crenels as f64;
                surface.fill_rect(Rect::new(cx, ground_y - s * 0.47, wall / crenels as f64, s * 0.12), &black);
            }
            // Tower
            surface.fill_rect(Rect::new(x - s * 0.78, ground_y - s * 0.55, s * 0.22, s * 0.55), &black);
        }
    }

    surface.restore();
}

/// Signpost and current-biome architecture for every landmark in range.
pub fn draw_landmarks(
    surface: &mut dyn DrawSurface,
    landmarks: &LandmarkTracker,
    biomes: &BiomeState,
    (left, right): (f64, f64),
) {
    let style = biomes.current().architecture;
    for lm in landmarks.visible(left, right) {
        let y = biomes.ground_y(lm.x);
        draw_architecture(surface, style, lm.x - ARCH_OFFSET, y, ARCH_SIZE, 0.95);
        draw_signpost(surface, lm.x, y, 1.0);
    }
}

pub fn draw_dust(surface: &mut dyn DrawSurface, dust: &DustPuffs) {
    for p in &dust.particles {
        surface.fill_path(&Path::circle(p.position, p.size), &Paint::rgba(DUST_COLOR, p.alpha()));
    }
}

/// Screen-space darkening from 20% to 80% of the viewport height.
pub fn vignette_paint(viewport: &Viewport) -> RadialGradient {
    let (w, h) = (viewport.width, viewport.height);
    RadialGradient::new(DVec2::new(w / 2.0, h / 2.0), h * 0.2, h * 0.8)
        .with_stop(0.0, Rgb::BLACK.with_alpha(0.0))
        .with_stop(1.0, Rgb::BLACK.with_alpha(0.35))
}

pub fn draw_vignette(surface: &mut dyn DrawSurface, viewport: &Viewport) {
    let full = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    surface.fill_rect(full, &vignette_paint(viewport).into());
}
