//! Sky pass: time-of-day gradient, sun with glow, and stars near the end.

use std::f64::consts::PI;

use engine_core::Rgb;
use glam::DVec2;
use procgen::{BiomePalette, SkyGradient, SunColors};
use renderer::{DrawSurface, LinearGradient, Paint, Path, RadialGradient, Rect, Viewport};

const DUSK_START: f64 = 0.7;
const SUN_SET: f64 = 0.88;
const SUN_REDDEN_START: f64 = 0.6;
const STARS_START: f64 = 0.85;
const STAR_COUNT: usize = 30;
const SUN_RADIUS: f64 = 40.0;
const GLOW_RADIUS: f64 = 80.0;

/// Day gradient, blended toward dusk over the last stretch of the journey.
pub fn sky_gradient(palette: &BiomePalette, progress: f64) -> SkyGradient {
    if progress < DUSK_START {
        palette.sky_day
    } else {
        let td = ((progress - DUSK_START) / (1.0 - DUSK_START)).min(1.0);
        palette.sky_day.lerp(palette.sky_dusk, td)
    }
}

pub fn sun_color(sun: SunColors, progress: f64) -> Rgb {
    if progress < SUN_REDDEN_START {
        sun.high
    } else {
        sun.high.lerp(sun.low, (progress - SUN_REDDEN_START) / (SUN_SET - SUN_REDDEN_START))
    }
}

/// Sun center in screen space, or `None` once it has set.
pub fn sun_position(progress: f64, viewport: &Viewport) -> Option<DVec2> {
    if progress >= SUN_SET {
        return None;
    }
    let sp = progress / SUN_SET;
    let (w, h) = (viewport.width, viewport.height);
    Some(DVec2::new(w * 0.2 + w * 0.6 * sp, h * 0.25 - (sp * PI).sin() * h * 0.15))
}

/// Star opacity, or `None` before they come out.
pub fn star_opacity(progress: f64) -> Option<f64> {
    (progress > STARS_START).then(|| ((progress - STARS_START) / (1.0 - STARS_START)).min(1.0))
}

pub fn draw_sky(surface: &mut dyn DrawSurface, palette: &BiomePalette, progress: f64, viewport: &Viewport) {
    let (w, h) = (viewport.width, viewport.height);
    let full = Rect::new(0.0, 0.0, w, h);

    let mut gradient = LinearGradient::vertical(0.0, h);
    for (offset, color) in sky_gradient(palette, progress).stops() {
        gradient = gradient.with_stop(offset, color);
    }
    surface.fill_rect(full, &gradient.into());

    if let Some(center) = sun_position(progress, viewport) {
        let color = sun_color(palette.sun, progress);
        let glow = RadialGradient::new(center, 0.0, GLOW_RADIUS)
            .with_stop(0.0, color.with_alpha(0.55))
            .with_stop(0.5, color.with_alpha(0.18))
            .with_stop(1.0, Rgb::WHITE.with_alpha(0.0));
        surface.fill_rect(full, &glow.into());
        surface.fill_path(&Path::circle(center, SUN_RADIUS), &Paint::solid(color));
    }

    if let Some(opacity) = star_opacity(progress) {
        let paint = Paint::rgba(Rgb::WHITE, opacity);
        let mut stars = Path::new();
        for i in 0..STAR_COUNT {
            let x = (i as f64 * w * 0.07) % w;
            let y = (i as f64 * 37.0) % (h * 0.5);
            let size = 1.0 + (i % 3) as f64 * 0.5;
            stars.add_circle(DVec2::new(x, y), size);
        }
        surface.fill_path(&stars, &paint);
    }
}
