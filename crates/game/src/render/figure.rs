//! The hiker figure, posed procedurally from the walk and bob phases.

use std::f64::consts::{PI, TAU};

use engine_core::Rgb;
use glam::DVec2;
use renderer::{DrawSurface, Paint, Path, Rect, Stroke};

use crate::config::HikerColors;
use crate::hiker::Pose;

/// Nominal figure height in world units.
pub const FIGURE_SIZE: f64 = 28.0;

/// Draw the hiker with feet at `feet` (world space).
pub fn draw_hiker(surface: &mut dyn DrawSurface, feet: DVec2, pose: Pose, colors: &HikerColors) {
    let s = FIGURE_SIZE;
    let body = colors.body;
    let accent = colors.accent;

    surface.save();
    surface.translate(feet);
    surface.translate(DVec2::new(0.0, -s * 0.08));

    surface.fill_path(
        &Path::ellipse_shape(DVec2::new(0.0, s * 0.08), DVec2::new(s * 0.5, s * 0.08), 0.0),
        &Paint::rgba(Rgb::BLACK, 0.4),
    );

    let hip = -s * 0.75 + pose.bob_offset;
    let foot_ry = s * 0.08;
    let foot_y = -foot_ry * 0.9;

    // Legs swing in opposition
    let leg = Stroke::new(body, s * 0.15).round();
    let mut feet_path = Path::new();
    for side in [-1.0, 1.0] {
        let hip_x = side * s * 0.15;
        let foot_x = hip_x + side * pose.leg_swing * s * 0.28;
        surface.stroke_path(&Path::line(DVec2::new(hip_x, hip), DVec2::new(foot_x, foot_y)), &leg);
        feet_path.add_ellipse(DVec2::new(foot_x, foot_y), DVec2::new(s * 0.12, foot_ry), 0.0);
    }
    surface.fill_path(&feet_path, &Paint::solid(accent));

    surface.fill_path(
        &Path::ellipse_shape(DVec2::new(0.0, hip - s * 0.3), DVec2::new(s * 0.38, s * 0.55), 0.0),
        &Paint::solid(body),
    );
    // Backpack
    surface.fill_rect(Rect::new(-s * 0.38, hip - s * 0.5, s * 0.28, s * 0.4), &Paint::solid(accent));

    let shoulder = hip - s * 0.5;
    let arm = Stroke::new(body, s * 0.12).round();
    let mut right_hand = DVec2::ZERO;
    for side in [-1.0, 1.0] {
        let from = DVec2::new(side * s * 0.36, shoulder);
        let hand = DVec2::new(from.x + side * pose.arm_swing * s * 0.22, shoulder + s * 0.45);
        surface.stroke_path(&Path::line(from, hand), &arm);
        if side > 0.0 {
            right_hand = hand;
        }
    }

    let stick_tip = DVec2::new(s * 0.5 + pose.arm_swing * s * 0.3, 0.0);
    surface.stroke_path(&Path::line(right_hand, stick_tip), &Stroke::new(colors.stick, s * 0.06).round());

    let head = DVec2::new(0.0, hip - s * 0.87);
    surface.fill_path(&Path::circle(head, s * 0.32), &Paint::solid(body));
    let mut cap = Path::new();
    cap.arc(head - DVec2::new(0.0, s * 0.08), s * 0.28, PI, TAU).close();
    surface.fill_path(&cap, &Paint::solid(accent));

    surface.restore();
}
