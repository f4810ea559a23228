//! Rendering: all passes for one frame (sky, terrain, rocks, landmarks,
//! dust, hiker, vignette).

mod figure;
mod scenery;
mod sky;

pub use figure::{draw_hiker, FIGURE_SIZE};
pub use scenery::{
    draw_architecture, draw_dust, draw_landmarks, draw_rocks, draw_signpost, draw_terrain, draw_vignette,
    terrain_path, vignette_paint, CULL_MARGIN,
};
pub use sky::{draw_sky, sky_gradient, star_opacity, sun_color, sun_position};

use glam::DVec2;
use renderer::{DrawSurface, Rect, Viewport};

use crate::state::HikeState;

/// Vertical shift that pins the bottom of the world to the bottom of the
/// viewport, so the ground stays on screen at any viewport height.
pub fn world_offset_y(world_height: f64, viewport: &Viewport) -> f64 {
    viewport.height - world_height
}

/// Draw the whole scene for the current state. Reads only.
pub fn draw(state: &HikeState, surface: &mut dyn DrawSurface, viewport: &Viewport) {
    surface.clear_rect(Rect::new(0.0, 0.0, viewport.width, viewport.height));

    surface.save();
    surface.translate(state.shake.offset);

    let palette = state.biomes.palette();
    draw_sky(surface, &palette, state.progress(), viewport);

    // ========== WORLD SPACE ==========
    let world = &state.world;
    surface.save();
    surface.translate(DVec2::new(-state.camera.x, world_offset_y(world.height, viewport)));

    draw_terrain(surface, &state.biomes.blended_heightmap(), world.width, world.height, palette.ground);

    let range = state.camera.visible_range(viewport.width, CULL_MARGIN);
    for (rocks, alpha) in state.biomes.rock_layers() {
        draw_rocks(surface, rocks, &state.biomes, range, palette.rock, alpha);
    }
    draw_landmarks(surface, &state.landmarks, &state.biomes, range);
    draw_dust(surface, &state.dust);

    let pose = state.hiker.pose(state.motion.bob_amplitude);
    draw_hiker(surface, DVec2::new(state.hiker.x, state.hiker.y), pose, &state.hiker_colors);

    surface.restore();

    // ========== SCREEN SPACE ==========
    draw_vignette(surface, viewport);

    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HikeConfig;
    use crate::update::tick;
    use renderer::{DisplayList, DrawCommand, Paint, RasterSurface};

    #[test]
    fn frame_is_balanced_and_ordered() {
        let mut state = HikeState::new(&HikeConfig::default());
        let vp = Viewport::new(1000.0, 600.0, 1.0);
        state.set_steps(1500);
        for _ in 0..30 {
            tick(&mut state, &vp, 1.0 / 60.0);
        }

        let mut list = DisplayList::new();
        draw(&state, &mut list, &vp);
        let commands = list.commands();
        assert!(list.is_balanced());
        assert!(matches!(commands[0], DrawCommand::ClearRect(_)));
        assert_eq!(commands[2], DrawCommand::Translate(state.shake.offset));
        assert!(matches!(commands[3], DrawCommand::FillPath { paint: Paint::Linear(_), .. }), "sky first");
        assert!(
            matches!(commands.last(), Some(DrawCommand::Restore)),
            "scene ends by undoing the shake offset"
        );
        let vignette = &commands[commands.len() - 2];
        assert!(matches!(vignette, DrawCommand::FillPath { paint: Paint::Radial(_), .. }));
    }

    #[test]
    fn world_pass_is_offset_by_camera() {
        let mut state = HikeState::new(&HikeConfig::default());
        state.camera.x = 250.0;
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let mut list = DisplayList::new();
        draw(&state, &mut list, &vp);
        assert!(list.commands().contains(&DrawCommand::Translate(DVec2::new(-250.0, -400.0))));
    }

    #[test]
    fn default_frame_shows_ground_along_the_bottom() {
        let config = HikeConfig::default();
        let vc = &config.viewport;
        let vp = Viewport::new(vc.width, vc.height, vc.pixel_ratio);
        let state = HikeState::new(&config);
        let mut surface = RasterSurface::new_opaque(&vp);
        draw(&state, &mut surface, &vp);

        let ground = state.biomes.palette().ground;
        let vignette = vignette_paint(&vp);
        let y = surface.height() - 4;
        for x in [100, 640, 1180] {
            let a = vignette.color_at(DVec2::new(x as f64 + 0.5, y as f64 + 0.5)).alpha;
            let expected = [ground.r, ground.g, ground.b].map(|c| c as f64 * (1.0 - a));
            let Some(px) = surface.pixel(x, y) else {
                panic!("pixel {x},{y} outside the surface");
            };
            for (got, want) in px.iter().zip(expected) {
                assert!((*got as f64 - want).abs() <= 1.5, "pixel {x},{y} is {px:?}, expected ground {want}");
            }
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn world_bottom_meets_viewport_bottom() {
        assert_eq!(world_offset_y(1000.0, &Viewport::new(1280.0, 720.0, 1.0)), -280.0);
        assert_eq!(world_offset_y(1000.0, &Viewport::new(1280.0, 1000.0, 1.0)), 0.0);
    }
}
