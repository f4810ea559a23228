//! One logical tick of the hike simulation.

use glam::DVec2;
use renderer::Viewport;

use crate::state::{HikeEvent, HikeState};

/// Shake pulse when a new biome starts.
const BIOME_SHAKE: f64 = 2.0;
/// Shake pulse for a single large jump in steps.
const BIG_STEP_SHAKE: f64 = 6.0;
const BIG_STEP_DELTA: i64 = 100;

/// Advance the simulation by one fixed tick of `dt` seconds.
///
/// Order matters: the hiker and camera are final before anything is drawn,
/// and the biome transition resolves before terrain is sampled.
pub fn tick(state: &mut HikeState, viewport: &Viewport, dt: f64) -> Vec<HikeEvent> {
    let mut events = Vec::new();
    let steps = state.steps();
    let resting_x = state.world.target_x(steps);

    // 1. Step delta: re-arm the tween, kick up dust on forward progress
    let delta = state.take_step_delta();
    if delta != 0 {
        state.hiker.on_steps_changed(resting_x);
        if delta > 0 {
            let at = DVec2::new(state.hiker.x, state.hiker.y);
            state.dust.spawn(at, state.motion.particles_per_step, &mut state.rng);
            if delta >= BIG_STEP_DELTA {
                state.shake.kick(BIG_STEP_SHAKE);
            }
        }
    }
    state.hiker.resolve_target(resting_x, state.motion.tween_speed);

    // 2. Chase
    state.hiker.chase(state.motion.chase);

    // 3. Biome entry, then transition progress
    if let Some(biome) = state.biomes.sync_to_steps(steps, state.world.steps_per_biome) {
        let index = state.biomes.current_index();
        log::info!("Entering {}", biome.name);
        state.notifications.show_biome(biome.name);
        state.shake.kick(BIOME_SHAKE);
        state.landmarks.reset();
        events.push(HikeEvent::BiomeEntered { name: biome.name, index });
    }
    state.biomes.advance(state.motion.transition_speed);

    // 4. Stand on the blended ground
    state.hiker.y = state.biomes.ground_y(state.hiker.x);

    // 5. Landmarks
    for name in state.landmarks.check(state.hiker.x) {
        log::info!("Reached {}", name);
        state.notifications.show_landmark(name);
        events.push(HikeEvent::LandmarkReached { name });
    }

    // 6. Walk cycle
    state.hiker.advance_phases(&state.motion);

    // 7. Dust
    state.dust.update(state.motion.particle_gravity);

    // 8. Shake
    state.shake.update(&mut state.rng);

    // 9. Camera
    state.camera.follow(state.hiker.x, viewport.width, state.world.width);

    state.notifications.update(dt);
    state.tick_count += 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HikeConfig;

    const DT: f64 = 1.0 / 60.0;

    fn setup() -> (HikeState, Viewport) {
        (HikeState::new(&HikeConfig::default()), Viewport::new(1000.0, 600.0, 1.0))
    }

    #[test]
    fn hundred_steps_targets_eighty_and_tween_completes() {
        let (mut state, vp) = setup();
        state.set_steps(100);
        tick(&mut state, &vp, DT);
        assert_eq!(state.hiker.tween.end_x, 80.0);
        assert!(state.hiker.tween.active);
        assert_eq!(state.dust.len(), 2);
        assert!(state.shake.intensity > 5.0, "a 100-step jump shakes the camera");

        for _ in 0..16 {
            tick(&mut state, &vp, DT);
        }
        assert!(!state.hiker.tween.active);
        assert_eq!(state.hiker.tween.progress, 1.0);
        assert_eq!(state.hiker.target_x, 80.0);
    }

    #[test]
    fn hiker_stands_on_the_ground() {
        let (mut state, vp) = setup();
        state.set_steps(500);
        for _ in 0..40 {
            tick(&mut state, &vp, DT);
            assert_eq!(state.hiker.y, state.biomes.ground_y(state.hiker.x));
        }
        assert!(state.hiker.x > 0.0 && state.hiker.x <= 400.0);
    }

    #[test]
    fn small_steps_do_not_shake() {
        let (mut state, vp) = setup();
        state.set_steps(50);
        tick(&mut state, &vp, DT);
        assert_eq!(state.shake.intensity, 0.0);
        assert_eq!(state.dust.len(), 2);
    }

    #[test]
    fn biome_boundary_emits_event_and_notification() {
        let (mut state, vp) = setup();
        state.set_steps(1000);
        let events = tick(&mut state, &vp, DT);
        assert!(events.contains(&HikeEvent::BiomeEntered { name: "China (Xinjiang)", index: 1 }));
        assert_eq!(state.notifications.biome(), Some("China (Xinjiang)"));
        assert!(state.biomes.is_transitioning());
        assert!(state.biomes.transition().progress > 0.0);
    }

    #[test]
    fn landmark_fires_once_when_passed() {
        let (mut state, vp) = setup();
        state.set_steps(1300);
        let mut reached = Vec::new();
        for _ in 0..600 {
            for e in tick(&mut state, &vp, DT) {
                if let HikeEvent::LandmarkReached { name } = e {
                    reached.push(name);
                }
            }
        }
        assert_eq!(reached, vec!["Mountain Trail"]);
        assert!(state.landmarks.landmarks()[0].reached);
    }

    #[test]
    fn biome_entry_rearms_passed_landmarks() {
        let (mut state, vp) = setup();
        state.set_steps(1300);
        for _ in 0..600 {
            tick(&mut state, &vp, DT);
        }
        state.set_steps(2000);
        let events = tick(&mut state, &vp, DT);
        assert!(events.iter().any(|e| matches!(e, HikeEvent::BiomeEntered { index: 2, .. })));
        assert!(events.contains(&HikeEvent::LandmarkReached { name: "Mountain Trail" }));
    }

    #[test]
    fn step_decrease_retargets_without_dust() {
        let (mut state, vp) = setup();
        state.set_steps(100);
        for _ in 0..60 {
            tick(&mut state, &vp, DT);
        }
        assert!(state.dust.is_empty());
        state.set_steps(50);
        tick(&mut state, &vp, DT);
        assert!(state.dust.is_empty());
        assert!(state.hiker.tween.active);
        assert_eq!(state.hiker.tween.end_x, 40.0);
        for _ in 0..300 {
            tick(&mut state, &vp, DT);
        }
        assert!((state.hiker.x - 40.0).abs() < 1e-6);
    }

    #[test]
    fn camera_stays_in_world_bounds() {
        let (mut state, vp) = setup();
        state.set_steps(10_000);
        for _ in 0..2000 {
            tick(&mut state, &vp, DT);
            assert!(state.camera.x >= 0.0 && state.camera.x <= 8000.0 - vp.width);
        }
        assert!((state.camera.x - 7000.0).abs() < 1e-6);
    }

    #[test]
    fn notifications_expire_with_tick_time() {
        let (mut state, vp) = setup();
        state.set_steps(1000);
        tick(&mut state, &vp, DT);
        for _ in 0..140 {
            tick(&mut state, &vp, DT);
        }
        assert_eq!(state.notifications.biome(), None);
    }
}
