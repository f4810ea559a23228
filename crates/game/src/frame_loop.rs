//! Host-facing frame driver: turns display refreshes into fixed ticks plus
//! one draw pass, and owns the surface lifecycle.

use std::time::Duration;

use engine_core::FrameClock;
use renderer::{DrawSurface, Viewport};

use crate::config::HikeConfig;
use crate::render;
use crate::state::{HikeEvent, HikeState};
use crate::update;

/// Cap on catch-up ticks in one frame; anything beyond is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// What one `frame()` call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub ticks: u32,
    pub events: Vec<HikeEvent>,
    pub drew: bool,
}

pub struct FrameLoop<S: DrawSurface> {
    state: HikeState,
    surface: Option<S>,
    viewport: Viewport,
    pending_resize: Option<Viewport>,
    clock: FrameClock,
    running: bool,
    resize_subscribed: bool,
}

impl<S: DrawSurface> FrameLoop<S> {
    /// Without a surface the loop is inert: frames are accepted and ignored.
    pub fn new(config: &HikeConfig, surface: Option<S>) -> Self {
        let vp = &config.viewport;
        let viewport = Viewport::new(vp.width, vp.height, vp.pixel_ratio);
        let mut surface = surface;
        match surface.as_mut() {
            Some(s) => s.resize(&viewport),
            None => log::warn!("No drawing surface available; hike animation disabled"),
        }
        let running = surface.is_some();
        Self {
            state: HikeState::new(config),
            surface,
            viewport,
            pending_resize: None,
            clock: FrameClock::new(),
            running,
            resize_subscribed: running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &HikeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut HikeState {
        &mut self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Length of one logical tick.
    pub fn tick_duration(&self) -> Duration {
        self.clock.fixed_timestep()
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.state.set_steps(steps);
    }

    pub fn add_steps(&mut self, steps: u32) {
        self.state.add_steps(steps);
    }

    pub fn reset_steps(&mut self) {
        self.state.reset_steps();
    }

    /// Record a host resize. Applied before the next draw; the latest wins.
    pub fn notify_resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        if !self.resize_subscribed {
            return;
        }
        let mut next = self.pending_resize.unwrap_or(self.viewport);
        next.resize(width, height, pixel_ratio);
        self.pending_resize = Some(next);
    }

    /// One display refresh, `elapsed` after the previous one.
    pub fn frame(&mut self, elapsed: Duration) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !self.running {
            return outcome;
        }
        let Some(surface) = self.surface.as_mut() else {
            return outcome;
        };

        if let Some(next) = self.pending_resize.take() {
            if next != self.viewport {
                log::debug!("Viewport resized to {}x{} @{}", next.width, next.height, next.pixel_ratio);
                self.viewport = next;
                surface.resize(&self.viewport);
            }
        }

        self.clock.advance(elapsed);
        let dt = self.clock.fixed_timestep_seconds();
        while outcome.ticks < MAX_TICKS_PER_FRAME && self.clock.should_fixed_update() {
            outcome.events.extend(update::tick(&mut self.state, &self.viewport, dt));
            outcome.ticks += 1;
        }
        if outcome.ticks == MAX_TICKS_PER_FRAME {
            self.clock.discard_backlog();
        }

        for event in &outcome.events {
            log::info!("{}", event);
        }

        render::draw(&self.state, surface, &self.viewport);
        outcome.drew = true;
        outcome
    }

    /// Stop the loop and drop the resize subscription. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.running || self.resize_subscribed {
            log::debug!("Frame loop torn down after {} ticks", self.state.tick_count);
        }
        self.running = false;
        self.resize_subscribed = false;
        self.pending_resize = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::{DisplayList, DrawCommand};

    fn tick() -> Duration {
        Duration::from_secs_f64(1.0 / 60.0)
    }

    fn make() -> FrameLoop<DisplayList> {
        FrameLoop::new(&HikeConfig::default(), Some(DisplayList::new()))
    }

    #[test]
    fn surface_is_sized_on_creation() {
        let fl = make();
        let first = &fl.surface().unwrap().commands()[0];
        assert_eq!(*first, DrawCommand::Resize(Viewport::new(1280.0, 720.0, 1.0)));
    }

    #[test]
    fn one_refresh_runs_one_tick_and_draws() {
        let mut fl = make();
        let out = fl.frame(tick() + Duration::from_micros(100));
        assert_eq!(out.ticks, 1);
        assert!(out.drew);
        assert_eq!(fl.state().tick_count, 1);
        assert!(fl.surface().unwrap().is_balanced());
    }

    #[test]
    fn long_stall_is_capped() {
        let mut fl = make();
        let out = fl.frame(Duration::from_secs(2));
        assert_eq!(out.ticks, MAX_TICKS_PER_FRAME);
        let next = fl.frame(Duration::ZERO);
        assert_eq!(next.ticks, 0, "backlog was dropped");
    }

    #[test]
    fn inert_without_surface() {
        let mut fl: FrameLoop<DisplayList> = FrameLoop::new(&HikeConfig::default(), None);
        assert!(!fl.is_running());
        fl.add_steps(100);
        let out = fl.frame(Duration::from_secs(1));
        assert_eq!(out, FrameOutcome::default());
        assert_eq!(fl.state().tick_count, 0);
    }

    #[test]
    fn resize_applies_before_next_draw() {
        let mut fl = make();
        fl.notify_resize(800.0, 600.0, 2.0);
        fl.notify_resize(640.0, 480.0, 2.0);
        assert_eq!(fl.viewport().width, 1280.0, "not applied until a frame runs");
        fl.frame(tick());
        assert_eq!(*fl.viewport(), Viewport::new(640.0, 480.0, 2.0));
        let resizes = fl
            .surface()
            .unwrap()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Resize(_)))
            .count();
        assert_eq!(resizes, 2, "creation plus the latest resize only");
    }

    #[test]
    fn teardown_is_idempotent_and_stops_frames() {
        let mut fl = make();
        fl.frame(tick());
        fl.teardown();
        fl.teardown();
        assert!(!fl.is_running());
        fl.notify_resize(10.0, 10.0, 1.0);
        let out = fl.frame(tick());
        assert!(!out.drew);
        assert_eq!(fl.state().tick_count, 1);
    }

    #[test]
    fn events_surface_through_the_frame() {
        let mut fl = make();
        fl.set_steps(1000);
        let out = fl.frame(tick() + Duration::from_micros(100));
        assert!(out.events.iter().any(|e| matches!(e, HikeEvent::BiomeEntered { index: 1, .. })));
    }
}
