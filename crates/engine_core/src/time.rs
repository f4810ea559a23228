//! Frame timing for the animation loop.

use std::time::Duration;

/// Converts variable display-refresh intervals into fixed logical ticks.
#[derive(Debug)]
pub struct FrameClock {
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed logical timestep (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by fixed ticks.
    accumulator: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock ticking at 60 Hz.
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: step_for_rate(60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Advance by an externally measured frame duration.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The fixed timestep as a Duration.
    pub fn fixed_timestep(&self) -> Duration {
        self.fixed_timestep
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f64 {
        self.fixed_timestep.as_secs_f64()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Drop whatever is left in the accumulator beyond one partial tick.
    ///
    /// Called after a frame hits its tick cap so a long stall (debugger,
    /// backgrounded tab) does not turn into a burst of catch-up ticks.
    pub fn discard_backlog(&mut self) {
        if self.accumulator >= self.fixed_timestep {
            log::debug!(
                "Dropping {:.1} ms of frame backlog",
                self.accumulator.as_secs_f64() * 1000.0
            );
            self.accumulator = Duration::ZERO;
        }
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f64 {
        if self.delta.as_secs_f64() > 0.0 {
            1.0 / self.delta.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Tick length truncated to whole nanoseconds.
fn step_for_rate(hz: f64) -> Duration {
    Duration::from_nanos((1_000_000_000.0 / hz) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_refresh_yields_one_tick() {
        let mut clock = FrameClock::new();
        clock.advance(clock.fixed_timestep());
        assert!(clock.should_fixed_update());
        assert!(!clock.should_fixed_update());
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut clock = FrameClock::new();
        let half = clock.fixed_timestep() / 2;
        clock.advance(half);
        assert!(!clock.should_fixed_update());
        clock.advance(half);
        assert!(clock.should_fixed_update());
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn sixty_hertz_step_is_whole_nanoseconds() {
        let clock = FrameClock::new();
        assert_eq!(clock.fixed_timestep(), Duration::from_nanos(16_666_666));
        assert_eq!(clock.fixed_timestep() / 2 * 2, clock.fixed_timestep());
    }

    #[test]
    fn discard_backlog_clears_whole_ticks() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_secs(1));
        assert!(clock.should_fixed_update());
        clock.discard_backlog();
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn fps_and_elapsed_follow_reported_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        clock.advance(Duration::from_millis(20));
        clock.advance(Duration::from_millis(20));
        assert!((clock.fps() - 50.0).abs() < 1e-9);
        assert!((clock.elapsed_seconds() - 0.04).abs() < 1e-12);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn thirty_hertz_step() {
        assert_eq!(step_for_rate(30.0), Duration::from_nanos(33_333_333));
    }
}
