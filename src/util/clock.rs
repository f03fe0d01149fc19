//! Elapsed-time sources and frame timing.
//!
//! The flight core is driven by absolute elapsed seconds, never by per-frame
//! deltas, so a dropped frame just means a bigger step along the path.

use web_time::{Duration, Instant};

/// Monotonic elapsed-time source, in seconds since scene start.
pub trait Clock {
    /// Seconds elapsed since the clock started. Never decreases.
    fn elapsed(&self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Start counting from now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced explicitly, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    /// Clock at `t = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `dt` seconds. Negative steps are ignored so the clock
    /// stays monotonic.
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.now += dt;
        }
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now
    }
}

/// Frame timing with smoothed FPS and optional frame limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed.as_secs_f32());
    }

    fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotonic() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(0.5);
        clock.advance(-10.0);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
    }

    #[test]
    fn system_clock_starts_near_zero() {
        let clock = SystemClock::start();
        let first = clock.elapsed();
        assert!(first >= 0.0 && first < 1.0);
        assert!(clock.elapsed() >= first);
    }

    #[test]
    fn fps_moves_towards_observed_rate() {
        let mut timing = FrameTiming::new(0);
        assert!(timing.should_render());
        for _ in 0..500 {
            timing.record(1.0 / 30.0);
        }
        assert!((timing.fps() - 30.0).abs() < 0.5, "fps {}", timing.fps());
        timing.record(0.0);
        assert!((timing.fps() - 30.0).abs() < 0.5);
    }

    #[test]
    fn frame_limit_waits_for_min_duration() {
        let timing = FrameTiming::new(1);
        assert!(!timing.should_render());
    }
}
