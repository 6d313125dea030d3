//! Frame timing for the scheduler.
//!
//! The simulation measures time in frames at a 60 Hz reference rate: a
//! `dt` of `1.0` means "one nominal frame". [`Time`] turns wall-clock
//! deltas into that unit and clamps it, so a stalled window (dragged, hidden,
//! stopped in a debugger) resumes smoothly instead of jumping ahead.
//!
//! ```ignore
//! let mut time = Time::new();
//! loop {
//!     time.update();
//!     let frame = simulation.advance(time.frame_ticks(), pointer, &config);
//! }
//! ```

use std::time::{Duration, Instant};

/// Reference refresh rate the simulation constants are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Largest `dt` handed to the simulation in one tick.
pub const MAX_FRAME_TICKS: f32 = 3.0;

/// Wall-clock bookkeeping for the frame loop.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// Replaces the measured delta when set (headless capture).
    fixed_delta: Option<f32>,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta: None,
        }
    }

    /// A timer that always reports a delta of one reference frame.
    pub fn fixed() -> Self {
        let mut time = Self::new();
        time.set_fixed_delta(Some(1.0 / REFERENCE_FPS));
        time
    }

    /// Record a new frame. Call once per tick, before reading the delta.
    pub fn update(&mut self) {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            log::trace!("fps: {:.1}", self.fps);
        }
    }

    /// The last delta in reference frames, clamped to `[0, MAX_FRAME_TICKS]`.
    pub fn frame_ticks(&self) -> f32 {
        (self.delta_secs * REFERENCE_FPS).clamp(0.0, MAX_FRAME_TICKS)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Use `delta` seconds per frame instead of measuring. `None` measures.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
