//! Streams: one ribbon's worth of nodes plus its timing state.

use crate::config::EffectMode;
use crate::node::Node;
use rand::Rng;
use std::ops::Range;

/// Length of a surge window in simulation time units.
pub const SURGE_DURATION: f32 = 800.0;

/// Simulation time units added per frame at 100% silk speed.
pub const FRAME_STEP: f32 = 16.0;

/// Delay between the end of one surge and the start of the next.
const SURGE_DELAY: Range<f32> = 2_500.0..9_000.0;

/// Range of per-stream speed multipliers used with variable speed.
const SPEED_MULTIPLIER: Range<f32> = 0.6..1.4;

/// Striation drift per unit of stream time.
pub const DRIFT_RATE: f32 = 0.000_6;
/// Drift multiplier while surging.
pub const SURGE_FLOW: f32 = 3.0;

/// One ribbon: an ordered, fixed-size run of nodes and its clocks.
///
/// Adjacent nodes are curve neighbours. The node count and order never change;
/// a topology change means building a new stream.
#[derive(Debug, Clone)]
pub struct Stream {
    nodes: Vec<Node>,
    /// Hue offset of this ribbon, in radians.
    pub color_phase: f32,
    /// Local time at which the next surge begins.
    pub surge_time: f32,
    /// Speed factor applied to the local clock when variable speed is on.
    pub speed_multiplier: f32,
    /// Monotonic stream clock.
    pub local_time: f32,
    /// Phase of the striation noise. Continuous; runs faster while surging.
    pub drift: f32,
    surging: bool,
    /// Whether `surge_time` was scheduled while surges were enabled.
    armed: bool,
}

impl Stream {
    /// Wrap `nodes` into a stream, drawing its random timing parameters from `rng`.
    pub fn new<R: Rng + ?Sized>(nodes: Vec<Node>, color_phase: f32, rng: &mut R) -> Self {
        Self {
            nodes,
            color_phase,
            surge_time: rng.gen_range(SURGE_DELAY),
            speed_multiplier: rng.gen_range(SPEED_MULTIPLIER),
            local_time: 0.0,
            drift: 0.0,
            surging: false,
            armed: true,
        }
    }

    /// The stream's nodes, in curve order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to the nodes. A slice, so the count cannot change.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Whether the stream was surging as of the last [`Stream::update_surge`].
    pub fn is_surging(&self) -> bool {
        self.surging
    }

    /// Whether `time` falls inside the currently scheduled surge window.
    pub fn surge_window_contains(&self, time: f32) -> bool {
        time >= self.surge_time && time < self.surge_time + SURGE_DURATION
    }

    /// Advance the local clock by `step`, scaled by the speed multiplier when
    /// `variable_speed` is on. Returns the amount the clock moved.
    pub fn advance_clock(&mut self, step: f32, variable_speed: bool) -> f32 {
        let scale = if variable_speed { self.speed_multiplier } else { 1.0 };
        let delta = step.max(0.0) * scale;
        self.local_time += delta;
        delta
    }

    /// Advance the striation drift by `delta` units of stream time.
    pub fn advance_drift(&mut self, delta: f32) {
        let flow = if self.surging { SURGE_FLOW } else { 1.0 };
        self.drift += delta.max(0.0) * DRIFT_RATE * flow;
    }

    /// Update the surge state for the current local time.
    ///
    /// Outside [`EffectMode::Surges`] a stream never surges and no window is
    /// kept. Entering the mode schedules a fresh window after a full delay,
    /// so every surge lasts its whole duration. Once a window has fully
    /// elapsed, the next one is scheduled strictly in the future.
    pub fn update_surge<R: Rng + ?Sized>(&mut self, effect: EffectMode, rng: &mut R) -> bool {
        if effect != EffectMode::Surges {
            self.armed = false;
        } else if !self.armed {
            self.surge_time = self.local_time + rng.gen_range(SURGE_DELAY);
            self.armed = true;
        } else if self.local_time >= self.surge_time + SURGE_DURATION {
            self.surge_time = self.local_time + rng.gen_range(SURGE_DELAY);
        }

        let surging = self.armed && self.surge_window_contains(self.local_time);
        if surging != self.surging {
            log::debug!(
                "stream surge {} at t={:.0}",
                if surging { "start" } else { "end" },
                self.local_time
            );
        }
        self.surging = surging;
        surging
    }
}
