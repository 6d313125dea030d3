//! Simulated control points.

use glam::Vec2;

/// Velocity is multiplied by this after every integration step.
pub const DAMPING: f32 = 0.90;

/// One spring-driven control point of a stream.
///
/// `origin` is the rest position assigned by the layout engine and never
/// changes until the next re-layout. `position` and `velocity` are updated
/// by the force model every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub origin: Vec2,
    pub velocity: Vec2,
    /// Phase offset of the horizontal drift terms.
    pub phase_offset_x: f32,
    /// Phase offset of the vertical drift terms.
    pub phase_offset_y: f32,
    /// Index of the owning stream.
    pub stream_index: usize,
}

impl Node {
    /// Create a node at rest on `origin`.
    ///
    /// Phase offsets are derived from the stream and node indices so that a
    /// layout is reproducible.
    pub fn new(origin: Vec2, stream_index: usize, node_index: usize) -> Self {
        let s = stream_index as f32;
        let i = node_index as f32;
        Self {
            position: origin,
            origin,
            velocity: Vec2::ZERO,
            phase_offset_x: i * 0.31 + s * 1.73,
            phase_offset_y: i * 0.27 + s * 2.41,
            stream_index,
        }
    }

    /// Move by the current velocity, then damp it.
    #[inline]
    pub fn integrate(&mut self) {
        self.position += self.velocity;
        self.velocity *= DAMPING;
    }
}
