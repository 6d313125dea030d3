//! Curve sampler: turns a stream's nodes into a smooth, dense polyline.
//!
//! Samples are regenerated every frame from the live node positions.

use crate::math::catmull_rom;
use crate::node::Node;
use glam::Vec2;

/// Interpolated points emitted per node-to-node span.
pub const SEGMENTS_PER_NODE: usize = 10;

/// Number of samples produced for `node_count` nodes.
pub fn sample_count(node_count: usize) -> usize {
    match node_count {
        0 => 0,
        n => (n - 1) * SEGMENTS_PER_NODE + 1,
    }
}

/// Catmull-Rom samples through `points`.
///
/// Neighbours outside the sequence are clamped to the first/last point, so
/// the curve starts and ends exactly on the end points.
pub fn sample_points(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    let mut out = Vec::with_capacity(sample_count(n));
    if n == 0 {
        return out;
    }

    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        for k in 0..SEGMENTS_PER_NODE {
            let t = k as f32 / SEGMENTS_PER_NODE as f32;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out.push(points[n - 1]);
    out
}

/// Curve samples through the current positions of `nodes`.
pub fn sample_nodes(nodes: &[Node]) -> Vec<Vec2> {
    let positions: Vec<Vec2> = nodes.iter().map(|n| n.position).collect();
    sample_points(&positions)
}
