//! Layout engine: where every stream starts, ends and rests.
//!
//! Layout runs only when the surface is resized or when the stream count,
//! start/end coordinates or layout mode change. It always rebuilds the whole
//! stream list; there is no partial update.
//!
//! Origin placement is a pure function of the configuration and surface size.
//! The only randomness in a fresh stream is its surge schedule and speed
//! multiplier, drawn in [`Stream::new`].

use crate::config::{Config, LayoutMode};
use crate::math::{normalize, perpendicular};
use crate::node::Node;
use crate::stream::Stream;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Control points per stream.
pub const NODES_PER_STREAM: usize = 40;

/// Perpendicular distance between neighbouring streams for a layout mode.
pub fn stream_spacing(mode: LayoutMode) -> f32 {
    match mode {
        LayoutMode::Default => 34.0,
        LayoutMode::River => 14.0,
        LayoutMode::Dna | LayoutMode::Tree | LayoutMode::Convergence => 0.0,
    }
}

/// Start and end anchor of stream `index` out of `count`, in surface pixels.
pub fn anchors(config: &Config, index: usize, count: usize, surface: Vec2) -> (Vec2, Vec2) {
    match config.layout_mode {
        LayoutMode::Tree => {
            let root = Vec2::new(surface.x * 0.5, surface.y * 1.1);
            let spread = if count > 1 {
                index as f32 / (count - 1) as f32
            } else {
                0.5
            };
            (root, Vec2::new(surface.x * spread, surface.y * -0.1))
        }
        LayoutMode::Convergence => {
            let center = surface * 0.5;
            let radius = surface.max_element() * 0.6;
            let angle = index as f32 / count.max(1) as f32 * TAU - FRAC_PI_2;
            (center + Vec2::new(angle.cos(), angle.sin()) * radius, center)
        }
        LayoutMode::Default | LayoutMode::Dna | LayoutMode::River => {
            (config.start / 100.0 * surface, config.end / 100.0 * surface)
        }
    }
}

/// Rest positions of every node of stream `index`.
pub fn node_origins(config: &Config, index: usize, surface: Vec2) -> Vec<Vec2> {
    let count = config.stream_count.max(1) as usize;
    let (start, end) = anchors(config, index, count, surface);

    let side = perpendicular(normalize(end - start));
    let offset = (index as f32 - (count - 1) as f32 * 0.5) * stream_spacing(config.layout_mode);

    (0..NODES_PER_STREAM)
        .map(|i| {
            let t = i as f32 / (NODES_PER_STREAM - 1) as f32;
            start.lerp(end, t) + side * offset
        })
        .collect()
}

/// Build a fresh stream list for `config` on a surface of size `surface`.
pub fn build_streams<R: Rng + ?Sized>(config: &Config, surface: Vec2, rng: &mut R) -> Vec<Stream> {
    let count = config.stream_count.max(1) as usize;
    log::info!(
        "layout: {} stream(s), mode {:?}, surface {}x{}",
        count,
        config.layout_mode,
        surface.x,
        surface.y
    );

    (0..count)
        .map(|s| {
            let nodes = node_origins(config, s, surface)
                .into_iter()
                .enumerate()
                .map(|(i, origin)| Node::new(origin, s, i))
                .collect();
            let color_phase = s as f32 / count as f32 * TAU;
            Stream::new(nodes, color_phase, rng)
        })
        .collect()
}
