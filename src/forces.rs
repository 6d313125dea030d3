//! Per-frame force model for stream nodes.
//!
//! Each node is pulled by a spring toward a moving *drift target* (its origin
//! plus a layout-specific oscillation), optionally bent by gravity wells, and
//! pushed around by the pointer. The result is integrated with fixed damping.
//!
//! Nothing here is physically accurate; the forces are tuned for a floaty,
//! silk-like look. Stability comes from the damping factor and from every
//! force being bounded, not from clamping positions.

use crate::config::{Config, EffectMode, LayoutMode};
use crate::math::{normalize, perpendicular};
use crate::node::Node;
use glam::Vec2;
use std::f32::consts::PI;

/// Pointer repulsion radius in pixels.
pub const REPEL_RADIUS: f32 = 150.0;
/// Peak repulsion impulse per frame, reached as the pointer approaches a node.
pub const REPEL_STRENGTH: f32 = 6.0;
/// Vortex capture radius in pixels.
pub const VORTEX_RADIUS: f32 = 260.0;
const VORTEX_PULL: f32 = 0.6;
const VORTEX_SWIRL: f32 = 2.2;

/// Gravity well strength (pixels³ per frame²).
pub const GRAVITY_STRENGTH: f32 = 60_000.0;
/// Squared distance below which the inverse-square law is capped.
const GRAVITY_MIN_DIST_SQ: f32 = 400.0;

const SPRING_RATE: f32 = 0.04;
const RIVER_SPRING_RATE: f32 = 0.015;

/// Everything the force model needs to know about the current frame.
#[derive(Debug, Clone, Copy)]
pub struct ForceContext {
    /// Stream-local time in simulation time units.
    pub time: f32,
    /// Pointer position in surface pixels, `None` when the pointer is away.
    pub pointer: Option<Vec2>,
    pub layout_mode: LayoutMode,
    pub effect_mode: EffectMode,
    /// Audio level in `[0, 1]`, already zero when audio reactivity is off.
    pub audio_level: f32,
    /// Surface size in pixels.
    pub surface: Vec2,
}

impl ForceContext {
    pub fn new(config: &Config, time: f32, pointer: Option<Vec2>, audio_level: f32, surface: Vec2) -> Self {
        Self {
            time,
            pointer,
            layout_mode: config.layout_mode,
            effect_mode: config.effect_mode,
            audio_level: if config.audio_reactive { audio_level } else { 0.0 },
            surface,
        }
    }
}

/// Spring constant toward the drift target. River settles more slowly.
pub fn spring_rate(mode: LayoutMode) -> f32 {
    match mode {
        LayoutMode::River => RIVER_SPRING_RATE,
        LayoutMode::Default | LayoutMode::Tree | LayoutMode::Convergence | LayoutMode::Dna => SPRING_RATE,
    }
}

/// Rest position the spring pulls toward this frame.
pub fn drift_target(node: &Node, index: usize, ctx: &ForceContext) -> Vec2 {
    let t = ctx.time * 0.001;
    let i = index as f32;
    let (px, py) = (node.phase_offset_x, node.phase_offset_y);

    let offset = match ctx.layout_mode {
        LayoutMode::Dna => {
            let strand = if node.stream_index % 2 == 1 { PI } else { 0.0 };
            let amplitude = 55.0 * (1.0 + 0.6 * ctx.audio_level);
            let angle = t * 1.6 + i * 0.32 + strand;
            // Main helix turn plus a smaller circle spinning the other way.
            let helix = Vec2::new(angle.cos() * amplitude * 0.25, angle.sin() * amplitude);
            let counter_angle = -angle * 0.5 + py;
            let counter = Vec2::new(counter_angle.cos(), counter_angle.sin()) * amplitude * 0.15;
            helix + counter
        }
        LayoutMode::River => Vec2::new((t * 0.35 + px).sin() * 14.0, (t * 0.22 + py).cos() * 4.0),
        LayoutMode::Default | LayoutMode::Tree | LayoutMode::Convergence => Vec2::new(
            (t * 0.7 + px).sin() * 35.0 + (t * 1.9 + i * 0.21).sin() * 12.0,
            (t * 0.5 + py).cos() * 45.0 + (t * 1.3 + i * 0.17).cos() * 18.0,
        ),
    };

    node.origin + offset
}

/// The two fixed attractors used by [`EffectMode::Gravity`].
pub fn gravity_wells(surface: Vec2) -> [Vec2; 2] {
    [
        Vec2::new(surface.x * 0.3, surface.y * 0.5),
        Vec2::new(surface.x * 0.7, surface.y * 0.5),
    ]
}

/// Displacement of `target` toward a single `well`.
///
/// Inverse-square in the distance, with the squared distance floored at
/// `GRAVITY_MIN_DIST_SQ`. Never longer than the distance to the well.
pub fn gravity_pull(target: Vec2, well: Vec2) -> Vec2 {
    let to_well = well - target;
    let dist = to_well.length();
    let dist_sq = (dist * dist).max(GRAVITY_MIN_DIST_SQ);
    normalize(to_well) * (GRAVITY_STRENGTH / dist_sq).min(dist)
}

/// Bend `target` toward both gravity wells.
pub fn apply_gravity_wells(target: Vec2, surface: Vec2) -> Vec2 {
    gravity_wells(surface)
        .iter()
        .fold(target, |target, well| target + gravity_pull(target, *well))
}

/// Velocity impulse caused by the pointer at `pointer` on a node at `position`.
///
/// Both variants are gated off at zero distance, so a pointer exactly on a
/// node produces no force.
pub fn pointer_force(position: Vec2, pointer: Vec2, effect: EffectMode) -> Vec2 {
    match effect {
        EffectMode::Vortex => {
            let to_pointer = pointer - position;
            let dist = to_pointer.length();
            if dist <= 0.0 || dist >= VORTEX_RADIUS {
                return Vec2::ZERO;
            }
            let strength = 1.0 - dist / VORTEX_RADIUS;
            let dir = to_pointer / dist;
            dir * strength * VORTEX_PULL + perpendicular(dir) * strength * VORTEX_SWIRL
        }
        EffectMode::Default | EffectMode::Surges | EffectMode::Gravity | EffectMode::Particles => {
            let away = position - pointer;
            let dist = away.length();
            if dist <= 0.0 || dist >= REPEL_RADIUS {
                return Vec2::ZERO;
            }
            let falloff = (1.0 - dist / REPEL_RADIUS).powi(2);
            away / dist * falloff * REPEL_STRENGTH
        }
    }
}

/// Advance one node by one frame.
pub fn step(node: &mut Node, index: usize, ctx: &ForceContext) {
    let mut target = drift_target(node, index, ctx);
    if ctx.effect_mode == EffectMode::Gravity {
        target = apply_gravity_wells(target, ctx.surface);
    }

    node.velocity += (target - node.position) * spring_rate(ctx.layout_mode);

    if let Some(pointer) = ctx.pointer {
        node.velocity += pointer_force(node.position, pointer, ctx.effect_mode);
    }

    node.integrate();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(layout_mode: LayoutMode, effect_mode: EffectMode) -> ForceContext {
        ForceContext {
            time: 0.0,
            pointer: None,
            layout_mode,
            effect_mode,
            audio_level: 0.0,
            surface: Vec2::new(1000.0, 800.0),
        }
    }

    #[test]
    fn test_river_springs_slower() {
        assert!(spring_rate(LayoutMode::River) < spring_rate(LayoutMode::Default));
        assert!(spring_rate(LayoutMode::River) < spring_rate(LayoutMode::Dna));
    }

    #[test]
    fn test_repulsion_gated_at_zero_distance() {
        let p = Vec2::new(200.0, 300.0);
        let force = pointer_force(p, p, EffectMode::Default);
        assert_eq!(force, Vec2::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn test_vortex_gated_at_zero_distance() {
        let p = Vec2::new(50.0, 60.0);
        assert_eq!(pointer_force(p, p, EffectMode::Vortex), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_pushes_away_and_vanishes_at_radius() {
        let pointer = Vec2::new(100.0, 100.0);
        let near = pointer_force(Vec2::new(110.0, 100.0), pointer, EffectMode::Default);
        assert!(near.x > 0.0);
        assert!(near.y.abs() < 1e-6);

        let edge = pointer_force(pointer + Vec2::new(REPEL_RADIUS, 0.0), pointer, EffectMode::Default);
        assert_eq!(edge, Vec2::ZERO);

        let almost = pointer_force(pointer + Vec2::new(REPEL_RADIUS - 0.01, 0.0), pointer, EffectMode::Default);
        assert!(almost.length() < 1e-6);
    }

    #[test]
    fn test_repulsion_grows_toward_pointer() {
        let pointer = Vec2::ZERO;
        let far = pointer_force(Vec2::new(120.0, 0.0), pointer, EffectMode::Surges).length();
        let close = pointer_force(Vec2::new(20.0, 0.0), pointer, EffectMode::Surges).length();
        assert!(close > far);
        assert!(close <= REPEL_STRENGTH);
    }

    #[test]
    fn test_vortex_pulls_in_and_swirls() {
        let pointer = Vec2::ZERO;
        let force = pointer_force(Vec2::new(100.0, 0.0), pointer, EffectMode::Vortex);
        // Inward component points toward the pointer, swirl is perpendicular.
        assert!(force.x < 0.0);
        assert!(force.y.abs() > 0.0);
        // Larger radius than repulsion.
        let outside_repel = Vec2::new(REPEL_RADIUS + 50.0, 0.0);
        assert_ne!(pointer_force(outside_repel, pointer, EffectMode::Vortex), Vec2::ZERO);
        assert_eq!(pointer_force(outside_repel, pointer, EffectMode::Default), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_wells_pull_toward_wells() {
        let surface = Vec2::new(1000.0, 800.0);
        let target = Vec2::new(300.0, 200.0);
        let bent = apply_gravity_wells(target, surface);
        // Both wells sit below this target.
        assert!(bent.y > target.y);
    }

    #[test]
    fn test_gravity_pull_is_inverse_square() {
        let well = Vec2::new(500.0, 400.0);
        let near = gravity_pull(well + Vec2::new(100.0, 0.0), well);
        let far = gravity_pull(well + Vec2::new(200.0, 0.0), well);
        assert!(near.x < 0.0 && near.y == 0.0);
        assert!((near.length() / far.length() - 4.0).abs() < 1e-3);
        assert!((near.length() - GRAVITY_STRENGTH / 10_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_pull_is_capped_near_well() {
        let well = Vec2::new(500.0, 400.0);
        let floor = GRAVITY_STRENGTH / GRAVITY_MIN_DIST_SQ;
        for d in [25.0, 50.0, 150.0] {
            let pull = gravity_pull(well + Vec2::new(0.0, d), well).length();
            assert!(pull <= floor + 1e-3);
        }
        // Inside the floor the pull lands on the well instead of passing it.
        for d in [1.0, 5.0, 15.0] {
            let target = well + Vec2::new(d, 0.0);
            let pulled = target + gravity_pull(target, well);
            assert!((pulled - well).length() < 1e-3);
        }
        assert_eq!(gravity_pull(well, well), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_well_never_overshoots() {
        let surface = Vec2::new(1000.0, 800.0);
        let wells = gravity_wells(surface);
        let target = wells[0] + Vec2::new(0.5, 0.0);
        let bent = apply_gravity_wells(target, surface);
        assert!(bent.is_finite());
        let on_well = apply_gravity_wells(wells[0], surface);
        assert!(on_well.is_finite());
    }

    #[test]
    fn test_dna_strands_are_half_turn_apart() {
        let c = ctx(LayoutMode::Dna, EffectMode::Default);
        let a = Node::new(Vec2::ZERO, 0, 4);
        let mut b = Node::new(Vec2::ZERO, 1, 4);
        // Same phase offsets so only the strand parity differs.
        b.phase_offset_x = a.phase_offset_x;
        b.phase_offset_y = a.phase_offset_y;
        let ta = drift_target(&a, 4, &c);
        let tb = drift_target(&b, 4, &c);
        // The dominant vertical helix term flips sign between strands.
        assert!(ta.y > 0.0);
        assert!(tb.y < 0.0);
    }

    #[test]
    fn test_audio_boosts_dna_amplitude() {
        let mut c = ctx(LayoutMode::Dna, EffectMode::Default);
        c.time = 700.0;
        let node = Node::new(Vec2::ZERO, 0, 3);
        let quiet = drift_target(&node, 3, &c).length();
        c.audio_level = 1.0;
        let loud = drift_target(&node, 3, &c).length();
        assert!(loud > quiet);
    }

    #[test]
    fn test_river_drift_is_small_and_flat() {
        let mut c = ctx(LayoutMode::River, EffectMode::Default);
        let node = Node::new(Vec2::ZERO, 0, 0);
        for k in 0..200 {
            c.time = k as f32 * 97.0;
            let off = drift_target(&node, 0, &c);
            assert!(off.x.abs() <= 14.0 + 1e-3);
            assert!(off.y.abs() <= 4.0 + 1e-3);
        }
    }

    #[test]
    fn test_step_never_diverges() {
        let mut c = ctx(LayoutMode::Default, EffectMode::Vortex);
        let mut node = Node::new(Vec2::new(500.0, 400.0), 0, 10);
        for k in 0..5_000 {
            c.time = k as f32 * 16.0;
            c.pointer = Some(Vec2::new(500.0 + (k % 7) as f32, 400.0));
            step(&mut node, 10, &c);
            assert!(node.position.is_finite());
        }
        assert!((node.position - node.origin).length() < 1_000.0);
    }

    #[test]
    fn test_context_ignores_audio_when_disabled() {
        let config = Config::default();
        let c = ForceContext::new(&config, 0.0, None, 0.9, Vec2::ONE);
        assert_eq!(c.audio_level, 0.0);
    }
}
