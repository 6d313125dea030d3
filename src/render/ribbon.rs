//! Ribbon renderer: base band plus "barcode" striations.
//!
//! Every curve sample contributes a segment of a wide, faint base band so the
//! ribbon never breaks up. On top of that, two noise functions decide where
//! short bright crosslines are drawn:
//!
//! - the *cluster* noise gates whether a sample can light up at all, which
//!   groups striations into travelling bands;
//! - the *tier* noise biases a uniform draw that picks none, a medium line or
//!   a maximum line (about 50 / 30 / 20 percent).
//!
//! While a stream surges every sample is lit at maximum and brightness
//! triples. The noise keeps drifting, three times as fast, and shimmers the
//! crosslines' brightness and span so the surge visibly flows.
//!
//! The noise frequencies are tuning constants for the look, not a contract.

use super::{stream_color, Shape};
use crate::config::{Config, EffectMode, LayoutMode};
use crate::curve;
use crate::math::{normalize, perpendicular};
use crate::particles::ParticleSystem;
use crate::stream::Stream;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Opacity of the base band relative to the stream opacity.
const BASE_ALPHA: f32 = 0.06;
const MEDIUM_ALPHA: f32 = 0.35;
const MAX_ALPHA: f32 = 0.85;
const GLOW_ALPHA: f32 = 0.25;

/// Brightness multiplier while surging.
const SURGE_BOOST: f32 = 3.0;

/// Curve progress beyond which maximum-tier samples may shed particles.
pub const TERMINUS_PROGRESS: f32 = 0.96;
/// Chance per eligible sample per frame of a particle burst.
pub const SPAWN_CHANCE: f32 = 0.04;

/// Brightness of a striation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    None,
    Medium,
    Max,
}

/// Base band width in pixels.
pub fn band_width(mode: LayoutMode, stream_count: u32) -> f32 {
    match mode {
        LayoutMode::River => 40.0,
        LayoutMode::Dna => 26.0,
        LayoutMode::Default | LayoutMode::Tree | LayoutMode::Convergence => {
            (70.0 - 4.0 * stream_count as f32).max(18.0)
        }
    }
}

/// Opacity scale for every ribbon shape.
///
/// Falls with the square root of the stream count so adding streams does not
/// wash the picture out. River uses a flat scale.
pub fn opacity_scale(mode: LayoutMode, luminosity: f32, stream_count: u32) -> f32 {
    let lum = luminosity / 100.0;
    match mode {
        LayoutMode::River => lum * 0.5,
        LayoutMode::Default | LayoutMode::Tree | LayoutMode::Convergence | LayoutMode::Dna => {
            lum / (stream_count.max(1) as f32).sqrt()
        }
    }
}

/// Width factor in `[0.85, 1.0]` that makes the band appear to rotate.
pub fn twist(time: f32, progress: f32, phase: f32) -> f32 {
    0.925 + 0.075 * (time * 0.002 + progress * TAU + phase).sin()
}

/// Cluster noise in `[-1, 1]`.
pub fn cluster_noise(progress: f32, phase: f32, drift: f32) -> f32 {
    (progress * 38.0 + phase + drift).sin() * 0.6 + (progress * 91.0 - drift * 1.7 + phase * 2.0).cos() * 0.4
}

/// Whether a sample takes part in a bright cluster.
pub fn in_cluster(noise: f32, surging: bool) -> bool {
    surging || noise > 0.0
}

/// Tier noise in `[0, 1]`.
pub fn tier_noise(progress: f32, phase: f32, drift: f32) -> f32 {
    (progress * 173.0 + drift * 2.3 + phase * 3.0).sin() * 0.5 + 0.5
}

/// Pick a tier from the tier noise and a uniform draw `roll` in `[0, 1)`.
///
/// At neutral noise the split is 50 / 30 / 20. Noise shifts both
/// thresholds by up to ±0.1.
pub fn select_tier(noise: f32, roll: f32, surging: bool) -> Tier {
    if surging {
        return Tier::Max;
    }
    let bias = (noise - 0.5) * 0.2;
    if roll < 0.5 - bias {
        Tier::None
    } else if roll < 0.8 - bias {
        Tier::Medium
    } else {
        Tier::Max
    }
}

/// Brightness and span factors for a surging crossline, from the two noises.
pub fn surge_shimmer(cluster: f32, tier: f32) -> (f32, f32) {
    (0.55 + 0.45 * tier, 0.8 + 0.2 * cluster)
}

/// Per-frame inputs shared by all streams.
#[derive(Debug, Clone, Copy)]
pub struct RibbonContext<'a> {
    pub config: &'a Config,
    /// Global simulation time.
    pub time: f32,
    /// Audio level, already zero when audio reactivity is off.
    pub audio_level: f32,
}

/// Append the shapes for one stream to `shapes`, spawning particles on the way.
pub fn draw_stream<R: Rng + ?Sized>(
    stream: &Stream,
    ctx: &RibbonContext<'_>,
    rng: &mut R,
    shapes: &mut Vec<Shape>,
    particles: &mut ParticleSystem,
) {
    let points = curve::sample_nodes(stream.nodes());
    if points.len() < 2 {
        return;
    }

    let config = ctx.config;
    let surging = stream.is_surging();
    let boost = if surging { SURGE_BOOST } else { 1.0 };
    let phase = stream.color_phase;
    let color = stream_color(phase, ctx.time);
    let core_color = color.lerp(Vec3::ONE, 0.6);
    let opacity = opacity_scale(config.layout_mode, config.silk_luminosity, config.stream_count)
        * (1.0 + 0.3 * ctx.audio_level);
    let base_width = band_width(config.layout_mode, config.stream_count);
    let drift = stream.drift;
    let spawns = config.effect_mode == EffectMode::Particles;

    let last = points.len() - 1;
    for (idx, &point) in points.iter().enumerate() {
        let progress = idx as f32 / last as f32;
        let width = base_width * twist(ctx.time, progress, phase);

        if idx > 0 {
            shapes.push(Shape::Line {
                from: points[idx - 1],
                to: point,
                width,
                color,
                alpha: BASE_ALPHA * opacity,
            });
        }

        let cluster = cluster_noise(progress, phase, drift);
        if !in_cluster(cluster, surging) {
            continue;
        }
        let tier_level = tier_noise(progress, phase, drift);
        let tier = select_tier(tier_level, rng.gen(), surging);
        if tier == Tier::None {
            continue;
        }
        let (shimmer, span) = if surging {
            surge_shimmer(cluster, tier_level)
        } else {
            (1.0, 1.0)
        };
        let gain = opacity * boost * shimmer;

        let tangent = normalize(points[(idx + 1).min(last)] - points[idx.saturating_sub(1)]);
        let half = perpendicular(tangent) * width * 0.5 * span;
        let (a, b) = (point - half, point + half);

        match tier {
            Tier::None => {}
            Tier::Medium => shapes.push(crossline(a, b, 1.0, color, MEDIUM_ALPHA * gain)),
            Tier::Max => {
                shapes.push(crossline(a, b, 3.0, color, GLOW_ALPHA * gain));
                shapes.push(crossline(a, b, 1.0, core_color, MAX_ALPHA * gain));

                if spawns && progress > TERMINUS_PROGRESS && rng.gen::<f32>() < SPAWN_CHANCE {
                    particles.spawn_burst(point, color, rng);
                }
            }
        }
    }
}

fn crossline(from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32) -> Shape {
    Shape::Line {
        from,
        to,
        width,
        color,
        alpha: alpha.min(1.0),
    }
}
