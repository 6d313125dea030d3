//! Trail fill and sun glow.

use super::{BlendMode, GradientStop, Layer, LayerKind, Shape};
use glam::{Vec2, Vec3};

/// Night-sky colour the trail fill fades toward.
pub const BACKGROUND: Vec3 = Vec3::new(0.0, 0.0, 0.02);

/// Opacity of the per-frame fill. Lower values give longer trails.
pub const TRAIL_ALPHA: f32 = 0.22;

/// Full-surface translucent fill that fades previous frames.
pub fn trail_layer(surface: Vec2) -> Layer {
    let mut layer = Layer::new(LayerKind::Trail, BlendMode::Alpha);
    layer.shapes.push(Shape::Rect {
        min: Vec2::ZERO,
        max: surface,
        color: BACKGROUND,
        alpha: TRAIL_ALPHA,
    });
    layer
}

/// Soft glow in the upper right, breathing slowly with global time.
pub fn sun_layer(surface: Vec2, time: f32) -> Layer {
    let center = Vec2::new(surface.x * 0.82, surface.y * 0.18);
    let pulse = 1.0 + 0.04 * (time * 0.000_8).sin();
    let radius = surface.min_element() * 0.45 * pulse;

    let mut layer = Layer::new(LayerKind::Sun, BlendMode::Additive);
    layer.shapes.push(Shape::RadialGradient {
        center,
        radius,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: Vec3::new(1.0, 0.86, 0.62),
                alpha: 0.05,
            },
            GradientStop {
                offset: 0.25,
                color: Vec3::new(1.0, 0.6, 0.3),
                alpha: 0.025,
            },
            GradientStop {
                offset: 1.0,
                color: Vec3::new(0.6, 0.2, 0.3),
                alpha: 0.0,
            },
        ],
    });
    layer
}
