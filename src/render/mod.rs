//! Display list produced by the simulation every frame.
//!
//! The simulation never touches pixels. Each call to
//! [`Simulation::advance`](crate::Simulation::advance) returns a [`Frame`]:
//! an ordered list of [`Layer`]s, each with a blend mode and a list of
//! [`Shape`]s. Any surface that can fill rectangles, stroke lines, fill
//! circles and radial gradients under alpha and additive blending can play
//! it back; [`Canvas`](crate::canvas::Canvas) is the bundled software one.
//!
//! Layers are composited in order:
//!
//! | Layer | Blend | Content |
//! |-------|-------|---------|
//! | [`LayerKind::Trail`] | Alpha | Translucent fill that fades older frames |
//! | [`LayerKind::Stars`] | Alpha | Twinkling background stars |
//! | [`LayerKind::Sun`] | Additive | Soft radial glow |
//! | [`LayerKind::Ribbons`] | Additive | Base bands and striations |
//! | [`LayerKind::Particles`] | Additive | Sparks shed near ribbon ends |

pub mod background;
pub mod ribbon;

use glam::{Vec2, Vec3};

/// How a shape's colour is combined with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending: `dst = dst + (src - dst) * alpha`.
    #[default]
    Alpha,

    /// Additive ("lighter") blending: `dst = min(dst + src * alpha, 1)`.
    ///
    /// Overlaps brighten instead of occluding each other.
    Additive,
}

/// Which part of the scene a layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Trail,
    Stars,
    Sun,
    Ribbons,
    Particles,
}

/// One colour stop of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, `0.0` at the centre, `1.0` at the rim.
    pub offset: f32,
    pub color: Vec3,
    pub alpha: f32,
}

/// A drawing primitive. Colours are RGB in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned filled rectangle.
    Rect { min: Vec2, max: Vec2, color: Vec3, alpha: f32 },
    /// Stroked segment with round ends.
    Line { from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32 },
    /// Filled circle.
    Circle { center: Vec2, radius: f32, color: Vec3, alpha: f32 },
    /// Filled circle shaded by ordered colour stops.
    RadialGradient { center: Vec2, radius: f32, stops: Vec<GradientStop> },
}

/// A list of shapes sharing a blend mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub blend: BlendMode,
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(kind: LayerKind, blend: BlendMode) -> Self {
        Self {
            kind,
            blend,
            shapes: Vec::new(),
        }
    }
}

/// Everything to draw for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Surface size the frame was composed for.
    pub size: Vec2,
    pub layers: Vec<Layer>,
}

impl Frame {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// The first layer of the given kind, if the frame has one.
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Total number of shapes across all layers.
    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(|l| l.shapes.len()).sum()
    }
}

/// Ribbon colour for a stream's colour phase, drifting slowly with time.
///
/// A cosine palette pulled toward white so ribbons read as pale silk.
pub fn stream_color(color_phase: f32, time: f32) -> Vec3 {
    let h = color_phase + time * 0.000_05;
    let third = std::f32::consts::TAU / 3.0;
    let hue = Vec3::new(
        0.5 + 0.5 * h.cos(),
        0.5 + 0.5 * (h - third).cos(),
        0.5 + 0.5 * (h + third).cos(),
    );
    hue.lerp(Vec3::ONE, 0.45)
}
