//! Background star field.

use crate::render::{BlendMode, Layer, LayerKind, Shape};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Surface area (px²) that holds one star at density 1.
pub const STAR_AREA_UNIT: f32 = 100_000.0;

/// Phase advance per frame at 100% flicker speed for a depth-1 star.
const FLICKER_RATE: f32 = 0.08;
/// Alpha a star keeps at the dark end of its twinkle.
const ALPHA_FLOOR: f32 = 0.25;
const STAR_COLOR: Vec3 = Vec3::new(0.85, 0.9, 1.0);

/// One background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    /// 1 (far, faint, slow) to 3 (near, bright, fast).
    pub depth_layer: u8,
    pub flicker_phase: f32,
}

impl Star {
    pub fn radius(&self) -> f32 {
        0.5 + self.depth_layer as f32 * 0.45
    }

    /// Current opacity for a star luminosity in percent.
    pub fn alpha(&self, luminosity: f32) -> f32 {
        let flicker = self.flicker_phase.sin() * 0.5 + 0.5;
        let depth = self.depth_layer as f32 / 3.0;
        (ALPHA_FLOOR + (1.0 - ALPHA_FLOOR) * flicker) * depth * luminosity / 100.0
    }
}

/// Number of stars for a density on a surface of the given size.
pub fn star_count(density: f32, surface: Vec2) -> usize {
    if density <= 0.0 {
        return 0;
    }
    let divisor = STAR_AREA_UNIT / density;
    (surface.x.max(0.0) * surface.y.max(0.0) / divisor).floor() as usize
}

/// Depth layer for a uniform draw in `[0, 1)`: 50% / 30% / 20%.
pub fn depth_for_roll(roll: f32) -> u8 {
    if roll < 0.5 {
        1
    } else if roll < 0.8 {
        2
    } else {
        3
    }
}

/// The star list plus the parameters it was generated for.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    stars: Vec<Star>,
    generated_for: Option<(f32, u32, u32)>,
}

impl StarField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Regenerate the stars if `density` or the surface size changed since the
    /// last generation. Returns whether a new field was generated.
    pub fn sync<R: Rng + ?Sized>(&mut self, density: f32, surface: Vec2, rng: &mut R) -> bool {
        let key = (density, surface.x as u32, surface.y as u32);
        if self.generated_for == Some(key) {
            return false;
        }

        let count = star_count(density, surface);
        self.stars = (0..count)
            .map(|_| Star {
                position: Vec2::new(rng.gen::<f32>() * surface.x, rng.gen::<f32>() * surface.y),
                depth_layer: depth_for_roll(rng.gen()),
                flicker_phase: rng.gen_range(0.0..TAU),
            })
            .collect();
        self.generated_for = Some(key);
        log::debug!("star field regenerated: {} stars", count);
        true
    }

    /// Force regeneration on the next [`StarField::sync`].
    pub fn invalidate(&mut self) {
        self.generated_for = None;
    }

    /// Advance every star's twinkle by one frame.
    pub fn advance(&mut self, flicker_speed: f32) {
        let rate = FLICKER_RATE * flicker_speed / 100.0;
        for star in &mut self.stars {
            star.flicker_phase = (star.flicker_phase + rate * star.depth_layer as f32) % TAU;
        }
    }

    pub fn layer(&self, luminosity: f32) -> Layer {
        let mut layer = Layer::new(LayerKind::Stars, BlendMode::Alpha);
        layer.shapes.extend(self.stars.iter().map(|s| Shape::Circle {
            center: s.position,
            radius: s.radius(),
            color: STAR_COLOR,
            alpha: s.alpha(luminosity),
        }));
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_grows_with_density() {
        let surface = Vec2::new(1000.0, 800.0);
        assert_eq!(star_count(40.0, surface), 320);
        let mut last = 0;
        for density in (10..=100).step_by(10) {
            let count = star_count(density as f32, surface);
            assert!(count >= last);
            last = count;
        }
        assert!(star_count(80.0, surface) >= star_count(40.0, surface));
    }

    #[test]
    fn test_depth_distribution() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[(depth_for_roll(rng.gen()) - 1) as usize] += 1;
        }
        assert!((4_500..5_500).contains(&counts[0]));
        assert!((2_500..3_500).contains(&counts[1]));
        assert!((1_500..2_500).contains(&counts[2]));
    }

    #[test]
    fn test_depth_weights_size_and_alpha() {
        let star = |depth_layer| Star {
            position: Vec2::ZERO,
            depth_layer,
            flicker_phase: 1.0,
        };
        for d in 1..3 {
            assert!(star(d + 1).radius() > star(d).radius());
            assert!(star(d + 1).alpha(60.0) > star(d).alpha(60.0));
        }
        assert!(star(3).alpha(100.0) <= 1.0);
    }

    #[test]
    fn test_regenerates_only_on_change() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = StarField::new();
        let surface = Vec2::new(640.0, 480.0);
        assert!(field.sync(40.0, surface, &mut rng));
        let before = field.stars().to_vec();
        field.advance(50.0);
        assert!(!field.sync(40.0, surface, &mut rng));
        assert_eq!(field.len(), before.len());
        assert_eq!(field.stars()[0].position, before[0].position);

        assert!(field.sync(60.0, surface, &mut rng));
        assert!(field.len() > before.len());
        assert!(field.sync(60.0, Vec2::new(320.0, 240.0), &mut rng));
    }

    #[test]
    fn test_flicker_scales_with_depth() {
        let mut field = StarField::new();
        field.stars = vec![
            Star { position: Vec2::ZERO, depth_layer: 1, flicker_phase: 0.0 },
            Star { position: Vec2::ZERO, depth_layer: 3, flicker_phase: 0.0 },
        ];
        field.advance(100.0);
        let (near, far) = (field.stars[1].flicker_phase, field.stars[0].flicker_phase);
        assert!((near - 3.0 * far).abs() < 1e-6);

        field.advance(0.0);
        assert_eq!(field.stars[1].flicker_phase, near);
    }
}
