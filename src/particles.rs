//! Short-lived sparks shed from the bright ends of ribbons.
//!
//! Particles are spawned by the ribbon renderer under
//! [`EffectMode::Particles`](crate::config::EffectMode::Particles). Each one
//! flies in a straight line, fades out linearly and is dropped when its age
//! reaches its lifetime. There is no cap on the live count; the low spawn
//! probability keeps it small.

use crate::render::{BlendMode, Layer, LayerKind, Shape};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;
use std::ops::{Range, RangeInclusive};

const BURST_SIZE: RangeInclusive<usize> = 3..=6;
const SPEED: Range<f32> = 0.4..2.2;
const LIFETIME: Range<f32> = 35.0..80.0;
const SIZE: Range<f32> = 0.8..2.2;

/// A single spark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Frames lived so far.
    pub age: f32,
    /// Age at which the particle is removed.
    pub max_age: f32,
    /// Radius in pixels.
    pub size: f32,
    pub color: Vec3,
}

impl Particle {
    /// Opacity, falling linearly from 1 at birth to 0 at `max_age`.
    pub fn alpha(&self) -> f32 {
        if self.max_age <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.max_age).max(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.max_age
    }
}

/// The live particle set.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Emit a small burst of sparks from `origin` in random directions.
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, origin: Vec2, color: Vec3, rng: &mut R) {
        let count = rng.gen_range(BURST_SIZE);
        let color = color.lerp(Vec3::ONE, 0.5);
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(SPEED);
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                age: 0.0,
                max_age: rng.gen_range(LIFETIME).round(),
                size: rng.gen_range(SIZE),
                color,
            });
        }
    }

    /// Move and age every particle by one frame, dropping the expired ones.
    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.position += p.velocity;
            p.age += 1.0;
            p.is_alive()
        });
    }

    /// Additive layer with one circle per particle.
    pub fn layer(&self) -> Layer {
        let mut layer = Layer::new(LayerKind::Particles, BlendMode::Additive);
        layer.shapes.extend(self.particles.iter().map(|p| Shape::Circle {
            center: p.position,
            radius: p.size,
            color: p.color,
            alpha: p.alpha(),
        }));
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(max_age: f32) -> Particle {
        Particle {
            position: Vec2::ZERO,
            velocity: Vec2::new(1.0, -0.5),
            age: 0.0,
            max_age,
            size: 1.0,
            color: Vec3::ONE,
        }
    }

    #[test]
    fn test_alpha_decreases_to_zero() {
        let mut p = particle(10.0);
        let mut last = p.alpha();
        assert_eq!(last, 1.0);
        for _ in 0..10 {
            p.age += 1.0;
            assert!(p.alpha() < last);
            last = p.alpha();
        }
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_removed_exactly_at_max_age() {
        let mut system = ParticleSystem::new();
        system.spawn(particle(5.0));
        for _ in 0..4 {
            system.update();
            assert_eq!(system.len(), 1);
            assert!(system.iter().all(|p| p.alpha() > 0.0));
        }
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_moves_with_constant_velocity() {
        let mut system = ParticleSystem::new();
        system.spawn(particle(100.0));
        for _ in 0..3 {
            system.update();
        }
        let p = system.iter().next().unwrap();
        assert_eq!(p.position, Vec2::new(3.0, -1.5));
    }

    #[test]
    fn test_burst() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut system = ParticleSystem::new();
        system.spawn_burst(Vec2::new(5.0, 5.0), Vec3::X, &mut rng);
        assert!(BURST_SIZE.contains(&system.len()));
        for p in system.iter() {
            assert_eq!(p.position, Vec2::new(5.0, 5.0));
            assert!(p.max_age >= 35.0 && p.max_age <= 80.0);
            assert!(p.velocity.length() >= 0.4 - 1e-4);
        }
        assert_eq!(system.layer().shapes.len(), system.len());
    }
}
