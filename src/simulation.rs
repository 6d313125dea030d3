//! Simulation context: owns every stream, star and particle.
//!
//! [`Simulation`] is driven from the outside. Each tick the host calls
//! [`Simulation::advance`] with the elapsed frame count, the pointer and the
//! current [`Config`]; the simulation steps its physics and returns the
//! [`Frame`] to draw. It holds no reference to a window, surface or clock.

use crate::audio::{AudioSignal, SyntheticBeat};
use crate::config::{Config, LayoutGeometry};
use crate::forces::{self, ForceContext};
use crate::layout;
use crate::particles::ParticleSystem;
use crate::render::{background, ribbon, BlendMode, Frame, Layer, LayerKind};
use crate::stars::StarField;
use crate::stream::{Stream, FRAME_STEP};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The animation state.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(1280, 720).with_seed(7);
/// let config = Config::default();
/// let frame = sim.advance(1.0, None, &config);
/// canvas.draw(&frame);
/// ```
pub struct Simulation {
    surface: Vec2,
    streams: Vec<Stream>,
    stars: StarField,
    particles: ParticleSystem,
    rng: StdRng,
    audio: Box<dyn AudioSignal>,
    /// Global clock in simulation time units.
    time: f32,
    /// Geometry the current stream list was laid out for.
    geometry: Option<LayoutGeometry>,
    frame_count: u64,
}

impl Simulation {
    /// Create a simulation for a surface of `width` × `height` pixels.
    ///
    /// Streams are laid out lazily on the first [`advance`](Self::advance).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: Vec2::new(width as f32, height as f32),
            streams: Vec::new(),
            stars: StarField::new(),
            particles: ParticleSystem::new(),
            rng: StdRng::from_entropy(),
            audio: Box::new(SyntheticBeat::default()),
            time: 0.0,
            geometry: None,
            frame_count: 0,
        }
    }

    /// Use a seeded random source, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the audio level source used in audio-reactive mode.
    pub fn with_audio(mut self, audio: impl AudioSignal + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    /// Change the surface size. Streams and stars are rebuilt on the next tick.
    pub fn resize(&mut self, width: u32, height: u32) {
        let surface = Vec2::new(width as f32, height as f32);
        if surface == self.surface {
            return;
        }
        self.surface = surface;
        self.geometry = None;
        self.stars.invalidate();
        self.particles.clear();
    }

    /// Step the simulation and compose the frame to draw.
    ///
    /// `dt` is the elapsed time in reference frames (`1.0` at 60 Hz); it
    /// scales the clocks together with `config.silk_speed`. Physics always
    /// integrates exactly one step per call.
    pub fn advance(&mut self, dt: f32, pointer: Option<Vec2>, config: &Config) -> Frame {
        self.relayout_if_needed(config);

        let step = FRAME_STEP * dt.max(0.0) * config.silk_speed / 100.0;
        self.time += step;
        self.frame_count += 1;

        let audio_level = if config.audio_reactive {
            self.audio.level(self.time)
        } else {
            0.0
        };

        for stream in &mut self.streams {
            let delta = stream.advance_clock(step, config.variable_speed);
            stream.update_surge(config.effect_mode, &mut self.rng);
            stream.advance_drift(delta);
            let ctx = ForceContext::new(config, stream.local_time, pointer, audio_level, self.surface);
            for (index, node) in stream.nodes_mut().iter_mut().enumerate() {
                forces::step(node, index, &ctx);
            }
        }

        let mut frame = Frame::new(self.surface);
        frame.push(background::trail_layer(self.surface));

        if config.stars.enabled {
            self.stars.sync(config.stars.density, self.surface, &mut self.rng);
            self.stars.advance(config.stars.flicker_speed);
            frame.push(self.stars.layer(config.stars.luminosity));
        }

        if config.sun_enabled {
            frame.push(background::sun_layer(self.surface, self.time));
        }

        // Sparks born during the ribbon pass show once at full alpha.
        self.particles.update();

        let ctx = ribbon::RibbonContext {
            config,
            time: self.time,
            audio_level,
        };
        let mut ribbons = Layer::new(LayerKind::Ribbons, BlendMode::Additive);
        for stream in &self.streams {
            ribbon::draw_stream(stream, &ctx, &mut self.rng, &mut ribbons.shapes, &mut self.particles);
        }
        frame.push(ribbons);
        frame.push(self.particles.layer());

        frame
    }

    fn relayout_if_needed(&mut self, config: &Config) {
        let geometry = config.geometry();
        if self.geometry == Some(geometry) {
            return;
        }
        self.streams = layout::build_streams(config, self.surface, &mut self.rng);
        self.geometry = Some(geometry);
    }

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Global clock in simulation time units.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of completed [`advance`](Self::advance) calls.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EffectMode, LayoutMode};

    #[test]
    fn test_first_advance_lays_out_streams() {
        let mut sim = Simulation::new(800, 600).with_seed(1);
        assert!(sim.streams().is_empty());
        let config = Config::default();
        sim.advance(1.0, None, &config);
        assert_eq!(sim.streams().len(), config.stream_count as usize);
        assert_eq!(sim.frame_count(), 1);
    }

    #[test]
    fn test_geometry_change_rebuilds_streams() {
        let mut sim = Simulation::new(800, 600).with_seed(2);
        let mut config = Config::default();
        sim.advance(1.0, None, &config);

        // Non-geometric changes keep the streams.
        config.silk_luminosity = 250.0;
        config.effect_mode = EffectMode::Vortex;
        let time_before = sim.streams()[0].local_time;
        sim.advance(1.0, None, &config);
        assert!(sim.streams()[0].local_time > time_before);

        config.stream_count = 9;
        sim.advance(1.0, None, &config);
        assert_eq!(sim.streams().len(), 9);
        assert!(sim.streams().iter().all(|s| s.local_time == FRAME_STEP));

        config.layout_mode = LayoutMode::River;
        sim.advance(1.0, None, &config);
        assert!(sim.streams().iter().all(|s| s.local_time == FRAME_STEP));
    }

    #[test]
    fn test_resize_rebuilds_everything() {
        let mut sim = Simulation::new(800, 600).with_seed(3);
        let config = Config::default();
        sim.advance(1.0, None, &config);
        let stars_before = sim.stars().len();
        sim.resize(1600, 1200);
        sim.advance(1.0, None, &config);
        assert_eq!(sim.surface(), Vec2::new(1600.0, 1200.0));
        assert!(sim.stars().len() > stars_before);
        let last = sim.streams()[0].nodes().last().map(|n| n.origin.x);
        assert_eq!(last, Some(1760.0));
    }

    #[test]
    fn test_frame_layers_follow_toggles() {
        let mut sim = Simulation::new(400, 300).with_seed(4);
        let mut config = Config::default();
        config.sun_enabled = true;
        let frame = sim.advance(1.0, None, &config);
        let kinds: Vec<LayerKind> = frame.layers.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LayerKind::Trail,
                LayerKind::Stars,
                LayerKind::Sun,
                LayerKind::Ribbons,
                LayerKind::Particles
            ]
        );

        config.sun_enabled = false;
        config.stars.enabled = false;
        let frame = sim.advance(1.0, None, &config);
        assert!(frame.layer(LayerKind::Sun).is_none());
        assert!(frame.layer(LayerKind::Stars).is_none());
        assert_eq!(frame.layer(LayerKind::Ribbons).map(|l| l.blend), Some(BlendMode::Additive));
    }

    #[test]
    fn test_new_particles_draw_at_full_alpha() {
        let config = Config {
            effect_mode: EffectMode::Particles,
            ..Default::default()
        };
        let mut sim = Simulation::new(800, 600).with_seed(6);
        let mut fresh = 0;
        for _ in 0..400 {
            let frame = sim.advance(1.0, None, &config);
            let newborn: Vec<_> = sim.particles().iter().filter(|p| p.age == 0.0).collect();
            assert!(newborn.iter().all(|p| p.alpha() == 1.0));
            fresh += newborn.len();

            let drawn = frame.layer(LayerKind::Particles).map(|l| l.shapes.len());
            assert_eq!(drawn, Some(sim.particles().len()));
        }
        assert!(fresh > 0);
    }

    #[test]
    fn test_drift_follows_stream_clock() {
        let config = Config::default();
        let mut sim = Simulation::new(400, 300).with_seed(7);
        for _ in 0..10 {
            sim.advance(1.0, None, &config);
        }
        for stream in sim.streams() {
            let expected = stream.local_time * crate::stream::DRIFT_RATE;
            assert!((stream.drift - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_speed_freezes_clocks() {
        let mut sim = Simulation::new(400, 300).with_seed(5);
        let config = Config {
            silk_speed: 0.0,
            ..Default::default()
        };
        for _ in 0..10 {
            sim.advance(1.0, None, &config);
        }
        assert_eq!(sim.time(), 0.0);
        assert!(sim.streams().iter().all(|s| s.local_time == 0.0));
    }
}
