//! Configuration snapshot consumed by the simulation every frame.
//!
//! A [`Config`] is a plain value. Whoever owns the settings (a UI panel, the
//! keyboard shortcuts of the bundled runner, a JSON file) produces a new value
//! between frames and hands a reference to [`Simulation::advance`]. The
//! simulation never mutates it and never observes a change mid-frame.
//!
//! The core does not validate ranges. [`Config::load`] clamps values into the
//! documented ranges because it acts as a configuration producer.
//!
//! ```ignore
//! let config = Config {
//!     stream_count: 3,
//!     layout_mode: LayoutMode::Tree,
//!     ..Default::default()
//! };
//! config.save("tree.json")?;
//! ```
//!
//! [`Simulation::advance`]: crate::Simulation::advance

use crate::error::ConfigError;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How stream anchors and rest positions are arranged.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Streams run from the configured start to end, spaced side by side.
    #[default]
    Default,
    /// All streams grow from a shared root below the surface and fan out upward.
    Tree,
    /// Streams start on a circle around the centre and converge on it.
    Convergence,
    /// Paired strands twisting around each other like a double helix.
    Dna,
    /// Tight, slow, mostly horizontal flow.
    River,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Default,
        LayoutMode::Tree,
        LayoutMode::Convergence,
        LayoutMode::Dna,
        LayoutMode::River,
    ];

    /// The next mode in [`LayoutMode::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Optional effect layered on top of the base motion and rendering.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EffectMode {
    /// Pointer repels nearby nodes.
    #[default]
    Default,
    /// Pointer pulls nodes inward and swirls them around itself.
    Vortex,
    /// Streams periodically flare up for a short window.
    Surges,
    /// Two fixed attractors bend every stream's drift target.
    Gravity,
    /// Bright spots near the end of a ribbon shed sparks.
    Particles,
}

impl EffectMode {
    pub const ALL: [EffectMode; 5] = [
        EffectMode::Default,
        EffectMode::Vortex,
        EffectMode::Surges,
        EffectMode::Gravity,
        EffectMode::Particles,
    ];

    /// The next mode in [`EffectMode::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Background star settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarSettings {
    pub enabled: bool,
    /// Stars per unit area, 10..=100.
    pub density: f32,
    /// Overall star brightness in percent, 10..=100.
    pub luminosity: f32,
    /// Twinkle rate in percent, 0..=100.
    pub flicker_speed: f32,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 40.0,
            luminosity: 60.0,
            flicker_speed: 30.0,
        }
    }
}

/// Complete animation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of ribbons, 1..=15.
    pub stream_count: u32,
    /// Stream start in percent of the surface size, each axis -50..=150.
    pub start: Vec2,
    /// Stream end in percent of the surface size, each axis -50..=150.
    pub end: Vec2,
    pub layout_mode: LayoutMode,
    pub effect_mode: EffectMode,
    pub audio_reactive: bool,
    pub stars: StarSettings,
    pub sun_enabled: bool,
    /// Ribbon brightness in percent, 10..=300.
    pub silk_luminosity: f32,
    /// Flow speed in percent, 0..=250.
    pub silk_speed: f32,
    /// Give every stream its own random speed multiplier.
    pub variable_speed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stream_count: 5,
            start: Vec2::new(-10.0, 50.0),
            end: Vec2::new(110.0, 50.0),
            layout_mode: LayoutMode::Default,
            effect_mode: EffectMode::Default,
            audio_reactive: false,
            stars: StarSettings::default(),
            sun_enabled: false,
            silk_luminosity: 100.0,
            silk_speed: 100.0,
            variable_speed: false,
        }
    }
}

impl Config {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file, clamping it into range.
    ///
    /// Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from JSON text, clamping it into range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Copy of this configuration with every value forced into its documented range.
    pub fn clamped(&self) -> Self {
        let pct = |v: Vec2| v.clamp(Vec2::splat(-50.0), Vec2::splat(150.0));
        Self {
            stream_count: self.stream_count.clamp(1, 15),
            start: pct(self.start),
            end: pct(self.end),
            layout_mode: self.layout_mode,
            effect_mode: self.effect_mode,
            audio_reactive: self.audio_reactive,
            stars: StarSettings {
                enabled: self.stars.enabled,
                density: self.stars.density.clamp(10.0, 100.0),
                luminosity: self.stars.luminosity.clamp(10.0, 100.0),
                flicker_speed: self.stars.flicker_speed.clamp(0.0, 100.0),
            },
            sun_enabled: self.sun_enabled,
            silk_luminosity: self.silk_luminosity.clamp(10.0, 300.0),
            silk_speed: self.silk_speed.clamp(0.0, 250.0),
            variable_speed: self.variable_speed,
        }
    }

    /// The subset of settings whose change requires a full re-layout.
    pub(crate) fn geometry(&self) -> LayoutGeometry {
        LayoutGeometry {
            stream_count: self.stream_count,
            start: self.start,
            end: self.end,
            layout_mode: self.layout_mode,
        }
    }
}

/// Settings that determine node origins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutGeometry {
    pub stream_count: u32,
    pub start: Vec2,
    pub end: Vec2,
    pub layout_mode: LayoutMode,
}
