//! # Silk Flow
//!
//! Generative animation of flowing silk ribbons over a procedural starfield.
//!
//! Each ribbon is a *stream* of 40 spring-driven control points. Every frame
//! the points are pulled toward a drifting rest position, pushed around by
//! the pointer, smoothed into a Catmull-Rom curve and drawn as a faint band
//! with bright "barcode" striations on top.
//!
//! ## Quick Start
//!
//! ```ignore
//! use silkflow::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let config = Config {
//!         stream_count: 7,
//!         layout_mode: LayoutMode::Convergence,
//!         ..Default::default()
//!     };
//!     let driver = Driver::new(Simulation::new(1280, 720));
//!     silkflow::run(driver, config)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Simulation and frames
//!
//! [`Simulation`] owns every stream, star and particle. It does not know
//! about windows or clocks: the host calls [`Simulation::advance`] once per
//! display refresh and gets back a [`Frame`], a display list of layers and
//! shapes. [`Canvas`] plays a frame back in software.
//!
//! ```ignore
//! let mut sim = Simulation::new(800, 600).with_seed(42);
//! let mut canvas = Canvas::new(800, 600);
//! for _ in 0..120 {
//!     let frame = sim.advance(1.0, None, &config);
//!     canvas.draw(&frame);
//! }
//! canvas.save_png("silk.png")?;
//! ```
//!
//! ### Configuration
//!
//! [`Config`] is an immutable snapshot read once per tick. Changing the
//! stream count, the start/end anchors or the [`LayoutMode`] rebuilds every
//! stream; other settings apply on the next tick without a rebuild.
//!
//! | Layout | Shape |
//! |--------|-------|
//! | `Default` | Parallel ribbons between the configured anchors |
//! | `Tree` | Ribbons fanning upward from a shared root |
//! | `Convergence` | Ribbons converging on the centre from a circle |
//! | `Dna` | Two strands twisting around each other |
//! | `River` | Tight, slow, horizontal flow |
//!
//! | Effect | Behaviour |
//! |--------|-----------|
//! | `Default` | Pointer repels ribbons |
//! | `Vortex` | Pointer swirls ribbons around itself |
//! | `Surges` | Ribbons flare up at random intervals |
//! | `Gravity` | Two fixed wells bend every ribbon |
//! | `Particles` | Ribbon ends shed sparks |
//!
//! ### Runners
//!
//! - [`run`] opens a window (winit + wgpu) and presents the canvas.
//! - [`scheduler::run_headless`] renders without a window and writes PNGs.

pub mod audio;
pub mod canvas;
pub mod config;
mod controls;
pub mod curve;
pub mod error;
pub mod forces;
mod gpu;
pub mod input;
pub mod layout;
pub mod math;
pub mod node;
pub mod particles;
pub mod render;
pub mod scheduler;
mod shader;
mod simulation;
pub mod stars;
pub mod stream;
pub mod time;
mod window;

pub use audio::{AudioSignal, Silence, SyntheticBeat};
pub use canvas::Canvas;
pub use config::{Config, EffectMode, LayoutMode, StarSettings};
pub use controls::apply_shortcuts;
pub use error::{CaptureError, ConfigError, GpuError, SimulationError};
pub use glam::{Vec2, Vec3};
pub use render::{BlendMode, Frame, GradientStop, Layer, LayerKind, Shape};
pub use scheduler::{Capture, Driver};
pub use simulation::Simulation;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use silkflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audio::{AudioSignal, SyntheticBeat};
    pub use crate::canvas::Canvas;
    pub use crate::config::{Config, EffectMode, LayoutMode, StarSettings};
    pub use crate::error::SimulationError;
    pub use crate::render::{BlendMode, Frame, Layer, LayerKind, Shape};
    pub use crate::scheduler::{run_headless, Capture, Driver};
    pub use crate::simulation::Simulation;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
