//! Frame scheduling: one simulation step and one canvas repaint per tick.
//!
//! [`Driver`] bundles the pieces every runner needs: the [`Simulation`], the
//! [`Canvas`] it draws into, and the [`Time`] that turns wall-clock time into
//! `dt`. The windowed runner calls [`Driver::tick`] on every redraw;
//! [`run_headless`] calls it in a loop and writes PNG captures.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::CaptureError;
use crate::simulation::Simulation;
use crate::time::Time;
use glam::Vec2;
use std::fs;
use std::path::{Path, PathBuf};

/// Simulation + canvas + clock.
pub struct Driver {
    simulation: Simulation,
    canvas: Canvas,
    time: Time,
}

impl Driver {
    /// Drive `simulation` with a wall-clock timer.
    pub fn new(simulation: Simulation) -> Self {
        Self::with_time(simulation, Time::new())
    }

    /// Drive `simulation` with a given timer, e.g. [`Time::fixed`].
    pub fn with_time(simulation: Simulation, time: Time) -> Self {
        let size = simulation.surface();
        Self {
            canvas: Canvas::new(size.x as u32, size.y as u32),
            simulation,
            time,
        }
    }

    /// Resize both the simulation and the canvas.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.simulation.resize(width, height);
        self.canvas.resize(width, height);
    }

    /// Advance one tick and paint the resulting frame.
    pub fn tick(&mut self, pointer: Option<Vec2>, config: &Config) -> &Canvas {
        self.time.update();
        let frame = self.simulation.advance(self.time.frame_ticks(), pointer, config);
        self.canvas.draw(&frame);
        &self.canvas
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}

/// Where and how often headless frames are written.
#[derive(Debug, Clone)]
pub struct Capture {
    pub dir: PathBuf,
    /// Save every n-th frame (the last frame is always saved).
    pub every: u64,
}

impl Capture {
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> Self {
        Self {
            dir: dir.into(),
            every: every.max(1),
        }
    }

    /// File name for frame number `frame`.
    pub fn frame_path(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("frame_{frame:05}.png"))
    }

    fn wants(&self, frame: u64, last: u64) -> bool {
        frame % self.every == 0 || frame == last
    }
}

/// Run `frames` ticks without a window, optionally saving PNG captures.
///
/// The pointer is absent throughout. Returns the paths written.
pub fn run_headless(
    driver: &mut Driver,
    config: &Config,
    frames: u64,
    capture: Option<&Capture>,
) -> Result<Vec<PathBuf>, CaptureError> {
    if let Some(capture) = capture {
        ensure_dir(&capture.dir)?;
    }

    let mut written = Vec::new();
    for frame in 1..=frames {
        let canvas = driver.tick(None, config);
        if let Some(capture) = capture.filter(|c| c.wants(frame, frames)) {
            let path = capture.frame_path(frame);
            canvas.save_png(&path)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }
    }

    log::info!("headless run finished: {} frame(s), {} capture(s)", frames, written.len());
    Ok(written)
}

fn ensure_dir(dir: &Path) -> Result<(), CaptureError> {
    fs::create_dir_all(dir)?;
    Ok(())
}
