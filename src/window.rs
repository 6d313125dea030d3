//! Windowed runner.
//!
//! Opens a window, paints one [`Driver`] tick per redraw and presents the
//! canvas through wgpu. Closing the window or pressing Escape stops the loop.
//! If the GPU surface cannot be acquired the loop never starts: the error is
//! logged, the event loop exits and [`run`] returns it.

use crate::config::Config;
use crate::controls::apply_shortcuts;
use crate::error::SimulationError;
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode};
use crate::scheduler::Driver;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

const TITLE: &str = "Silk Flow";

/// Frames between window title refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Run the animation in a window. Blocks until the window is closed.
pub fn run(driver: Driver, config: Config) -> Result<(), SimulationError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(driver, config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    driver: Driver,
    config: Config,
    input: Input,
    error: Option<SimulationError>,
}

impl App {
    fn new(driver: Driver, config: Config) -> Self {
        Self {
            window: None,
            gpu_state: None,
            driver,
            config,
            input: Input::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SimulationError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }
        if let Some(next) = apply_shortcuts(&self.input, &self.config) {
            self.config = next;
        }

        let canvas = self.driver.tick(self.input.pointer(), &self.config);
        self.input.begin_frame();

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.present(canvas) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, stopping");
                    event_loop.exit();
                }
                Err(e) => log::warn!("surface error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            let time = self.driver.time();
            if time.frame() % TITLE_REFRESH_FRAMES == 0 {
                window.set_title(&format!("{TITLE} ({:.0} fps)", time.fps()));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let surface = self.driver.simulation().surface();
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(surface.x as u32, surface.y as u32));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        let size = window.inner_size();
        self.driver.resize(size.width, size.height);
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.driver.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
