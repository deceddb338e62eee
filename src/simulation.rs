//! Window runner for the star field.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::StarfieldConfig;
use crate::error::SimulationError;
use crate::field::{FieldEvent, Starfield};
use crate::gpu::GpuState;
use crate::input::PointerKind;
use crate::scheduler::FrameScheduler;
use crate::viewport::Viewport;

/// How many frames pass between window title refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// A windowed star field builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// use starstream::prelude::*;
///
/// Simulation::new()
///     .with_title("Stars")
///     .with_config(StarfieldConfig::default().with_star_size(4.0))
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: StarfieldConfig,
    title: String,
    window_size: (f64, f64),
    clear_color: [f64; 4],
    seed: Option<u64>,
}

impl Simulation {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self {
            config: StarfieldConfig::default(),
            title: "starstream".to_string(),
            window_size: (1280.0, 720.0),
            clear_color: [0.02, 0.02, 0.05, 1.0],
            seed: None,
        }
    }

    /// Set the star field tuning.
    pub fn with_config(mut self, config: StarfieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title. The measured FPS is appended while running.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Set the background color the surface is cleared to (linear RGBA).
    pub fn with_clear_color(mut self, color: [f64; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Seed the star field RNG for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the star field. This blocks until the window is closed or
    /// Escape is pressed.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Simulation,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    field: Option<Starfield>,
    scheduler: FrameScheduler,
    /// Id of the touch point being followed; other fingers are ignored.
    primary_touch: Option<u64>,
    error: Option<SimulationError>,
}

impl App {
    fn new(settings: Simulation) -> Self {
        Self {
            settings,
            window: None,
            gpu_state: None,
            field: None,
            scheduler: FrameScheduler::new(),
            primary_touch: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let (width, height) = self.settings.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), self.settings.clear_color))?;

        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        let field = match self.settings.seed {
            Some(seed) => Starfield::seeded(self.settings.config, viewport, seed),
            None => Starfield::new(self.settings.config, viewport),
        };

        self.window = Some(window.clone());
        self.gpu_state = Some(gpu_state);
        self.field = Some(field);

        self.scheduler.start();
        window.request_redraw();
        Ok(())
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn push_event(&mut self, event: FieldEvent) {
        if let Some(field) = &mut self.field {
            field.push_event(event);
        }
    }

    fn push_pointer(&mut self, position: PhysicalPosition<f64>, kind: PointerKind) {
        let logical = position.to_logical::<f32>(self.scale_factor());
        self.push_event(FieldEvent::PointerMove {
            x: logical.x,
            y: logical.y,
            kind,
        });
    }

    fn handle_touch(&mut self, touch: Touch) {
        match touch.phase {
            TouchPhase::Started => {
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(touch.id);
                }
            }
            TouchPhase::Moved => {
                let primary = *self.primary_touch.get_or_insert(touch.id);
                if primary == touch.id {
                    self.push_pointer(touch.location, PointerKind::Touch);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_touch == Some(touch.id) {
                    self.primary_touch = None;
                    self.push_event(FieldEvent::PointerLeave);
                }
            }
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.scheduler.stop();
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu_state), Some(field)) = (&mut self.gpu_state, &mut self.field) else {
            return;
        };

        if !self.scheduler.tick(field, gpu_state) {
            event_loop.exit();
            return;
        }

        match gpu_state.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(gpu_state.size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, stopping");
                self.shutdown(event_loop);
                return;
            }
            Err(e) => tracing::warn!(error = %e, "frame dropped"),
        }

        if let Some(window) = &self.window {
            if self.scheduler.frames() % TITLE_REFRESH_FRAMES == 0 {
                window.set_title(&format!(
                    "{} - {:.0} fps",
                    self.settings.title,
                    self.scheduler.fps()
                ));
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
        if let Err(e) = self.init(event_loop) {
            tracing::error!(error = %e, "failed to start star field");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::Resized(physical_size) => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    return;
                }
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                let viewport = Viewport::from_physical(
                    physical_size.width,
                    physical_size.height,
                    self.scale_factor(),
                );
                self.push_event(FieldEvent::Resize(viewport));
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    if size.width > 0 && size.height > 0 {
                        let viewport = Viewport::from_physical(size.width, size.height, scale_factor);
                        self.push_event(FieldEvent::Resize(viewport));
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.push_pointer(position, PointerKind::Mouse);
            }
            WindowEvent::CursorLeft { .. } => {
                self.push_event(FieldEvent::PointerLeave);
            }
            WindowEvent::Touch(touch) => self.handle_touch(touch),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}
