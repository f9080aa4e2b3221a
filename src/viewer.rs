//! Native viewer: the field's host render loop.
//!
//! Opens a window, ticks the field once per redraw, and draws the projected
//! particles. The mouse wheel stands in for page scrolling and feeds the
//! field's scroll signal.
//!
//! ```ignore
//! Viewer::new(FieldConfig::default())
//!     .with_seed(7)
//!     .run()?;
//! ```

use crate::config::FieldConfig;
use crate::error::{GpuError, ViewerError};
use crate::field::ParticleField;
use crate::gpu::GpuState;
use crate::render::{write_instances, ParticleInstance};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Height of the simulated page unless overridden.
pub const DEFAULT_PAGE_HEIGHT: f32 = 4000.0;

/// Pixels scrolled per wheel line, roughly what browsers use.
const LINE_PIXELS: f32 = 40.0;

const TITLE: &str = "Backdrop";

/// How often frame statistics are logged.
const STATS_INTERVAL: Duration = Duration::from_secs(5);

/// Viewer builder.
pub struct Viewer {
    config: FieldConfig,
    seed: Option<u64>,
    page_height: f32,
}

impl Viewer {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            seed: None,
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }

    /// Seed the field's RNG for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Height in pixels of the simulated page the wheel scrolls through.
    pub fn with_page_height(mut self, pixels: f32) -> Self {
        self.page_height = pixels.max(0.0);
        self
    }

    /// Run until the window is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let field = match self.seed {
            Some(seed) => ParticleField::seeded(self.config, seed)?,
            None => ParticleField::from_entropy(self.config)?,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(field, Scroll::new(self.page_height));
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Simulated page scroll position driven by wheel events.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Scroll {
    position: f32,
    max: f32,
}

impl Scroll {
    fn new(max: f32) -> Self {
        Self { position: 0.0, max }
    }

    /// Apply a wheel event. Wheel down scrolls further down the page.
    fn apply(&mut self, delta: MouseScrollDelta) {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_PIXELS,
            MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        self.position = (self.position + pixels).clamp(0.0, self.max);
    }
}

struct FrameStats {
    since: Instant,
    frames: u32,
    respawned: usize,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            since: Instant::now(),
            frames: 0,
            respawned: 0,
        }
    }

    fn record(&mut self, respawned: usize, tick: u64) {
        self.frames += 1;
        self.respawned += respawned;

        let elapsed = self.since.elapsed();
        if elapsed >= STATS_INTERVAL {
            log::info!(
                "{:.1} fps, tick {}, {} respawns in the last {:.0}s",
                self.frames as f32 / elapsed.as_secs_f32(),
                tick,
                self.respawned,
                elapsed.as_secs_f32()
            );
            *self = Self::new();
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    /// `None` once disposed; nothing ticks after that.
    field: Option<ParticleField>,
    instances: Vec<ParticleInstance>,
    scroll: Scroll,
    stats: FrameStats,
    error: Option<ViewerError>,
}

impl App {
    fn new(field: ParticleField, scroll: Scroll) -> Self {
        let instances = Vec::with_capacity(field.len());
        Self {
            window: None,
            gpu_state: None,
            field: Some(field),
            instances,
            scroll,
            stats: FrameStats::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let count = self.field.as_ref().map_or(0, |f| f.len());
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), count))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    /// Drop the field and GPU resources. Idempotent.
    fn dispose(&mut self) {
        if self.field.take().is_some() {
            log::info!("viewer closed, field disposed");
        }
        self.gpu_state = None;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error = Some(error);
        self.dispose();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(field), Some(gpu_state)) = (self.field.as_mut(), self.gpu_state.as_mut()) else {
            return;
        };

        let report = field.tick(self.scroll.position);
        write_instances(field, &mut self.instances);
        self.stats.record(report.respawned, report.tick);

        match gpu_state.render(&self.instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, ViewerError::Gpu(GpuError::OutOfMemory));
                return;
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && self.field.is_some() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll.apply(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispose();
    }
}
