//! Error types for Backdrop.
//!
//! The simulation itself never fails: numeric guards clamp instead of
//! reporting. Errors only come from the surfaces around it: loading and
//! validating configuration, and bringing up the GPU viewer.

use std::fmt;

/// Errors produced while loading, saving, or validating a [`FieldConfig`].
///
/// [`FieldConfig`]: crate::FieldConfig
#[derive(Debug)]
pub enum ConfigError {
    /// A bounding box dimension is not a positive finite number.
    InvalidBounds { axis: char, size: f32 },
    /// A `[min, max]` range is empty, inverted, or non-finite.
    InvalidRange { name: &'static str, min: f32, max: f32 },
    /// The lifecycle scale range does not sit above the reset threshold.
    ScaleBelowThreshold { scale_min: f32, min_scale: f32 },
    /// A physics constant is out of its allowed domain.
    InvalidPhysics { name: &'static str, value: f32 },
    /// The palette is empty or its weights cannot be sampled.
    InvalidPalette(String),
    /// A hand-built particle has a field no lifecycle can work with.
    InvalidParticle { slot: usize, field: &'static str, value: f32 },
    /// Failed to read or write the config file.
    Io(std::io::Error),
    /// Failed to parse or serialize JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBounds { axis, size } => {
                write!(f, "Bounds along {} must be positive and finite, got {}", axis, size)
            }
            ConfigError::InvalidRange { name, min, max } => {
                write!(f, "Range '{}' must satisfy 0 <= min <= max, got [{}, {}]", name, min, max)
            }
            ConfigError::ScaleBelowThreshold { scale_min, min_scale } => write!(
                f,
                "Scale range starts at {} but particles reset at {}; spawned particles would respawn immediately",
                scale_min, min_scale
            ),
            ConfigError::InvalidPhysics { name, value } => {
                write!(f, "Physics constant '{}' is out of range: {}", name, value)
            }
            ConfigError::InvalidPalette(msg) => write!(f, "Invalid palette: {}", msg),
            ConfigError::InvalidParticle { slot, field, value } => {
                write!(f, "Particle {} has invalid {}: {}", slot, field, value)
            }
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface ran out of memory while presenting.
    OutOfMemory,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::OutOfMemory => write!(f, "GPU ran out of memory while rendering"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::OutOfMemory => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The field configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to run event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ViewerError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
            ViewerError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(e: ConfigError) -> Self {
        ViewerError::Config(e)
    }
}
