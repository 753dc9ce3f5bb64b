//! Backend errors.

use thiserror::Error;

/// Errors that can occur while creating or configuring a surface.
#[derive(Error, Debug)]
pub enum ContextError {
    /// Failed to request adapter.
    #[error("Failed to request adapter: no suitable GPU found")]
    AdapterRequest,

    /// Failed to request device.
    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// Surface is not supported by adapter.
    #[error("Surface not supported by adapter")]
    SurfaceNotSupported,

    /// The backend refused to set up a surface.
    #[error("Rendering unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while drawing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The surface could not provide a frame.
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// `draw` was called before `configure`.
    #[error("Backend drawn before configure")]
    NotConfigured,
}
