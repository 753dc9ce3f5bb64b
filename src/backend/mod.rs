//! Rendering backends.
//!
//! The harness never touches the GPU directly; it hands the active scene
//! and camera to a [`RenderBackend`].

mod error;
mod headless;
mod wgpu_backend;

pub use error::{ContextError, RenderError};
pub use headless::{DrawRecord, HeadlessBackend};
pub use wgpu_backend::{CameraUniform, WgpuBackend};

use crate::camera::Camera;
use crate::core::{Color, HarnessConfig, ToneMapping};
use crate::scene::Scene;

/// Everything a backend needs to set up its drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDescriptor {
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Multisample edges.
    pub antialias: bool,
    /// Let the page show through where nothing is drawn.
    pub alpha: bool,
    /// Colour used when the scene has no background.
    pub clear_color: Color,
    /// Tone mapping operator.
    pub tone_mapping: ToneMapping,
    /// Exposure fed to the tone mapper.
    pub exposure: f32,
    /// Render shadow maps.
    pub shadows: bool,
}

impl SurfaceDescriptor {
    /// Descriptor for a surface of the given physical size.
    pub fn new(config: &HarnessConfig, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            antialias: config.antialias,
            alpha: config.alpha,
            clear_color: config.clear_color,
            tone_mapping: config.tone_mapping,
            exposure: config.tone_mapping_exposure,
            shadows: config.shadows,
        }
    }

    /// Colour to clear to when the scene supplies none.
    pub fn fallback_clear(&self) -> Color {
        if self.alpha {
            Color::TRANSPARENT
        } else {
            self.clear_color
        }
    }
}

/// Draws scenes onto a surface.
pub trait RenderBackend {
    /// Create or recreate the surface. Called once by the harness.
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), ContextError>;

    /// Resize the surface in place, in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), ContextError> {
        (**self).configure(surface)
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        (**self).draw(scene, camera)
    }
}
