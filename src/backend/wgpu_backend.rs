//! wgpu surface backend.
//!
//! This backend owns the device, the surface and its attachments, and clears
//! each frame to the scene background. It does not build mesh pipelines:
//! the camera uniform is uploaded every frame for pipelines the host binds
//! through [`WgpuBackend::camera_buffer`]. Equirect and cube backgrounds are
//! not drawn here; the surface is cleared to the fallback colour instead.

use super::{ContextError, RenderBackend, RenderError, SurfaceDescriptor};
use crate::camera::Camera;
use crate::core::Color;
use crate::scene::{Background, Scene};
use bytemuck::{Pod, Zeroable};

/// Samples per pixel when antialiasing.
const MSAA_SAMPLES: u32 = 4;

/// Camera data as laid out for shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// Projection times view.
    pub view_projection: [[f32; 4]; 4],
    /// World-space eye position, `w = 1`.
    pub position: [f32; 4],
    /// Tone-mapping exposure, operator flag (0 none, 1 ACES), unused, unused.
    pub exposure: [f32; 4],
}

impl CameraUniform {
    /// Uniform for a camera under the given surface settings.
    pub fn new(camera: &Camera, surface: &SurfaceDescriptor) -> Self {
        let tone = match surface.tone_mapping {
            crate::core::ToneMapping::None => 0.0,
            crate::core::ToneMapping::AcesFilmic => 1.0,
        };
        Self {
            view_projection: camera.view_projection_matrix().to_cols_array_2d(),
            position: camera.position().extend(1.0).to_array(),
            exposure: [surface.exposure, tone, 0.0, 0.0],
        }
    }
}

/// Clears a window or canvas through wgpu.
///
/// The device is created up front by [`WgpuBackend::new`]; the surface is
/// configured when the harness calls [`RenderBackend::configure`].
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    descriptor: Option<SurfaceDescriptor>,
    depth_view: Option<wgpu::TextureView>,
    msaa_view: Option<wgpu::TextureView>,
    camera_buffer: wgpu::Buffer,
    frame: u64,
}

impl WgpuBackend {
    /// Create the GPU device for a window or canvas.
    pub async fn new<W>(target: W, power_preference: wgpu::PowerPreference) -> Result<Self, ContextError>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterRequest)?;

        let surface_format = surface
            .get_capabilities(&adapter)
            .formats
            .iter()
            .copied()
            .reduce(|best, f| if !best.is_srgb() && f.is_srgb() { f } else { best })
            .ok_or(ContextError::SurfaceNotSupported)?;

        let required_limits =
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Harness Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniform"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "wgpu adapter: {} ({:?}), surface format {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_format
        );

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            surface_format,
            surface_config: None,
            descriptor: None,
            depth_view: None,
            msaa_view: None,
            camera_buffer,
            frame: 0,
        })
    }

    /// Get the device.
    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Get the queue.
    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Camera uniform buffer, rewritten every frame. Nothing in this
    /// backend binds it.
    #[inline]
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    /// Frames drawn so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn sample_count(&self) -> u32 {
        let antialias = self.descriptor.as_ref().is_some_and(|d| d.antialias);
        let supported = self
            .adapter
            .get_texture_format_features(self.surface_format)
            .flags
            .sample_count_supported(MSAA_SAMPLES);
        if antialias && supported {
            MSAA_SAMPLES
        } else {
            1
        }
    }

    fn create_attachments(&mut self, width: u32, height: u32) {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let sample_count = self.sample_count();

        let depth = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth_view = Some(depth.create_view(&wgpu::TextureViewDescriptor::default()));

        self.msaa_view = (sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("MSAA Color"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.surface_format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });
    }

    fn clear_color(scene: &Scene, surface: &SurfaceDescriptor) -> wgpu::Color {
        let color = match scene.background() {
            Background::Color(color) => *color,
            _ => surface.fallback_clear(),
        };
        let Color { r, g, b, a } = color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn configure(&mut self, descriptor: &SurfaceDescriptor) -> Result<(), ContextError> {
        let caps = self.surface.get_capabilities(&self.adapter);
        let alpha_mode = if descriptor.alpha
            && caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .ok_or(ContextError::SurfaceNotSupported)?
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.surface_format,
            width: descriptor.width.max(1),
            height: descriptor.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        self.surface.configure(&self.device, &config);
        self.descriptor = Some(descriptor.clone());
        self.create_attachments(config.width, config.height);
        self.surface_config = Some(config);

        log::debug!(
            "surface configured {}x{} (antialias: {}, alpha: {})",
            descriptor.width,
            descriptor.height,
            descriptor.antialias,
            descriptor.alpha
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(config) = self.surface_config.as_mut() else {
            return;
        };
        config.width = width;
        config.height = height;
        self.surface.configure(&self.device, config);
        if let Some(descriptor) = self.descriptor.as_mut() {
            descriptor.width = width;
            descriptor.height = height;
        }
        self.create_attachments(width, height);
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        let descriptor = self.descriptor.as_ref().ok_or(RenderError::NotConfigured)?;

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                if let Some(config) = &self.surface_config {
                    self.surface.configure(&self.device, config);
                }
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniform = CameraUniform::new(camera, descriptor);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Harness Frame"),
            });

        let (target, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&view)),
            None => (&view, None),
        };

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(Self::clear_color(scene, descriptor)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrthographicCamera;
    use crate::core::{HarnessConfig, ToneMapping};
    use crate::loaders::{EnvironmentTexture, TextureMapping};
    use glam::{Vec3, Vec4};
    use std::sync::Arc;

    #[test]
    fn test_clear_color_falls_back_for_textured_backgrounds() {
        let mut config = HarnessConfig::default();
        config.clear_color = Color::from_hex(0x202020);
        let surface = SurfaceDescriptor::new(&config, 8, 8);
        let fallback = surface.fallback_clear();

        let mut scene = Scene::new();
        scene.set_background_color(0xff0000);
        assert_eq!(WgpuBackend::clear_color(&scene, &surface).r, 1.0);

        scene.set_background(Background::Equirect(Arc::new(EnvironmentTexture {
            width: 1,
            height: 1,
            data: Vec::new(),
            mapping: TextureMapping::EquirectangularReflection,
        })));
        let clear = WgpuBackend::clear_color(&scene, &surface);
        assert_eq!(clear.r, fallback.r as f64);
        assert_eq!(clear.g, fallback.g as f64);
    }

    #[test]
    fn test_camera_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 96);
    }

    #[test]
    fn test_camera_uniform_contents() {
        let mut ortho = OrthographicCamera::new(-4.0, 4.0, 4.0, -4.0, -5.0, 10.0);
        ortho.set_position(Vec3::new(1.0, 1.0, 1.0));
        ortho.look_at(Vec3::new(0.0, 0.5, 0.0));
        let camera: Camera = ortho.into();

        let mut config = HarnessConfig::default();
        config.tone_mapping = ToneMapping::AcesFilmic;
        config.tone_mapping_exposure = 0.1;
        let surface = SurfaceDescriptor::new(&config, 8, 8);

        let uniform = CameraUniform::new(&camera, &surface);
        assert_eq!(uniform.position, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniform.exposure, [0.1, 1.0, 0.0, 0.0]);

        let clip = camera.view_projection_matrix() * Vec4::new(0.0, 0.5, 0.0, 1.0);
        let stored = glam::Mat4::from_cols_array_2d(&uniform.view_projection)
            * Vec4::new(0.0, 0.5, 0.0, 1.0);
        assert!((clip - stored).length() < 1e-6);
    }
}
