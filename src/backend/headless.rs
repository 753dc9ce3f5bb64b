//! A backend that records what it was asked to draw.

use super::{ContextError, RenderBackend, RenderError, SurfaceDescriptor};
use crate::camera::{Camera, CameraId};
use crate::core::Color;
use crate::scene::{Background, Scene, SceneId};

/// One recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Scene drawn.
    pub scene: SceneId,
    /// Camera used.
    pub camera: CameraId,
    /// Names of visible nodes below the root, depth first.
    pub visible: Vec<String>,
    /// Clear colour the frame would use.
    pub clear: Color,
    /// Surface size at draw time.
    pub size: (u32, u32),
}

/// Backend without a GPU. Useful for tests and servers.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    surface: Option<SurfaceDescriptor>,
    draws: Vec<DrawRecord>,
    resizes: Vec<(u32, u32)>,
    refuse: Option<String>,
}

impl HeadlessBackend {
    /// New unconfigured backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `configure` always fails with `reason`.
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            refuse: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Surface as last configured or resized.
    #[inline]
    pub fn surface(&self) -> Option<&SurfaceDescriptor> {
        self.surface.as_ref()
    }

    /// Current physical size.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| (s.width, s.height))
    }

    /// All recorded frames.
    #[inline]
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Most recent frame.
    pub fn last_draw(&self) -> Option<&DrawRecord> {
        self.draws.last()
    }

    /// Every resize received, in order.
    #[inline]
    pub fn resizes(&self) -> &[(u32, u32)] {
        &self.resizes
    }

    /// Drop recorded frames.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl RenderBackend for HeadlessBackend {
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), ContextError> {
        if let Some(reason) = &self.refuse {
            return Err(ContextError::Unavailable(reason.clone()));
        }
        self.surface = Some(surface.clone());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.width = width;
            surface.height = height;
        }
        self.resizes.push((width, height));
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        let surface = self.surface.as_ref().ok_or(RenderError::NotConfigured)?;

        let root = scene.root().id();
        let mut visible = Vec::new();
        scene.traverse_visible(|node| {
            if node.id() != root {
                visible.push(node.name.clone());
            }
        });

        let clear = match scene.background() {
            Background::Color(color) => *color,
            _ => surface.fallback_clear(),
        };

        self.draws.push(DrawRecord {
            scene: scene.id(),
            camera: camera.id(),
            visible,
            clear,
            size: (surface.width, surface.height),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::core::HarnessConfig;
    use crate::scene::Node;

    #[test]
    fn test_draw_requires_configure() {
        let mut backend = HeadlessBackend::new();
        let camera: Camera = PerspectiveCamera::default().into();
        assert!(matches!(
            backend.draw(&Scene::new(), &camera),
            Err(RenderError::NotConfigured)
        ));
    }

    #[test]
    fn test_records_visible_nodes() {
        let mut backend = HeadlessBackend::new();
        backend
            .configure(&SurfaceDescriptor::new(&HarnessConfig::default(), 64, 32))
            .unwrap();

        let mut scene = Scene::new();
        scene.add(Node::group("shown"));
        let mut hidden = Node::group("hidden");
        hidden.visible = false;
        scene.add(hidden);
        scene.set_background_color(0x2a2d43);

        let camera: Camera = PerspectiveCamera::default().into();
        backend.draw(&scene, &camera).unwrap();

        let draw = backend.last_draw().unwrap();
        assert_eq!(draw.visible, vec!["shown".to_string()]);
        assert_eq!(draw.clear.to_hex(), 0x2a2d43);
        assert_eq!(draw.size, (64, 32));
    }

    #[test]
    fn test_refusing_backend() {
        let mut backend = HeadlessBackend::refusing("no gpu");
        let err = backend
            .configure(&SurfaceDescriptor::new(&HarnessConfig::default(), 1, 1))
            .unwrap_err();
        assert!(matches!(err, ContextError::Unavailable(reason) if reason == "no gpu"));
    }
}
