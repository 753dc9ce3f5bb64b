//! # Demos
//!
//! Ready-made harness configurations: a responsive cube (continuous and
//! on-demand), a two-scene switch, perspective and orthographic camera
//! inspection, a lit model with a lens flare, an SUV assembled from a batch
//! of models and a keyboard-driven animated character.
//!
//! Every builder is generic over the render backend, so the same scene runs
//! on a canvas through wgpu or headless in tests.

mod camera_debug;
mod character;
mod cube;
mod scene_switch;
mod showcase;

pub use camera_debug::{OrthographicDebug, PerspectiveDebug};
pub use character::{CharacterDemo, CHARACTER_MODEL};
pub use cube::{on_demand_cube, responsive_cube, CubeDemo};
pub use scene_switch::{SceneSwitch, SKYBOX_FACES, SKYBOX_PATH, SPIN_RATE};
pub use showcase::{SuvDemo, SuzanneLensflare, HDR_ENVIRONMENT};

use crate::backend::RenderBackend;
use crate::core::HarnessConfig;
use crate::harness::{Harness, HarnessError};
use crate::scene::{Geometry, Material, Node};

/// The element a demo draws into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    /// Density reported by the display.
    pub device_pixel_ratio: f64,
}

impl Container {
    /// Container of the given CSS size on a standard-density display.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Same container on a display of another density.
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

fn launch<B: RenderBackend>(
    backend: B,
    config: HarnessConfig,
    container: Container,
) -> Result<Harness<B>, HarnessError> {
    Harness::new(
        backend,
        config,
        (container.width, container.height),
        container.device_pixel_ratio,
    )
}

/// Unit box with normal shading drawn as wireframe.
pub fn wireframe_cube(name: &str) -> Node {
    Node::mesh(
        name,
        Geometry::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        },
        Material::normal().wireframe(),
    )
}
