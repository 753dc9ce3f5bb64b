//! A wireframe cube sized to its container.

use super::{launch, wireframe_cube, Container};
use crate::backend::RenderBackend;
use crate::camera::{CameraId, PerspectiveCamera};
use crate::controls::OrbitControls;
use crate::core::{HarnessBuilder, ScheduleMode};
use crate::harness::{Harness, HarnessError};
use crate::scene::{NodeId, Scene};
use glam::Vec3;

/// A harness showing one cube, plus the ids needed to poke at it.
pub struct CubeDemo<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Orbiting camera.
    pub camera: CameraId,
    /// The cube.
    pub cube: NodeId,
}

fn build<B: RenderBackend>(
    backend: B,
    container: Container,
    schedule: ScheduleMode,
) -> Result<CubeDemo<B>, HarnessError> {
    let config = HarnessBuilder::new()
        .alpha(true)
        .antialias(true)
        .schedule(schedule)
        .build();
    let mut harness = launch(backend, config, container)?;

    let mut scene = Scene::new();
    let cube = scene.add(wireframe_cube("cube"));

    let mut camera = PerspectiveCamera::new(50.0, 2.0, 0.1, 1000.0);
    camera.set_position(Vec3::new(0.0, 0.0, 3.0));
    camera.look_at(Vec3::ZERO);

    let stage = harness.stage_mut();
    stage.scenes.add("cube", scene);
    let camera = stage.cameras.add("camera", camera);
    stage.sync_cameras();

    harness.attach_controls(OrbitControls::new(), camera)?;
    Ok(CubeDemo {
        harness,
        camera,
        cube,
    })
}

/// Cube redrawn on every display refresh.
pub fn responsive_cube<B: RenderBackend>(
    backend: B,
    container: Container,
) -> Result<CubeDemo<B>, HarnessError> {
    build(backend, container, ScheduleMode::Continuous)
}

/// Cube redrawn only when the controls move the camera or the container
/// changes size.
pub fn on_demand_cube<B: RenderBackend>(
    backend: B,
    container: Container,
) -> Result<CubeDemo<B>, HarnessError> {
    build(backend, container, ScheduleMode::OnDemand)
}
