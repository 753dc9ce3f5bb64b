//! Per-frame update hooks.

use super::Stage;
use crate::camera::CameraId;
use crate::scene::NodeId;
use glam::Vec3;

/// Something advanced once per tick by the elapsed time.
pub trait System {
    /// Advance by `delta` seconds.
    fn update(&mut self, stage: &mut Stage, delta: f32);
}

impl<F> System for F
where
    F: FnMut(&mut Stage, f32),
{
    fn update(&mut self, stage: &mut Stage, delta: f32) {
        self(stage, delta)
    }
}

/// Constant angular velocity on a node of the active scene.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    node: NodeId,
    /// Radians per second about each axis.
    pub rate: Vec3,
}

impl Spin {
    /// Spin `node` at `rate` radians per second.
    pub fn new(node: NodeId, rate: Vec3) -> Self {
        Self { node, rate }
    }
}

impl System for Spin {
    fn update(&mut self, stage: &mut Stage, delta: f32) {
        if let Some(node) = stage
            .scenes
            .active_mut()
            .and_then(|scene| scene.find_mut(self.node))
        {
            node.transform.rotation += self.rate * delta;
        }
    }
}

/// Keeps a camera pointed at a fixed point every tick.
///
/// If the camera has a frustum helper and had drifted off target, the
/// helper is rebuilt too.
#[derive(Debug, Clone, Copy)]
pub struct LookAt {
    camera: CameraId,
    target: Vec3,
}

impl LookAt {
    /// Point `camera` at `target` every tick.
    pub fn new(camera: CameraId, target: Vec3) -> Self {
        Self { camera, target }
    }
}

impl System for LookAt {
    fn update(&mut self, stage: &mut Stage, _delta: f32) {
        let Some(camera) = stage.cameras.get_mut(self.camera) else {
            return;
        };
        if camera.target() == self.target {
            return;
        }
        camera.look_at(self.target);
        if stage.camera_helper_node(self.camera).is_some() {
            if let Err(err) = stage.refresh_camera_helper(self.camera) {
                log::warn!("Camera helper refresh failed: {}", err);
            }
        }
    }
}
