//! Cameras, the active-camera rig and frustum helpers.

mod helper;
mod orthographic;
mod perspective;
mod rig;

pub use helper::{CameraHelper, CameraHelperId};
pub use orthographic::OrthographicCamera;
pub use perspective::PerspectiveCamera;
pub use rig::CameraRig;

use crate::core::Id;
use glam::{Mat4, Vec3};

/// Identifier of a camera.
pub type CameraId = Id<Camera>;

/// Projection family of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    /// Perspective projection.
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// Either camera type.
#[derive(Debug, Clone)]
pub enum Camera {
    /// Perspective projection camera.
    Perspective(PerspectiveCamera),
    /// Orthographic projection camera.
    Orthographic(OrthographicCamera),
}

impl Camera {
    /// Get the unique ID.
    pub fn id(&self) -> CameraId {
        match self {
            Camera::Perspective(c) => c.id(),
            Camera::Orthographic(c) => c.id(),
        }
    }

    /// Projection family.
    pub fn kind(&self) -> CameraKind {
        match self {
            Camera::Perspective(_) => CameraKind::Perspective,
            Camera::Orthographic(_) => CameraKind::Orthographic,
        }
    }

    /// Camera position.
    pub fn position(&self) -> Vec3 {
        match self {
            Camera::Perspective(c) => c.position,
            Camera::Orthographic(c) => c.position,
        }
    }

    /// Look-at target.
    pub fn target(&self) -> Vec3 {
        match self {
            Camera::Perspective(c) => c.target,
            Camera::Orthographic(c) => c.target,
        }
    }

    /// Move the camera, keeping the look direction.
    pub fn set_position(&mut self, position: Vec3) {
        match self {
            Camera::Perspective(c) => c.set_position(position),
            Camera::Orthographic(c) => c.set_position(position),
        }
    }

    /// Point the camera at a target.
    pub fn look_at(&mut self, target: Vec3) {
        match self {
            Camera::Perspective(c) => c.look_at(target),
            Camera::Orthographic(c) => c.look_at(target),
        }
    }

    /// Apply a new surface aspect ratio and recompute the projection.
    pub fn apply_aspect(&mut self, aspect: f32) {
        match self {
            Camera::Perspective(c) => c.set_aspect(aspect),
            Camera::Orthographic(c) => c.apply_aspect(aspect),
        }
        self.update_projection_matrix();
    }

    /// Recompute the projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        match self {
            Camera::Perspective(c) => c.update_projection_matrix(),
            Camera::Orthographic(c) => c.update_projection_matrix(),
        }
    }

    /// Projection matrix as of the last update.
    pub fn projection_matrix(&self) -> Mat4 {
        match self {
            Camera::Perspective(c) => c.projection_matrix(),
            Camera::Orthographic(c) => c.projection_matrix(),
        }
    }

    /// View matrix.
    pub fn view_matrix(&self) -> Mat4 {
        match self {
            Camera::Perspective(c) => c.view_matrix(),
            Camera::Orthographic(c) => c.view_matrix(),
        }
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Borrow as a perspective camera.
    pub fn as_perspective(&self) -> Option<&PerspectiveCamera> {
        match self {
            Camera::Perspective(c) => Some(c),
            Camera::Orthographic(_) => None,
        }
    }

    /// Borrow as an orthographic camera.
    pub fn as_orthographic(&self) -> Option<&OrthographicCamera> {
        match self {
            Camera::Orthographic(c) => Some(c),
            Camera::Perspective(_) => None,
        }
    }
}

/// Access to one concrete camera type inside [`Camera`].
///
/// Lets code that tunes a specific projection (the debug panel folders) ask
/// the rig for exactly that variant.
pub trait CameraVariant: Sized {
    /// The kind this type represents.
    const KIND: CameraKind;

    /// Borrow mutably if `camera` is this variant.
    fn from_camera_mut(camera: &mut Camera) -> Option<&mut Self>;
}

impl CameraVariant for PerspectiveCamera {
    const KIND: CameraKind = CameraKind::Perspective;

    fn from_camera_mut(camera: &mut Camera) -> Option<&mut Self> {
        match camera {
            Camera::Perspective(c) => Some(c),
            Camera::Orthographic(_) => None,
        }
    }
}

impl CameraVariant for OrthographicCamera {
    const KIND: CameraKind = CameraKind::Orthographic;

    fn from_camera_mut(camera: &mut Camera) -> Option<&mut Self> {
        match camera {
            Camera::Orthographic(c) => Some(c),
            Camera::Perspective(_) => None,
        }
    }
}
