//! Orthographic camera.

use super::{Camera, CameraId};
use crate::core::Id;
use glam::{Mat4, Vec3};

/// An orthographic projection camera.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Unique ID.
    id: CameraId,
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Top plane.
    pub top: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Near clipping plane. May be negative.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Zoom level.
    pub zoom: f32,
    /// Camera position.
    pub position: Vec3,
    /// Look-at target.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Projection matrix as of the last update.
    projection_matrix: Mat4,
}

impl OrthographicCamera {
    /// Create a new orthographic camera.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            id: Id::next(),
            left,
            right,
            top,
            bottom,
            near,
            far,
            zoom: 1.0,
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Create a frustum of the given size centred on the view axis.
    pub fn from_size(width: f32, height: f32, near: f32, far: f32) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self::new(-half_width, half_width, half_height, -half_height, near, far)
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> CameraId {
        self.id
    }

    /// Set the camera position, keeping the look direction.
    pub fn set_position(&mut self, position: Vec3) {
        let direction = self.target - self.position;
        self.position = position;
        self.target = position + direction;
    }

    /// Look at a point from the current position.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set zoom level.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.001);
    }

    /// Set the frustum planes.
    pub fn set_frustum(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
    }

    /// Match the horizontal extent to an aspect ratio.
    ///
    /// The vertical extent and the horizontal centre are kept, so applying
    /// the same aspect twice leaves the bounds unchanged.
    pub fn apply_aspect(&mut self, aspect: f32) {
        let half_width = (self.top - self.bottom) * aspect / 2.0;
        let center = (self.left + self.right) / 2.0;
        self.left = center - half_width;
        self.right = center + half_width;
    }

    /// Recompute the projection from the current bounds and zoom.
    pub fn update_projection_matrix(&mut self) {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;

        self.projection_matrix =
            Mat4::orthographic_rh(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far);
    }

    /// Projection matrix as of the last update.
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// View matrix for the current position and target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

impl From<OrthographicCamera> for Camera {
    fn from(camera: OrthographicCamera) -> Self {
        Camera::Orthographic(camera)
    }
}
