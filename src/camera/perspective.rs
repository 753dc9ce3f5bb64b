//! Perspective camera.

use super::{Camera, CameraId};
use crate::core::Id;
use glam::{Mat4, Vec3};

/// Narrowest and widest field of view the projection accepts, in degrees.
const FOV_LIMITS: (f32, f32) = (0.001, 179.999);

/// A perspective projection camera.
///
/// Parameter changes take effect on the next
/// [`update_projection_matrix`](Self::update_projection_matrix).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Unique ID.
    id: CameraId,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vec3,
    /// Look-at target.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Projection matrix as of the last update.
    projection_matrix: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            id: Id::next(),
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
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

    /// Set the field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Set near and far planes.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Recompute the projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        let fov = self.fov.clamp(FOV_LIMITS.0, FOV_LIMITS.1).to_radians();
        self.projection_matrix = Mat4::perspective_rh(fov, self.aspect, self.near, self.far);
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

    /// Forward direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Right direction.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }
}

impl From<PerspectiveCamera> for Camera {
    fn from(camera: PerspectiveCamera) -> Self {
        Camera::Perspective(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_follows_update() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let before = camera.projection_matrix();
        camera.set_aspect(2.0);
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
        assert_eq!(
            camera.projection_matrix(),
            Mat4::perspective_rh(75f32.to_radians(), 2.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn test_set_position_keeps_direction() {
        let mut camera = PerspectiveCamera::default();
        let forward = camera.forward();
        camera.set_position(Vec3::new(0.0, 0.0, 3.0));
        assert!((camera.forward() - forward).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_fov_stays_finite() {
        let mut camera = PerspectiveCamera::default();
        camera.set_fov(0.0);
        camera.update_projection_matrix();
        assert!(camera.projection_matrix().is_finite());
    }
}
