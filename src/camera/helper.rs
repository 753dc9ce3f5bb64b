//! Frustum wireframe for inspecting a camera from another one.

use super::{Camera, CameraId};
use crate::core::Id;
use glam::{Vec3, Vec4};

/// Identifier of a helper instance.
pub type CameraHelperId = Id<CameraHelper>;

/// Edges of the frustum box as pairs of corner indices.
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0), // near
    (4, 5), (5, 7), (7, 6), (6, 4), // far
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Snapshot of a camera's frustum in world space.
///
/// A helper reflects the projection at construction time and is never
/// updated in place; after a camera changes, build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraHelper {
    id: CameraHelperId,
    camera: CameraId,
    corners: [Vec3; 8],
}

impl CameraHelper {
    /// Build a helper for the camera's current view and projection.
    pub fn new(camera: &Camera) -> Self {
        let inverse = camera.view_projection_matrix().inverse();
        let mut corners = [Vec3::ZERO; 8];
        // near plane (z = 0) first, then far plane (z = 1)
        for (i, corner) in corners.iter_mut().enumerate() {
            let x = if i & 1 == 0 { -1.0 } else { 1.0 };
            let y = if i & 2 == 0 { -1.0 } else { 1.0 };
            let z = if i & 4 == 0 { 0.0 } else { 1.0 };
            let world = inverse * Vec4::new(x, y, z, 1.0);
            *corner = world.truncate() / world.w;
        }

        Self {
            id: Id::next(),
            camera: camera.id(),
            corners,
        }
    }

    /// Unique id of this helper instance.
    #[inline]
    pub fn id(&self) -> CameraHelperId {
        self.id
    }

    /// The camera this helper was built from.
    #[inline]
    pub fn camera(&self) -> CameraId {
        self.camera
    }

    /// Frustum corners: bit 0 selects right, bit 1 top, bit 2 far.
    #[inline]
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Line segments of the wireframe.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        EDGES.iter().map(|&(a, b)| (self.corners[a], self.corners[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{OrthographicCamera, PerspectiveCamera};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_orthographic_corners_match_bounds() {
        let mut camera = OrthographicCamera::new(-4.0, 4.0, 4.0, -4.0, 1.0, 10.0);
        camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        camera.look_at(Vec3::ZERO);
        let helper = CameraHelper::new(&camera.into());

        assert!(approx(helper.corners()[0], Vec3::new(-4.0, -4.0, 4.0)));
        assert!(approx(helper.corners()[3], Vec3::new(4.0, 4.0, 4.0)));
        assert!(approx(helper.corners()[7], Vec3::new(4.0, 4.0, -5.0)));
    }

    #[test]
    fn test_perspective_far_plane_is_wider() {
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 10.0);
        let helper = CameraHelper::new(&camera.into());
        let near_width = (helper.corners()[1] - helper.corners()[0]).length();
        let far_width = (helper.corners()[5] - helper.corners()[4]).length();
        assert!(far_width > near_width * 10.0);
        assert_eq!(helper.segments().count(), 12);
    }

    #[test]
    fn test_each_helper_is_distinct() {
        let camera: Camera = PerspectiveCamera::default().into();
        let a = CameraHelper::new(&camera);
        let b = CameraHelper::new(&camera);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.corners(), b.corners());
    }
}
