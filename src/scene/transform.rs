//! Local transform of a scene node.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (XYZ order, radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vec3,
    /// Rotation about X, then Y, then Z, in radians.
    pub rotation: Vec3,
    /// Scale factors.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Transform with only a translation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Build from translation, quaternion and scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position: translation,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }

    /// Rotation as a quaternion.
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Rotate about the local Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotated = self.quaternion() * Quat::from_rotation_y(angle);
        let (x, y, z) = rotated.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Local forward direction (-Z rotated by this transform).
    pub fn forward(&self) -> Vec3 {
        self.quaternion() * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rotate_y_half_turn_flips_forward() {
        let mut transform = Transform::IDENTITY;
        transform.rotate_y(PI);
        assert!((transform.forward() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_matrix_applies_translation() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let p = transform.matrix().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_trs_keeps_rotation() {
        let q = Quat::from_rotation_x(0.5);
        let transform = Transform::from_trs(Vec3::ZERO, q, Vec3::ONE);
        assert!(transform.quaternion().angle_between(q) < 1e-5);
    }
}
