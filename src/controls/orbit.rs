//! Orbit controls for rotating camera around a target.

use super::ChangeListeners;
use crate::camera::Camera;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

/// Pending input below this is treated as settled.
const EPSILON: f32 = 1e-6;

/// Smallest camera movement reported as a change.
const MIN_MOVE: f32 = 1e-5;

/// Orbit controls allowing camera rotation around a target point.
///
/// Input accumulates between frames and is applied by [`update`](Self::update).
/// With damping enabled the accumulated motion decays over several updates
/// instead of being applied at once.
pub struct OrbitControls {
    /// Target point to orbit around.
    pub target: Vec3,
    /// Minimum distance from target.
    pub min_distance: f32,
    /// Maximum distance from target.
    pub max_distance: f32,
    /// Enable rotation.
    pub enable_rotate: bool,
    /// Enable panning.
    pub enable_pan: bool,
    /// Enable zooming.
    pub enable_zoom: bool,
    /// Rotation speed multiplier.
    pub rotate_speed: f32,
    /// Pan speed multiplier.
    pub pan_speed: f32,
    /// Zoom speed multiplier.
    pub zoom_speed: f32,
    /// Enable damping (smooth movement).
    pub enable_damping: bool,
    /// Damping factor (0-1, lower = more damping).
    pub damping_factor: f32,
    /// Spin around the target without input.
    pub auto_rotate: bool,
    /// Auto-rotation speed; 2.0 is one turn per 30 seconds.
    pub auto_rotate_speed: f32,
    spherical_delta: SphericalDelta,
    pan_offset: Vec3,
    scale: f32,
    listeners: ChangeListeners,
}

/// Delta for spherical movement.
#[derive(Debug, Clone, Copy, Default)]
struct SphericalDelta {
    /// Azimuthal angle (left/right).
    theta: f32,
    /// Elevation angle (up/down).
    phi: f32,
}

impl SphericalDelta {
    fn is_settled(&self) -> bool {
        self.theta.abs() < EPSILON && self.phi.abs() < EPSILON
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.1,
            max_distance: 1000.0,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            spherical_delta: SphericalDelta::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            listeners: ChangeListeners::new(),
        }
    }
}

impl OrbitControls {
    /// Create new orbit controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create orbit controls with a target.
    pub fn with_target(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Change notifications, fired whenever `update` moves the camera.
    #[inline]
    pub fn listeners(&self) -> &ChangeListeners {
        &self.listeners
    }

    /// Change notifications, mutably.
    #[inline]
    pub fn listeners_mut(&mut self) -> &mut ChangeListeners {
        &mut self.listeners
    }

    /// Rotate the camera by delta angles (in radians).
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        if self.enable_rotate {
            // Inverted for natural "grab and drag" feel
            self.spherical_delta.theta -= delta_theta * self.rotate_speed;
            self.spherical_delta.phi += delta_phi * self.rotate_speed;
        }
    }

    /// Rotate based on pointer movement in pixels.
    pub fn rotate_by_pixels(&mut self, delta_x: f32, delta_y: f32, screen_height: f32) {
        let height = screen_height.max(1.0);
        self.rotate(2.0 * PI * delta_x / height, 2.0 * PI * delta_y / height);
    }

    /// Pan the camera by a pointer movement in pixels.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, camera: &Camera, screen_height: f32) {
        if !self.enable_pan {
            return;
        }

        let position = camera.position();
        let height = screen_height.max(1.0);

        // World units covered by half the screen height at the target.
        let half_extent = match camera {
            Camera::Perspective(c) => {
                (position - self.target).length() * (c.fov.to_radians() / 2.0).tan()
            }
            Camera::Orthographic(c) => (c.top - c.bottom) / (2.0 * c.zoom),
        };

        let pan_x = 2.0 * delta_x * half_extent / height * self.pan_speed;
        let pan_y = 2.0 * delta_y * half_extent / height * self.pan_speed;

        let forward = (self.target - position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.pan_offset += right * -pan_x + up * pan_y;
    }

    /// Zoom in/out. Positive values move closer.
    pub fn zoom(&mut self, delta: f32) {
        if self.enable_zoom {
            if delta > 0.0 {
                self.scale /= 1.0 + delta * self.zoom_speed * 0.1;
            } else {
                self.scale *= 1.0 - delta * self.zoom_speed * 0.1;
            }
        }
    }

    /// Zoom by mouse wheel delta.
    pub fn zoom_by_wheel(&mut self, delta: f32) {
        // Invert: scroll up (negative delta) = zoom in
        self.zoom(-delta * 0.01);
    }

    /// Apply accumulated input to the camera.
    ///
    /// Returns `true` and notifies listeners when the camera moved.
    pub fn update(&mut self, camera: &mut Camera, delta_time: f32) -> bool {
        let position = camera.position();
        let old_target = camera.target();
        let offset = position - self.target;

        let radius = offset.length().max(EPSILON);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).asin();

        if self.auto_rotate {
            self.spherical_delta.theta -= 2.0 * PI / 60.0 * self.auto_rotate_speed * delta_time;
        }

        if self.enable_damping {
            theta += self.spherical_delta.theta * self.damping_factor;
            phi += self.spherical_delta.phi * self.damping_factor;
            self.target += self.pan_offset * self.damping_factor;

            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
            if self.spherical_delta.is_settled() {
                self.spherical_delta = SphericalDelta::default();
            }
            if self.pan_offset.length() < EPSILON {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            theta += self.spherical_delta.theta;
            phi += self.spherical_delta.phi;
            self.target += self.pan_offset;
            self.spherical_delta = SphericalDelta::default();
            self.pan_offset = Vec3::ZERO;
        }

        // Clamp phi to avoid flipping over poles
        phi = phi.clamp(-FRAC_PI_2 + 0.1, FRAC_PI_2 - 0.1);

        let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.scale = 1.0;

        let new_offset = Vec3::new(
            new_radius * phi.cos() * theta.sin(),
            new_radius * phi.sin(),
            new_radius * phi.cos() * theta.cos(),
        );
        let new_position = self.target + new_offset;

        let changed = new_position.distance(position) > MIN_MOVE
            || self.target.distance(old_target) > MIN_MOVE;

        camera.set_position(new_position);
        camera.look_at(self.target);

        if changed {
            self.listeners.emit();
        }
        changed
    }

    /// Drop pending input.
    pub fn reset(&mut self) {
        self.spherical_delta = SphericalDelta::default();
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}
