//! Ready-made folders for the demo scenes.

use super::{NumericParam, ParamFolder};
use crate::camera::{OrthographicCamera, PerspectiveCamera};
use crate::scene::Transform;
use glam::Vec3;
use std::f32::consts::TAU;

fn with_axis(position: Vec3, axis: usize, value: f32) -> Vec3 {
    let mut p = position;
    p[axis] = value;
    p
}

/// Position sliders `x`, `y`, `z` in `-range..=range`.
pub fn camera_position(title: &str, range: f32) -> ParamFolder<PerspectiveCamera> {
    ParamFolder::new(title)
        .add(NumericParam::new(
            "x",
            -range,
            range,
            |c: &PerspectiveCamera| c.position.x,
            |c: &mut PerspectiveCamera, v| c.set_position(with_axis(c.position, 0, v)),
        ))
        .add(NumericParam::new(
            "y",
            -range,
            range,
            |c: &PerspectiveCamera| c.position.y,
            |c: &mut PerspectiveCamera, v| c.set_position(with_axis(c.position, 1, v)),
        ))
        .add(NumericParam::new(
            "z",
            -range,
            range,
            |c: &PerspectiveCamera| c.position.z,
            |c: &mut PerspectiveCamera, v| c.set_position(with_axis(c.position, 2, v)),
        ))
}

/// Position plus fov, aspect and clip planes.
pub fn perspective_camera(title: &str, range: f32) -> ParamFolder<PerspectiveCamera> {
    camera_position(title, range)
        .add(
            NumericParam::new(
                "fov",
                0.0,
                180.0,
                |c: &PerspectiveCamera| c.fov,
                |c: &mut PerspectiveCamera, v| c.fov = v,
            )
            .with_step(0.01),
        )
        .add(NumericParam::new(
            "aspect",
            0.00001,
            10.0,
            |c: &PerspectiveCamera| c.aspect,
            |c: &mut PerspectiveCamera, v| c.aspect = v,
        ))
        .add(NumericParam::new(
            "near",
            0.01,
            10.0,
            |c: &PerspectiveCamera| c.near,
            |c: &mut PerspectiveCamera, v| c.near = v,
        ))
        .add(NumericParam::new(
            "far",
            0.01,
            10.0,
            |c: &PerspectiveCamera| c.far,
            |c: &mut PerspectiveCamera, v| c.far = v,
        ))
}

/// Frustum planes of an orthographic camera.
pub fn orthographic_camera(title: &str) -> ParamFolder<OrthographicCamera> {
    ParamFolder::new(title)
        .add(NumericParam::new(
            "left",
            -10.0,
            0.0,
            |c: &OrthographicCamera| c.left,
            |c: &mut OrthographicCamera, v| c.left = v,
        ))
        .add(NumericParam::new(
            "right",
            0.0,
            10.0,
            |c: &OrthographicCamera| c.right,
            |c: &mut OrthographicCamera, v| c.right = v,
        ))
        .add(NumericParam::new(
            "top",
            0.0,
            10.0,
            |c: &OrthographicCamera| c.top,
            |c: &mut OrthographicCamera, v| c.top = v,
        ))
        .add(NumericParam::new(
            "bottom",
            -10.0,
            0.0,
            |c: &OrthographicCamera| c.bottom,
            |c: &mut OrthographicCamera, v| c.bottom = v,
        ))
        .add(NumericParam::new(
            "near",
            -5.0,
            5.0,
            |c: &OrthographicCamera| c.near,
            |c: &mut OrthographicCamera, v| c.near = v,
        ))
        .add(NumericParam::new(
            "far",
            0.0,
            10.0,
            |c: &OrthographicCamera| c.far,
            |c: &mut OrthographicCamera, v| c.far = v,
        ))
}

/// Euler rotation sliders over one full turn.
pub fn rotation(title: &str) -> ParamFolder<Transform> {
    ParamFolder::new(title)
        .add(NumericParam::new(
            "x",
            0.0,
            TAU,
            |t: &Transform| t.rotation.x,
            |t: &mut Transform, v| t.rotation.x = v,
        ))
        .add(NumericParam::new(
            "y",
            0.0,
            TAU,
            |t: &Transform| t.rotation.y,
            |t: &mut Transform, v| t.rotation.y = v,
        ))
        .add(NumericParam::new(
            "z",
            0.0,
            TAU,
            |t: &Transform| t.rotation.z,
            |t: &mut Transform, v| t.rotation.z = v,
        ))
}

/// Camera distance along `z`, `0..=20`.
pub fn camera_distance(title: &str) -> ParamFolder<PerspectiveCamera> {
    ParamFolder::new(title).add(NumericParam::new(
        "z",
        0.0,
        20.0,
        |c: &PerspectiveCamera| c.position.z,
        |c: &mut PerspectiveCamera, v| c.set_position(with_axis(c.position, 2, v)),
    ))
}
