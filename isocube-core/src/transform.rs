/// Axis rotation matrices and the per-frame rotation increment
use nalgebra::Matrix3;

use crate::error::InputError;
use crate::geometry::Shape;

/// Per-frame rotation increment around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Build an increment, rejecting NaN and infinite components
    pub fn try_new(x: f64, y: f64, z: f64) -> Result<Self, InputError> {
        for value in [x, y, z] {
            if !value.is_finite() {
                return Err(InputError::NonFinite(value));
            }
        }
        Ok(Self { x, y, z })
    }
}

impl Default for RotationAngles {
    fn default() -> Self {
        Self::zero()
    }
}

/// Builder for the axis rotation matrices
pub struct Transform;

impl Transform {
    /// Rotation about the X axis by `degrees`
    pub fn rotation_x(degrees: f64) -> Matrix3<f64> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        )
    }

    /// Rotation about the Y axis by `degrees`
    pub fn rotation_y(degrees: f64) -> Matrix3<f64> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        )
    }

    /// Rotation about the Z axis by `degrees`
    pub fn rotation_z(degrees: f64) -> Matrix3<f64> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        )
    }
}

/// Rotate `shape` about X, then Y, then Z.
///
/// Each pass is applied to the output of the previous one rather than to a
/// pre-multiplied operator, so the order is fixed: X, Y, Z.
pub fn rotate_3d<const N: usize>(angles: &RotationAngles, shape: &Shape<N>) -> Shape<N> {
    shape
        .transformed(&Transform::rotation_x(angles.x))
        .transformed(&Transform::rotation_y(angles.y))
        .transformed(&Transform::rotation_z(angles.z))
}
