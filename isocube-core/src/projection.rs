/// Fixed isometric projection from 3D onto the screen plane
use nalgebra::Matrix3;

use crate::geometry::Shape;

/// The isometric view operator.
///
/// Rotates the scene so the three principal axes appear at equal angles,
/// scales by `1/sqrt(6)` and drops the depth component. The operator holds
/// no session state and is reapplied to each frame's rotated shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsometricProjector {
    view: Matrix3<f64>,
    scale: f64,
    planar_drop: Matrix3<f64>,
}

impl IsometricProjector {
    pub fn new() -> Self {
        let r2 = 2.0_f64.sqrt();
        let r3 = 3.0_f64.sqrt();
        Self {
            view: Matrix3::new(
                r3, 0.0, -r3, //
                1.0, 2.0, 1.0, //
                r2, -r2, r2,
            ),
            scale: 1.0 / 6.0_f64.sqrt(),
            planar_drop: Matrix3::new(
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0,
            ),
        }
    }

    /// Project `shape` onto the screen plane; every output vertex has `z == 0`
    pub fn project<const N: usize>(&self, shape: &Shape<N>) -> Shape<N> {
        shape
            .transformed(&self.view)
            .scaled(self.scale)
            .transformed(&self.planar_drop)
    }
}

impl Default for IsometricProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubeShape;
    use crate::transform::{rotate_3d, RotationAngles};
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_corner_projection_literal() {
        let shape = Shape::new([Vector3::new(100.0, 100.0, 100.0)]);
        let rotated = rotate_3d(&RotationAngles::zero(), &shape);
        let projected = IsometricProjector::new().project(&rotated);
        let v = projected.vertices[0];
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 163.299316, epsilon = 1e-6);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_depth_is_discarded() {
        let projector = IsometricProjector::new();
        let cube = rotate_3d(&RotationAngles::new(17.0, 33.0, 71.0), &CubeShape::cube(42.0));
        let projected = projector.project(&cube);
        assert_eq!(projected.len(), cube.len());
        assert!(projected.vertices.iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn test_projection_does_not_accumulate() {
        let projector = IsometricProjector::new();
        let cube = CubeShape::cube(10.0);
        assert_eq!(projector.project(&cube), projector.project(&cube));
    }

    #[test]
    fn test_projected_cube_is_centred() {
        let projected = IsometricProjector::new().project(&CubeShape::cube(1.0));
        let centroid: Vector3<f64> = projected.vertices.iter().sum::<Vector3<f64>>() / 8.0;
        assert_abs_diff_eq!(centroid, Vector3::zeros(), epsilon = 1e-12);
    }
}
