/// Geometry primitives for the wireframe pipeline
use nalgebra::{Matrix3, Point2, Vector3};

/// A 3D vertex
pub type Vertex = Vector3<f64>;

/// An edge between two vertex indices of a [`Shape`]
pub type Edge = (usize, usize);

/// The built-in cube
pub type CubeShape = Shape<8>;

/// Unit cube corners. Edge connectivity in [`CUBE_EDGES`] depends on this order.
const UNIT_CUBE: [[f64; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
];

/// The twelve edges of the cube, as indices into [`CubeShape`]
pub const CUBE_EDGES: [Edge; 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (3, 1),
    (3, 2),
    (3, 7),
    (6, 2),
    (6, 4),
    (6, 7),
    (5, 1),
    (5, 4),
    (5, 7),
];

/// An ordered, fixed-length set of vertices.
///
/// Order is significant: edges refer to vertices by index, so every
/// transform keeps both the length and the order of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape<const N: usize> {
    pub vertices: [Vertex; N],
}

impl<const N: usize> Shape<N> {
    pub fn new(vertices: [Vertex; N]) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Multiply every vertex by `matrix`, producing a new shape.
    ///
    /// Each output vertex is `v'[j] = sum_k matrix[(j, k)] * v[k]`.
    pub fn transformed(&self, matrix: &Matrix3<f64>) -> Self {
        Self {
            vertices: self.vertices.map(|v| matrix * v),
        }
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.map(|v| v * factor),
        }
    }

    /// Drop the third coordinate of every vertex
    pub fn to_points2(&self) -> [Point2<f64>; N] {
        self.vertices.map(|v| Point2::new(v.x, v.y))
    }
}

impl CubeShape {
    /// A cube with corners at all combinations of `±scale`
    pub fn cube(scale: f64) -> Self {
        Self::new(UNIT_CUBE.map(|[x, y, z]| Vector3::new(x, y, z))).scaled(scale)
    }
}
