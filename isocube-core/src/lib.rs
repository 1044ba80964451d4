/// isocube Core Library - Shared geometry, projection and frame logic
///
/// This library provides the geometric pipeline behind the rotating
/// isometric cube: axis rotations, the fixed isometric projection, the
/// cube's edge topology, and a frame driver that animates the shape on any
/// [`DrawingSurface`].

pub mod error;
pub mod geometry;
pub mod parse;
pub mod projection;
pub mod session;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use error::{InputError, IsocubeError, Result, SurfaceError};
pub use geometry::{CubeShape, Edge, Shape, Vertex, CUBE_EDGES};
pub use projection::IsometricProjector;
pub use session::{FrameDriver, SessionReport, SessionSettings, SessionState};
pub use surface::{DrawingSurface, EdgeColor, LineId, Viewport, PALETTE};
pub use transform::{rotate_3d, RotationAngles, Transform};
