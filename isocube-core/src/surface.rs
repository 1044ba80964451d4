/// The drawing surface the frame driver renders into
use nalgebra::Point2;

use crate::error::SurfaceError;

/// World-space rectangle mapped onto the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// A viewport of the given size with the origin at its centre
    pub fn centered(width: u32, height: u32) -> Self {
        let half_w = f64::from(width / 2);
        let half_h = f64::from(height / 2);
        Self::new(-half_w, -half_h, half_w, half_h)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

/// Edge colours, one per cube edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeColor {
    Red,
    Blue,
    Yellow,
    White,
    Pink,
    Grey,
    Green,
    Orange,
    Olive,
    Cyan,
    Khaki,
    Teal,
}

/// Colour of edge `i` is `PALETTE[i % PALETTE.len()]`
pub const PALETTE: [EdgeColor; 12] = [
    EdgeColor::Red,
    EdgeColor::Blue,
    EdgeColor::Yellow,
    EdgeColor::White,
    EdgeColor::Pink,
    EdgeColor::Grey,
    EdgeColor::Green,
    EdgeColor::Orange,
    EdgeColor::Olive,
    EdgeColor::Cyan,
    EdgeColor::Khaki,
    EdgeColor::Teal,
];

impl EdgeColor {
    /// Colour assigned to the edge at `index`
    pub fn for_edge(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            EdgeColor::Red => (255, 0, 0),
            EdgeColor::Blue => (0, 0, 255),
            EdgeColor::Yellow => (255, 255, 0),
            EdgeColor::White => (255, 255, 255),
            EdgeColor::Pink => (255, 192, 203),
            EdgeColor::Grey => (190, 190, 190),
            EdgeColor::Green => (0, 255, 0),
            EdgeColor::Orange => (255, 165, 0),
            EdgeColor::Olive => (128, 128, 0),
            EdgeColor::Cyan => (0, 255, 255),
            EdgeColor::Khaki => (240, 230, 140),
            EdgeColor::Teal => (0, 128, 128),
        }
    }
}

/// Handle to a line drawn on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// A surface that can draw and erase coloured lines.
///
/// Creating the surface is left to the implementor's constructor; the frame
/// driver takes ownership of an already created surface.
pub trait DrawingSurface {
    /// Map world coordinates onto the surface
    fn set_coordinate_system(&mut self, viewport: Viewport) -> Result<(), SurfaceError>;

    fn draw_line(
        &mut self,
        from: Point2<f64>,
        to: Point2<f64>,
        color: EdgeColor,
    ) -> Result<LineId, SurfaceError>;

    fn erase(&mut self, line: LineId) -> Result<(), SurfaceError>;

    /// Make pending draws and erasures visible
    fn present(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    /// Returns true once the user has asked to stop
    fn poll_cancellation(&mut self) -> Result<bool, SurfaceError>;

    fn close(&mut self) -> Result<(), SurfaceError>;
}
