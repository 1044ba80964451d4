/// Terminal front end for the rotating isometric cube
use std::io::{self, BufRead, Write};

use isocube_core::{
    parse::parse_angle, rotate_3d, CubeShape, FrameDriver, InputError, IsocubeError,
    IsometricProjector, RotationAngles, SessionReport, SessionSettings,
};
use tracing::info;

pub mod config;
pub mod surface;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use surface::{Canvas, TerminalSurface};

/// Runs one animated session on the terminal
pub struct TerminalApp {
    title: String,
    settings: SessionSettings,
}

impl TerminalApp {
    pub fn new(title: impl Into<String>, settings: SessionSettings) -> Self {
        Self {
            title: title.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Take over the terminal and animate until the user cancels
    pub fn run(&self) -> Result<SessionReport, IsocubeError> {
        let surface =
            TerminalSurface::create(&self.title, self.settings.width, self.settings.height)?;
        let driver = FrameDriver::initialize(surface, self.settings)?;
        let report = driver.run()?;
        info!(frames = report.frames_rendered, "session finished");
        Ok(report)
    }
}

/// Ask for the rotation increment one axis at a time
pub fn prompt_angles<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<RotationAngles, IsocubeError> {
    let mut angles = [0.0; 3];
    for (angle, axis) in angles.iter_mut().zip(["X", "Y", "Z"]) {
        write!(output, "Enter angle to rotate by on the {axis}-axis (degrees): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(InputError::Malformed {
                input: String::new(),
                expected: "an angle before end of input",
            }
            .into());
        }
        *angle = parse_angle(&line)?;
    }
    let [x, y, z] = angles;
    Ok(RotationAngles::new(x, y, z))
}

/// Print the projected cube for `frames` frames without a surface.
///
/// Frame 1 is the cube after one rotation increment, matching what the
/// animated session shows first.
pub fn write_projection<W: Write>(
    out: &mut W,
    angles: &RotationAngles,
    scale: f64,
    frames: u64,
) -> io::Result<()> {
    let projector = IsometricProjector::new();
    let mut shape = CubeShape::cube(scale);
    for frame in 1..=frames {
        shape = rotate_3d(angles, &shape);
        writeln!(out, "frame {frame}")?;
        for (i, point) in projector.project(&shape).to_points2().iter().enumerate() {
            writeln!(out, "  {i}: {:.6} {:.6}", point.x, point.y)?;
        }
    }
    Ok(())
}
