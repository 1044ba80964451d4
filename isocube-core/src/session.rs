/// Frame driver: owns the rotating shape and animates it on a surface
use std::thread;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::error::{InputError, IsocubeError, SurfaceError};
use crate::geometry::{CubeShape, CUBE_EDGES};
use crate::projection::IsometricProjector;
use crate::surface::{DrawingSurface, EdgeColor, Viewport};
use crate::transform::{rotate_3d, RotationAngles};

/// Default pause between drawing a frame and erasing it
pub const DEFAULT_DWELL: Duration = Duration::from_millis(400);

/// Lifecycle of a render session.
///
/// A driver starts in `Initializing`, moves to `Rendering` once the surface
/// is set up and the first increment applied, and ends in `Terminating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Rendering,
    Terminating,
}

/// Parameters fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Rotation applied once per frame
    pub angles: RotationAngles,
    pub width: u32,
    pub height: u32,
    /// Half the cube's side length
    pub scale: f64,
    pub dwell: Duration,
    /// Stop after this many frames even without a cancellation signal
    pub max_frames: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            angles: RotationAngles::zero(),
            width: 1000,
            height: 1000,
            scale: 100.0,
            dwell: DEFAULT_DWELL,
            max_frames: None,
        }
    }
}

impl SessionSettings {
    /// Reject settings the geometry cannot render: non-finite angles, a
    /// non-positive scale, or a window too small for a centred viewport
    pub fn validate(&self) -> Result<(), InputError> {
        let RotationAngles { x, y, z } = self.angles;
        RotationAngles::try_new(x, y, z)?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(InputError::OutOfRange {
                name: "scale",
                value: self.scale,
                expected: "a finite number greater than zero",
            });
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value < 2 {
                return Err(InputError::OutOfRange {
                    name,
                    value: f64::from(value),
                    expected: "at least 2",
                });
            }
        }
        Ok(())
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub frames_rendered: u64,
}

/// Drives the draw, dwell, erase, rotate cycle against one surface.
///
/// The driver exclusively owns the surface and the current rotated shape.
/// Each frame shows the shape one increment ahead of the previous frame,
/// and cancellation is only checked once per frame, after the erase.
pub struct FrameDriver<S: DrawingSurface> {
    surface: S,
    settings: SessionSettings,
    projector: IsometricProjector,
    shape: CubeShape,
    state: SessionState,
    frames: u64,
}

impl<S: DrawingSurface> FrameDriver<S> {
    /// Validate `settings` and take ownership of the surface without touching it
    pub fn new(surface: S, settings: SessionSettings) -> Result<Self, IsocubeError> {
        settings.validate()?;
        Ok(Self {
            surface,
            settings,
            projector: IsometricProjector::new(),
            shape: CubeShape::cube(settings.scale),
            state: SessionState::Initializing,
            frames: 0,
        })
    }

    /// Create a driver and run the `Initializing` step right away
    pub fn initialize(surface: S, settings: SessionSettings) -> Result<Self, IsocubeError> {
        let mut driver = Self::new(surface, settings)?;
        driver.begin()?;
        Ok(driver)
    }

    /// Set up the surface and compute the first rotated shape
    pub fn begin(&mut self) -> Result<(), SurfaceError> {
        match self.state {
            SessionState::Initializing => {}
            SessionState::Rendering => return Ok(()),
            SessionState::Terminating => return Err(SurfaceError::Closed),
        }

        info!(
            angles = ?self.settings.angles,
            width = self.settings.width,
            height = self.settings.height,
            scale = self.settings.scale,
            "initializing render session"
        );
        self.surface
            .set_coordinate_system(Viewport::centered(self.settings.width, self.settings.height))?;

        self.shape = rotate_3d(&self.settings.angles, &self.shape);
        self.state = SessionState::Rendering;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current rotated, not yet projected, shape
    pub fn shape(&self) -> &CubeShape {
        &self.shape
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Render one frame and advance the rotation
    pub fn step(&mut self) -> Result<SessionState, SurfaceError> {
        if self.state == SessionState::Initializing {
            self.begin()?;
        }
        if self.state != SessionState::Rendering {
            return Err(SurfaceError::Closed);
        }

        let points = self.projector.project(&self.shape).to_points2();
        debug_assert!(CUBE_EDGES.iter().all(|&(a, b)| a < points.len() && b < points.len()));
        trace!(frame = self.frames, ?points, "projected frame");

        let mut lines = Vec::with_capacity(CUBE_EDGES.len());
        for (i, &(a, b)) in CUBE_EDGES.iter().enumerate() {
            lines.push(self.surface.draw_line(points[a], points[b], EdgeColor::for_edge(i))?);
        }
        self.surface.present()?;

        if !self.settings.dwell.is_zero() {
            thread::sleep(self.settings.dwell);
        }

        for line in lines {
            self.surface.erase(line)?;
        }
        self.surface.present()?;

        self.shape = rotate_3d(&self.settings.angles, &self.shape);
        self.frames += 1;
        debug!(frame = self.frames, "frame complete");

        let limit_reached = self
            .settings
            .max_frames
            .is_some_and(|max| self.frames >= max);
        if self.surface.poll_cancellation()? || limit_reached {
            info!(frames = self.frames, limit_reached, "stop requested");
            self.state = SessionState::Terminating;
        }

        Ok(self.state)
    }

    /// Render frames until cancelled, then close the surface
    pub fn run(mut self) -> Result<SessionReport, SurfaceError> {
        let outcome = loop {
            match self.step() {
                Ok(SessionState::Terminating) => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e),
            }
        };

        if let Err(e) = &outcome {
            warn!(error = %e, "frame failed, terminating session");
        }

        let report = self.finish();
        outcome?;
        report
    }

    /// Close the surface and end the session
    pub fn finish(mut self) -> Result<SessionReport, SurfaceError> {
        self.state = SessionState::Terminating;
        self.surface.close()?;
        info!(frames = self.frames, "render session closed");
        Ok(SessionReport {
            frames_rendered: self.frames,
        })
    }
}
