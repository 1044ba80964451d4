use thiserror::Error;

/// Top-level error type for isocube.
#[derive(Debug, Error)]
pub enum IsocubeError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),

    #[error("drawing surface is closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors in user supplied angles and session parameters.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("malformed angle input {input:?}: expected {expected}")]
    Malformed {
        input: String,
        expected: &'static str,
    },

    #[error("angle {0} is not a finite number")]
    NonFinite(f64),

    #[error("{name} = {value} is out of range: {expected}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Convenience type alias for results using [`IsocubeError`].
pub type Result<T> = std::result::Result<T, IsocubeError>;
