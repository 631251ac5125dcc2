use thiserror::Error;

#[derive(Error, Debug)]
pub enum WheelError {
    #[error("No mount container provided")]
    NoMount,
    #[error("Wheel has no labels to lay out")]
    NoLabels,
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Invalid spin velocity: {0}")]
    InvalidVelocity(f64),
    #[error("Render error: {0}")]
    Render(#[from] cairo::Error),
    #[error("Export error: {0}")]
    Export(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
