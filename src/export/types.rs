//! Data types for picture export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting the canvas.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write picture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Invalid export size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Too many exports waiting ({0} pending)")]
    QueueFull(usize),

    #[error("Export manager not running")]
    ManagerClosed,

    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

impl From<cairo::IoError> for ExportError {
    fn from(err: cairo::IoError) -> Self {
        match err {
            cairo::IoError::Io(io) => ExportError::Io(io),
            other => ExportError::Encode(other.to_string()),
        }
    }
}

/// Status of the export worker, for busy indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Nothing has been exported yet.
    Idle,
    /// An export is being rendered or written.
    InProgress,
    /// The last export finished and was saved here.
    Success(PathBuf),
    /// The last export failed.
    Failed(String),
}
