//! Saving the canvas as a PNG picture.
//!
//! Exports are rendered from a snapshot of the canvas on a background worker
//! and written to disk through a temporary file, so a failed export never
//! leaves a partial picture behind.

pub mod dependencies;
pub mod file;
pub mod manager;
pub mod pipeline;
pub mod types;


use std::path::PathBuf;

use crate::draw::CanvasSurface;

pub use dependencies::{ExportDependencies, ExportFileSaver};
pub use file::FileSaveConfig;
pub use manager::{ExportManager, ExportTicket};
pub use pipeline::encode_png;
pub use types::{ExportError, ExportStatus};

/// Renders `surface` at `width` x `height` and saves it on the calling thread.
///
/// Blocks until the file is written. Interactive callers should go through
/// [`ExportManager`] instead.
pub fn export_to_raster(
    surface: &CanvasSurface,
    width: u32,
    height: u32,
    config: &FileSaveConfig,
) -> Result<PathBuf, ExportError> {
    pipeline::export_snapshot(
        &surface.snapshot(),
        width,
        height,
        config,
        &dependencies::DefaultFileSaver,
    )
}
