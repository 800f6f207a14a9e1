use std::{fmt, path::PathBuf, sync::Arc};

use tokio::{sync::oneshot, task};

use crate::draw::CanvasSnapshot;
use crate::export::{
    dependencies::{ExportDependencies, ExportFileSaver},
    file::FileSaveConfig,
    types::ExportError,
};

pub(crate) type ExportReply = oneshot::Sender<Result<PathBuf, ExportError>>;

/// Everything the worker needs to produce one picture.
pub(crate) struct ExportRequest {
    pub snapshot: CanvasSnapshot,
    pub width: u32,
    pub height: u32,
    pub save_config: FileSaveConfig,
    pub reply: ExportReply,
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("strokes", &self.snapshot.strokes.len())
            .field("save_config", &self.save_config)
            .finish()
    }
}

/// Renders and saves a request off the async executor.
pub(crate) async fn perform_export(
    snapshot: CanvasSnapshot,
    width: u32,
    height: u32,
    save_config: FileSaveConfig,
    dependencies: Arc<ExportDependencies>,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || {
        export_snapshot(
            &snapshot,
            width,
            height,
            &save_config,
            dependencies.saver.as_ref(),
        )
    })
    .await
    .map_err(|e| ExportError::TaskFailed(e.to_string()))?
}

/// Renders `snapshot` at the given size, encodes it as PNG and hands it to `saver`.
pub(crate) fn export_snapshot(
    snapshot: &CanvasSnapshot,
    width: u32,
    height: u32,
    save_config: &FileSaveConfig,
    saver: &dyn ExportFileSaver,
) -> Result<PathBuf, ExportError> {
    let png = encode_png(snapshot, width, height)?;
    saver.save(&png, save_config)
}

/// Renders `snapshot` into a PNG byte buffer.
pub fn encode_png(
    snapshot: &CanvasSnapshot,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    let (w, h) = checked_dimensions(width, height)?;
    let surface = snapshot.render_to_surface(w, h)?;

    let mut buffer = Vec::new();
    surface.write_to_png(&mut buffer)?;
    log::debug!("Encoded {}x{} picture ({} bytes)", width, height, buffer.len());
    Ok(buffer)
}

fn checked_dimensions(width: u32, height: u32) -> Result<(i32, i32), ExportError> {
    let invalid = || ExportError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    let w = i32::try_from(width).map_err(|_| invalid())?;
    let h = i32::try_from(height).map_err(|_| invalid())?;
    Ok((w, h))
}
