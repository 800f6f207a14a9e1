use std::{path::PathBuf, sync::Arc};

use crate::export::{
    file::{self, FileSaveConfig},
    types::ExportError,
};

/// Abstraction over writing encoded pictures to storage.
pub trait ExportFileSaver: Send + Sync {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError>;
}

/// Bundle of dependencies used by the export pipeline. The saver can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ExportFileSaver>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(DefaultFileSaver),
        }
    }
}

pub(crate) struct DefaultFileSaver;

impl ExportFileSaver for DefaultFileSaver {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
        file::save_picture(image_data, config)
    }
}
