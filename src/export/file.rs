//! File saving functionality for exported pictures.

use super::types::ExportError;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save pictures to.
    pub save_directory: PathBuf,
    /// File name prefix, followed by the export time in seconds since the epoch.
    pub file_prefix: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("KidsDraw"),
            file_prefix: "KidsDrawingApp_".to_string(),
            format: "png".to_string(),
        }
    }
}

/// Generate a filename from the prefix and a Unix timestamp.
///
/// # Returns
/// `<prefix><timestamp>.<format>`, e.g. `KidsDrawingApp_1700000000.png`
pub fn generate_filename(prefix: &str, timestamp: i64, format: &str) -> String {
    format!("{}{}.{}", prefix, timestamp, format)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating picture directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save encoded image data as a new file in the configured directory.
///
/// The data is written to a synced temporary file first and then linked under
/// its final name. Linking fails instead of replacing an existing picture, so
/// concurrent exports in the same second each get their own file, and a failed
/// export never leaves a truncated picture behind.
///
/// # Returns
/// Path to the saved file
pub fn save_picture(image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let timestamp = Utc::now().timestamp();
    let base_name = generate_filename(&config.file_prefix, timestamp, &config.format);

    log::info!(
        "Saving picture to: {} ({} bytes)",
        directory.join(&base_name).display(),
        image_data.len()
    );

    let tmp_path = write_temp_file(&directory, &base_name, image_data)?;
    let linked = link_unused_name(
        &tmp_path,
        &directory,
        &config.file_prefix,
        timestamp,
        &config.format,
    );
    remove_temp_file(&tmp_path);
    let file_path = linked?;

    log::info!("Picture saved successfully: {}", file_path.display());
    Ok(file_path)
}

/// Creates a fresh hidden temp file next to the final picture and syncs `data` into it.
fn write_temp_file(
    directory: &Path,
    base_name: &str,
    data: &[u8],
) -> Result<PathBuf, ExportError> {
    let mut counter = 0u32;
    loop {
        let tmp_path = directory.join(format!(".{base_name}.tmp{counter}"));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(mut tmp_file) => {
                let written = tmp_file.write_all(data).and_then(|()| tmp_file.sync_all());
                drop(tmp_file);
                if let Err(err) = written {
                    remove_temp_file(&tmp_path);
                    return Err(err.into());
                }
                log::debug!("File written: {} bytes", data.len());
                return Ok(tmp_path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(err) => return Err(err.into()),
        }
    }
}

/// Links `tmp_path` as `<prefix><timestamp>.<format>`, or `_1`, `_2`, ... when
/// that name is taken. An existing file is never replaced.
fn link_unused_name(
    tmp_path: &Path,
    directory: &Path,
    prefix: &str,
    timestamp: i64,
    format: &str,
) -> Result<PathBuf, ExportError> {
    let mut counter = 0u32;
    loop {
        let candidate = if counter == 0 {
            directory.join(generate_filename(prefix, timestamp, format))
        } else {
            directory.join(format!("{prefix}{timestamp}_{counter}.{format}"))
        };
        match fs::hard_link(tmp_path, &candidate) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(err) => return Err(err.into()),
        }
    }
}

fn remove_temp_file(tmp_path: &Path) {
    if let Err(err) = fs::remove_file(tmp_path)
        && err.kind() != io::ErrorKind::NotFound
    {
        log::warn!(
            "Failed to remove temporary file {}: {}",
            tmp_path.display(),
            err
        );
    }
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
