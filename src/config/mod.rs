//! Configuration file support for kidsdraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/kidsdraw/config.toml`. Settings include the starting brush,
//! palette, canvas size, and where exported pictures go.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{BrushPresets, CanvasConfig, DrawingConfig, ExportConfig};

use crate::export::FileSaveConfig;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_brush_size = 20
/// palette = ["black", "red", "#3366FF"]
///
/// [drawing.brush_presets]
/// small = 10
/// medium = 20
/// large = 30
///
/// [canvas]
/// width = 1080
/// height = 1920
/// density = 2.0
///
/// [export]
/// directory = "~/Pictures/KidsDraw"
/// file_prefix = "KidsDrawingApp_"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults and picker contents
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas size and paper
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Picture export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_brush_size` and presets: 1 - 100
    /// - `canvas.width` / `canvas.height`: 1 - 8192
    /// - `canvas.density`: 0.5 - 4.0
    /// - `export.max_pending`: 1 - 16
    pub fn validate_and_clamp(&mut self) {
        clamp_brush("default_brush_size", &mut self.drawing.default_brush_size);
        clamp_brush("brush_presets.small", &mut self.drawing.brush_presets.small);
        clamp_brush("brush_presets.medium", &mut self.drawing.brush_presets.medium);
        clamp_brush("brush_presets.large", &mut self.drawing.brush_presets.large);

        if self.drawing.default_color.try_to_color().is_none() {
            warn!(
                "Invalid default_color {:?}, falling back to 'black'",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::from("black");
        }

        let before = self.drawing.palette.len();
        self.drawing.palette.retain(|spec| {
            let valid = spec.try_to_color().is_some();
            if !valid {
                warn!("Dropping invalid palette color {:?}", spec);
            }
            valid
        });
        if self.drawing.palette.is_empty() {
            if before > 0 {
                warn!("Palette has no valid colors, restoring defaults");
            }
            self.drawing.palette = DrawingConfig::default().palette;
        }

        // Canvas: 1 - 8192 pixels per side
        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=8192).contains(&*value) {
                warn!("Invalid canvas {} {}, clamping to 1-8192 range", name, value);
                *value = (*value).clamp(1, 8192);
            }
        }

        // Density: 0.5 - 4.0
        if !(0.5..=4.0).contains(&self.canvas.density) {
            warn!(
                "Invalid density {:.2}, clamping to 0.5-4.0 range",
                self.canvas.density
            );
            self.canvas.density = if self.canvas.density.is_nan() {
                1.0
            } else {
                self.canvas.density.clamp(0.5, 4.0)
            };
        }

        if self.canvas.background_color.try_to_color().is_none() {
            warn!(
                "Invalid background_color {:?}, falling back to 'white'",
                self.canvas.background_color
            );
            self.canvas.background_color = ColorSpec::from("white");
        }

        // Pending exports: 1 - 16
        if !(1..=16).contains(&self.export.max_pending) {
            warn!(
                "Invalid max_pending {}, clamping to 1-16 range",
                self.export.max_pending
            );
            self.export.max_pending = self.export.max_pending.clamp(1, 16);
        }

        if self.export.file_prefix.contains(['/', '\\']) {
            warn!(
                "file_prefix '{}' contains a path separator, using default",
                self.export.file_prefix
            );
            self.export.file_prefix = ExportConfig::default().file_prefix;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/kidsdraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("kidsdraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editors and validation tools.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// File settings for the exporter, with `~` expanded.
    pub fn file_save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: crate::export::file::expand_tilde(&self.export.directory),
            file_prefix: self.export.file_prefix.clone(),
            format: "png".to_string(),
        }
    }
}

fn clamp_brush(name: &str, value: &mut u32) {
    if !(1..=100).contains(&*value) {
        warn!("Invalid {} {}, clamping to 1-100 range", name, value);
        *value = (*value).clamp(1, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_toolbar_presets() {
        let config = Config::default();
        assert_eq!(config.drawing.default_brush_size, 20);
        assert_eq!(config.drawing.brush_presets, BrushPresets::default());
        assert_eq!(config.drawing.brush_presets.small, 10);
        assert_eq!(config.drawing.brush_presets.large, 30);
        assert_eq!(config.export.file_prefix, "KidsDrawingApp_");
        assert_eq!(config.file_save_config().format, "png");
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config: Config = toml::from_str(
            r##"
            [drawing]
            default_color = "not-a-color"
            default_brush_size = 0
            palette = ["red", "nope"]

            [drawing.brush_presets]
            large = 500

            [canvas]
            width = 0
            density = 9.0

            [export]
            max_pending = 0
            file_prefix = "../evil"
            "##,
        )
        .unwrap();

        config.validate_and_clamp();

        assert_eq!(config.drawing.default_color, ColorSpec::from("black"));
        assert_eq!(config.drawing.default_brush_size, 1);
        assert_eq!(config.drawing.brush_presets.large, 100);
        assert_eq!(config.drawing.brush_presets.small, 10);
        assert_eq!(config.drawing.palette, vec![ColorSpec::from("red")]);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.canvas.density, 4.0);
        assert_eq!(config.export.max_pending, 1);
        assert_eq!(config.export.file_prefix, "KidsDrawingApp_");
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.default_brush_size = 42;
        config.export.directory = "/tmp/drawings".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing.default_brush_size, 42);
        assert_eq!(loaded.export.directory, "/tmp/drawings");
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing\nbroken").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_top_level_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("drawing"));
        assert!(properties.contains_key("canvas"));
        assert!(properties.contains_key("export"));
    }
}
