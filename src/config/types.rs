//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::BrushPreset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the brush the canvas starts with and what the pickers offer.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting brush color - a named color, a hex string, or an RGB array
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Starting brush size in density-independent units (valid range: 1 - 100)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: u32,

    /// Sizes behind the small/medium/large brush buttons
    #[serde(default)]
    pub brush_presets: BrushPresets,

    /// Colors offered by the palette, in button order
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,

    /// Maximum number of strokes kept on the canvas (0 = unlimited)
    #[serde(default)]
    pub max_strokes: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_brush_size: default_brush_size(),
            brush_presets: BrushPresets::default(),
            palette: default_palette(),
            max_strokes: 0,
        }
    }
}

/// Brush sizes for the size picker, in density-independent units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BrushPresets {
    #[serde(default = "default_small_brush")]
    pub small: u32,

    #[serde(default = "default_medium_brush")]
    pub medium: u32,

    #[serde(default = "default_large_brush")]
    pub large: u32,
}

impl BrushPresets {
    /// Returns the size assigned to a preset button.
    pub fn size(&self, preset: BrushPreset) -> u32 {
        match preset {
            BrushPreset::Small => self.small,
            BrushPreset::Medium => self.medium,
            BrushPreset::Large => self.large,
        }
    }
}

impl Default for BrushPresets {
    fn default() -> Self {
        Self {
            small: default_small_brush(),
            medium: default_medium_brush(),
            large: default_large_brush(),
        }
    }
}

/// Canvas geometry and paper settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels, used when no background image sets the size
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels, used when no background image sets the size
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Pixels per density-independent unit (valid range: 0.5 - 4.0)
    #[serde(default = "default_density")]
    pub density: f64,

    /// Paper color shown when no background image is loaded
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            density: default_density(),
            background_color: default_background_color(),
        }
    }
}

/// Export (save to picture) settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory pictures are written to (supports ~ for home directory)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// File name prefix; the export time in seconds since the epoch follows it
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// How many exports may wait in line before new requests are refused (valid range: 1 - 16)
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            file_prefix: default_file_prefix(),
            max_pending: default_max_pending(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_size() -> u32 {
    20
}

fn default_small_brush() -> u32 {
    10
}

fn default_medium_brush() -> u32 {
    20
}

fn default_large_brush() -> u32 {
    30
}

fn default_palette() -> Vec<ColorSpec> {
    [
        "black", "white", "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown",
    ]
    .into_iter()
    .map(ColorSpec::from)
    .collect()
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_density() -> f64 {
    1.0
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_export_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("KidsDraw").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Pictures/KidsDraw".to_string())
}

fn default_file_prefix() -> String {
    "KidsDrawingApp_".to_string()
}

fn default_max_pending() -> usize {
    4
}
