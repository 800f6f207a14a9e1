//! Brush settings and the commands that change them.

use crate::draw::{Color, stroke::clamp_thickness};
use crate::util;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a tool command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The color string is neither a known name nor a `#RRGGBB`/`#AARRGGBB` value.
    #[error("Unknown or malformed color '{0}'")]
    InvalidColorSpec(String),
}

/// Brush sizes offered by the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushPreset {
    Small,
    Medium,
    Large,
}

/// A request to change the brush, dispatched by the UI to the tool state owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolCommand {
    /// Brush size in density-independent units.
    SetBrushSize(u32),
    /// Fully resolved paint color.
    SetColor(Color),
}

impl ToolCommand {
    /// Resolves a color name or hex string into a [`ToolCommand::SetColor`].
    ///
    /// Parsing happens before any state is touched, so a bad string leaves the
    /// brush exactly as it was.
    pub fn set_color_spec(spec: &str) -> Result<Self, ToolError> {
        util::parse_color(spec)
            .map(ToolCommand::SetColor)
            .ok_or_else(|| ToolError::InvalidColorSpec(spec.to_string()))
    }
}

/// Currently selected brush. Read when a stroke begins, never while it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    color: Color,
    brush_size: u32,
    /// Pixels per density-independent unit
    density: f64,
}

impl ToolState {
    /// Creates a tool state; `density` converts brush units into pixels.
    pub fn new(color: Color, brush_size: u32, density: f64) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("Invalid display density {density}, using 1.0");
            1.0
        };
        Self {
            color,
            brush_size: brush_size.max(1),
            density,
        }
    }

    /// Applies a tool command.
    pub fn apply(&mut self, command: ToolCommand) {
        match command {
            ToolCommand::SetBrushSize(size) => {
                if size == 0 {
                    log::warn!("Brush size must be positive; using 1");
                }
                self.brush_size = size.max(1);
                log::debug!(
                    "Brush size set to {} ({:.1}px)",
                    self.brush_size,
                    self.thickness()
                );
            }
            ToolCommand::SetColor(color) => {
                self.color = color;
                match util::color_to_name(&color) {
                    Some(name) => log::debug!("Brush color set to {}", name),
                    None => log::debug!("Brush color set to {:#010X}", color.to_argb()),
                }
            }
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Stroke width in pixels for the current brush size.
    pub fn thickness(&self) -> f64 {
        clamp_thickness(self.brush_size as f64 * self.density)
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(crate::draw::BLACK, 20, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED};

    #[test]
    fn brush_size_scales_with_density() {
        let mut tool = ToolState::new(BLACK, 10, 2.5);
        assert_eq!(tool.thickness(), 25.0);
        tool.apply(ToolCommand::SetBrushSize(30));
        assert_eq!(tool.thickness(), 75.0);
    }

    #[test]
    fn zero_brush_size_is_clamped_positive() {
        let mut tool = ToolState::default();
        tool.apply(ToolCommand::SetBrushSize(0));
        assert_eq!(tool.brush_size(), 1);
        assert!(tool.thickness() > 0.0);
    }

    #[test]
    fn invalid_density_falls_back_to_one() {
        assert_eq!(ToolState::new(BLACK, 5, 0.0).density(), 1.0);
        assert_eq!(ToolState::new(BLACK, 5, f64::NAN).density(), 1.0);
    }

    #[test]
    fn bad_color_spec_never_reaches_state() {
        let mut tool = ToolState::default();
        let err = ToolCommand::set_color_spec("#12345").unwrap_err();
        assert_eq!(err, ToolError::InvalidColorSpec("#12345".to_string()));
        assert_eq!(tool.color(), BLACK);

        tool.apply(ToolCommand::set_color_spec("#FF0000").unwrap());
        assert_eq!(tool.color(), RED);
    }
}
