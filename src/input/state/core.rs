//! Input state: the canvas plus the picker settings the UI dispatches against.

use crate::config::{BrushPresets, Config};
use crate::draw::{CanvasSurface, Color};
use crate::input::tool::ToolState;

/// Main input state containing all drawing session state.
///
/// Translates pointer events and UI actions into calls on the owned
/// [`CanvasSurface`]. There is exactly one of these per drawing screen, built
/// up front and valid for the whole session.
pub struct InputState {
    /// The canvas being drawn on
    pub surface: CanvasSurface,
    /// Sizes behind the small/medium/large brush buttons
    pub brush_presets: BrushPresets,
    /// Colors offered by the palette, in button order
    pub palette: Vec<Color>,
}

impl InputState {
    /// Creates an input state around an existing surface.
    pub fn new(surface: CanvasSurface, brush_presets: BrushPresets, palette: Vec<Color>) -> Self {
        Self {
            surface,
            brush_presets,
            palette,
        }
    }

    /// Builds the session from user configuration.
    pub fn from_config(config: &Config) -> Self {
        let tool = ToolState::new(
            config.drawing.default_color.to_color(),
            config.drawing.default_brush_size,
            config.canvas.density,
        );
        let surface = CanvasSurface::with_settings(
            tool,
            config.canvas.background_color.to_color(),
            config.drawing.max_strokes,
        );
        let palette = config
            .drawing
            .palette
            .iter()
            .map(|spec| spec.to_color())
            .collect();

        Self::new(surface, config.drawing.brush_presets.clone(), palette)
    }

    /// Whether the display needs to be redrawn.
    pub fn needs_redraw(&self) -> bool {
        self.surface.needs_redraw()
    }

    /// Returns the redraw request and clears it; call once per frame.
    pub fn take_redraw(&mut self) -> bool {
        self.surface.take_redraw()
    }
}
