use crate::draw::Raster;
use crate::input::tool::{BrushPreset, ToolCommand, ToolError};

use super::InputState;

/// Toolbar and dialog actions, dispatched by the UI.
#[derive(Debug, Clone)]
pub enum Action {
    /// Remove the last committed stroke
    Undo,
    /// Change the brush directly
    Tool(ToolCommand),
    /// Pick one of the brush size buttons
    BrushPreset(BrushPreset),
    /// Pick a palette entry by index
    PaletteColor(usize),
    /// Show an imported picture under the drawing
    SetBackground(Raster),
    /// Go back to blank paper
    ClearBackground,
}

impl InputState {
    /// Executes a UI action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => {
                if self.surface.undo().is_none() {
                    log::debug!("Nothing to undo");
                }
            }
            Action::Tool(command) => {
                self.surface.apply_tool_command(command);
            }
            Action::BrushPreset(preset) => {
                let size = self.brush_presets.size(preset);
                self.surface.set_brush_size(size);
            }
            Action::PaletteColor(index) => match self.palette.get(index) {
                Some(&color) => self.surface.set_color(color),
                None => log::warn!(
                    "Palette index {} out of range ({} colors)",
                    index,
                    self.palette.len()
                ),
            },
            Action::SetBackground(raster) => {
                self.surface.set_background(raster);
            }
            Action::ClearBackground => {
                self.surface.clear_background();
            }
        }
    }

    /// Resolves and applies a color string.
    ///
    /// On failure the brush keeps its current color and the error is returned
    /// to the caller.
    pub fn set_color_spec(&mut self, spec: &str) -> Result<(), ToolError> {
        let command = ToolCommand::set_color_spec(spec)?;
        self.handle_action(Action::Tool(command));
        Ok(())
    }
}
