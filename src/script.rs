//! Gesture scripts: recorded touch input and toolbar actions replayed onto a canvas.
//!
//! A script is a TOML file with one `[[step]]` table per event:
//!
//! ```toml
//! [[step]]
//! action = "color"
//! color = "red"
//!
//! [[step]]
//! action = "down"
//! x = 10.0
//! y = 10.0
//!
//! [[step]]
//! action = "move"
//! x = 90.0
//! y = 40.0
//!
//! [[step]]
//! action = "up"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::input::{Action, BrushPreset, InputState, PointerEvent, ToolCommand};

/// A single scripted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    BrushSize {
        size: u32,
    },
    BrushPreset {
        preset: BrushPreset,
    },
    /// Color name or hex string; unknown colors are skipped.
    Color {
        color: String,
    },
    /// Palette button by index.
    Palette {
        index: usize,
    },
    Undo,
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// What happened during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Steps that changed or were accepted by the canvas
    pub applied: usize,
    /// Steps ignored because they were invalid or had no effect
    pub skipped: usize,
}

impl Script {
    /// Parses a script from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse gesture script")
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::parse(&text)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        log::info!(
            "Loaded {} steps from {}",
            script.steps.len(),
            path.display()
        );
        Ok(script)
    }

    /// Feeds every step into `state`, in order.
    pub fn replay(&self, state: &mut InputState) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for (index, step) in self.steps.iter().enumerate() {
            if apply_step(state, step) {
                summary.applied += 1;
            } else {
                log::debug!("Step {} skipped: {:?}", index + 1, step);
                summary.skipped += 1;
            }
        }
        summary
    }
}

fn apply_step(state: &mut InputState, step: &Step) -> bool {
    match step {
        Step::Down { x, y } => state
            .on_pointer_event(PointerEvent::Down { x: *x, y: *y })
            .is_handled(),
        Step::Move { x, y } => state
            .on_pointer_event(PointerEvent::Move { x: *x, y: *y })
            .is_handled(),
        Step::Up { x, y } => state
            .on_pointer_event(PointerEvent::Up { x: *x, y: *y })
            .is_handled(),
        Step::BrushSize { size } => {
            state.handle_action(Action::Tool(ToolCommand::SetBrushSize(*size)));
            true
        }
        Step::BrushPreset { preset } => {
            state.handle_action(Action::BrushPreset(*preset));
            true
        }
        Step::Color { color } => match state.set_color_spec(color) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        },
        Step::Palette { index } => {
            if *index >= state.palette.len() {
                log::warn!("Palette index {} out of range", index);
                return false;
            }
            state.handle_action(Action::PaletteColor(*index));
            true
        }
        Step::Undo => {
            let before = state.surface.strokes().len();
            state.handle_action(Action::Undo);
            state.surface.strokes().len() < before
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::draw::{BLACK, RED};

    const SQUIGGLE: &str = r##"
        [[step]]
        action = "brush-preset"
        preset = "large"

        [[step]]
        action = "color"
        color = "#FF0000"

        [[step]]
        action = "down"
        x = 0.0
        y = 0.0

        [[step]]
        action = "move"
        x = 10.0
        y = 0.0

        [[step]]
        action = "move"
        x = 10.0
        y = 10.0

        [[step]]
        action = "up"
    "##;

    #[test]
    fn parses_every_step_kind() {
        let script = Script::parse(
            r##"
            [[step]]
            action = "brush-size"
            size = 7

            [[step]]
            action = "palette"
            index = 3

            [[step]]
            action = "undo"

            [[step]]
            action = "up"
            x = 1.5
            y = 2.5
            "##,
        )
        .unwrap();

        assert_eq!(
            script.steps,
            vec![
                Step::BrushSize { size: 7 },
                Step::Palette { index: 3 },
                Step::Undo,
                Step::Up { x: 1.5, y: 2.5 },
            ]
        );
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let err = Script::parse("[[step]]\naction = \"erase\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse gesture script"));
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(Script::parse("").unwrap().steps.is_empty());
    }

    #[test]
    fn replay_draws_a_stroke_with_scripted_tool() {
        let mut state = InputState::from_config(&Config::default());
        let summary = Script::parse(SQUIGGLE).unwrap().replay(&mut state);

        assert_eq!(summary, ReplaySummary { applied: 6, skipped: 0 });
        let strokes = state.surface.strokes();
        assert_eq!(strokes.len(), 1);
        let stroke = strokes.last().unwrap();
        assert_eq!(stroke.color(), RED);
        assert_eq!(stroke.thickness(), 30.0);
        assert_eq!(stroke.points(), &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn invalid_color_is_skipped_and_tool_kept() {
        let mut state = InputState::from_config(&Config::default());
        let script = Script {
            steps: vec![
                Step::Color {
                    color: "sparkly".to_string(),
                },
                Step::Down { x: 1.0, y: 1.0 },
                Step::Up { x: 1.0, y: 1.0 },
            ],
        };

        let summary = script.replay(&mut state);
        assert_eq!(summary.skipped, 1);
        assert_eq!(state.surface.strokes().last().unwrap().color(), BLACK);
    }

    #[test]
    fn undo_on_empty_canvas_counts_as_skipped() {
        let mut state = InputState::from_config(&Config::default());
        let script = Script {
            steps: vec![Step::Undo, Step::Move { x: 3.0, y: 3.0 }],
        };
        assert_eq!(
            script.replay(&mut state),
            ReplaySummary {
                applied: 0,
                skipped: 2
            }
        );
    }
}
