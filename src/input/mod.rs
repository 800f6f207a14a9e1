//! Input handling and brush state.
//!
//! This module translates host pointer events and toolbar actions into canvas
//! operations. It owns the brush settings (color, size) read when a stroke
//! starts, and the idle/drawing lifecycle of the stroke in progress.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{EventResponse, PointerEvent};
pub use state::{Action, InputState};
pub use tool::{BrushPreset, ToolCommand, ToolError, ToolState};
