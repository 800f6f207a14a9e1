use crate::input::events::{EventResponse, PointerEvent};

use super::InputState;

impl InputState {
    /// Processes one pointer event.
    ///
    /// # Behavior
    /// - `Down`: starts a new stroke, discarding any unfinished one
    /// - `Move`: extends the stroke; ignored when no finger is down
    /// - `Up`: commits the stroke
    /// - Anything else is left for the host and reported as unhandled
    ///
    /// Every handled event marks the surface for repaint.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> EventResponse {
        match event {
            PointerEvent::Down { x, y } => {
                self.surface.begin_stroke(x, y);
            }
            PointerEvent::Move { x, y } => {
                if !self.surface.extend_stroke(x, y) {
                    return EventResponse::Unhandled;
                }
            }
            PointerEvent::Up { .. } => {
                self.surface.commit_stroke();
            }
            PointerEvent::Cancel | PointerEvent::Hover { .. } => {
                return EventResponse::Unhandled;
            }
        }

        self.surface.request_redraw();
        EventResponse::Handled
    }
}
