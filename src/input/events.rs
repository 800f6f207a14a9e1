//! Generic pointer event types for cross-backend compatibility.

/// Raw pointer input delivered by the host (touch screen, mouse, stylus).
///
/// Hosts map their native events onto these variants; everything the canvas
/// does not draw with arrives as one of the "ignored" variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Finger touched down (starts a stroke)
    Down { x: f64, y: f64 },
    /// Finger moved while touching (extends the stroke)
    Move { x: f64, y: f64 },
    /// Finger lifted (commits the stroke)
    Up { x: f64, y: f64 },
    /// Gesture aborted by the system (ignored)
    Cancel,
    /// Pointer moved without touching, e.g. a hovering stylus (ignored)
    Hover { x: f64, y: f64 },
}

/// Whether the canvas consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// The event changed (or may have changed) the canvas; a repaint was requested
    Handled,
    /// The event is not a drawing event and should be passed on
    Unhandled,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }
}
