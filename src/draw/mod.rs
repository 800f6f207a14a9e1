//! Canvas model and rendering (Cairo-based).
//!
//! This module defines the core drawing types of the canvas:
//! - [`Color`]: RGBA color representation with the crayon palette
//! - [`Stroke`]: one freehand path with its own color and thickness
//! - [`StrokeList`]: committed strokes in paint order
//! - [`Raster`]: an imported background image
//! - [`CanvasSurface`]: the live canvas, and [`CanvasSnapshot`] for exports
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod raster;
pub mod render;
pub mod stroke;
pub mod stroke_list;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use raster::{Raster, RasterError};
pub use render::{render_freehand_borrowed, render_scene, render_stroke, render_strokes};
pub use stroke::Stroke;
pub use stroke_list::StrokeList;
pub use surface::{CanvasSnapshot, CanvasSurface, DrawingState};

pub use color::{
    BLACK, BLUE, BROWN, DEFAULT_PALETTE, GREEN, ORANGE, PINK, PURPLE, RED, TRANSPARENT, WHITE,
    YELLOW,
};
