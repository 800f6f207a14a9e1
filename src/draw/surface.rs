//! The drawing surface: committed strokes, the stroke in progress, and the paper.

use super::color::{Color, WHITE};
use super::raster::{Raster, RasterError};
use super::render;
use super::stroke::Stroke;
use super::stroke_list::StrokeList;
use crate::input::tool::{ToolCommand, ToolState};
use cairo::{Context, Format, ImageSurface};

/// Stroke lifecycle: either nothing is being drawn, or exactly one stroke is.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Waiting for a finger to touch down
    Idle,
    /// Finger is down; points accumulate into `stroke`
    Drawing { stroke: Stroke },
}

/// Owns everything visible on the canvas.
///
/// Committed strokes are painted in order on top of the paper (or the imported
/// background), and the in-progress stroke is painted last. The in-progress
/// stroke is never part of [`CanvasSurface::strokes`].
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    strokes: StrokeList,
    state: DrawingState,
    tool: ToolState,
    background: Option<Raster>,
    paper: Color,
    /// Maximum number of committed strokes (0 = unlimited)
    max_strokes: usize,
    needs_redraw: bool,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(ToolState::default())
    }
}

impl CanvasSurface {
    /// Creates an empty white canvas with the given brush.
    pub fn new(tool: ToolState) -> Self {
        Self::with_settings(tool, WHITE, 0)
    }

    /// Creates an empty canvas with a custom paper color and stroke limit.
    pub fn with_settings(tool: ToolState, paper: Color, max_strokes: usize) -> Self {
        Self {
            strokes: StrokeList::new(),
            state: DrawingState::Idle,
            tool,
            background: None,
            paper,
            max_strokes,
            needs_redraw: true,
        }
    }

    /// Starts a new stroke at `(x, y)` using the current brush.
    ///
    /// Any stroke already in progress is discarded.
    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        if matches!(self.state, DrawingState::Drawing { .. }) {
            log::debug!("Discarding unfinished stroke for new touch at ({x:.1}, {y:.1})");
        }
        self.state = DrawingState::Drawing {
            stroke: Stroke::new(x, y, self.tool.color(), self.tool.thickness()),
        };
    }

    /// Appends a point to the in-progress stroke.
    ///
    /// Returns `false` (and does nothing) when no stroke is being drawn.
    pub fn extend_stroke(&mut self, x: f64, y: f64) -> bool {
        match &mut self.state {
            DrawingState::Drawing { stroke } => {
                stroke.push_point(x, y);
                true
            }
            DrawingState::Idle => false,
        }
    }

    /// Moves the in-progress stroke onto the stroke list and returns to idle.
    ///
    /// Returns `true` if a stroke was added.
    pub fn commit_stroke(&mut self) -> bool {
        let DrawingState::Drawing { stroke } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return false;
        };

        if stroke.points().is_empty() {
            return false;
        }

        let points = stroke.points().len();
        if self.strokes.try_push(stroke, self.max_strokes) {
            log::debug!(
                "Committed stroke #{} with {} points",
                self.strokes.len(),
                points
            );
            true
        } else {
            log::warn!(
                "Stroke limit ({}) reached; discarding new stroke",
                self.max_strokes
            );
            self.needs_redraw = true;
            false
        }
    }

    /// Removes the most recently committed stroke. There is no redo.
    pub fn undo(&mut self) -> Option<Stroke> {
        let removed = self.strokes.undo();
        if removed.is_some() {
            log::debug!("Undo: {} strokes remain", self.strokes.len());
            self.needs_redraw = true;
        }
        removed
    }

    /// Applies a brush change; it takes effect on the next [`begin_stroke`](Self::begin_stroke).
    pub fn apply_tool_command(&mut self, command: ToolCommand) {
        self.tool.apply(command);
        self.needs_redraw = true;
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.apply_tool_command(ToolCommand::SetBrushSize(size));
    }

    pub fn set_color(&mut self, color: Color) {
        self.apply_tool_command(ToolCommand::SetColor(color));
    }

    /// Places an already-decoded image beneath all strokes.
    pub fn set_background(&mut self, raster: Raster) {
        log::info!(
            "Background set ({}x{})",
            raster.width(),
            raster.height()
        );
        self.background = Some(raster);
        self.needs_redraw = true;
    }

    /// Returns to the blank paper.
    pub fn clear_background(&mut self) {
        if self.background.take().is_some() {
            self.needs_redraw = true;
        }
    }

    pub fn strokes(&self) -> &StrokeList {
        &self.strokes
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// The stroke currently being drawn, if any.
    pub fn in_progress(&self) -> Option<&Stroke> {
        match &self.state {
            DrawingState::Drawing { stroke } => Some(stroke),
            DrawingState::Idle => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn background(&self) -> Option<&Raster> {
        self.background.as_ref()
    }

    pub fn paper(&self) -> Color {
        self.paper
    }

    /// Marks the surface as needing a repaint.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns whether a repaint was requested and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Paints the whole canvas into `ctx`.
    ///
    /// Depends only on the surface's current state: two calls without a
    /// mutation in between produce identical pixels.
    pub fn render(&self, ctx: &Context) -> Result<(), cairo::Error> {
        render::render_scene(
            ctx,
            self.paper,
            self.background.as_ref(),
            &self.strokes,
            self.in_progress(),
        )
    }

    /// Renders the canvas into a fresh `width` x `height` raster.
    pub fn render_to_raster(&self, width: i32, height: i32) -> Result<Raster, RasterError> {
        let surface = rasterize(width, height, |ctx| self.render(ctx))?;
        Raster::from_surface(&surface)
    }

    /// Copies everything needed to render the canvas elsewhere.
    ///
    /// The snapshot is detached from the surface, so edits made after this
    /// call never show up in it.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            paper: self.paper,
            background: self.background.clone(),
            strokes: self.strokes.as_slice().to_vec(),
            in_progress: self.in_progress().cloned(),
            tool: self.tool,
        }
    }
}

/// Immutable copy of a canvas, safe to hand to a background export worker.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    pub paper: Color,
    pub background: Option<Raster>,
    pub strokes: Vec<Stroke>,
    pub in_progress: Option<Stroke>,
    pub tool: ToolState,
}

impl CanvasSnapshot {
    /// Paints the snapshot exactly like [`CanvasSurface::render`] would have.
    pub fn render(&self, ctx: &Context) -> Result<(), cairo::Error> {
        render::render_scene(
            ctx,
            self.paper,
            self.background.as_ref(),
            &self.strokes,
            self.in_progress.as_ref(),
        )
    }

    /// Renders into a new ARGB32 image surface of the requested size.
    pub fn render_to_surface(&self, width: i32, height: i32) -> Result<ImageSurface, cairo::Error> {
        rasterize(width, height, |ctx| self.render(ctx))
    }
}

fn rasterize(
    width: i32,
    height: i32,
    paint: impl FnOnce(&Context) -> Result<(), cairo::Error>,
) -> Result<ImageSurface, cairo::Error> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let ctx = Context::new(&surface)?;
        paint(&ctx)?;
    }
    surface.flush();
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, BLUE, RED};

    fn surface() -> CanvasSurface {
        CanvasSurface::new(ToolState::new(BLACK, 4, 1.0))
    }

    #[test]
    fn begin_extend_commit_records_points_in_order() {
        let mut canvas = surface();
        canvas.begin_stroke(0.0, 0.0);
        assert!(canvas.extend_stroke(10.0, 0.0));
        assert!(canvas.extend_stroke(10.0, 10.0));
        assert!(canvas.strokes().is_empty());
        assert!(canvas.commit_stroke());

        assert_eq!(canvas.strokes().len(), 1);
        let stroke = canvas.strokes().last().unwrap();
        assert_eq!(stroke.points(), &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert!(!canvas.is_drawing());

        assert!(canvas.undo().is_some());
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn extend_without_stroke_is_a_no_op() {
        let mut canvas = surface();
        assert!(!canvas.extend_stroke(3.0, 3.0));
        assert!(canvas.in_progress().is_none());
        assert!(!canvas.commit_stroke());
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn undo_on_empty_list_leaves_redraw_flag_alone() {
        let mut canvas = surface();
        canvas.take_redraw();
        assert!(canvas.undo().is_none());
        assert!(!canvas.needs_redraw());
    }

    #[test]
    fn undo_requests_redraw() {
        let mut canvas = surface();
        canvas.begin_stroke(1.0, 1.0);
        canvas.commit_stroke();
        canvas.take_redraw();
        canvas.undo();
        assert!(canvas.take_redraw());
        assert!(!canvas.needs_redraw());
    }

    #[test]
    fn new_begin_discards_unfinished_stroke() {
        let mut canvas = surface();
        canvas.begin_stroke(0.0, 0.0);
        canvas.extend_stroke(5.0, 5.0);
        canvas.begin_stroke(20.0, 20.0);
        assert_eq!(canvas.in_progress().unwrap().points(), &[(20.0, 20.0)]);
        canvas.commit_stroke();
        assert_eq!(canvas.strokes().len(), 1);
    }

    #[test]
    fn stroke_keeps_tool_from_when_it_began() {
        let mut canvas = surface();
        canvas.begin_stroke(0.0, 0.0);
        canvas.set_color(RED);
        canvas.set_brush_size(30);
        canvas.extend_stroke(5.0, 0.0);
        canvas.commit_stroke();

        let committed = canvas.strokes().last().unwrap();
        assert_eq!(committed.color(), BLACK);
        assert_eq!(committed.thickness(), 4.0);

        canvas.begin_stroke(1.0, 1.0);
        let next = canvas.in_progress().unwrap();
        assert_eq!(next.color(), RED);
        assert_eq!(next.thickness(), 30.0);
    }

    #[test]
    fn stroke_limit_discards_extra_commits() {
        let mut canvas = CanvasSurface::with_settings(ToolState::default(), WHITE, 1);
        canvas.begin_stroke(0.0, 0.0);
        assert!(canvas.commit_stroke());
        canvas.begin_stroke(1.0, 1.0);
        assert!(!canvas.commit_stroke());
        assert_eq!(canvas.strokes().len(), 1);
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn render_is_deterministic() {
        let mut canvas = surface();
        canvas.set_color(BLUE);
        canvas.begin_stroke(2.0, 2.0);
        canvas.extend_stroke(30.0, 20.0);
        canvas.commit_stroke();
        canvas.begin_stroke(5.0, 25.0);
        canvas.extend_stroke(25.0, 5.0);

        let first = canvas.render_to_raster(40, 30).unwrap();
        let second = canvas.render_to_raster(40, 30).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let mut canvas = surface();
        canvas.begin_stroke(0.0, 0.0);
        canvas.commit_stroke();
        let snapshot = canvas.snapshot();

        canvas.undo();
        canvas.begin_stroke(4.0, 4.0);

        assert_eq!(snapshot.strokes.len(), 1);
        assert!(snapshot.in_progress.is_none());
    }

    #[test]
    fn snapshot_renders_like_the_surface() {
        let mut canvas = surface();
        canvas.set_background(Raster::filled(20, 20, RED).unwrap());
        canvas.begin_stroke(0.0, 10.0);
        canvas.extend_stroke(20.0, 10.0);

        let from_snapshot = canvas.snapshot().render_to_surface(20, 20).unwrap();
        let expected = canvas.render_to_raster(20, 20).unwrap();
        let actual = Raster::from_surface(&from_snapshot).unwrap();
        assert_eq!(actual, expected);
    }
}
