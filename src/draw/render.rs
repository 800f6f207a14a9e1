//! Cairo-based rendering functions for the canvas.

use super::color::Color;
use super::raster::Raster;
use super::stroke::Stroke;

/// Paints the paper: a solid fill, then the imported background (if any) at the origin.
///
/// The fill uses the `Source` operator so the target's previous contents never
/// bleed through a translucent background image.
pub fn render_background(
    ctx: &cairo::Context,
    paper: Color,
    background: Option<&Raster>,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(paper.r, paper.g, paper.b, paper.a);
    ctx.paint()?;
    ctx.set_operator(cairo::Operator::Over);

    if let Some(raster) = background {
        let surface = raster.to_surface()?;
        ctx.set_source_surface(&surface, 0.0, 0.0)?;
        ctx.paint()?;
    }

    ctx.restore()
}

/// Renders all strokes in a collection to a Cairo context.
///
/// Strokes are drawn in the order they appear (first stroke = bottom layer).
pub fn render_strokes<'a>(ctx: &cairo::Context, strokes: impl IntoIterator<Item = &'a Stroke>) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single stroke using its own stored color and thickness.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    render_freehand_borrowed(ctx, stroke.points(), stroke.color(), stroke.thickness());
}

/// Render freehand stroke (polyline through points)
///
/// A single point becomes a round dot of the stroke's width; an empty slice draws nothing.
pub fn render_freehand_borrowed(
    ctx: &cairo::Context,
    points: &[(f64, f64)],
    color: Color,
    thick: f64,
) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);

    if rest.is_empty() {
        ctx.new_path();
        ctx.arc(x0, y0, thick / 2.0, 0.0, std::f64::consts::PI * 2.0);
        let _ = ctx.fill();
        return;
    }

    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(x0, y0);
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }

    let _ = ctx.stroke();
}

/// Renders a full canvas: paper and background, committed strokes, then the
/// stroke currently being drawn.
///
/// Returns the context's error status so callers that encode the result can
/// report a failed render instead of writing a broken image.
pub fn render_scene<'a>(
    ctx: &cairo::Context,
    paper: Color,
    background: Option<&Raster>,
    strokes: impl IntoIterator<Item = &'a Stroke>,
    in_progress: Option<&Stroke>,
) -> Result<(), cairo::Error> {
    ctx.set_antialias(cairo::Antialias::Good);
    render_background(ctx, paper, background)?;
    render_strokes(ctx, strokes);
    if let Some(stroke) = in_progress {
        render_stroke(ctx, stroke);
    }
    ctx.status()
}
