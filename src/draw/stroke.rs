//! Freehand stroke definition.

use super::color::Color;
use crate::util::Rect;

/// Thinnest line the canvas will ever draw, in pixels.
pub const MIN_THICKNESS: f64 = 1.0;

/// Clamps a requested thickness to a drawable, positive width.
///
/// Non-finite values fall back to [`MIN_THICKNESS`].
pub fn clamp_thickness(thick: f64) -> f64 {
    if thick.is_finite() {
        thick.max(MIN_THICKNESS)
    } else {
        MIN_THICKNESS
    }
}

/// One continuous freehand path from pointer-down to pointer-up.
///
/// A stroke captures the color and thickness that were active when it began,
/// so later tool changes never repaint it.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Sequence of (x, y) coordinates traced by the finger, in drawing order
    points: Vec<(f64, f64)>,
    /// Stroke color
    color: Color,
    /// Line thickness in pixels
    thick: f64,
}

impl Stroke {
    /// Starts a stroke at `(x, y)` with the given paint attributes.
    pub fn new(x: f64, y: f64, color: Color, thick: f64) -> Self {
        Self {
            points: vec![(x, y)],
            color,
            thick: clamp_thickness(thick),
        }
    }

    /// Builds a stroke from an existing point list. Mostly useful for tests and replay.
    pub fn from_points(points: Vec<(f64, f64)>, color: Color, thick: f64) -> Self {
        Self {
            points,
            color,
            thick: clamp_thickness(thick),
        }
    }

    /// Appends a point to the end of the path.
    pub fn push_point(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thick
    }

    /// Returns the axis-aligned bounding box for this stroke, expanded to cover stroke width.
    ///
    /// Returns `None` for a stroke without points.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.thick)
    }
}

fn stroke_padding(thick: f64) -> f64 {
    (thick / 2.0).ceil().max(1.0)
}

pub(crate) fn bounding_box_for_points(points: &[(f64, f64)], thick: f64) -> Option<Rect> {
    let (&(first_x, first_y), rest) = points.split_first()?;
    let mut min_x = first_x;
    let mut max_x = first_x;
    let mut min_y = first_y;
    let mut max_y = first_y;

    for &(x, y) in rest {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padding = stroke_padding(thick);
    ensure_positive_rect(
        min_x - padding,
        min_y - padding,
        max_x + padding,
        max_y + padding,
    )
}

fn ensure_positive_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Rect> {
    let min_x = min_x.floor() as i32;
    let min_y = min_y.floor() as i32;
    let mut max_x = max_x.ceil() as i32;
    let mut max_y = max_y.ceil() as i32;
    if min_x == max_x {
        max_x += 1;
    }
    if min_y == max_y {
        max_y += 1;
    }
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn bounding_box_expands_with_thickness() {
        let stroke = Stroke::from_points(vec![(10.0, 20.0), (30.0, 40.0)], WHITE, 6.0);

        let rect = stroke.bounding_box().expect("stroke should have bounds");
        assert_eq!(rect.x, 7);
        assert_eq!(rect.y, 17);
        assert_eq!(rect.width, 26);
        assert_eq!(rect.height, 26);
    }

    #[test]
    fn single_point_stroke_still_has_area() {
        let stroke = Stroke::new(5.0, 5.0, BLACK, 1.0);
        let rect = stroke.bounding_box().expect("dot should have bounds");
        assert!(rect.is_valid());
        assert!(rect.x <= 4 && rect.y <= 4);
    }

    #[test]
    fn empty_stroke_has_no_bounds() {
        let stroke = Stroke::from_points(Vec::new(), BLACK, 3.0);
        assert!(stroke.bounding_box().is_none());
    }

    #[test]
    fn thickness_is_clamped_positive() {
        assert_eq!(Stroke::new(0.0, 0.0, BLACK, 0.0).thickness(), MIN_THICKNESS);
        assert_eq!(Stroke::new(0.0, 0.0, BLACK, -4.0).thickness(), MIN_THICKNESS);
        assert_eq!(
            Stroke::new(0.0, 0.0, BLACK, f64::INFINITY).thickness(),
            MIN_THICKNESS
        );
        assert_eq!(Stroke::new(0.0, 0.0, BLACK, 12.5).thickness(), 12.5);
    }
}
