//! Ordered container for committed strokes.

use super::stroke::Stroke;

/// All committed strokes of the drawing, in paint order.
///
/// The first stroke is the bottom layer, the last one is painted on top and is
/// the one removed by [`StrokeList::undo`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeList {
    strokes: Vec<Stroke>,
}

impl StrokeList {
    /// Creates a new empty list.
    pub const fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Adds a stroke on top of the existing ones.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Attempts to add a stroke, enforcing a maximum stroke count when `max` > 0.
    ///
    /// Returns `true` if the stroke was added, `false` if the limit would be exceeded.
    pub fn try_push(&mut self, stroke: Stroke, max: usize) -> bool {
        if max == 0 || self.strokes.len() < max {
            self.strokes.push(stroke);
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently committed stroke, if any.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }
}

impl<'a> IntoIterator for &'a StrokeList {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
