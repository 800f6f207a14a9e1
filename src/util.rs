//! Utility functions for colors and geometry.
//!
//! This module provides:
//! - Color name and hex string parsing (used by the palette, config, and scripts)
//!   and the reverse lookup used in logs
//! - A small axis-aligned rectangle used for stroke bounds

use crate::draw::{Color, color::*};

// ============================================================================
// Color Parsing
// ============================================================================

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - The crayon palette: "black", "white", "red", "green", "blue", "yellow",
///   "orange", "pink", "purple", "brown"
/// - Common extras: "gray"/"grey", "lightgray", "darkgray", "cyan", "magenta"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "purple" => Some(PURPLE),
        "brown" => Some(BROWN),
        "gray" | "grey" => Some(Color::from_argb(0xFF888888)),
        "lightgray" | "lightgrey" => Some(Color::from_argb(0xFFCCCCCC)),
        "darkgray" | "darkgrey" => Some(Color::from_argb(0xFF444444)),
        "cyan" => Some(Color::from_argb(0xFF00FFFF)),
        "magenta" => Some(Color::from_argb(0xFFFF00FF)),
        _ => None,
    }
}

/// Parses `#RRGGBB` or `#AARRGGBB` hex strings.
///
/// Six-digit values are fully opaque. Any other length is rejected.
pub fn hex_to_color(spec: &str) -> Option<Color> {
    let digits = spec.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color::from_argb(0xFF00_0000 | value)),
        8 => Some(Color::from_argb(value)),
        _ => None,
    }
}

/// Resolves a palette entry: a hex string (leading `#`) or a color name.
pub fn parse_color(spec: &str) -> Option<Color> {
    if spec.trim_start().starts_with('#') {
        hex_to_color(spec)
    } else {
        name_to_color(spec)
    }
}

const COLOR_NAMES: [&str; 15] = [
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "pink",
    "purple",
    "brown",
    "gray",
    "lightgray",
    "darkgray",
    "cyan",
    "magenta",
];

/// Maps a Color value back to the name [`name_to_color`] accepts for it.
///
/// Colors are compared at 8-bit precision. Returns `None` for colors without a name.
pub fn color_to_name(color: &Color) -> Option<&'static str> {
    let argb = color.to_argb();
    COLOR_NAMES
        .into_iter()
        .find(|name| name_to_color(name).is_some_and(|named| named.to_argb() == argb))
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns true if the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_color_mappings() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color(" Black ").unwrap(), BLACK);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn hex_strings_parse_with_and_without_alpha() {
        assert_eq!(parse_color("#FF0000").unwrap(), RED);
        assert_eq!(parse_color("#ff0000ff").unwrap(), Color::from_argb(0xFF0000FF));
        assert_eq!(parse_color("#80000000").unwrap().a, 128.0 / 255.0);
    }

    #[test]
    fn malformed_hex_strings_are_rejected() {
        assert!(parse_color("#FFF").is_none());
        assert!(parse_color("#GG0000").is_none());
        assert!(parse_color("#+F0000").is_none());
        assert!(parse_color("FF0000").is_none());
        assert!(parse_color("").is_none());
    }

    #[test]
    fn color_to_name_covers_the_palette() {
        // Aliases such as magenta/pink resolve to the first name with that value.
        for name in COLOR_NAMES {
            let color = name_to_color(name).unwrap();
            let found = color_to_name(&color).unwrap();
            assert_eq!(name_to_color(found), Some(color));
        }
        assert_eq!(color_to_name(&Color::from_argb(0xFF888888)), Some("gray"));
        assert_eq!(color_to_name(&PURPLE), Some("purple"));
        assert_eq!(color_to_name(&BROWN), Some("brown"));
        assert_eq!(color_to_name(&Color::from_argb(0xFF123456)), None);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 5).unwrap();
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 7));
        assert!(!rect.contains(5, 8));
        assert!(Rect::new(0, 0, 0, 3).is_none());
    }
}
