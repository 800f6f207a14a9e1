//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex color, optionally with alpha (#AARRGGBB)
/// default_color = "#FF8800"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (black, white, red, green, blue, yellow, orange, pink, purple, brown, ...)
    /// or a `#RRGGBB` / `#AARRGGBB` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the specification, returning `None` for unknown names or malformed hex.
    pub fn try_to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgba8(*r, *g, *b, 255)),
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names default to black with a warning.
    pub fn to_color(&self) -> Color {
        self.try_to_color().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using black", self);
            BLACK
        })
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ORANGE, RED};

    #[test]
    fn named_hex_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::from("red").to_color(), RED);
        assert_eq!(ColorSpec::from("#FF0000").to_color(), RED);
        assert_eq!(
            ColorSpec::Rgb([255, 0, 0]).to_color(),
            Color::from_rgba8(255, 0, 0, 255)
        );
        assert_eq!(ColorSpec::from("orange").try_to_color(), Some(ORANGE));
    }

    #[test]
    fn unknown_names_fall_back_to_black() {
        let spec = ColorSpec::from("chartreuse");
        assert!(spec.try_to_color().is_none());
        assert_eq!(spec.to_color(), BLACK);
    }

    #[test]
    fn specs_deserialize_from_strings_and_arrays() {
        #[derive(Deserialize)]
        struct Wrapper {
            colors: Vec<ColorSpec>,
        }

        let parsed: Wrapper = toml::from_str(r##"colors = ["blue", "#00FF00", [1, 2, 3]]"##).unwrap();
        assert_eq!(
            parsed.colors,
            vec![
                ColorSpec::from("blue"),
                ColorSpec::from("#00FF00"),
                ColorSpec::Rgb([1, 2, 3]),
            ]
        );
    }
}
