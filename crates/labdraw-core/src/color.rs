//! Color handling for labdraw scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS color strings and emitted
//! to SVG as an opaque `#rrggbb` paint plus a separate opacity value, which
//! every SVG consumer (browsers, `usvg`, `svg2pdf`) understands.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use labdraw_core::color::Color;
    ///
    /// let blue = Color::new("#4285F4").unwrap();
    /// let white = Color::new("white").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns an opaque white.
    pub fn white() -> Self {
        Self::new("white").expect("'white' is a valid CSS color")
    }

    /// Returns a sanitized, ID-safe string representation of this color.
    ///
    /// The result is used to build SVG `id` attributes for arrow markers, so it
    /// contains only ASCII alphanumerics and underscores and starts with a letter.
    ///
    /// ```
    /// use labdraw_core::color::Color;
    ///
    /// let id = Color::new("#34A853").unwrap().to_id_safe_string();
    /// assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("c{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// ```
    /// use labdraw_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// assert_eq!(red.with_alpha(0.5).alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Multiplies the current alpha by `opacity`.
    ///
    /// Used to apply a whole-element opacity on top of a color that may
    /// already carry its own transparency.
    pub fn faded(self, opacity: f32) -> Self {
        self.with_alpha(self.alpha() * opacity.clamp(0.0, 1.0))
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as 8-bit sRGB components `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Returns the opaque SVG paint value (`#rrggbb`), ignoring alpha.
    ///
    /// Pair with [`Color::alpha`] as `fill-opacity`/`stroke-opacity`.
    pub fn to_svg_paint(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_svg_paint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#4285F4").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.to_svg_paint(), "#000000");
    }

    #[test]
    fn test_color_svg_paint_is_hex() {
        let blue = Color::new("#4285F4").unwrap();
        assert_eq!(blue.to_svg_paint(), "#4285f4");

        // Alpha never leaks into the paint value
        assert_eq!(blue.with_alpha(0.1).to_svg_paint(), "#4285f4");
    }

    #[test]
    fn test_color_faded_multiplies_alpha() {
        let color = Color::new("red").unwrap().with_alpha(0.5);
        let faded = color.faded(0.5);
        assert!((faded.alpha() - 0.25).abs() < 0.001);

        // Opacity is clamped
        let unchanged = color.faded(3.0);
        assert!((unchanged.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let safe_id = Color::new("#ff0000").unwrap().to_id_safe_string();
        assert_eq!(safe_id, "cff0000ff");
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
