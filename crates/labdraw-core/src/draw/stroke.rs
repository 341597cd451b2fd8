//! Stroke definitions.
//!
//! Borders of shapes, connector lines and text-box outlines all share
//! [`StrokeDefinition`]. Widths are in points, so a 2.0 stroke looks the same
//! whatever the canvas scale is.
//!
//! ```
//! use labdraw_core::draw::StrokeDefinition;
//! use labdraw_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::solid(Color::new("#EA4335").unwrap(), 2.0);
//!
//! let rect = svg_element::Rectangle::new().set("x", 0).set("y", 0);
//! let rect = labdraw_core::apply_stroke!(rect, &stroke);
//! ```

use crate::color::Color;

/// A solid line of a given color and width.
///
/// The default is a 1pt black line, the usual default border of a plotted
/// patch.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width in points.
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns a copy whose color alpha is multiplied by `opacity`.
    pub fn faded(&self, opacity: f32) -> Self {
        Self {
            color: self.color.faded(opacity),
            width: self.width,
        }
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity` and `stroke-width` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {
        $element
            .set("stroke", $stroke.color().to_svg_paint())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
    };
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_svg_paint(), "#000000");
    }

    #[test]
    fn test_stroke_faded() {
        let stroke = StrokeDefinition::solid(Color::new("#4285F4").unwrap(), 1.0);
        let faded = stroke.faded(0.1);
        assert!((faded.color().alpha() - 0.1).abs() < 1e-6);
        assert_eq!(faded.width(), stroke.width());
    }

    #[test]
    fn test_apply_stroke_sets_only_paint_and_width() {
        let stroke = StrokeDefinition::solid(Color::new("#EA4335").unwrap(), 2.0);
        let line = svg_element::Line::new();
        let line = crate::apply_stroke!(line, &stroke);

        let rendered = line.to_string();
        assert!(rendered.contains(r##"stroke="#ea4335""##));
        assert!(rendered.contains(r#"stroke-opacity="1""#));
        assert!(rendered.contains(r#"stroke-width="2""#));
        assert!(!rendered.contains("stroke-dasharray"));
        assert!(!rendered.contains("stroke-linecap"));
    }
}
