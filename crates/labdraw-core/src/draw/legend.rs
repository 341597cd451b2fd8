//! Legend: a fixed list of color swatches with descriptive text.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, Label, Shape, ShapeDefinition, SvgNode, TextDefinition, VerticalAlign},
    geometry::{Bounds, Point, Size, Viewport},
};

const SWATCH_SIZE: Size = Size::new(0.3, 0.2);
/// Swatch origin relative to the entry position.
const SWATCH_OFFSET: Point = Point::new(-0.2, -0.1);
/// Distance from the entry position to the start of its text.
const TEXT_OFFSET: f32 = 0.3;

/// One legend row: a swatch of `color` followed by `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    position: Point,
    color: Color,
    text: String,
}

impl LegendEntry {
    pub fn new(position: Point, color: Color, text: impl Into<String>) -> Self {
        Self {
            position,
            color,
            text: text.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A legend drawn as swatch-plus-label entries.
///
/// Swatches are borderless and drawn with `swatch_opacity`. Entry text is
/// vertically centered on the entry position, regardless of the vertical
/// alignment in the text definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    text: TextDefinition,
    swatch_opacity: f32,
}

impl Legend {
    pub fn new(text: TextDefinition) -> Self {
        let mut text = text;
        text.set_valign(VerticalAlign::Center);
        Self {
            entries: Vec::new(),
            text,
            swatch_opacity: 0.7,
        }
    }

    pub fn add_entry(&mut self, entry: LegendEntry) {
        self.entries.push(entry);
    }

    pub fn set_swatch_opacity(&mut self, opacity: f32) {
        self.swatch_opacity = opacity;
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn swatch_opacity(&self) -> f32 {
        self.swatch_opacity
    }

    /// Returns true if every entry position is finite.
    pub fn is_finite(&self) -> bool {
        self.entries.iter().all(|entry| entry.position.is_finite())
    }

    fn swatch(&self, entry: &LegendEntry) -> Shape {
        let mut definition = ShapeDefinition::new();
        definition.set_fill_color(Some(entry.color));
        definition.set_opacity(self.swatch_opacity);
        Shape::rectangle(entry.position.add_point(SWATCH_OFFSET), SWATCH_SIZE, definition)
    }

    fn label(&self, entry: &LegendEntry) -> Label {
        let anchor = entry.position.add_point(Point::new(TEXT_OFFSET, 0.0));
        Label::new(entry.text.clone(), anchor, self.text.clone())
    }
}

impl Drawable for Legend {
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode {
        let mut group = svg_element::Group::new().set("class", "legend");
        for entry in &self.entries {
            group = group
                .add(self.swatch(entry).render_to_svg(viewport))
                .add(self.label(entry).render_to_svg(viewport));
        }
        Box::new(group)
    }

    fn bounds(&self, viewport: &Viewport) -> Bounds {
        self.entries
            .iter()
            .map(|entry| {
                self.swatch(entry)
                    .bounds(viewport)
                    .merge(&self.label(entry).bounds(viewport))
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn legend() -> Legend {
        let mut legend = Legend::new(TextDefinition::new());
        legend.add_entry(LegendEntry::new(
            Point::new(2.0, 0.5),
            Color::new("#4285F4").unwrap(),
            "Network Infrastructure",
        ));
        legend.add_entry(LegendEntry::new(
            Point::new(6.0, 0.5),
            Color::new("#EA4335").unwrap(),
            "Compute Resources",
        ));
        legend
    }

    #[test]
    fn test_legend_swatch_geometry() {
        let legend = legend();
        let swatch = legend.swatch(&legend.entries()[0]);
        let extent = swatch.kind().extent();

        assert_approx_eq!(f32, extent.min_x(), 1.8, epsilon = 1e-5);
        assert_approx_eq!(f32, extent.min_y(), 0.4, epsilon = 1e-5);
        assert_approx_eq!(f32, extent.width(), 0.3, epsilon = 1e-5);
        assert_approx_eq!(f32, extent.height(), 0.2, epsilon = 1e-5);
        assert!(swatch.definition().stroke().is_none());
        assert_approx_eq!(f32, swatch.definition().opacity(), 0.7);
    }

    #[test]
    fn test_legend_text_is_vertically_centered() {
        let legend = legend();
        let label = legend.label(&legend.entries()[1]);
        assert_eq!(label.definition().valign(), VerticalAlign::Center);
        assert_approx_eq!(f32, label.position().x(), 6.3, epsilon = 1e-5);
    }

    #[test]
    fn test_legend_render_contains_all_entries() {
        let viewport = Viewport::new(Size::new(24.0, 16.0), 72.0);
        let rendered = legend().render_to_svg(&viewport).to_string();

        assert_eq!(rendered.matches("<rect").count(), 2);
        assert!(rendered.contains("Network Infrastructure"));
        assert!(rendered.contains("Compute Resources"));
        assert!(rendered.contains(r#"fill-opacity="0.7""#));
    }

    #[test]
    fn test_empty_legend_bounds() {
        let viewport = Viewport::new(Size::new(24.0, 16.0), 72.0);
        let legend = Legend::new(TextDefinition::new());
        assert_eq!(legend.bounds(&viewport), Bounds::default());
    }
}
