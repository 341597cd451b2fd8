//! Filled shapes: rectangles and circles.
//!
//! A [`Shape`] pairs a geometric [`ShapeKind`] in data units with a
//! [`ShapeDefinition`] holding its paint. Opacity applies to the whole shape,
//! fill and border alike.

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode},
    geometry::{Bounds, Point, Size, Viewport},
};

/// Geometry of a shape in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle anchored at its bottom-left corner.
    Rectangle { origin: Point, size: Size },
    Circle { center: Point, radius: f32 },
}

impl ShapeKind {
    /// Geometric extent of the shape, without its border.
    pub fn extent(&self) -> Bounds {
        match *self {
            Self::Rectangle { origin, size } => Bounds::from_origin(origin, size),
            Self::Circle { center, radius } => {
                Bounds::from_center(center, Size::new(radius * 2.0, radius * 2.0))
            }
        }
    }

    /// Returns true if every coordinate and dimension is a finite number.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Rectangle { origin, size } => origin.is_finite() && size.is_finite(),
            Self::Circle { center, radius } => center.is_finite() && radius.is_finite(),
        }
    }
}

/// Paint of a shape.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Fill | `None` (transparent) |
/// | Border | `None` |
/// | Opacity | `1.0` |
/// | Corner radius | `0.0` pt |
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    fill_color: Option<Color>,
    stroke: Option<StrokeDefinition>,
    opacity: f32,
    rounded: f32,
}

impl ShapeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill color. `None` leaves the shape unfilled.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    /// Sets the border. `None` draws no border.
    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    /// Sets the whole-shape opacity, multiplied into fill and border alpha.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Sets the corner radius of rectangles in points. Ignored for circles.
    pub fn set_rounded(&mut self, radius: f32) {
        self.rounded = radius;
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn rounded(&self) -> f32 {
        self.rounded
    }
}

impl Default for ShapeDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke: None,
            opacity: 1.0,
            rounded: 0.0,
        }
    }
}

/// A positioned shape.
///
/// ```
/// # use labdraw_core::color::Color;
/// # use labdraw_core::draw::{Shape, ShapeDefinition, StrokeDefinition};
/// # use labdraw_core::geometry::{Point, Size};
/// let red = Color::new("#EA4335").unwrap();
/// let mut def = ShapeDefinition::new();
/// def.set_fill_color(Some(Color::new("#FFF3E0").unwrap()));
/// def.set_stroke(Some(StrokeDefinition::solid(red, 2.0)));
///
/// let glb = Shape::rectangle(Point::new(8.0, 10.5), Size::new(8.0, 1.5), def);
/// assert_eq!(glb.kind().extent().max_y(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    definition: ShapeDefinition,
}

impl Shape {
    pub fn new(kind: ShapeKind, definition: ShapeDefinition) -> Self {
        Self { kind, definition }
    }

    /// Creates a rectangle from its bottom-left corner and size.
    pub fn rectangle(origin: Point, size: Size, definition: ShapeDefinition) -> Self {
        Self::new(ShapeKind::Rectangle { origin, size }, definition)
    }

    pub fn circle(center: Point, radius: f32, definition: ShapeDefinition) -> Self {
        Self::new(ShapeKind::Circle { center, radius }, definition)
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn definition(&self) -> &ShapeDefinition {
        &self.definition
    }

    fn apply_paint<T: PaintTarget>(&self, mut element: T) -> T {
        let opacity = self.definition.opacity();

        element = match self.definition.fill_color() {
            Some(fill) => {
                let fill = fill.faded(opacity);
                element
                    .with_attr("fill", fill.to_svg_paint().into())
                    .with_attr("fill-opacity", fill.alpha().into())
            }
            None => element.with_attr("fill", "none".into()),
        };

        match self.definition.stroke() {
            Some(stroke) => element.with_stroke(&stroke.faded(opacity)),
            None => element.with_attr("stroke", "none".into()),
        }
    }
}

/// SVG elements a shape can paint.
trait PaintTarget: Sized {
    fn with_attr(self, name: &str, value: svg::node::Value) -> Self;
    fn with_stroke(self, stroke: &StrokeDefinition) -> Self;
}

macro_rules! impl_paint_target {
    ($($element:ty),*) => {
        $(
            impl PaintTarget for $element {
                fn with_attr(self, name: &str, value: svg::node::Value) -> Self {
                    self.set(name, value)
                }

                fn with_stroke(self, stroke: &StrokeDefinition) -> Self {
                    crate::apply_stroke!(self, stroke)
                }
            }
        )*
    };
}

impl_paint_target!(svg_element::Rectangle, svg_element::Circle);

impl Drawable for Shape {
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode {
        match self.kind {
            ShapeKind::Rectangle { .. } => {
                let svg_bounds = viewport.bounds_to_svg(self.kind.extent());
                let mut rect = svg_element::Rectangle::new()
                    .set("x", svg_bounds.min_x())
                    .set("y", svg_bounds.min_y())
                    .set("width", svg_bounds.width())
                    .set("height", svg_bounds.height());

                if self.definition.rounded() > 0.0 {
                    rect = rect.set("rx", self.definition.rounded());
                }

                Box::new(self.apply_paint(rect))
            }
            ShapeKind::Circle { center, radius } => {
                let svg_center = viewport.to_svg(center);
                let circle = svg_element::Circle::new()
                    .set("cx", svg_center.x())
                    .set("cy", svg_center.y())
                    .set("r", viewport.length_to_svg(radius));

                Box::new(self.apply_paint(circle))
            }
        }
    }

    fn bounds(&self, viewport: &Viewport) -> Bounds {
        let extent = self.kind.extent();
        match self.definition.stroke() {
            Some(stroke) => extent.expand(viewport.points_to_units(stroke.width() / 2.0)),
            None => extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(Size::new(24.0, 16.0), 72.0)
    }

    fn bordered(width: f32) -> ShapeDefinition {
        let mut def = ShapeDefinition::new();
        def.set_fill_color(Some(Color::new("#E3F2FD").unwrap()));
        def.set_stroke(Some(StrokeDefinition::solid(
            Color::new("#4285F4").unwrap(),
            width,
        )));
        def
    }

    #[test]
    fn test_shape_definition_defaults() {
        let def = ShapeDefinition::default();
        assert!(def.fill_color().is_none());
        assert!(def.stroke().is_none());
        assert_approx_eq!(f32, def.opacity(), 1.0);
        assert_approx_eq!(f32, def.rounded(), 0.0);
    }

    #[test]
    fn test_circle_extent() {
        let circle = Shape::circle(Point::new(2.2, 9.0), 0.2, ShapeDefinition::new());
        let extent = circle.kind().extent();
        assert_approx_eq!(f32, extent.min_x(), 2.0, epsilon = 1e-5);
        assert_approx_eq!(f32, extent.max_y(), 9.2, epsilon = 1e-5);
    }

    #[test]
    fn test_rectangle_renders_flipped() {
        let rect = Shape::rectangle(Point::new(8.0, 10.5), Size::new(8.0, 1.5), bordered(2.0));
        let rendered = rect.render_to_svg(&viewport()).to_string();

        // Top edge at y = 12 data units is 4 units below the top of a 16 unit canvas
        assert!(rendered.contains(r#"x="576""#));
        assert!(rendered.contains(r#"y="288""#));
        assert!(rendered.contains(r#"width="576""#));
        assert!(rendered.contains(r#"height="108""#));
        assert!(rendered.contains(r##"stroke="#4285f4""##));
    }

    #[test]
    fn test_rectangle_opacity_fades_fill_and_border() {
        let mut def = bordered(1.0);
        def.set_opacity(0.1);
        let title = Shape::rectangle(Point::new(1.0, 14.5), Size::new(22.0, 1.2), def);
        let rendered = title.render_to_svg(&viewport()).to_string();

        assert!(rendered.contains(r#"fill-opacity="0.1""#));
        assert!(rendered.contains(r#"stroke-opacity="0.1""#));
    }

    #[test]
    fn test_shape_without_border_or_fill() {
        let shape = Shape::rectangle(Point::new(1.0, 1.0), Size::new(1.0, 1.0), ShapeDefinition::new());
        let rendered = shape.render_to_svg(&viewport()).to_string();
        assert!(rendered.contains(r#"fill="none""#));
        assert!(rendered.contains(r#"stroke="none""#));
    }

    #[test]
    fn test_bounds_include_half_border() {
        let rect = Shape::rectangle(Point::new(0.5, 0.5), Size::new(23.0, 9.5), bordered(3.0));
        let bounds = rect.bounds(&viewport());
        assert_approx_eq!(f32, bounds.min_x(), 0.5 - 1.5 / 72.0, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.max_y(), 10.0 + 1.5 / 72.0, epsilon = 1e-5);
    }

    #[test]
    fn test_circle_render() {
        let circle = Shape::circle(Point::new(2.2, 9.0), 0.2, bordered(2.0));
        let rendered = circle.render_to_svg(&viewport()).to_string();
        assert!(rendered.starts_with("<circle"));
        assert!(rendered.contains(r#"r="14.4"#));
    }
}
