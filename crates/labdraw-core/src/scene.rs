//! Scene description.
//!
//! A [`Scene`] is pure data: a [`Canvas`] and an ordered list of
//! [`Element`]s. Elements are drawn in insertion order, so later elements
//! overlay earlier ones. Nothing here touches an output format, which keeps
//! scenes cheap to build and inspect in tests.
//!
//! ```
//! # use labdraw_core::color::Color;
//! # use labdraw_core::draw::{Label, Shape, ShapeDefinition, TextDefinition};
//! # use labdraw_core::geometry::{Point, Size};
//! # use labdraw_core::scene::{Canvas, Scene};
//! let mut scene = Scene::new("example", Canvas::new(Size::new(24.0, 16.0)));
//! scene.add_shape(Shape::rectangle(
//!     Point::new(8.0, 10.5),
//!     Size::new(8.0, 1.5),
//!     ShapeDefinition::new(),
//! ));
//! scene.add_label(Label::new("Global HTTP(S) Load Balancer", Point::new(12.0, 11.6), TextDefinition::new()));
//!
//! assert_eq!(scene.elements().len(), 2);
//! assert!(scene.validate().is_ok());
//! assert!(scene.out_of_bounds().is_empty());
//! ```

use thiserror::Error;

use crate::{
    color::Color,
    draw::{Connector, Drawable, Label, Legend, Shape, SvgNode},
    geometry::{Bounds, Size, Viewport},
};

/// Points per data unit unless a canvas says otherwise: one unit is one inch.
pub const DEFAULT_POINTS_PER_UNIT: f32 = 72.0;

/// Errors raised when a scene cannot be drawn.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("Canvas size must be positive and finite, got {width} x {height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("Canvas scale must be positive and finite, got {0} points per unit")]
    InvalidScale(f32),

    #[error("{kind} #{index} has a non-finite coordinate")]
    NonFinite { index: usize, kind: &'static str },
}

/// The fixed-size drawing surface of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: Size,
    background: Color,
    points_per_unit: f32,
}

impl Canvas {
    /// Creates a white canvas of `size` data units.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: Color::white(),
            points_per_unit: DEFAULT_POINTS_PER_UNIT,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_points_per_unit(mut self, points_per_unit: f32) -> Self {
        self.points_per_unit = points_per_unit;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn points_per_unit(&self) -> f32 {
        self.points_per_unit
    }

    /// Canvas extent in data units.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.size.width(), self.size.height())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.size, self.points_per_unit)
    }
}

/// A drawable scene element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    Label(Label),
    Connector(Connector),
    Legend(Legend),
}

impl Element {
    /// Short human-readable kind name, used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Shape(_) => "Shape",
            Self::Label(_) => "Label",
            Self::Connector(_) => "Connector",
            Self::Legend(_) => "Legend",
        }
    }

    /// Returns true if every coordinate of the element is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Shape(shape) => shape.kind().is_finite(),
            Self::Label(label) => {
                label.position().is_finite() && label.definition().rotation().is_finite()
            }
            Self::Connector(connector) => connector.is_finite(),
            Self::Legend(legend) => legend.is_finite(),
        }
    }

    /// Area spanned by the element's defining coordinates, without text
    /// extents or stroke widths.
    ///
    /// Returns `None` for a legend without entries.
    pub fn extent(&self) -> Option<Bounds> {
        match self {
            Self::Shape(shape) => Some(shape.kind().extent()),
            Self::Label(label) => Bounds::enclosing([label.position()]),
            Self::Connector(connector) => Bounds::enclosing([connector.start(), connector.end()]),
            Self::Legend(legend) => {
                Bounds::enclosing(legend.entries().iter().map(|entry| entry.position()))
            }
        }
    }
}

impl Drawable for Element {
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode {
        match self {
            Self::Shape(shape) => shape.render_to_svg(viewport),
            Self::Label(label) => label.render_to_svg(viewport),
            Self::Connector(connector) => connector.render_to_svg(viewport),
            Self::Legend(legend) => legend.render_to_svg(viewport),
        }
    }

    fn bounds(&self, viewport: &Viewport) -> Bounds {
        match self {
            Self::Shape(shape) => shape.bounds(viewport),
            Self::Label(label) => label.bounds(viewport),
            Self::Connector(connector) => connector.bounds(viewport),
            Self::Legend(legend) => legend.bounds(viewport),
        }
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Self::Shape(shape)
    }
}

impl From<Label> for Element {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<Connector> for Element {
    fn from(connector: Connector) -> Self {
        Self::Connector(connector)
    }
}

impl From<Legend> for Element {
    fn from(legend: Legend) -> Self {
        Self::Legend(legend)
    }
}

/// An ordered collection of elements on one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    name: String,
    canvas: Canvas,
    elements: Vec<Element>,
}

impl Scene {
    pub fn new(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            canvas,
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Appends an element on top of everything added before it.
    pub fn add(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.add(shape);
    }

    pub fn add_label(&mut self, label: Label) {
        self.add(label);
    }

    pub fn add_connector(&mut self, connector: Connector) {
        self.add(connector);
    }

    pub fn add_legend(&mut self, legend: Legend) {
        self.add(legend);
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(|element| match element {
            Element::Shape(shape) => Some(shape),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.elements.iter().filter_map(|element| match element {
            Element::Label(label) => Some(label),
            _ => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.elements.iter().filter_map(|element| match element {
            Element::Connector(connector) => Some(connector),
            _ => None,
        })
    }

    /// Checks that the scene can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] for a degenerate canvas or for the first element
    /// with a non-finite coordinate.
    pub fn validate(&self) -> Result<(), SceneError> {
        let size = self.canvas.size();
        if !size.is_finite() || size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(SceneError::InvalidCanvas {
                width: size.width(),
                height: size.height(),
            });
        }

        let scale = self.canvas.points_per_unit();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SceneError::InvalidScale(scale));
        }

        match self
            .elements
            .iter()
            .position(|element| !element.is_finite())
        {
            Some(index) => Err(SceneError::NonFinite {
                index,
                kind: self.elements[index].kind_name(),
            }),
            None => Ok(()),
        }
    }

    /// Indices of elements whose defining coordinates leave the canvas.
    pub fn out_of_bounds(&self) -> Vec<usize> {
        let canvas = self.canvas.bounds();
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| {
                element
                    .extent()
                    .is_some_and(|extent| !canvas.contains(&extent))
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Union of the rendered bounds of every element, in data units.
    ///
    /// Returns `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let viewport = self.canvas.viewport();
        self.elements
            .iter()
            .map(|element| element.bounds(&viewport))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{
            ArrowDirection, ConnectorDefinition, LegendEntry, ShapeDefinition, TextDefinition,
        },
        geometry::Point,
    };

    fn scene() -> Scene {
        Scene::new("test", Canvas::new(Size::new(24.0, 16.0)))
    }

    fn rectangle(x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::rectangle(Point::new(x, y), Size::new(w, h), ShapeDefinition::new())
    }

    #[test]
    fn test_canvas_defaults() {
        let canvas = Canvas::new(Size::new(20.0, 12.0));
        assert_eq!(canvas.background(), Color::white());
        assert_approx_eq!(f32, canvas.points_per_unit(), 72.0);
        assert_approx_eq!(f32, canvas.viewport().svg_size().width(), 1440.0);
    }

    #[test]
    fn test_elements_keep_insertion_order() {
        let mut scene = scene();
        scene.add_shape(rectangle(1.0, 1.0, 2.0, 2.0));
        scene.add_label(Label::new("on top", Point::new(2.0, 2.0), TextDefinition::new()));
        scene.add_connector(Connector::new(
            Point::new(1.0, 1.0),
            Point::new(3.0, 3.0),
            ArrowDirection::Forward,
            ConnectorDefinition::default(),
        ));

        let kinds: Vec<_> = scene.elements().iter().map(Element::kind_name).collect();
        assert_eq!(kinds, ["Shape", "Label", "Connector"]);
        assert_eq!(scene.shapes().count(), 1);
        assert_eq!(scene.labels().count(), 1);
        assert_eq!(scene.connectors().count(), 1);
    }

    #[test]
    fn test_validate_rejects_degenerate_canvas() {
        let scene = Scene::new("empty", Canvas::new(Size::new(0.0, 16.0)));
        assert_eq!(
            scene.validate(),
            Err(SceneError::InvalidCanvas {
                width: 0.0,
                height: 16.0
            })
        );

        let scene = Scene::new(
            "scale",
            Canvas::new(Size::new(1.0, 1.0)).with_points_per_unit(f32::NAN),
        );
        assert!(matches!(scene.validate(), Err(SceneError::InvalidScale(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinates() {
        let mut scene = scene();
        scene.add_shape(rectangle(1.0, 1.0, 2.0, 2.0));
        scene.add_label(Label::new(
            "lost",
            Point::new(f32::INFINITY, 1.0),
            TextDefinition::new(),
        ));

        let err = scene.validate().unwrap_err();
        assert_eq!(
            err,
            SceneError::NonFinite {
                index: 1,
                kind: "Label"
            }
        );
        assert_eq!(err.to_string(), "Label #1 has a non-finite coordinate");
    }

    #[test]
    fn test_out_of_bounds_reports_indices() {
        let mut scene = scene();
        scene.add_shape(rectangle(0.5, 0.5, 23.0, 9.5));
        scene.add_shape(rectangle(23.0, 1.0, 2.0, 1.0));
        scene.add_label(Label::new("outside", Point::new(-1.0, 4.0), TextDefinition::new()));

        let mut legend = Legend::new(TextDefinition::new());
        legend.add_entry(LegendEntry::new(Point::new(2.0, 0.5), Color::white(), "ok"));
        scene.add_legend(legend);

        assert_eq!(scene.out_of_bounds(), vec![1, 2]);
    }

    #[test]
    fn test_content_bounds() {
        let mut scene = scene();
        assert!(scene.content_bounds().is_none());

        scene.add_shape(rectangle(1.0, 14.5, 22.0, 1.2));
        scene.add_shape(rectangle(0.5, 0.2, 23.0, 0.6));

        let bounds = scene.content_bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), 0.5, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.min_y(), 0.2, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.max_y(), 15.7, epsilon = 1e-5);
    }
}
