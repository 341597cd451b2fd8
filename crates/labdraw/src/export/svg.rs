//! SVG drawing of scenes.
//!
//! [`SceneDocument`] draws every element of a scene once, in insertion order,
//! and can then produce a complete SVG document for any [`Crop`]. SVG user
//! units are typographic points.

use log::{debug, info};
use svg::{self, Document, node::element as svg_element};

use labdraw_core::{
    color::Color,
    draw::{ConnectorDrawer, Drawable, SvgNode},
    geometry::{Bounds, Point},
    scene::{Element, Scene},
};

use super::{Crop, Error, Exporter, OutputFormat};
use crate::{LabdrawError, config::StyleConfig};

/// Typographic points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// A drawn scene, ready to be cropped into SVG documents.
#[derive(Debug, Clone)]
pub struct SceneDocument {
    content: svg_element::Group,
    markers: Option<SvgNode>,
    canvas: Bounds,
    content_bounds: Option<Bounds>,
    background: Color,
    font_family: String,
}

impl SceneDocument {
    /// Draws `scene` with the given style.
    ///
    /// # Errors
    ///
    /// Returns [`LabdrawError::InvalidScene`] if the scene fails validation,
    /// or [`LabdrawError::Config`] if the style has an invalid background color.
    pub fn draw(scene: &Scene, style: &StyleConfig) -> Result<Self, LabdrawError> {
        scene.validate()?;

        let background = style
            .background_color()
            .map_err(LabdrawError::Config)?
            .unwrap_or_else(|| scene.canvas().background());

        let viewport = scene.canvas().viewport();
        let mut drawer = ConnectorDrawer::default();
        let mut content = svg_element::Group::new().set("class", "scene");

        info!(scene = scene.name(), elements = scene.elements().len(); "Drawing scene");
        for element in scene.elements() {
            let node = match element {
                Element::Connector(connector) => drawer.draw_connector(connector, &viewport),
                other => other.render_to_svg(&viewport),
            };
            content = content.add(node);
        }

        let markers = (!drawer.is_empty()).then(|| drawer.draw_marker_definitions());
        let content_bounds = scene
            .content_bounds()
            .map(|bounds| viewport.bounds_to_svg(bounds));
        debug!(content_bounds:?; "Scene drawn");

        Ok(Self {
            content,
            markers,
            canvas: Bounds::from_origin(Point::default(), viewport.svg_size()),
            content_bounds,
            background,
            font_family: style.font_family().to_string(),
        })
    }

    /// Returns the union of the drawn element bounds in points, if any.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.content_bounds
    }

    /// The region of SVG user space that `crop` keeps, in points.
    ///
    /// A tight crop of an empty scene keeps the whole canvas.
    pub fn view_box(&self, crop: Crop) -> Bounds {
        match crop {
            Crop::Canvas => self.canvas,
            Crop::Tight { pad_inches } => self
                .content_bounds
                .map(|bounds| bounds.expand(pad_inches * POINTS_PER_INCH))
                .unwrap_or(self.canvas),
        }
    }

    /// Builds the SVG document for `crop`.
    pub fn to_document(&self, crop: Crop) -> Document {
        let view = self.view_box(crop);

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", view.width())
            .set("height", view.height())
            .set("fill", self.background.to_svg_paint())
            .set("fill-opacity", self.background.alpha());

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", view.width(), view.height()))
            .set("width", view.width())
            .set("height", view.height())
            .set("font-family", self.font_family.as_str())
            .add(background);

        if let Some(markers) = &self.markers {
            doc = doc.add(markers.clone());
        }

        // Shift the kept region to the document origin
        let main_group = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({}, {})", -view.min_x(), -view.min_y()),
            )
            .add(self.content.clone());

        doc.add(main_group)
    }

    /// Builds the SVG document for `crop` as a string.
    pub fn to_svg_string(&self, crop: Crop) -> String {
        self.to_document(crop).to_string()
    }
}

/// Exporter producing the SVG document itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgExporter;

impl Exporter for SvgExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Svg
    }

    fn encode(&self, svg: &str) -> Result<Vec<u8>, Error> {
        Ok(svg.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use labdraw_core::{
        draw::{
            ArrowDirection, Connector, ConnectorDefinition, Label, Shape, ShapeDefinition,
            TextDefinition,
        },
        geometry::Size,
        scene::Canvas,
    };

    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new("test", Canvas::new(Size::new(24.0, 16.0)));
        scene.add_shape(Shape::rectangle(
            Point::new(8.0, 10.5),
            Size::new(8.0, 1.5),
            ShapeDefinition::new(),
        ));
        scene
    }

    #[test]
    fn test_canvas_crop_covers_canvas() {
        let doc = SceneDocument::draw(&scene(), &StyleConfig::default()).unwrap();
        let view = doc.view_box(Crop::Canvas);
        assert_approx_eq!(f32, view.width(), 24.0 * 72.0);
        assert_approx_eq!(f32, view.height(), 16.0 * 72.0);

        let svg = doc.to_svg_string(Crop::Canvas);
        assert!(svg.contains(r#"viewBox="0 0 1728 1152""#));
        assert!(svg.contains(r#"font-family="DejaVu Sans""#));
    }

    #[test]
    fn test_tight_crop_pads_content() {
        let doc = SceneDocument::draw(&scene(), &StyleConfig::default()).unwrap();
        let view = doc.view_box(Crop::Tight { pad_inches: 0.2 });

        // 8 x 1.5 units of content plus 0.2 inch on every side
        assert_approx_eq!(f32, view.width(), 8.0 * 72.0 + 2.0 * 14.4, epsilon = 1e-3);
        assert_approx_eq!(f32, view.height(), 1.5 * 72.0 + 2.0 * 14.4, epsilon = 1e-3);
        assert_approx_eq!(f32, view.min_x(), 8.0 * 72.0 - 14.4, epsilon = 1e-3);
    }

    #[test]
    fn test_tight_crop_of_empty_scene_is_canvas() {
        let empty = Scene::new("empty", Canvas::new(Size::new(4.0, 3.0)));
        let doc = SceneDocument::draw(&empty, &StyleConfig::default()).unwrap();
        assert_eq!(doc.view_box(Crop::tight()), doc.view_box(Crop::Canvas));
    }

    #[test]
    fn test_markers_only_when_needed() {
        let doc = SceneDocument::draw(&scene(), &StyleConfig::default()).unwrap();
        assert!(!doc.to_svg_string(Crop::Canvas).contains("<marker"));

        let mut with_arrow = scene();
        with_arrow.add_connector(Connector::new(
            Point::new(12.0, 12.5),
            Point::new(12.0, 12.0),
            ArrowDirection::Forward,
            ConnectorDefinition::default(),
        ));
        let doc = SceneDocument::draw(&with_arrow, &StyleConfig::default()).unwrap();
        assert!(doc.to_svg_string(Crop::Canvas).contains("<marker"));
    }

    #[test]
    fn test_style_background_overrides_canvas() {
        let style = StyleConfig::new(None, Some("#F8F9FA".to_string()));
        let svg = SceneDocument::draw(&scene(), &style)
            .unwrap()
            .to_svg_string(Crop::Canvas);
        assert!(svg.contains(r##"fill="#f8f9fa""##));

        let style = StyleConfig::new(None, Some("nope".to_string()));
        let err = SceneDocument::draw(&scene(), &style).unwrap_err();
        assert!(matches!(err, LabdrawError::Config(_)));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut scene = scene();
        scene.add_label(Label::new(
            "first label",
            Point::new(1.0, 1.0),
            TextDefinition::new(),
        ));
        scene.add_label(Label::new(
            "second label",
            Point::new(1.0, 2.0),
            TextDefinition::new(),
        ));
        let svg = SceneDocument::draw(&scene, &StyleConfig::default())
            .unwrap()
            .to_svg_string(Crop::Canvas);

        let first = svg.find("first label").unwrap();
        let second = svg.find("second label").unwrap();
        assert!(first < second);
    }
}
