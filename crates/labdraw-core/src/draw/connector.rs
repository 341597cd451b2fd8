//! Connector drawable types and SVG marker generation.
//!
//! A [`Connector`] is a straight line between two data-space points with
//! optional arrowheads and an optional text label near its midpoint. The
//! arrowheads are SVG markers: [`ConnectorDrawer`] collects the marker styles
//! used while drawing so their definitions can be emitted once per document.
//!
//! Head sizes and end shrinking are expressed in points, so a connector looks
//! the same whatever the canvas scale is.

use std::{collections::BTreeMap, fmt, str};

use log::debug;
use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, Label, StrokeDefinition, SvgNode, TextDefinition},
    geometry::{Bounds, Point, Viewport},
};

/// Head length as a fraction of the head size.
const HEAD_LENGTH_RATIO: f32 = 0.4;
/// Half of the head width as a fraction of the head size.
const HEAD_HALF_WIDTH_RATIO: f32 = 0.2;

/// Shape of an arrowhead.
///
/// - `Open`: a two-stroke chevron (`->`)
/// - `Filled`: a solid triangle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArrowHead {
    #[default]
    Open,
    Filled,
}

impl ArrowHead {
    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filled => "filled",
        }
    }
}

impl str::FromStr for ArrowHead {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "filled" => Ok(Self::Filled),
            _ => Err("Invalid arrow head"),
        }
    }
}

/// Defines the direction of arrow markers.
///
/// - `Forward`: Creates `->` arrows pointing from start to end
/// - `Backward`: Creates `<-` arrows pointing from end to start
/// - `Bidirectional`: Creates `<->` arrows with markers at both ends
/// - `Plain`: Creates `-` simple lines without arrow markers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    #[default]
    Forward, // ->
    Backward,      // <-
    Bidirectional, // <->
    Plain,         // -
}

impl ArrowDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Backward => "<-",
            Self::Bidirectional => "<->",
            Self::Plain => "-",
        }
    }

    fn has_start_head(self) -> bool {
        matches!(self, Self::Backward | Self::Bidirectional)
    }

    fn has_end_head(self) -> bool {
        matches!(self, Self::Forward | Self::Bidirectional)
    }
}

impl str::FromStr for ArrowDirection {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" => Ok(Self::Forward),
            "<-" => Ok(Self::Backward),
            "<->" => Ok(Self::Bidirectional),
            "-" => Ok(Self::Plain),
            _ => Err("Invalid arrow direction"),
        }
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the visual properties of a connector.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Stroke | 1pt solid black |
/// | Head | [`ArrowHead::Open`] |
/// | Head size | `20.0` pt |
/// | Shrink at either end | `0.0` pt |
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorDefinition {
    stroke: StrokeDefinition,
    head: ArrowHead,
    head_size: f32,
    shrink_start: f32,
    shrink_end: f32,
}

impl ConnectorDefinition {
    /// Creates a new definition with the given stroke and default head settings.
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            ..Self::default()
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn head(&self) -> ArrowHead {
        self.head
    }

    /// Returns the head size in points. The head is `0.4` times this long and wide.
    pub fn head_size(&self) -> f32 {
        self.head_size
    }

    pub fn shrink_start(&self) -> f32 {
        self.shrink_start
    }

    pub fn shrink_end(&self) -> f32 {
        self.shrink_end
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    pub fn set_head(&mut self, head: ArrowHead) {
        self.head = head;
    }

    pub fn set_head_size(&mut self, size: f32) {
        self.head_size = size;
    }

    /// Sets how many points are cut from each end of the line.
    pub fn set_shrink(&mut self, start: f32, end: f32) {
        self.shrink_start = start;
        self.shrink_end = end;
    }

    fn head_half_width(&self) -> f32 {
        self.head_size * HEAD_HALF_WIDTH_RATIO
    }
}

impl Default for ConnectorDefinition {
    fn default() -> Self {
        Self {
            stroke: StrokeDefinition::default(),
            head: ArrowHead::default(),
            head_size: 20.0,
            shrink_start: 0.0,
            shrink_end: 0.0,
        }
    }
}

/// Text attached to a connector, anchored at the midpoint of its endpoints
/// plus an offset in data units.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLabel {
    text: String,
    offset: Point,
    definition: TextDefinition,
}

impl ConnectorLabel {
    pub fn new(text: impl Into<String>, offset: Point, definition: TextDefinition) -> Self {
        Self {
            text: text.into(),
            offset,
            definition,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }
}

/// A drawable line between two points.
///
/// ```
/// # use labdraw_core::color::Color;
/// # use labdraw_core::draw::{ArrowDirection, Connector, ConnectorDefinition, StrokeDefinition};
/// # use labdraw_core::geometry::Point;
/// let green = Color::new("#34A853").unwrap();
/// let def = ConnectorDefinition::new(StrokeDefinition::solid(green, 1.5));
///
/// let web_to_app = Connector::new(
///     Point::new(8.0, 6.6),
///     Point::new(9.5, 6.6),
///     ArrowDirection::Forward,
///     def,
/// );
/// assert!(web_to_app.label().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    start: Point,
    end: Point,
    direction: ArrowDirection,
    definition: ConnectorDefinition,
    label: Option<ConnectorLabel>,
}

impl Connector {
    pub fn new(
        start: Point,
        end: Point,
        direction: ArrowDirection,
        definition: ConnectorDefinition,
    ) -> Self {
        Self {
            start,
            end,
            direction,
            definition,
            label: None,
        }
    }

    /// Attaches a label to the connector.
    pub fn with_label(mut self, label: ConnectorLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn definition(&self) -> &ConnectorDefinition {
        &self.definition
    }

    pub fn label(&self) -> Option<&ConnectorLabel> {
        self.label.as_ref()
    }

    /// Returns true if both endpoints and the label offset are finite.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.label.as_ref().is_none_or(|label| label.offset.is_finite())
    }

    /// The label as a positioned [`Label`], if the connector has one.
    pub fn positioned_label(&self) -> Option<Label> {
        self.label.as_ref().map(|label| {
            let anchor = self.start.midpoint(self.end).add_point(label.offset);
            Label::new(label.text.clone(), anchor, label.definition.clone())
        })
    }

    /// Endpoints of the visible line in SVG space, after shrinking.
    ///
    /// Lines shorter than the combined shrink are left untouched.
    fn svg_endpoints(&self, viewport: &Viewport) -> (Point, Point) {
        let start = viewport.to_svg(self.start);
        let end = viewport.to_svg(self.end);

        let delta = end.sub_point(start);
        let length = delta.hypot();
        let shrink_start = self.definition.shrink_start();
        let shrink_end = self.definition.shrink_end();
        if length <= shrink_start + shrink_end || length < f32::EPSILON {
            return (start, end);
        }

        (
            start.add_point(delta.scale(shrink_start / length)),
            end.sub_point(delta.scale(shrink_end / length)),
        )
    }

    fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            head: self.definition.head(),
            color: self.definition.stroke().color(),
            head_size: self.definition.head_size(),
            stroke_width: self.definition.stroke().width(),
        }
    }

    /// Get marker references for this connector's direction and style
    fn get_markers(&self) -> (Option<String>, Option<String>) {
        let style = self.marker_style();
        let start = self
            .direction
            .has_start_head()
            .then(|| format!("url(#{})", style.left_id()));
        let end = self
            .direction
            .has_end_head()
            .then(|| format!("url(#{})", style.right_id()));
        (start, end)
    }

    /// Create a path data string from two points
    fn create_path_data_from_points(start: Point, end: Point) -> String {
        format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
    }
}

impl Drawable for Connector {
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode {
        let (start, end) = self.svg_endpoints(viewport);

        let path = svg_element::Path::new()
            .set("d", Self::create_path_data_from_points(start, end))
            .set("fill", "none");
        let mut path = crate::apply_stroke!(path, self.definition.stroke());

        let (start_marker, end_marker) = self.get_markers();
        if let Some(marker) = start_marker {
            path = path.set("marker-start", marker);
        }
        if let Some(marker) = end_marker {
            path = path.set("marker-end", marker);
        }

        let mut group = svg_element::Group::new()
            .set("class", "connector")
            .add(path);

        if let Some(label) = self.positioned_label() {
            group = group.add(label.render_to_svg(viewport));
        }

        Box::new(group)
    }

    fn bounds(&self, viewport: &Viewport) -> Bounds {
        let (start, end) = self.svg_endpoints(viewport);
        let reach = if self.direction == ArrowDirection::Plain {
            self.definition.stroke().width() / 2.0
        } else {
            self.definition
                .head_half_width()
                .max(self.definition.stroke().width() / 2.0)
        };

        let svg_bounds = Bounds::new(start.x(), start.y(), end.x(), end.y()).expand(reach);
        let line_bounds = viewport.bounds_from_svg(svg_bounds);

        match self.positioned_label() {
            Some(label) => line_bounds.merge(&label.bounds(viewport)),
            None => line_bounds,
        }
    }
}

/// Everything that distinguishes one arrowhead marker from another.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MarkerStyle {
    head: ArrowHead,
    color: Color,
    head_size: f32,
    stroke_width: f32,
}

impl MarkerStyle {
    fn key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.head.as_str(),
            self.color.to_id_safe_string(),
            (self.head_size * 100.0).round() as u32,
            (self.stroke_width * 100.0).round() as u32,
        )
    }

    fn left_id(&self) -> String {
        format!("arrow-left-{}", self.key())
    }

    fn right_id(&self) -> String {
        format!("arrow-right-{}", self.key())
    }

    /// Scale from the 10x10 marker view box to points.
    fn view_scale(&self) -> f32 {
        self.head_size * HEAD_LENGTH_RATIO / 10.0
    }

    fn create_marker(&self, id: String, ref_x: u8, path_data: &str) -> svg_element::Marker {
        let length = self.head_size * HEAD_LENGTH_RATIO;
        let width = self.head_size * HEAD_HALF_WIDTH_RATIO * 2.0;

        let path = svg_element::Path::new().set("d", path_data);
        let path = match self.head {
            ArrowHead::Open => path
                .set("fill", "none")
                .set("stroke", self.color.to_svg_paint())
                .set("stroke-opacity", self.color.alpha())
                .set("stroke-width", self.stroke_width / self.view_scale())
                .set("stroke-linejoin", "miter"),
            ArrowHead::Filled => path
                .set("fill", self.color.to_svg_paint())
                .set("fill-opacity", self.color.alpha()),
        };

        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", ref_x)
            .set("refY", 5)
            .set("markerUnits", "userSpaceOnUse")
            .set("markerWidth", length)
            .set("markerHeight", width)
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(path)
    }

    fn create_arrow_right(&self) -> svg_element::Marker {
        let path_data = match self.head {
            ArrowHead::Open => "M 0 0 L 10 5 L 0 10",
            ArrowHead::Filled => "M 0 0 L 10 5 L 0 10 z",
        };
        self.create_marker(self.right_id(), 10, path_data)
    }

    fn create_arrow_left(&self) -> svg_element::Marker {
        let path_data = match self.head {
            ArrowHead::Open => "M 10 0 L 0 5 L 10 10",
            ArrowHead::Filled => "M 10 0 L 0 5 L 10 10 z",
        };
        self.create_marker(self.left_id(), 0, path_data)
    }
}

/// Manages connector rendering and SVG marker generation.
///
/// The drawer records the marker style of every connector it draws so the
/// matching `<marker>` definitions can be emitted once. Markers are kept in
/// sorted maps, so the definitions come out in the same order on every run.
#[derive(Debug, Default)]
pub struct ConnectorDrawer {
    heads: BTreeMap<String, MarkerStyle>,
    tails: BTreeMap<String, MarkerStyle>,
}

impl ConnectorDrawer {
    /// Draws a connector and records the markers it references.
    pub fn draw_connector(&mut self, connector: &Connector, viewport: &Viewport) -> SvgNode {
        self.register_markers(connector);
        connector.render_to_svg(viewport)
    }

    /// Returns true if no drawn connector needed a marker.
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty() && self.tails.is_empty()
    }

    /// Generates SVG marker definitions for all collected marker styles
    pub fn draw_marker_definitions(&self) -> SvgNode {
        let mut defs = svg_element::Definitions::new();
        for style in self.heads.values() {
            defs = defs.add(style.create_arrow_left());
        }
        for style in self.tails.values() {
            defs = defs.add(style.create_arrow_right());
        }
        Box::new(defs)
    }

    fn register_markers(&mut self, connector: &Connector) {
        let style = connector.marker_style();
        let direction = connector.direction();

        if direction.has_start_head() && !self.heads.contains_key(&style.key()) {
            debug!(marker = style.left_id(); "Registering arrow marker");
            self.heads.insert(style.key(), style);
        }
        if direction.has_end_head() && !self.tails.contains_key(&style.key()) {
            debug!(marker = style.right_id(); "Registering arrow marker");
            self.tails.insert(style.key(), style);
        }
    }
}
