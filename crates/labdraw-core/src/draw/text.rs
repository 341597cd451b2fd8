//! Text labels.
//!
//! A [`Label`] is text anchored at a data-space point. Its [`TextDefinition`]
//! controls font, weight, color, alignment relative to the anchor, rotation
//! and an optional rounded background box.
//!
//! # Alignment
//!
//! Horizontal alignment chooses which part of each line sits on the anchor
//! (`start`, `middle`, `end`). Vertical alignment positions the whole block
//! of lines: [`VerticalAlign::Baseline`] puts the first line's baseline on the
//! anchor and stacks further lines downward.
//!
//! ```
//! # use labdraw_core::draw::{HorizontalAlign, Label, TextDefinition};
//! # use labdraw_core::geometry::Point;
//! let mut style = TextDefinition::new();
//! style.set_font_size(12.0);
//! style.set_bold(true);
//! style.set_halign(HorizontalAlign::Center);
//!
//! let label = Label::new("Global HTTP(S) Load Balancer", Point::new(12.0, 11.6), style);
//! assert_eq!(label.lines().count(), 1);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode},
    geometry::{Bounds, Point, Size, Viewport},
};

/// Portion of the font size above the baseline.
const ASCENT_RATIO: f32 = 0.76;
/// Portion of the font size below the baseline.
const DESCENT_RATIO: f32 = 0.24;

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }

    /// Offset of the left edge of a line of `width` from the anchor.
    fn left_edge(self, width: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => -width / 2.0,
            Self::Right => -width,
        }
    }
}

/// Vertical placement of a text block relative to its anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// First line's baseline on the anchor
    #[default]
    Baseline,
    Center,
    Top,
    Bottom,
}

/// Font weight of a label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// A rounded box drawn behind a label.
///
/// `pad` is expressed as a fraction of the font size, so the same box style
/// scales with the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBackground {
    fill: Color,
    border: Option<StrokeDefinition>,
    pad: f32,
    opacity: f32,
}

impl TextBackground {
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            border: None,
            pad: 0.3,
            opacity: 1.0,
        }
    }

    pub fn with_border(mut self, border: StrokeDefinition) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_pad(mut self, pad: f32) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn border(&self) -> Option<&StrokeDefinition> {
        self.border.as_ref()
    }

    pub fn pad(&self) -> f32 {
        self.pad
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Defines the visual style of a label.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `None` (inherits the document font) |
/// | Font size | `10.0` pt |
/// | Weight | Normal |
/// | Color | `None` (black) |
/// | Alignment | Left / Baseline |
/// | Rotation | `0.0` degrees |
/// | Line spacing | `1.2` |
/// | Background | `None` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: Option<String>,
    font_size: f32,
    weight: FontWeight,
    color: Option<Color>,
    halign: HorizontalAlign,
    valign: VerticalAlign,
    rotation: f32,
    line_spacing: f32,
    background: Option<TextBackground>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets an explicit font family. Without one the document font is used.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = Some(family.to_string());
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.weight = if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };
    }

    /// Sets the text color. `None` renders black.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_halign(&mut self, halign: HorizontalAlign) {
        self.halign = halign;
    }

    pub fn set_valign(&mut self, valign: VerticalAlign) {
        self.valign = valign;
    }

    /// Sets the rotation in degrees, counter-clockwise around the anchor.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Sets the distance between baselines as a multiple of the font size.
    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.line_spacing = spacing;
    }

    pub fn set_background(&mut self, background: Option<TextBackground>) {
        self.background = background;
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn halign(&self) -> HorizontalAlign {
        self.halign
    }

    pub fn valign(&self) -> VerticalAlign {
        self.valign
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn background(&self) -> Option<&TextBackground> {
        self.background.as_ref()
    }

    fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 10.0,
            weight: FontWeight::Normal,
            color: None,
            halign: HorizontalAlign::Left,
            valign: VerticalAlign::Baseline,
            rotation: 0.0,
            line_spacing: 1.2,
            background: None,
        }
    }
}

/// Text anchored at a data-space position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    content: String,
    position: Point,
    definition: TextDefinition,
}

impl Label {
    pub fn new(content: impl Into<String>, position: Point, definition: TextDefinition) -> Self {
        Self {
            content: content.into(),
            position,
            definition,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    /// Iterates over the lines of the label.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// Measured size of the text block in points, without background padding.
    pub fn text_size(&self) -> Size {
        let line_count = self.lines().count();
        if line_count == 0 {
            return Size::default();
        }

        let manager = TEXT_MANAGER.get_or_init(TextManager::new);
        let width = self
            .lines()
            .map(|line| manager.measure_line_width(line, &self.definition))
            .fold(0.0_f32, f32::max);

        let font_size = self.definition.font_size();
        let height = (line_count - 1) as f32 * self.definition.line_height()
            + font_size * (ASCENT_RATIO + DESCENT_RATIO);
        Size::new(width, height)
    }

    /// Offset of the first baseline below the anchor, in points (SVG Y-down).
    ///
    /// With [`VerticalAlign::Baseline`] the last line sits on the anchor and
    /// earlier lines stack above it.
    fn first_baseline_offset(&self, block_height: f32) -> f32 {
        let ascent = self.definition.font_size() * ASCENT_RATIO;
        match self.definition.valign() {
            VerticalAlign::Baseline => {
                let extra_lines = self.lines().count().saturating_sub(1);
                -(extra_lines as f32) * self.definition.line_height()
            }
            VerticalAlign::Top => ascent,
            VerticalAlign::Center => -block_height / 2.0 + ascent,
            VerticalAlign::Bottom => -block_height + ascent,
        }
    }

    /// The unrotated block rectangle relative to the anchor, in points with Y
    /// pointing down, including the background padding when present.
    fn local_box(&self) -> Bounds {
        let size = self.text_size();
        let baseline = self.first_baseline_offset(size.height());
        let top = baseline - self.definition.font_size() * ASCENT_RATIO;
        let left = self.definition.halign().left_edge(size.width());

        let block = Bounds::new(left, top, left + size.width(), top + size.height());
        match self.definition.background() {
            Some(background) => block.expand(background.pad() * self.definition.font_size()),
            None => block,
        }
    }

    fn rotation_transform(&self, anchor: Point) -> Option<String> {
        let rotation = self.definition.rotation();
        (rotation != 0.0).then(|| format!("rotate({} {} {})", -rotation, anchor.x(), anchor.y()))
    }

    fn render_background(&self, background: &TextBackground, anchor: Point) -> SvgNode {
        let local = self.local_box();
        let radius = background.pad() * self.definition.font_size();
        let fill = background.fill().faded(background.opacity());

        let mut rect = svg_element::Rectangle::new()
            .set("x", anchor.x() + local.min_x())
            .set("y", anchor.y() + local.min_y())
            .set("width", local.width())
            .set("height", local.height())
            .set("rx", radius)
            .set("fill", fill.to_svg_paint())
            .set("fill-opacity", fill.alpha());

        match background.border() {
            Some(border) => {
                let border = border.faded(background.opacity());
                rect = crate::apply_stroke!(rect, &border);
            }
            None => rect = rect.set("stroke", "none"),
        }

        Box::new(rect)
    }
}

impl Drawable for Label {
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode {
        let anchor = viewport.to_svg(self.position);
        let definition = &self.definition;
        let size = self.text_size();
        let baseline = anchor.y() + self.first_baseline_offset(size.height());

        let mut group = svg_element::Group::new().set("class", "label");
        if let Some(transform) = self.rotation_transform(anchor) {
            group = group.set("transform", transform);
        }

        if let Some(background) = definition.background() {
            group = group.add(self.render_background(background, anchor));
        }

        let mut text = svg_element::Text::new("")
            .set("x", anchor.x())
            .set("y", baseline)
            .set("text-anchor", definition.halign().to_svg_value())
            .set("font-size", definition.font_size())
            .set("font-weight", definition.weight().to_svg_value());

        if let Some(family) = definition.font_family() {
            text = text.set("font-family", family);
        }

        if let Some(color) = definition.color() {
            text = text
                .set("fill", color.to_svg_paint())
                .set("fill-opacity", color.alpha());
        }

        for (index, line) in self.lines().enumerate() {
            let tspan = svg_element::TSpan::new("")
                .set("x", anchor.x())
                .set("y", baseline + index as f32 * definition.line_height())
                .add(SvgText::new(line));
            text = text.add(tspan);
        }

        Box::new(group.add(text))
    }

    fn bounds(&self, viewport: &Viewport) -> Bounds {
        let local = self.local_box();
        let rotation = self.definition.rotation();
        let corners = local.corners().map(|corner| {
            // Flip into a Y-up frame, rotate, then scale into data units
            Point::new(corner.x(), -corner.y())
                .rotate(rotation)
                .scale(1.0 / viewport.points_per_unit())
                .add_point(self.position)
        });

        Bounds::enclosing(corners).unwrap_or_default()
    }
}

/// TextManager handles text measurement.
/// It maintains a reusable FontSystem instance to avoid expensive recreation.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Width in points of a single line of text, shaped with cosmic-text.
    ///
    /// Falls back to an average glyph advance when no font could shape the text.
    fn measure_line_width(&self, line: &str, text_def: &TextDefinition) -> f32 {
        if line.is_empty() {
            return 0.0;
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let font_size = text_def.font_size();
        let metrics = Metrics::new(font_size, text_def.line_height());

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let family = match text_def.font_family() {
            Some(name) => Family::Name(name),
            None => Family::SansSerif,
        };
        let weight = match text_def.weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let attrs = Attrs::new().family(family).weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(line, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 {
            width
        } else {
            line.chars().count() as f32 * font_size * 0.55
        }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
