//! Built-in cloud networking lab diagrams.
//!
//! Two independent scenes are provided: the infrastructure topology
//! ([`architecture`]) and the request flow ([`flow`]). Each comes with a fixed
//! list of output files, see [`DiagramKind::targets`].

mod architecture;
mod flow;
pub mod palette;

pub use architecture::architecture;
pub use flow::flow;

use std::{fmt, path::Path, str::FromStr};

use labdraw_core::{
    color::Color,
    draw::{HorizontalAlign, Label, Shape, ShapeDefinition, StrokeDefinition, TextDefinition},
    geometry::{Point, Size},
};

use crate::export::{Crop, OutputFormat, OutputTarget};

pub const ARCHITECTURE_PROFESSIONAL_PNG: &str = "gcp-dns-lab-architecture-professional.png";
pub const ARCHITECTURE_PROFESSIONAL_PDF: &str = "gcp-dns-lab-architecture-professional.pdf";
pub const ARCHITECTURE_PNG: &str = "gcp-dns-lab-architecture.png";
pub const ARCHITECTURE_PDF: &str = "gcp-dns-lab-architecture.pdf";
pub const FLOW_PROFESSIONAL_PNG: &str = "gcp-dns-lab-flow-professional.png";

/// Padding of the "professional" exports, in inches.
const PROFESSIONAL_PAD_INCHES: f32 = 0.2;

/// The built-in diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Architecture,
    Flow,
}

impl DiagramKind {
    /// Every built-in diagram, in generation order.
    pub const ALL: [Self; 2] = [Self::Architecture, Self::Flow];

    pub fn name(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Flow => "flow",
        }
    }

    /// Builds the scene of this diagram.
    pub fn scene(self) -> labdraw_core::scene::Scene {
        match self {
            Self::Architecture => architecture(),
            Self::Flow => flow(),
        }
    }

    /// Output files of this diagram inside `output_dir`.
    pub fn targets(self, output_dir: &Path) -> Vec<OutputTarget> {
        let professional = Crop::Tight {
            pad_inches: PROFESSIONAL_PAD_INCHES,
        };

        let files = match self {
            Self::Architecture => vec![
                (ARCHITECTURE_PROFESSIONAL_PNG, OutputFormat::Png, professional),
                (ARCHITECTURE_PROFESSIONAL_PDF, OutputFormat::Pdf, professional),
                (ARCHITECTURE_PNG, OutputFormat::Png, Crop::tight()),
                (ARCHITECTURE_PDF, OutputFormat::Pdf, Crop::tight()),
            ],
            Self::Flow => vec![(FLOW_PROFESSIONAL_PNG, OutputFormat::Png, professional)],
        };

        files
            .into_iter()
            .map(|(name, format, crop)| {
                OutputTarget::new(output_dir.join(name), format).with_crop(crop)
            })
            .collect()
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "architecture" => Ok(Self::Architecture),
            "flow" => Ok(Self::Flow),
            _ => Err(format!("Unknown diagram `{s}`")),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A filled rectangle without border.
fn filled(fill: Color) -> ShapeDefinition {
    let mut def = ShapeDefinition::new();
    def.set_fill_color(Some(fill));
    def
}

/// A filled rectangle with a solid border of `width` points.
fn outlined(fill: Color, edge: Color, width: f32) -> ShapeDefinition {
    let mut def = filled(fill);
    def.set_stroke(Some(StrokeDefinition::solid(edge, width)));
    def
}

/// Fades both fill and border.
fn translucent(mut def: ShapeDefinition, alpha: f32) -> ShapeDefinition {
    def.set_opacity(alpha);
    def
}

fn rect(x: f32, y: f32, width: f32, height: f32, def: ShapeDefinition) -> Shape {
    Shape::rectangle(Point::new(x, y), Size::new(width, height), def)
}

fn text_style(
    size: f32,
    bold: bool,
    halign: HorizontalAlign,
    color: Option<Color>,
) -> TextDefinition {
    let mut def = TextDefinition::new();
    def.set_font_size(size);
    def.set_bold(bold);
    def.set_halign(halign);
    def.set_color(color);
    def
}

fn label(x: f32, y: f32, content: &str, def: &TextDefinition) -> Label {
    Label::new(content, Point::new(x, y), def.clone())
}

#[cfg(test)]
mod tests {
    use labdraw_core::draw::Drawable;

    use super::*;

    #[test]
    fn test_diagram_kind_from_str() {
        assert_eq!(
            "architecture".parse::<DiagramKind>().unwrap(),
            DiagramKind::Architecture
        );
        assert_eq!("flow".parse::<DiagramKind>().unwrap(), DiagramKind::Flow);
        assert!("sequence".parse::<DiagramKind>().is_err());
        assert_eq!(DiagramKind::Flow.to_string(), "flow");
    }

    #[test]
    fn test_targets() {
        let dir = Path::new("out");
        let architecture = DiagramKind::Architecture.targets(dir);
        let names: Vec<_> = architecture
            .iter()
            .map(|target| target.path().file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                ARCHITECTURE_PROFESSIONAL_PNG,
                ARCHITECTURE_PROFESSIONAL_PDF,
                ARCHITECTURE_PNG,
                ARCHITECTURE_PDF
            ]
        );
        assert_eq!(
            architecture[0].crop(),
            Crop::Tight {
                pad_inches: PROFESSIONAL_PAD_INCHES
            }
        );
        assert_eq!(architecture[3].crop(), Crop::tight());
        assert!(architecture[0].path().starts_with(dir));

        let flow = DiagramKind::Flow.targets(dir);
        assert_eq!(flow.len(), 1);
        assert_eq!(flow[0].format(), OutputFormat::Png);
    }

    #[test]
    fn test_every_shape_within_canvas() {
        for kind in DiagramKind::ALL {
            let scene = kind.scene();
            let canvas = scene.canvas().bounds();
            let viewport = scene.canvas().viewport();

            for shape in scene.shapes() {
                let bounds = shape.bounds(&viewport);
                assert!(
                    canvas.contains(&bounds),
                    "{kind}: shape {shape:?} leaves the canvas"
                );
            }
            assert!(scene.out_of_bounds().is_empty(), "{kind}");
            assert!(scene.validate().is_ok(), "{kind}");
        }
    }

    #[test]
    fn test_rect_helper_applies_alpha_to_fill_and_border() {
        let blue = Color::new("#4285F4").unwrap();
        let shape = rect(1.0, 14.5, 22.0, 1.2, translucent(outlined(blue, blue, 1.0), 0.1));
        assert_eq!(shape.definition().opacity(), 0.1);
        assert!(shape.definition().stroke().is_some());
    }
}
