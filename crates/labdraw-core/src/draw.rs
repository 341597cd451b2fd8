//! Drawable Components for Scene Rendering
//!
//! This module provides the visual building blocks of a scene. Every element
//! implements the [`Drawable`] trait, which renders it to an SVG node and
//! reports the area it covers, both through a [`Viewport`] that maps data
//! units onto SVG points.
mod connector;
mod legend;
mod shape;
mod stroke;
mod text;

pub use connector::{
    ArrowDirection, ArrowHead, Connector, ConnectorDefinition, ConnectorDrawer, ConnectorLabel,
};
pub use legend::{Legend, LegendEntry};
pub use shape::{Shape, ShapeDefinition, ShapeKind};
pub use stroke::StrokeDefinition;
pub use text::{FontWeight, HorizontalAlign, Label, TextBackground, TextDefinition, VerticalAlign};

use crate::geometry::{Bounds, Viewport};

/// A rendered SVG fragment.
pub type SvgNode = Box<dyn svg::Node>;

pub trait Drawable: std::fmt::Debug {
    /// Renders the element in SVG user space.
    fn render_to_svg(&self, viewport: &Viewport) -> SvgNode;

    /// Returns the area covered by the rendered element, in data units.
    fn bounds(&self, viewport: &Viewport) -> Bounds;
}
