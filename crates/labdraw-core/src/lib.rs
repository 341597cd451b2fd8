//! Labdraw Core Types and Definitions
//!
//! This crate provides the scene description model used by labdraw. Scenes
//! are pure data and can be inspected and tested without producing any
//! output file. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and the canvas [`geometry::Viewport`]
//! - **Draw**: Visual definitions for shapes, labels, connectors and legends ([`draw`] module)
//! - **Scene**: The ordered element list drawn on one canvas ([`scene`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod scene;
