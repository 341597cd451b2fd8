//! Labdraw - procedural diagrams rendered to SVG, PNG and PDF.
//!
//! A [`Scene`](scene::Scene) describes positioned shapes, labels, connectors
//! and legends on a fixed canvas. [`SceneRenderer`] draws it once and writes
//! it to any number of output files. The built-in cloud lab diagrams live in
//! [`diagrams`].

pub mod config;
pub mod diagrams;
pub mod export;

mod error;

pub use labdraw_core::{color, draw, geometry, scene};

pub use error::LabdrawError;
pub use export::{Crop, OutputFormat, OutputTarget};

use std::{collections::HashMap, path::Path};

use log::{debug, error, info};

use config::AppConfig;
use export::{Exporter, svg::SceneDocument};
use scene::Scene;

/// Draws scenes and exports them to files.
///
/// # Examples
///
/// ```rust,no_run
/// use labdraw::{Crop, OutputFormat, OutputTarget, SceneRenderer, config::AppConfig};
/// use labdraw::geometry::{Point, Size};
/// use labdraw::draw::{Label, TextDefinition};
/// use labdraw::scene::{Canvas, Scene};
///
/// let mut scene = Scene::new("hello", Canvas::new(Size::new(4.0, 2.0)));
/// scene.add_label(Label::new("Hello", Point::new(1.0, 1.0), TextDefinition::new()));
///
/// let renderer = SceneRenderer::new(AppConfig::default());
/// renderer
///     .render(
///         &scene,
///         &[
///             OutputTarget::new("hello.png", OutputFormat::Png).with_crop(Crop::tight()),
///             OutputTarget::new("hello.pdf", OutputFormat::Pdf),
///         ],
///     )
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct SceneRenderer {
    config: AppConfig,
}

impl SceneRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `LabdrawError` if the scene is invalid or the style
    /// configuration cannot be applied.
    pub fn render_svg(&self, scene: &Scene, crop: Crop) -> Result<String, LabdrawError> {
        let document = SceneDocument::draw(scene, self.config.style())?;
        Ok(document.to_svg_string(crop))
    }

    /// Draw a scene once and write it to every target.
    ///
    /// Each file is encoded in memory and written atomically. A failing target
    /// does not stop the remaining ones; the first failure is returned once all
    /// targets were attempted.
    ///
    /// # Errors
    ///
    /// - [`LabdrawError::Config`] for an invalid export configuration
    /// - [`LabdrawError::InvalidScene`] if the scene fails validation
    /// - [`LabdrawError::Io`] if an output path is not writable
    /// - [`LabdrawError::Export`] if a backend cannot encode the document
    pub fn render(&self, scene: &Scene, targets: &[OutputTarget]) -> Result<(), LabdrawError> {
        self.config
            .export()
            .validate()
            .map_err(LabdrawError::Config)?;

        let document = SceneDocument::draw(scene, self.config.style())?;

        let mut exporters: HashMap<OutputFormat, Box<dyn Exporter>> = HashMap::new();
        let mut first_error = None;

        info!(scene = scene.name(), targets = targets.len(); "Exporting scene");
        for target in targets {
            let exporter = exporters.entry(target.format()).or_insert_with(|| {
                export::exporter_for(
                    target.format(),
                    self.config.export(),
                    self.config.style().font_family(),
                )
            });

            let result = Self::export_target(&document, &**exporter, target);
            match result {
                Ok(()) => info!(path:? = target.path(); "Exported"),
                Err(err) => {
                    error!(path:? = target.path(), err:err; "Export failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Draw a scene and write it to every path, inferring each format from
    /// its file extension. Full-canvas output.
    ///
    /// # Errors
    ///
    /// Returns [`LabdrawError::Config`] before writing anything if any path has
    /// an unsupported extension; otherwise as [`SceneRenderer::render`].
    pub fn render_paths<P: AsRef<Path>>(
        &self,
        scene: &Scene,
        paths: &[P],
    ) -> Result<(), LabdrawError> {
        let targets = paths
            .iter()
            .map(|path| OutputTarget::from_path(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.render(scene, &targets)
    }

    fn export_target(
        document: &SceneDocument,
        exporter: &dyn Exporter,
        target: &OutputTarget,
    ) -> Result<(), LabdrawError> {
        let svg = document.to_svg_string(target.crop());
        let bytes = exporter.encode(&svg)?;
        debug!(
            format:% = exporter.format(),
            crop:? = target.crop(),
            bytes = bytes.len();
            "Target encoded"
        );
        export::write_atomic(target.path(), &bytes)?;
        Ok(())
    }
}
