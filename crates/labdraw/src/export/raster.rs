//! PNG export through `resvg`.
//!
//! SVG user units are points, so a document rendered at `dpi` dots per inch
//! is scaled by `dpi / 72`.

use log::debug;

use super::{Error, Exporter, OutputFormat, svg::POINTS_PER_INCH};
use crate::config::ExportConfig;

/// Rasterizes SVG documents to PNG.
pub struct PngExporter {
    dpi: f32,
    options: usvg::Options<'static>,
}

impl PngExporter {
    pub fn new(config: &ExportConfig, font_family: &str) -> Self {
        let mut options = usvg::Options::default();
        if config.load_system_fonts() {
            options.fontdb_mut().load_system_fonts();
        }
        options.font_family = font_family.to_string();

        Self {
            dpi: config.dpi(),
            options,
        }
    }

    /// Scale from points to pixels.
    pub fn scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }
}

impl Exporter for PngExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, svg: &str) -> Result<Vec<u8>, Error> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|err| Error::Render(format!("Failed to parse SVG: {err}")))?;

        let scale = self.scale();
        let size = tree.size();
        let width = (size.width() * scale).ceil().max(1.0) as u32;
        let height = (size.height() * scale).ceil().max(1.0) as u32;
        debug!(width, height, dpi = self.dpi; "Rasterizing");

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            Error::Render(format!("Failed to allocate a {width}x{height} pixmap"))
        })?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("Failed to encode PNG: {err}")))
    }
}
