//! PDF export through `svg2pdf`.
//!
//! `svg2pdf` carries its own `usvg` version, so documents are parsed with
//! the re-exported one.

use super::{Error, Exporter, OutputFormat};
use crate::config::ExportConfig;

/// Converts SVG documents to single-page vector PDFs.
pub struct PdfExporter {
    options: svg2pdf::usvg::Options<'static>,
}

impl PdfExporter {
    pub fn new(config: &ExportConfig, font_family: &str) -> Self {
        let mut options = svg2pdf::usvg::Options::default();
        if config.load_system_fonts() {
            options.fontdb_mut().load_system_fonts();
        }
        options.font_family = font_family.to_string();

        Self { options }
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn encode(&self, svg: &str) -> Result<Vec<u8>, Error> {
        let tree = svg2pdf::usvg::Tree::from_str(svg, &self.options)
            .map_err(|err| Error::Render(format!("Failed to parse SVG: {err}")))?;

        svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|err| Error::Render(format!("Failed to convert SVG to PDF: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pdf_header() {
        let exporter = PdfExporter::new(&ExportConfig::new(300.0, false), "DejaVu Sans");
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50" width="100" height="50"><rect width="100" height="50" fill="#34a853"/></svg>"##;

        let pdf = exporter.encode(svg).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_encode_invalid_svg() {
        let exporter = PdfExporter::new(&ExportConfig::default(), "DejaVu Sans");
        assert!(exporter.encode("").is_err());
    }
}
