//! Export functionality for labdraw scenes.
//!
//! A scene is first drawn into an SVG document ([`svg`]), then each output
//! target encodes that document through an [`Exporter`] backend and writes
//! the bytes to disk.
//!
//! ```text
//! Scene
//!     ↓ draw (svg)
//! SVG document, cropped per target
//!     ↓ encode (Exporter)
//! Bytes in memory
//!     ↓ write_atomic
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg::SvgExporter`] - the document itself
//! - [`raster::PngExporter`] - PNG through `resvg`
//! - [`pdf::PdfExporter`] - PDF through `svg2pdf`
//!
//! # Error Handling
//!
//! Backends return [`Error`]. It converts into [`LabdrawError`] at the crate
//! boundary, where I/O failures stay I/O failures.
//!
//! [`LabdrawError`]: crate::LabdrawError

pub mod pdf;
pub mod raster;
pub mod svg;

use std::{
    fmt, io,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;

use crate::{LabdrawError, config::ExportConfig};

/// Padding of a tight crop when none is given, in inches.
pub const DEFAULT_PAD_INCHES: f32 = 0.1;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    /// Returns the canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    /// Infers the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LabdrawError::Config`] if the path has no extension or an
    /// unsupported one.
    pub fn from_path(path: &Path) -> Result<Self, LabdrawError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                LabdrawError::Config(format!(
                    "Cannot infer output format of `{}`: missing file extension",
                    path.display()
                ))
            })?;

        extension.parse().map_err(|err| {
            LabdrawError::Config(format!("{err} (output `{}`)", path.display()))
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("Unsupported output format `{s}`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which part of the canvas ends up in the output.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Crop {
    /// The full canvas.
    #[default]
    Canvas,
    /// The union of every element's bounds plus `pad_inches` on each side.
    Tight { pad_inches: f32 },
}

impl Crop {
    /// Tight crop with the default padding.
    pub fn tight() -> Self {
        Self::Tight {
            pad_inches: DEFAULT_PAD_INCHES,
        }
    }
}

/// One requested output file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    path: PathBuf,
    format: OutputFormat,
    crop: Crop,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
            crop: Crop::default(),
        }
    }

    /// Creates a target whose format is inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LabdrawError::Config`] for an unknown extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, LabdrawError> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self::new(path, format))
    }

    pub fn with_crop(mut self, crop: Crop) -> Self {
        self.crop = crop;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn crop(&self) -> Crop {
        self.crop
    }
}

/// Abstraction for export backends.
///
/// Implementors turn a complete SVG document into the bytes of their format.
pub trait Exporter {
    /// Returns the format this backend produces.
    fn format(&self) -> OutputFormat;

    /// Encodes an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the document cannot be converted to the
    /// target format.
    fn encode(&self, svg: &str) -> Result<Vec<u8>, Error>;
}

/// Creates the backend for `format`.
pub fn exporter_for(
    format: OutputFormat,
    config: &ExportConfig,
    font_family: &str,
) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Svg => Box::new(svg::SvgExporter),
        OutputFormat::Png => Box::new(raster::PngExporter::new(config, font_family)),
        OutputFormat::Pdf => Box::new(pdf::PdfExporter::new(config, font_family)),
    }
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// The destination only appears once the whole content is on disk, so a
/// failed write never leaves a partial file behind.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temporary file cannot be created, written or
/// moved into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(Error::Io)?;
    file.write_all(bytes).map_err(Error::Io)?;
    file.flush().map_err(Error::Io)?;
    file.persist(path).map_err(|err| Error::Io(err.error))?;

    debug!(path:? = path, bytes = bytes.len(); "Output written");
    Ok(())
}

/// Errors that can occur during export.
///
/// This type is converted into [`LabdrawError`] at the crate boundary via
/// the [`From`] implementation in `crate::error`.
///
/// [`LabdrawError`]: crate::LabdrawError
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_from_path() {
        let format = OutputFormat::from_path(Path::new("out/diagram.png")).unwrap();
        assert_eq!(format, OutputFormat::Png);

        let err = OutputFormat::from_path(Path::new("diagram.bmp")).unwrap_err();
        assert!(matches!(err, LabdrawError::Config(_)));
        assert!(err.to_string().contains("bmp"));

        let err = OutputFormat::from_path(Path::new("diagram")).unwrap_err();
        assert!(matches!(err, LabdrawError::Config(_)));
    }

    #[test]
    fn test_output_target_defaults_to_canvas_crop() {
        let target = OutputTarget::from_path("flow.pdf").unwrap();
        assert_eq!(target.format(), OutputFormat::Pdf);
        assert_eq!(target.crop(), Crop::Canvas);

        let target = target.with_crop(Crop::tight());
        assert_eq!(
            target.crop(),
            Crop::Tight {
                pad_inches: DEFAULT_PAD_INCHES
            }
        );
    }

    #[test]
    fn test_exporter_for_reports_its_format() {
        let config = ExportConfig::new(72.0, false);
        for format in [OutputFormat::Svg, OutputFormat::Png, OutputFormat::Pdf] {
            let exporter = exporter_for(format, &config, "DejaVu Sans");
            assert_eq!(exporter.format(), format);
        }
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        // Only the destination remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!path.exists());
    }
}
