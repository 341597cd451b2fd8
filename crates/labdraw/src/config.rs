//! Configuration types for labdraw rendering.
//!
//! This module provides configuration structures that control how scenes are
//! styled and exported. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining style and export settings.
//! - [`StyleConfig`] - Controls visual styling options such as the document font.
//! - [`ExportConfig`] - Controls raster resolution and font loading of the backends.
//!
//! # Example
//!
//! ```
//! # use labdraw::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.export().dpi(), 300.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use labdraw_core::color::Color;

/// Font family used when the configuration names none.
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";

/// Raster resolution used when the configuration names none.
pub const DEFAULT_DPI: f32 = 300.0;

/// Top-level application configuration combining style and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style and export configurations.
    ///
    /// # Arguments
    ///
    /// * `style` - Visual styling options.
    /// * `export` - Backend settings.
    pub fn new(style: StyleConfig, export: ExportConfig) -> Self {
        Self { style, export }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Replaces the export configuration.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}

/// Visual styling configuration for rendered scenes.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Document font family.
    #[serde(default)]
    font_family: Option<String>,

    /// Background [`Color`] overriding the scene canvas, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(font_family: Option<String>, background_color: Option<String>) -> Self {
        Self {
            font_family,
            background_color,
        }
    }

    /// Returns the configured font family, or [`DEFAULT_FONT_FAMILY`].
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Settings of the export backends.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Raster resolution in dots per inch.
    #[serde(default = "default_dpi")]
    dpi: f32,

    /// Whether raster and PDF backends load the system fonts.
    #[serde(default = "default_load_system_fonts")]
    load_system_fonts: bool,
}

fn default_dpi() -> f32 {
    DEFAULT_DPI
}

fn default_load_system_fonts() -> bool {
    true
}

impl ExportConfig {
    pub fn new(dpi: f32, load_system_fonts: bool) -> Self {
        Self {
            dpi,
            load_system_fonts,
        }
    }

    /// Returns the raster resolution in dots per inch.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn load_system_fonts(&self) -> bool {
        self.load_system_fonts
    }

    /// Returns a copy with a different raster resolution.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Checks the values that cannot be expressed in the type.
    ///
    /// # Errors
    ///
    /// Returns an error message if the DPI is not a positive finite number.
    pub fn validate(&self) -> Result<(), String> {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            Ok(())
        } else {
            Err(format!("DPI must be a positive number, got {}", self.dpi))
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            load_system_fonts: default_load_system_fonts(),
        }
    }
}
