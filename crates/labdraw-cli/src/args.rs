//! Command-line argument definitions for the labdraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every argument is optional; the defaults generate all
//! diagrams into the working directory.

use clap::{Parser, ValueEnum};

use labdraw::diagrams::DiagramKind;

/// Command-line arguments for the lab diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory receiving the generated files
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Which diagrams to generate
    #[arg(short, long, value_enum, default_value_t = DiagramSelection::All)]
    pub diagram: DiagramSelection,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Raster resolution, overriding the configuration
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Diagram choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagramSelection {
    All,
    Architecture,
    Flow,
}

impl DiagramSelection {
    /// The diagrams to generate, in order.
    pub fn kinds(self) -> &'static [DiagramKind] {
        match self {
            Self::All => &DiagramKind::ALL,
            Self::Architecture => &[DiagramKind::Architecture],
            Self::Flow => &[DiagramKind::Flow],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["labdraw"]);
        assert_eq!(args.output_dir, ".");
        assert_eq!(args.diagram, DiagramSelection::All);
        assert!(args.config.is_none());
        assert!(args.dpi.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_selection() {
        let args = Args::parse_from(["labdraw", "--diagram", "flow", "--dpi", "150"]);
        assert_eq!(args.diagram.kinds(), [DiagramKind::Flow]);
        assert_eq!(args.dpi, Some(150.0));

        assert_eq!(
            DiagramSelection::All.kinds(),
            [DiagramKind::Architecture, DiagramKind::Flow]
        );
        assert!(Args::try_parse_from(["labdraw", "--diagram", "sequence"]).is_err());
    }
}
