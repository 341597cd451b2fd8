//! Labdraw CLI library
//!
//! This module contains the core CLI logic for generating the lab diagrams.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, DiagramSelection};

use std::{fs, path::PathBuf};

use log::info;

use labdraw::{LabdrawError, SceneRenderer};

/// Run the labdraw CLI application
///
/// Generates the selected diagrams into the output directory, creating it if
/// needed, and returns the paths of the written files in generation order.
///
/// # Errors
///
/// Returns `LabdrawError` for:
/// - Configuration loading errors
/// - File I/O errors
/// - Invalid scenes
/// - Export errors
///
/// Generation stops at the first diagram that fails.
pub fn run(args: &Args) -> Result<Vec<PathBuf>, LabdrawError> {
    info!(
        output_dir = args.output_dir,
        diagram:? = args.diagram;
        "Generating diagrams"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dpi) = args.dpi {
        let export = app_config.export().clone().with_dpi(dpi);
        app_config = app_config.with_export(export);
    }

    fs::create_dir_all(&args.output_dir)?;
    let output_dir = PathBuf::from(&args.output_dir);

    let renderer = SceneRenderer::new(app_config);
    let mut written = Vec::new();
    for kind in args.diagram.kinds() {
        let targets = kind.targets(&output_dir);
        renderer.render(&kind.scene(), &targets)?;

        info!(diagram = kind.name(), files = targets.len(); "Diagram generated");
        written.extend(targets.iter().map(|target| target.path().to_path_buf()));
    }

    Ok(written)
}
