//! Error types for labdraw operations.
//!
//! This module provides the main error type [`LabdrawError`] which wraps
//! the error conditions that can occur while rendering and exporting scenes.

use std::io;

use thiserror::Error;

use labdraw_core::scene::SceneError;

/// The main error type for labdraw operations.
#[derive(Debug, Error)]
pub enum LabdrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid scene: {0}")]
    InvalidScene(#[from] SceneError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LabdrawError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Io(err) => Self::Io(err),
            err => Self::Export(Box::new(err)),
        }
    }
}
