//! Errors raised by noise generators.

use thiserror::Error;

use crate::export::ExportError;

/// Errors that can occur while configuring, generating or saving noise.
#[derive(Error, Debug)]
pub enum NoiseError {
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Unknown noise type '{0}' (expected one of: perlin, voronoi)")]
    UnknownKind(String),
    #[error("No noise has been generated yet; call generate before save")]
    NotGenerated,
    #[error("Failed to save noise: {0}")]
    Export(#[from] ExportError),
}
