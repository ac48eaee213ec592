//! PNG export of noise fields as 8-bit grayscale images.

use std::fs;
use std::path::{Path, PathBuf};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{GrayImage, ImageEncoder};
use thiserror::Error;
use tracing::info;

use super::IntensityPolicy;
use crate::field::NoiseField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported output format for '{}': only .png files are supported", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("Field has no samples to export")]
    EmptyField,
    #[error("Field holds {actual} samples but its dimensions require {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Checks that `path` ends in a `.png` extension (case-insensitive).
pub fn check_png_extension(path: &Path) -> Result<(), ExportError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        _ => Err(ExportError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Maps every sample of `field` through `policy` into a grayscale raster.
///
/// The raster has exactly `field.width x field.height` pixels.
pub fn rasterize(field: &NoiseField, policy: IntensityPolicy) -> Result<GrayImage, ExportError> {
    if field.is_empty() {
        return Err(ExportError::EmptyField);
    }
    let expected = field.width as usize * field.height as usize;
    if field.len() != expected {
        return Err(ExportError::DimensionMismatch {
            expected,
            actual: field.len(),
        });
    }

    let pixels: Vec<u8> = field.samples.iter().map(|&v| policy.intensity(v)).collect();

    GrayImage::from_raw(field.width, field.height, pixels).ok_or(ExportError::DimensionMismatch {
        expected,
        actual: field.len(),
    })
}

/// Rasterizes `field` and encodes it as PNG bytes in memory.
pub fn encode_png(
    field: &NoiseField,
    policy: IntensityPolicy,
    options: &PngExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let img = rasterize(field, policy)?;

    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
    )?;

    Ok(bytes)
}

/// Exports a noise field as an 8-bit grayscale PNG.
///
/// The extension is validated before any encoding work, and the image is
/// fully encoded before the file is created. If the write itself fails the
/// file is removed again, so a failed export never leaves a partial image.
///
/// # Arguments
/// * `field` - The populated field to export
/// * `path` - Output file path, must end in `.png`
/// * `policy` - How raw samples become intensities
/// * `options` - PNG encoder settings
pub fn export_field_png(
    field: &NoiseField,
    path: &Path,
    policy: IntensityPolicy,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    check_png_extension(path)?;

    let bytes = encode_png(field, policy, options)?;

    if let Err(e) = fs::write(path, &bytes) {
        let _ = fs::remove_file(path);
        return Err(e.into());
    }

    info!(
        path = %path.display(),
        width = field.width,
        height = field.height,
        bytes = bytes.len(),
        "wrote grayscale png"
    );

    Ok(())
}
