//! Raster export of noise fields.
//!
//! Rasterization is a pure function of a field and an [`IntensityPolicy`];
//! the encoder knows nothing about which generator produced the field.

mod intensity;
mod png;

pub use intensity::IntensityPolicy;
pub use png::{
    check_png_extension,
    encode_png,
    export_field_png,
    rasterize,
    ExportError,
    PngExportOptions,
};
