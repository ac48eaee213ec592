//! Seeded 2D noise generators.
//!
//! Two unrelated algorithms share one capability pair, `generate` and
//! `save`: lattice-gradient (Perlin-style) noise and nearest-feature-point
//! (Voronoi-style) cellular noise. Every generation runs in two phases: a
//! sequential setup phase that consumes the random stream, then a parallel
//! sampling phase that only reads what setup produced.

mod cellular;
mod config;
mod error;
mod gradient;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::export::{check_png_extension, export_field_png, IntensityPolicy, PngExportOptions};
use crate::field::NoiseField;

pub use cellular::{nearest_distance, scatter_feature_points, CellularNoise};
pub use config::{GenerationParams, NoiseConfig, DEFAULT_GRID_SIZE, DEFAULT_PASSES};
pub use error::NoiseError;
pub use gradient::{interpolate, GradientLattice, GradientNoise, LACUNARITY, PERSISTENCE};

/// The closed set of noise variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Multi-octave lattice-gradient noise.
    Perlin,
    /// Distance to the nearest random feature point.
    Voronoi,
}

impl NoiseKind {
    /// Returns all selectable variants.
    pub fn all() -> [NoiseKind; 2] {
        [NoiseKind::Perlin, NoiseKind::Voronoi]
    }

    /// Returns the name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Voronoi => "voronoi",
        }
    }

    /// Creates an unpopulated generator of this kind.
    pub fn build(self, seed: u32) -> Box<dyn NoiseGenerator> {
        match self {
            NoiseKind::Perlin => Box::new(GradientNoise::new(seed)),
            NoiseKind::Voronoi => Box::new(CellularNoise::new(seed)),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perlin" | "gradient" => Ok(NoiseKind::Perlin),
            "voronoi" | "cellular" => Ok(NoiseKind::Voronoi),
            _ => Err(NoiseError::UnknownKind(s.to_string())),
        }
    }
}

/// A seeded noise generator that fills a [`NoiseField`] and saves it as an image.
///
/// A generator starts unpopulated. `generate` always rebuilds the field
/// from scratch, so calling it again with the same arguments reproduces
/// the same field.
pub trait NoiseGenerator: Send + Sync {
    /// Returns which variant this generator implements.
    fn kind(&self) -> NoiseKind;

    /// Returns the seed the generator's random stream starts from.
    fn seed(&self) -> u32;

    /// Populates the field with `width * height` samples.
    ///
    /// # Arguments
    /// * `width`, `height` - Field dimensions in pixels (both > 0)
    /// * `passes` - Octave count (gradient noise only)
    /// * `grid_size` - Octave base divisor (gradient) or feature-point count (cellular), > 0
    fn generate(
        &mut self,
        width: u32,
        height: u32,
        passes: u32,
        grid_size: u64,
    ) -> Result<(), NoiseError>;

    /// The current field; empty until `generate` has run.
    fn field(&self) -> &NoiseField;

    /// How this generator's raw samples map to grayscale intensities.
    fn intensity_policy(&self) -> IntensityPolicy;

    /// Returns true once `generate` has populated the field.
    fn is_generated(&self) -> bool {
        !self.field().is_empty()
    }

    /// Saves the field as an 8-bit grayscale PNG.
    ///
    /// The extension is checked first; nothing is written on failure.
    fn save(&self, path: &Path) -> Result<(), NoiseError> {
        check_png_extension(path)?;
        if !self.is_generated() {
            return Err(NoiseError::NotGenerated);
        }
        export_field_png(
            self.field(),
            path,
            self.intensity_policy(),
            &PngExportOptions::default(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use tempfile::tempdir;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("perlin".parse::<NoiseKind>().unwrap(), NoiseKind::Perlin);
        assert_eq!("Voronoi".parse::<NoiseKind>().unwrap(), NoiseKind::Voronoi);
        assert_eq!("cellular".parse::<NoiseKind>().unwrap(), NoiseKind::Voronoi);
        assert!(matches!(
            "simplex".parse::<NoiseKind>(),
            Err(NoiseError::UnknownKind(name)) if name == "simplex"
        ));
    }

    #[test]
    fn test_kind_name_round_trip() {
        for kind in NoiseKind::all() {
            assert_eq!(kind.to_string().parse::<NoiseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_build_matches_kind() {
        for kind in NoiseKind::all() {
            let generator = kind.build(5);
            assert_eq!(generator.kind(), kind);
            assert_eq!(generator.seed(), 5);
            assert!(!generator.is_generated());
        }
    }

    #[test]
    fn test_save_before_generate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.png");
        for kind in NoiseKind::all() {
            let result = kind.build(1).save(&path);
            assert!(matches!(result, Err(NoiseError::NotGenerated)));
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_save_checks_extension_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.bmp");
        let result = NoiseKind::Perlin.build(1).save(&path);
        assert!(matches!(
            result,
            Err(NoiseError::Export(ExportError::UnsupportedExtension(_)))
        ));
    }

    #[test]
    fn test_dimension_invariant() {
        let dir = tempdir().unwrap();
        for kind in NoiseKind::all() {
            let mut generator = kind.build(11);
            generator.generate(13, 7, 2, 5).unwrap();
            assert_eq!(generator.field().len(), 13 * 7);

            let path = dir.path().join(format!("{}.png", kind));
            generator.save(&path).unwrap();
            let img = image::open(&path).unwrap();
            assert_eq!((img.width(), img.height()), (13, 7));
        }
    }

    #[test]
    fn test_saved_files_are_byte_identical() {
        let dir = tempdir().unwrap();
        for kind in NoiseKind::all() {
            let a = dir.path().join(format!("{}_a.png", kind));
            let b = dir.path().join(format!("{}_b.png", kind));

            let config = NoiseConfig::new(kind, 77, 40, 30).with_grid_size(8);
            config.generate().unwrap().save(&a).unwrap();
            config.generate().unwrap().save(&b).unwrap();

            assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        }
    }
}
