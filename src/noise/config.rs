//! Configuration for noise generation.

use serde::{Deserialize, Serialize};

use super::{NoiseError, NoiseGenerator, NoiseKind};

/// Default octave base divisor (gradient) / feature-point count (cellular).
pub const DEFAULT_GRID_SIZE: u64 = 400;
/// Default number of octaves for gradient noise.
pub const DEFAULT_PASSES: u32 = 3;

/// Parameters for a single `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Field width in pixels (> 0).
    pub width: u32,
    /// Field height in pixels (> 0).
    pub height: u32,
    /// Octave count for gradient noise; ignored by cellular noise.
    pub passes: u32,
    /// Octave base divisor for gradient noise; feature-point count for cellular noise (> 0).
    pub grid_size: u64,
}

impl GenerationParams {
    pub fn new(width: u32, height: u32, passes: u32, grid_size: u64) -> Self {
        Self {
            width,
            height,
            passes,
            grid_size,
        }
    }

    /// Checks every parameter before any generation work starts.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.width == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "width",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.height == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "height",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.grid_size == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "grid_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Number of samples a field with these dimensions holds.
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Full description of one noise image: which generator, which seed, which parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Noise variant to generate.
    pub kind: NoiseKind,
    /// Seed for the generator's random stream.
    pub seed: u32,
    /// Dimensions and algorithm parameters.
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl NoiseConfig {
    /// Creates a configuration with default passes and grid size.
    pub fn new(kind: NoiseKind, seed: u32, width: u32, height: u32) -> Self {
        Self {
            kind,
            seed,
            params: GenerationParams::new(width, height, DEFAULT_PASSES, DEFAULT_GRID_SIZE),
        }
    }

    /// Sets the octave count.
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.params.passes = passes;
        self
    }

    /// Sets the grid size.
    pub fn with_grid_size(mut self, grid_size: u64) -> Self {
        self.params.grid_size = grid_size;
        self
    }

    pub fn validate(&self) -> Result<(), NoiseError> {
        self.params.validate()
    }

    /// Default output file name: `noise_s{seed}_{width}x{height}_p{passes}_g{grid_size}.png`.
    pub fn default_file_name(&self) -> String {
        format!(
            "noise_s{}_{}x{}_p{}_g{}.png",
            self.seed,
            self.params.width,
            self.params.height,
            self.params.passes,
            self.params.grid_size
        )
    }

    /// Creates an unpopulated generator of the configured kind.
    pub fn build_generator(&self) -> Box<dyn NoiseGenerator> {
        self.kind.build(self.seed)
    }

    /// Validates, builds and runs a generator in one step.
    pub fn generate(&self) -> Result<Box<dyn NoiseGenerator>, NoiseError> {
        self.validate()?;
        let mut generator = self.build_generator();
        let p = &self.params;
        generator.generate(p.width, p.height, p.passes, p.grid_size)?;
        Ok(generator)
    }
}
