//! Cellular (Voronoi-style) distance noise.

use std::time::Instant;
use glam::Vec2;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{GenerationParams, NoiseError, NoiseGenerator, NoiseKind};
use crate::export::IntensityPolicy;
use crate::field::NoiseField;
use crate::random::RandomStream;

/// Draws `count` feature points uniformly in `[0, width) x [0, height)`.
///
/// Each point consumes two values from `stream`, x first. Runs on a
/// single thread so the point set depends only on the seed.
pub fn scatter_feature_points(
    stream: &mut RandomStream,
    count: u64,
    width: u32,
    height: u32,
) -> Vec<Vec2> {
    (0..count)
        .map(|_| {
            let x = stream.next_f32() * width as f32;
            let y = stream.next_f32() * height as f32;
            Vec2::new(x, y)
        })
        .collect()
}

/// Euclidean distance from `point` to the closest of `features`.
///
/// Returns `f32::INFINITY` when `features` is empty.
pub fn nearest_distance(point: Vec2, features: &[Vec2]) -> f32 {
    features
        .iter()
        .map(|feature| point.distance(*feature))
        .fold(f32::INFINITY, f32::min)
}

/// Voronoi-style noise generator.
///
/// Each sample is the pixel distance to the nearest feature point. The
/// raw distances are clamped straight to `[0, 255]` on save, so any field
/// whose points are more than 255 px apart saturates to white.
#[derive(Debug, Clone)]
pub struct CellularNoise {
    stream: RandomStream,
    feature_points: Vec<Vec2>,
    field: NoiseField,
}

impl CellularNoise {
    /// Creates an unpopulated generator for `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            stream: RandomStream::new(seed),
            feature_points: Vec::new(),
            field: NoiseField::default(),
        }
    }

    /// The feature points drawn by the last `generate` call.
    pub fn feature_points(&self) -> &[Vec2] {
        &self.feature_points
    }
}

impl NoiseGenerator for CellularNoise {
    fn kind(&self) -> NoiseKind {
        NoiseKind::Voronoi
    }

    fn seed(&self) -> u32 {
        self.stream.seed()
    }

    /// `passes` has no effect on cellular noise.
    fn generate(
        &mut self,
        width: u32,
        height: u32,
        passes: u32,
        grid_size: u64,
    ) -> Result<(), NoiseError> {
        GenerationParams::new(width, height, passes, grid_size).validate()?;
        let start = Instant::now();

        self.field.reset(width, height);
        self.stream.reset();

        self.feature_points = scatter_feature_points(&mut self.stream, grid_size, width, height);
        debug!(feature_points = self.feature_points.len(), "feature points scattered");

        let features = &self.feature_points;
        let stride = width as usize;
        self.field.samples.par_iter_mut().enumerate().for_each(|(i, value)| {
            let point = Vec2::new((i % stride) as f32, (i / stride) as f32);
            *value = nearest_distance(point, features);
        });

        info!(
            kind = "voronoi",
            width,
            height,
            grid_size,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "noise generated"
        );
        Ok(())
    }

    fn field(&self) -> &NoiseField {
        &self.field
    }

    fn intensity_policy(&self) -> IntensityPolicy {
        IntensityPolicy::DirectClamp
    }
}
