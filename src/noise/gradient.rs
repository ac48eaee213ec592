//! Multi-octave lattice-gradient (Perlin-style) noise.

use std::f32::consts::PI;
use std::time::Instant;
use glam::Vec2;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{GenerationParams, NoiseError, NoiseGenerator, NoiseKind};
use crate::export::IntensityPolicy;
use crate::field::NoiseField;
use crate::random::RandomStream;

/// Frequency multiplier per octave.
pub const LACUNARITY: f32 = 2.0;
/// Amplitude multiplier per octave.
pub const PERSISTENCE: f32 = 0.5;

/// Smooth cubic interpolation: `(end - start) * (3 - 2w) * w^2 + start`.
#[inline]
pub fn interpolate(start: f32, end: f32, weight: f32) -> f32 {
    (end - start) * (3.0 - weight * 2.0) * weight * weight + start
}

/// One gradient vector per pixel position, indexed with the field's width as stride.
#[derive(Debug, Clone, Default)]
pub struct GradientLattice {
    width: u32,
    gradients: Vec<Vec2>,
}

impl GradientLattice {
    /// Draws `width * height` gradients from `stream` in row-major order.
    ///
    /// Each position consumes two values `u, v` and maps them through
    /// `theta = acos(2u - 1)`, `phi = 2 v pi` to
    /// `(cos(phi) sin(theta), sin(phi) sin(theta))`. The resulting vectors
    /// are at most unit length but generally shorter.
    ///
    /// Must run on a single thread: the draw order is what ties the
    /// lattice to the seed.
    pub fn generate(stream: &mut RandomStream, width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        let mut gradients = Vec::with_capacity(count);

        for _ in 0..count {
            let theta = (2.0 * stream.next_f32() - 1.0).acos();
            let phi = 2.0 * stream.next_f32() * PI;
            gradients.push(Vec2::new(phi.cos() * theta.sin(), phi.sin() * theta.sin()));
        }

        Self { width, gradients }
    }

    /// Returns the gradient vectors in row-major order.
    pub fn gradients(&self) -> &[Vec2] {
        &self.gradients
    }

    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }

    /// Influence of the gradient stored at corner `(col, row)` on the point `current`.
    ///
    /// The corner is looked up at `row * width + col`, so a column equal to
    /// the width reads the first gradient of the next row. Any index past
    /// the end of the lattice contributes no influence.
    pub fn influence(&self, col: u64, row: u64, current: Vec2) -> f32 {
        let idx = row
            .checked_mul(u64::from(self.width))
            .and_then(|offset| offset.checked_add(col));
        let gradient = match idx.and_then(|i| usize::try_from(i).ok()).and_then(|i| self.gradients.get(i)) {
            Some(gradient) => *gradient,
            None => return 0.0,
        };

        let corner = Vec2::new(col as f32, row as f32);
        gradient.dot(current - corner)
    }

    /// Single-octave noise value at the fractional lattice coordinate `current`.
    ///
    /// The result is signed; its magnitude is bounded by `sqrt(2)` since
    /// gradients are at most unit length and corner offsets at most `sqrt(2)`.
    pub fn compute_element(&self, current: Vec2) -> f32 {
        // Corners
        let left = current.x as u64;
        let right = left.saturating_add(1);
        let up = current.y as u64;
        let down = up.saturating_add(1);

        let left_up = self.influence(left, up, current);
        let right_up = self.influence(right, up, current);
        let left_down = self.influence(left, down, current);
        let right_down = self.influence(right, down, current);

        let weight_x = current.x - left as f32;
        let first = interpolate(left_up, right_up, weight_x);
        let second = interpolate(left_down, right_down, weight_x);
        interpolate(first, second, current.y - up as f32)
    }

    /// Fractal sum over `passes` octaves for pixel `(x, y)`.
    ///
    /// Starts at frequency 1 and amplitude 1; each octave scales the
    /// frequency by [`LACUNARITY`] and the amplitude by [`PERSISTENCE`].
    pub fn sample_fractal(&self, x: u32, y: u32, passes: u32, grid_size: u64) -> f32 {
        let grid = grid_size as f32;
        let mut frequency = 1.0f32;
        let mut amplitude = 1.0f32;
        let mut value = 0.0f32;

        for _ in 0..passes {
            let current = Vec2::new(x as f32 * frequency / grid, y as f32 * frequency / grid);
            value += self.compute_element(current) * amplitude;
            frequency *= LACUNARITY;
            amplitude *= PERSISTENCE;
        }

        value
    }
}

/// Perlin-style noise generator.
#[derive(Debug, Clone)]
pub struct GradientNoise {
    stream: RandomStream,
    lattice: GradientLattice,
    field: NoiseField,
}

impl GradientNoise {
    /// Creates an unpopulated generator for `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            stream: RandomStream::new(seed),
            lattice: GradientLattice::default(),
            field: NoiseField::default(),
        }
    }

    /// The lattice built by the last `generate` call.
    pub fn lattice(&self) -> &GradientLattice {
        &self.lattice
    }
}

impl NoiseGenerator for GradientNoise {
    fn kind(&self) -> NoiseKind {
        NoiseKind::Perlin
    }

    fn seed(&self) -> u32 {
        self.stream.seed()
    }

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

        // Setup: sequential, consumes the stream.
        self.lattice = GradientLattice::generate(&mut self.stream, width, height);
        debug!(gradients = self.lattice.len(), "gradient lattice built");

        // Sampling: each pixel reads the finished lattice and writes its own cell.
        let lattice = &self.lattice;
        let stride = width as usize;
        self.field.samples.par_iter_mut().enumerate().for_each(|(i, value)| {
            let x = (i % stride) as u32;
            let y = (i / stride) as u32;
            *value = lattice.sample_fractal(x, y, passes, grid_size);
        });

        info!(
            kind = "perlin",
            width,
            height,
            passes,
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
        IntensityPolicy::GRADIENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::SQRT_2;

    fn generated(seed: u32, width: u32, height: u32, passes: u32, grid_size: u64) -> GradientNoise {
        let mut noise = GradientNoise::new(seed);
        noise.generate(width, height, passes, grid_size).unwrap();
        noise
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(2.0, 6.0, 0.0), 2.0);
        assert_eq!(interpolate(2.0, 6.0, 1.0), 6.0);
        assert!((interpolate(2.0, 6.0, 0.5) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_gradients_at_most_unit_length() {
        let mut stream = RandomStream::new(3);
        let lattice = GradientLattice::generate(&mut stream, 32, 32);
        assert_eq!(lattice.len(), 1024);
        for g in lattice.gradients() {
            assert!(g.length() <= 1.0 + 1e-5, "Gradient {:?} longer than 1", g);
        }
    }

    #[test]
    fn test_lattice_draw_order() {
        let mut stream = RandomStream::new(21);
        let lattice = GradientLattice::generate(&mut stream, 3, 2);

        let mut reference = RandomStream::new(21);
        let u = reference.next_f32();
        let v = reference.next_f32();
        let theta = (2.0 * u - 1.0).acos();
        let phi = 2.0 * v * PI;
        let expected = Vec2::new(phi.cos() * theta.sin(), phi.sin() * theta.sin());

        assert_eq!(lattice.gradients()[0], expected);
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let mut stream = RandomStream::new(8);
        let lattice = GradientLattice::generate(&mut stream, 8, 8);
        for (x, y) in [(0.0, 0.0), (1.0, 2.0), (3.0, 3.0)] {
            assert_eq!(lattice.compute_element(Vec2::new(x, y)), 0.0);
        }
    }

    #[test]
    fn test_out_of_bounds_influence_is_zero() {
        let mut stream = RandomStream::new(8);
        let lattice = GradientLattice::generate(&mut stream, 2, 2);
        let current = Vec2::new(0.5, 0.5);
        assert_eq!(lattice.influence(5, 5, current), 0.0);
        assert_eq!(lattice.influence(0, 2, current), 0.0);
        assert_eq!(lattice.influence(u64::MAX, u64::MAX, current), 0.0);
    }

    #[test]
    fn test_column_past_width_wraps_to_next_row() {
        let mut stream = RandomStream::new(8);
        let lattice = GradientLattice::generate(&mut stream, 2, 2);
        let current = Vec2::new(1.5, 0.25);
        let expected = lattice.gradients()[2].dot(current - Vec2::new(2.0, 0.0));
        assert_eq!(lattice.influence(2, 0, current), expected);
    }

    #[test]
    fn test_scenario_seed_42() {
        let a = generated(42, 4, 4, 1, 2);
        let b = generated(42, 4, 4, 1, 2);
        assert_eq!(a.field().len(), 16);
        assert_eq!(a.field().samples, b.field().samples, "Seed 42 must give the same 16 floats");

        let c = generated(43, 4, 4, 1, 2);
        assert!(
            a.field().samples.iter().zip(&c.field().samples).any(|(x, y)| x != y),
            "Seed 43 should differ from seed 42 in at least one sample"
        );
    }

    #[test]
    fn test_regenerate_same_instance() {
        let mut noise = GradientNoise::new(1234);
        noise.generate(24, 16, 3, 5).unwrap();
        let first = noise.field().clone();
        noise.generate(24, 16, 3, 5).unwrap();
        assert_eq!(&first, noise.field());
    }

    #[test]
    fn test_regenerate_with_new_dimensions() {
        let mut noise = GradientNoise::new(1);
        noise.generate(10, 10, 1, 3).unwrap();
        noise.generate(6, 4, 1, 3).unwrap();
        assert_eq!(noise.field().len(), 24);
        assert_eq!(noise.lattice().len(), 24);
    }

    #[test]
    fn test_single_octave_bound() {
        let noise = generated(5, 48, 48, 1, 7);
        for &v in &noise.field().samples {
            assert!(v.abs() <= SQRT_2 + 1e-4, "Single-octave value {} exceeds bound", v);
        }
        assert!(noise.field().samples.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_multi_octave_bound() {
        let passes = 4;
        let noise = generated(6, 64, 64, passes, 16);
        let amplitude_sum: f32 = (0..passes).map(|i| PERSISTENCE.powi(i as i32)).sum();
        let bound = SQRT_2 * amplitude_sum + 1e-4;
        for &v in &noise.field().samples {
            assert!(v.abs() <= bound, "Value {} exceeds {}", v, bound);
        }
    }

    #[test]
    fn test_zero_passes_gives_flat_field() {
        let noise = generated(9, 8, 8, 0, 4);
        assert!(noise.field().samples.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let noise = generated(31, 20, 12, 3, 4);
        let lattice = noise.lattice();
        for y in 0..12 {
            for x in 0..20 {
                assert_eq!(noise.field().get(x, y), lattice.sample_fractal(x, y, 3, 4));
            }
        }
    }

    #[test]
    fn test_invalid_grid_size() {
        let mut noise = GradientNoise::new(1);
        assert!(noise.generate(4, 4, 1, 0).is_err());
        assert!(!noise.is_generated());
    }
}
