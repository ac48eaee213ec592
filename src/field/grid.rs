//! NoiseField data structure.

use serde::{Deserialize, Serialize};

/// Row-major grid of `f32` noise samples.
///
/// A field is either empty (unpopulated) or holds exactly `width * height`
/// samples, with the sample for pixel `(x, y)` at index `y * width + x`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseField {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample values stored in row-major order.
    pub samples: Vec<f32>,
}

impl NoiseField {
    /// Creates a zero-filled field of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width as usize * height as usize],
        }
    }

    /// Clears the field and reallocates it as a zero-filled `width x height` grid.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.samples.clear();
        self.samples.resize(width as usize * height as usize, 0.0);
        self.width = width;
        self.height = height;
    }

    /// Returns true if the field holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples in the field.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Index into `samples` for pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gets the sample at pixel `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.samples[self.index(x, y)]
    }

    /// Sets the sample at pixel `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.samples[idx] = value;
    }

    /// Computes the min and max sample values.
    ///
    /// Returns `(f32::MAX, f32::MIN)` for an empty field.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for &value in &self.samples {
            min = min.min(value);
            max = max.max(value);
        }

        (min, max)
    }

    /// Arithmetic mean of all samples, or 0 for an empty field.
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&v| f64::from(v)).sum();
        (sum / self.samples.len() as f64) as f32
    }
}
